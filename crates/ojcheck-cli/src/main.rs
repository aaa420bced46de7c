//! ojcheck CLI
//!
//! A command-line tool for checking competitive-programming solutions
//! against a problem's sample cases.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ojcheck::{
    CaseLayout, ComparatorConfig, Config, EXAMPLE_CONFIG, Harness, HarnessError, JudgeAdapter,
    LocalJudge, Outcome, PythonRuntime, RubyRuntime, ToolchainRegistry, Verdict, add_case_template,
    create_solution_template,
};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status for compile, runtime, comparison and I/O failures
const EXIT_FAILURE: i32 = 1;

/// Exit status for a wrong answer under strict exit
const EXIT_WRONG_ANSWER: i32 = 2;

#[derive(Parser)]
#[command(name = "ojcheck")]
#[command(about = "Check competitive-programming solutions against sample cases")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the solution and run it against every sample case
    Check {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Exit with status 2 on a wrong answer
        #[arg(long)]
        strict: bool,
    },

    /// Fetch missing sample cases from the judge
    Download {
        #[command(flatten)]
        problem: ProblemArgs,
    },

    /// Submit the solution to the judge
    Submit {
        #[command(flatten)]
        problem: ProblemArgs,
    },

    /// Replace the solution with a template, keeping a .bak of the old source
    Template {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Template file to copy
        #[arg(long, default_value = "template.cpp")]
        template: PathBuf,
    },

    /// Create empty input and output files for a new case
    AddCase {
        #[command(flatten)]
        problem: ProblemArgs,
    },

    /// List available toolchains
    Languages,

    /// Show the effective configuration
    ShowConfig,

    /// Initialize a new configuration file
    Init {
        /// Output path (default: ojcheck.toml)
        #[arg(short, long, default_value = "ojcheck.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
struct ProblemArgs {
    /// Problem ID
    #[arg(value_name = "PROBLEM")]
    problem: String,

    /// Contest ID, prefixed to the problem ID
    #[arg(long)]
    contest: Option<String>,

    /// Solution source file (default: <PROBLEM>.cpp)
    #[arg(short = 'i', long)]
    source: Option<PathBuf>,

    /// Judge name, used in case file names
    #[arg(long, default_value = "local")]
    judge: String,

    /// Directory holding the case files
    #[arg(short = 'd', long)]
    testcase_dir: Option<PathBuf>,

    /// Compare output as floating-point numbers with this tolerance
    #[arg(short = 'e', long, value_name = "EPS")]
    float: Option<f64>,

    /// Run .py sources with python3
    #[arg(long, conflicts_with_all = ["pypy", "pypy3"])]
    py3: bool,

    /// Run .py sources with pypy
    #[arg(long, conflicts_with = "pypy3")]
    pypy: bool,

    /// Run .py sources with pypy3
    #[arg(long)]
    pypy3: bool,

    /// Run .rb sources with the system ruby
    #[arg(long, conflicts_with = "topaz")]
    ruby_system: bool,

    /// Run .rb sources with topaz
    #[arg(long)]
    topaz: bool,
}

impl ProblemArgs {
    /// Fold command-line overrides into the configuration
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(ref dir) = self.testcase_dir {
            config.testcase_directory = dir.clone();
        }
        if let Some(tolerance) = self.float {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                anyhow::bail!("tolerance must be a positive number, got {tolerance}");
            }
            config.comparator = ComparatorConfig::FloatingPoint { tolerance };
        }

        if self.py3 {
            config.interpreters.python = PythonRuntime::Cpython3;
        } else if self.pypy {
            config.interpreters.python = PythonRuntime::Pypy;
        } else if self.pypy3 {
            config.interpreters.python = PythonRuntime::Pypy3;
        }

        if self.ruby_system {
            config.interpreters.ruby = RubyRuntime::System;
        } else if self.topaz {
            config.interpreters.ruby = RubyRuntime::Topaz;
        }

        Ok(())
    }

    fn layout(&self, config: &Config) -> CaseLayout {
        CaseLayout::for_contest(
            &config.testcase_directory,
            &self.judge,
            self.contest.as_deref(),
            &self.problem,
        )
    }

    fn judge(&self, config: &Config) -> LocalJudge {
        if self.judge != "local" {
            warn!(
                judge = %self.judge,
                "no remote adapter for this judge, using local case files only"
            );
        }
        LocalJudge::new(self.layout(config))
    }

    fn source(&self, layout: &CaseLayout) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| layout.default_source())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let work_dir = std::env::current_dir().context("failed to get current directory")?;

    let mut config = if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
        Config::from_file(path).context("failed to load configuration")?
    } else {
        Config::discover(&work_dir).context("failed to load configuration")?
    };

    match cli.command {
        Commands::Check { problem, strict } => {
            problem.apply(&mut config)?;
            let strict = strict || config.strict_exit;
            run_check(&config, &problem, &work_dir, strict).await
        }
        Commands::Download { problem } => {
            problem.apply(&mut config)?;
            run_download(&config, &problem).await
        }
        Commands::Submit { problem } => {
            problem.apply(&mut config)?;
            run_submit(&config, &problem).await
        }
        Commands::Template { problem, template } => {
            problem.apply(&mut config)?;
            run_template(&config, &problem, &template).await
        }
        Commands::AddCase { problem } => {
            problem.apply(&mut config)?;
            run_add_case(&config, &problem).await
        }
        Commands::Languages => {
            list_languages(&config);
            Ok(())
        }
        Commands::ShowConfig => {
            show_config(&config);
            Ok(())
        }
        Commands::Init { output, force } => init_config(&output, force).await,
    }
}

async fn run_check(config: &Config, args: &ProblemArgs, work_dir: &Path, strict: bool) -> Result<()> {
    let judge = args.judge(config);
    let source = args.source(judge.layout());
    let harness = Harness::new(config, work_dir);

    let result = harness.check(&judge, &source).await;
    if let Err(ref e) = result
        && !matches!(e, HarnessError::Compile { .. } | HarnessError::Runtime { .. })
    {
        eprintln!("error: {e}");
    }

    match exit_status(&result, strict) {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

/// Process exit status for a check run.
///
/// Compile and runtime errors have already been reported by the harness.
fn exit_status(result: &Result<Verdict, HarnessError>, strict: bool) -> i32 {
    match result {
        Ok(verdict) if strict && verdict.outcome() == Outcome::WrongAnswer => EXIT_WRONG_ANSWER,
        Ok(_) => 0,
        Err(_) => EXIT_FAILURE,
    }
}

async fn run_download(config: &Config, args: &ProblemArgs) -> Result<()> {
    let judge = args.judge(config);
    let written = judge.download().await.context("download failed")?;
    if written {
        println!("downloaded cases into '{}'", judge.layout().directory().display());
    } else {
        println!("nothing downloaded");
    }
    Ok(())
}

async fn run_submit(config: &Config, args: &ProblemArgs) -> Result<()> {
    let judge = args.judge(config);
    let source = args.source(judge.layout());
    judge.submit(&source).await.context("submission failed")?;
    println!("submitted '{}'", source.display());
    Ok(())
}

async fn run_template(config: &Config, args: &ProblemArgs, template: &Path) -> Result<()> {
    let layout = args.layout(config);
    let source = args.source(&layout);
    let copy = create_solution_template(&source, template)
        .await
        .context("failed to create solution template")?;

    if let Some(backup) = copy.backup {
        println!("saved previous source to '{}'", backup.display());
    }
    println!("created '{}' from '{}'", source.display(), template.display());
    Ok(())
}

async fn run_add_case(config: &Config, args: &ProblemArgs) -> Result<()> {
    let layout = args.layout(config);
    match add_case_template(&layout, config.max_cases)
        .await
        .context("failed to create case files")?
    {
        Some(index) => {
            println!("{}", layout.input_path(index).display());
            println!("{}", layout.output_path(index).display());
            Ok(())
        }
        None => anyhow::bail!("all {} case slots are taken", config.max_cases),
    }
}

fn list_languages(config: &Config) {
    println!("Available toolchains:\n");

    let registry = ToolchainRegistry::from_config(config);
    for toolchain in registry.toolchains() {
        let extensions = if toolchain.extensions().is_empty() {
            "*".to_owned()
        } else {
            toolchain.extensions().join(", ")
        };
        let kind = if toolchain.is_compiled() {
            "compiled"
        } else {
            "interpreted"
        };
        let marker = if registry.is_overridden(toolchain) {
            " [overridden]"
        } else {
            ""
        };
        println!(
            "  {:<10} {:<12} {} ({kind}){marker}",
            toolchain.id(),
            extensions,
            toolchain
        );
    }
}

fn show_config(config: &Config) {
    println!("Test case directory: {}", config.testcase_directory.display());
    println!("Scratch output: {}", config.scratch_output.display());
    println!("Max cases: {}", config.max_cases);
    println!("Diff program: {}", config.diff_program.display());
    println!("Strict exit: {}", config.strict_exit);
    println!();
    match config.comparator {
        ComparatorConfig::Exact => println!("Comparator: exact"),
        ComparatorConfig::FloatingPoint { tolerance } => {
            println!("Comparator: floating point (tolerance {tolerance:e})")
        }
    }
    println!();
    println!("Python runtime: {}", config.interpreters.python);
    println!("Ruby runtime: {}", config.interpreters.ruby);
    let pins = [
        ("Python", &config.interpreters.python_version),
        ("Ruby", &config.interpreters.ruby_version),
        ("Scala", &config.interpreters.scala_version),
    ];
    for (name, pin) in pins {
        if let Some(version) = pin {
            println!("{name} version: {version}");
        }
    }
    println!();
    println!("Toolchain overrides: {}", config.toolchains.len());
    debug!(?config, "effective configuration");
}

async fn init_config(output: &PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
