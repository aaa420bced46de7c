use std::fmt;
use std::path::Path;

use crate::config::{CommandVars, InterpreterSelection, PythonRuntime, RubyRuntime};

/// Supported solution toolchains.
///
/// Selected from the source file extension; `.py` and `.rb` carry the
/// configured runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    C,
    Cpp,
    Java,
    Io,
    Php,
    Python(PythonRuntime),
    Perl,
    Ruby(RubyRuntime),
    Haskell,
    Scala,
    CSharp,
    Go,
    D,
    OCaml,
    /// The source file is executed directly
    Generic,
}

impl Toolchain {
    /// Every toolchain ID, in listing order
    pub const IDS: [&'static str; 15] = [
        "c", "cpp", "java", "io", "php", "python", "perl", "ruby", "haskell", "scala", "csharp",
        "go", "d", "ocaml", "generic",
    ];

    /// Pick the toolchain for a file extension (without the dot)
    pub fn detect(extension: Option<&str>, selection: &InterpreterSelection) -> Self {
        let Some(ext) = extension else {
            return Toolchain::Generic;
        };
        match ext.to_ascii_lowercase().as_str() {
            "c" => Toolchain::C,
            "cpp" | "cc" | "cxx" => Toolchain::Cpp,
            "java" => Toolchain::Java,
            "io" => Toolchain::Io,
            "php" => Toolchain::Php,
            "py" => Toolchain::Python(selection.python),
            "pl" => Toolchain::Perl,
            "rb" => Toolchain::Ruby(selection.ruby),
            "hs" => Toolchain::Haskell,
            "scala" => Toolchain::Scala,
            "cs" => Toolchain::CSharp,
            "go" => Toolchain::Go,
            "d" => Toolchain::D,
            "ml" => Toolchain::OCaml,
            _ => Toolchain::Generic,
        }
    }

    /// All toolchains, with runtimes taken from `selection`
    pub fn all(selection: &InterpreterSelection) -> Vec<Self> {
        vec![
            Toolchain::C,
            Toolchain::Cpp,
            Toolchain::Java,
            Toolchain::Io,
            Toolchain::Php,
            Toolchain::Python(selection.python),
            Toolchain::Perl,
            Toolchain::Ruby(selection.ruby),
            Toolchain::Haskell,
            Toolchain::Scala,
            Toolchain::CSharp,
            Toolchain::Go,
            Toolchain::D,
            Toolchain::OCaml,
            Toolchain::Generic,
        ]
    }

    /// Stable identifier used for configuration overrides
    pub fn id(&self) -> &'static str {
        match self {
            Toolchain::C => "c",
            Toolchain::Cpp => "cpp",
            Toolchain::Java => "java",
            Toolchain::Io => "io",
            Toolchain::Php => "php",
            Toolchain::Python(_) => "python",
            Toolchain::Perl => "perl",
            Toolchain::Ruby(_) => "ruby",
            Toolchain::Haskell => "haskell",
            Toolchain::Scala => "scala",
            Toolchain::CSharp => "csharp",
            Toolchain::Go => "go",
            Toolchain::D => "d",
            Toolchain::OCaml => "ocaml",
            Toolchain::Generic => "generic",
        }
    }

    /// File extensions mapped to this toolchain
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Toolchain::C => &["c"],
            Toolchain::Cpp => &["cpp", "cc", "cxx"],
            Toolchain::Java => &["java"],
            Toolchain::Io => &["io"],
            Toolchain::Php => &["php"],
            Toolchain::Python(_) => &["py"],
            Toolchain::Perl => &["pl"],
            Toolchain::Ruby(_) => &["rb"],
            Toolchain::Haskell => &["hs"],
            Toolchain::Scala => &["scala"],
            Toolchain::CSharp => &["cs"],
            Toolchain::Go => &["go"],
            Toolchain::D => &["d"],
            Toolchain::OCaml => &["ml"],
            Toolchain::Generic => &[],
        }
    }

    /// Check if the toolchain has a build step
    pub fn is_compiled(&self) -> bool {
        matches!(
            self,
            Toolchain::C
                | Toolchain::Cpp
                | Toolchain::Java
                | Toolchain::Haskell
                | Toolchain::Scala
                | Toolchain::CSharp
                | Toolchain::Go
                | Toolchain::D
                | Toolchain::OCaml
        )
    }

    /// Built-in compile command, `None` for interpreted toolchains
    pub fn compile_command(&self, vars: &CommandVars<'_>) -> Option<Vec<String>> {
        let CommandVars {
            source,
            binary,
            dir,
            ..
        } = *vars;
        let args: Vec<&str> = match self {
            Toolchain::C => vec![
                "gcc",
                "-O2",
                "-o",
                binary,
                "-Wno-deprecated",
                "-Wall",
                source,
            ],
            Toolchain::Cpp => vec![
                "g++",
                "-O2",
                "-o",
                binary,
                "-Wno-deprecated",
                "-Wall",
                "-std=c++17",
                source,
            ],
            Toolchain::Java => vec!["javac", "-d", dir, source],
            Toolchain::Haskell => vec!["ghc", "-o", binary, source],
            Toolchain::Scala => vec!["scalac", "-d", dir, source],
            Toolchain::CSharp => {
                let exe = csharp_artifact(dir);
                return Some(vec![
                    "csc".to_owned(),
                    "-nologo".to_owned(),
                    format!("-out:{exe}"),
                    source.to_owned(),
                ]);
            }
            Toolchain::Go => vec!["go", "build", "-o", binary, source],
            Toolchain::D => {
                let mut args: Vec<String> =
                    ["dmd", "-m64", "-w", "-wi", "-O", "-release", "-inline"]
                        .into_iter()
                        .map(str::to_owned)
                        .collect();
                args.push(format!("-of{binary}"));
                args.push(source.to_owned());
                return Some(args);
            }
            Toolchain::OCaml => vec!["ocamlc", "-o", binary, source],
            _ => return None,
        };
        Some(args.into_iter().map(str::to_owned).collect())
    }

    /// Built-in run command
    pub fn run_command(&self, vars: &CommandVars<'_>) -> Vec<String> {
        let CommandVars {
            source,
            binary,
            class,
            dir,
        } = *vars;
        let args: Vec<&str> = match self {
            Toolchain::Java => vec!["java", "-Xmx256m", "-cp", dir, class],
            Toolchain::Scala => vec!["scala", "-J-Xmx1024m", "-cp", dir, "Main"],
            Toolchain::Io => vec!["io", source],
            Toolchain::Php => vec!["php", source],
            Toolchain::Python(runtime) => vec![runtime.interpreter(), source],
            Toolchain::Perl => vec!["perl", source],
            Toolchain::Ruby(runtime) => vec![runtime.interpreter(), source],
            Toolchain::Generic => vec![source],
            Toolchain::CSharp => return vec![csharp_artifact(dir)],
            _ => vec![binary],
        };
        args.into_iter().map(str::to_owned).collect()
    }

    /// Version manager variables pinning the interpreter for this toolchain
    pub fn version_pins(&self, selection: &InterpreterSelection) -> Vec<(&'static str, String)> {
        let pin = match self {
            Toolchain::Python(_) => selection
                .python_version
                .clone()
                .map(|v| ("PYENV_VERSION", v)),
            Toolchain::Ruby(RubyRuntime::System) => Some((
                "RBENV_VERSION",
                selection
                    .ruby_version
                    .clone()
                    .unwrap_or_else(|| "system".to_owned()),
            )),
            Toolchain::Ruby(_) => selection
                .ruby_version
                .clone()
                .map(|v| ("RBENV_VERSION", v)),
            Toolchain::Scala => selection
                .scala_version
                .clone()
                .map(|v| ("SCALAENV_VERSION", v)),
            _ => None,
        };
        pin.into_iter().collect()
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::C => write!(f, "C (GCC)"),
            Toolchain::Cpp => write!(f, "C++ (GCC)"),
            Toolchain::Java => write!(f, "Java"),
            Toolchain::Io => write!(f, "Io"),
            Toolchain::Php => write!(f, "PHP"),
            Toolchain::Python(runtime) => write!(f, "Python ({runtime})"),
            Toolchain::Perl => write!(f, "Perl"),
            Toolchain::Ruby(runtime) => write!(f, "Ruby ({runtime})"),
            Toolchain::Haskell => write!(f, "Haskell (GHC)"),
            Toolchain::Scala => write!(f, "Scala"),
            Toolchain::CSharp => write!(f, "C#"),
            Toolchain::Go => write!(f, "Go"),
            Toolchain::D => write!(f, "D (DMD)"),
            Toolchain::OCaml => write!(f, "OCaml"),
            Toolchain::Generic => write!(f, "Executable"),
        }
    }
}

/// C# builds a fixed `a.exe` next to the other artifacts
fn csharp_artifact(dir: &str) -> String {
    Path::new(dir).join("a.exe").to_string_lossy().into_owned()
}
