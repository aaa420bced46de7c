use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Python implementation used for `.py` sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PythonRuntime {
    #[default]
    Cpython2,
    Cpython3,
    Pypy,
    Pypy3,
}

impl PythonRuntime {
    /// Interpreter executable name
    pub fn interpreter(self) -> &'static str {
        match self {
            PythonRuntime::Cpython2 => "python",
            PythonRuntime::Cpython3 => "python3",
            PythonRuntime::Pypy => "pypy",
            PythonRuntime::Pypy3 => "pypy3",
        }
    }
}

impl fmt::Display for PythonRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PythonRuntime::Cpython2 => "cpython2",
            PythonRuntime::Cpython3 => "cpython3",
            PythonRuntime::Pypy => "pypy",
            PythonRuntime::Pypy3 => "pypy3",
        };
        write!(f, "{s}")
    }
}

/// Ruby implementation used for `.rb` sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubyRuntime {
    /// Whatever `ruby` resolves to
    #[default]
    Mri,
    /// The system ruby, bypassing any rbenv selection
    System,
    Topaz,
}

impl RubyRuntime {
    /// Interpreter executable name
    pub fn interpreter(self) -> &'static str {
        match self {
            RubyRuntime::Mri | RubyRuntime::System => "ruby",
            RubyRuntime::Topaz => "topaz",
        }
    }
}

impl fmt::Display for RubyRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RubyRuntime::Mri => "mri",
            RubyRuntime::System => "system",
            RubyRuntime::Topaz => "topaz",
        };
        write!(f, "{s}")
    }
}

/// Interpreter selection for extensions with more than one runtime.
///
/// Version pins are exported to the child process through the matching
/// version manager variable (`PYENV_VERSION`, `RBENV_VERSION`,
/// `SCALAENV_VERSION`). The harness process environment is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterpreterSelection {
    #[serde(default)]
    pub python: PythonRuntime,

    #[serde(default)]
    pub ruby: RubyRuntime,

    /// Value for `PYENV_VERSION`
    #[serde(default)]
    pub python_version: Option<String>,

    /// Value for `RBENV_VERSION`; `system` runtime implies "system"
    #[serde(default)]
    pub ruby_version: Option<String>,

    /// Value for `SCALAENV_VERSION`
    #[serde(default)]
    pub scala_version: Option<String>,
}

/// User supplied replacement for a toolchain's built-in commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolchainOverride {
    /// Compile command with placeholders.
    /// Placeholders: {source}, {binary}, {class}, {dir}
    #[serde(default)]
    pub compile: Option<Vec<String>>,

    /// Run command with the same placeholders
    #[serde(default)]
    pub run: Option<Vec<String>>,

    /// Extra environment variables for both steps
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Values substituted into command templates
#[derive(Debug, Clone, Copy)]
pub struct CommandVars<'a> {
    pub source: &'a str,
    pub binary: &'a str,
    pub class: &'a str,
    pub dir: &'a str,
}

impl ToolchainOverride {
    /// Expand placeholders in the given command
    pub fn expand_command(command: &[String], vars: &CommandVars<'_>) -> Vec<String> {
        command.iter().map(|arg| vars.expand(arg)).collect()
    }
}

impl CommandVars<'_> {
    /// Substitute placeholders in one template argument.
    ///
    /// Substituted values are never rescanned, so paths containing
    /// placeholder-like text come through unchanged.
    pub fn expand(&self, template: &str) -> String {
        let placeholders = [
            ("{source}", self.source),
            ("{binary}", self.binary),
            ("{class}", self.class),
            ("{dir}", self.dir),
        ];

        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            expanded.push_str(&rest[..start]);
            rest = &rest[start..];
            match placeholders
                .iter()
                .find(|(name, _)| rest.starts_with(name))
            {
                Some((name, value)) => {
                    expanded.push_str(value);
                    rest = &rest[name.len()..];
                }
                None => {
                    expanded.push('{');
                    rest = &rest[1..];
                }
            }
        }
        expanded.push_str(rest);
        expanded
    }
}
