//! Configuration file loading for ojcheck
//!
//! Handles locating, loading and parsing configuration files using the config crate.

use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, File, FileFormat};
use tracing::debug;

use crate::config::{ComparatorConfig, Config, ConfigError, HOME_CONFIG_NAME, LOCAL_CONFIG_NAME};
use crate::program::Toolchain;

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config = ConfigBuilder::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Find the configuration file to use when none was given explicitly.
    ///
    /// Looks for `ojcheck.toml` in `dir`, then `.ojcheck.toml` in `home`.
    pub fn locate(dir: &Path, home: Option<&Path>) -> Option<PathBuf> {
        let local = dir.join(LOCAL_CONFIG_NAME);
        if local.is_file() {
            return Some(local);
        }
        let home = home?.join(HOME_CONFIG_NAME);
        home.is_file().then_some(home)
    }

    /// Load the discovered configuration, or the embedded default
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        match Self::locate(dir, home.as_deref()) {
            Some(path) => {
                debug!(?path, "found configuration file");
                Self::from_file(path)
            }
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cases == 0 {
            return Err(ConfigError::Invalid(
                "max_cases must be greater than zero".to_owned(),
            ));
        }

        if let ComparatorConfig::FloatingPoint { tolerance } = self.comparator
            && !(tolerance.is_finite() && tolerance > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a positive number, got {tolerance}"
            )));
        }

        for (id, over) in &self.toolchains {
            if !Toolchain::IDS.contains(&id.as_str()) {
                return Err(ConfigError::UnknownToolchain(id.clone()));
            }
            if let Some(ref compile) = over.compile
                && compile.is_empty()
            {
                return Err(ConfigError::Invalid(format!(
                    "toolchain '{id}' has empty compile command"
                )));
            }
            if let Some(ref run) = over.run
                && run.is_empty()
            {
                return Err(ConfigError::Invalid(format!(
                    "toolchain '{id}' has empty run command"
                )));
            }
        }

        Ok(())
    }
}
