//! Configuration file support for the glucose entry tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/gluco/config.toml`.
//! Dosing windows and safety bounds are fixed policy and are not configurable.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub patient: PatientConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Identity of the patient submitting readings
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PatientConfig {
    /// Default username when none is given on the command line
    #[serde(default)]
    pub username: Option<String>,
}

/// Payload rendering options
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("gluco").join("config.toml"))
    }

    /// Resolve the username for a submission.
    ///
    /// An explicit value wins over the configured default; blank values count
    /// as missing.
    pub fn resolve_username(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.patient.username.clone())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "no username given; pass --username or set patient.username".into(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.patient.username.is_none());
        assert!(config.output.pretty);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[patient]
username = "p-042"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.patient.username.as_deref(), Some("p-042"));
        assert!(config.output.pretty); // default
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[patient]\nusername = \"p-007\"\n\n[output]\npretty = false\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.patient.username.as_deref(), Some("p-007"));
        assert!(!loaded.output.pretty);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[patient\nusername = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn test_resolve_username() {
        let mut config = Config::default();
        assert!(matches!(
            config.resolve_username(None),
            Err(Error::Config(_))
        ));

        config.patient.username = Some("from-config".into());
        assert_eq!(config.resolve_username(None).unwrap(), "from-config");
        assert_eq!(
            config.resolve_username(Some("explicit".into())).unwrap(),
            "explicit"
        );
        assert!(config.resolve_username(Some("   ".into())).is_err());
    }
}
