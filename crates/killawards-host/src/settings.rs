//! Runtime settings for the replay host.
//!
//! Read from `killawards-host.yaml` in the working directory when present.
//! Every field has a default, so the file is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::HostAppError;

/// Settings for one replay run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostSettings {
    /// Directory holding the configuration document.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Directory holding the counter document.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json_logs: bool,

    /// Whether the simulated gear provisioning collaborator is loaded.
    #[serde(default = "default_true")]
    pub gear_provisioning: bool,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            json_logs: false,
            gear_provisioning: true,
        }
    }
}

impl HostSettings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// Environment variables override directories:
    /// - `KILLAWARDS_CONFIG_DIR` overrides `config_dir`
    /// - `KILLAWARDS_DATA_DIR` overrides `data_dir`
    ///
    /// # Errors
    ///
    /// Returns [`HostAppError::Settings`] if the file exists but cannot be
    /// read or is not valid YAML.
    pub fn load(path: &Path) -> Result<Self, HostAppError> {
        let mut settings = if path.exists() {
            let contents =
                std::fs::read_to_string(path).map_err(|e| HostAppError::Settings {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
            Self::parse(&contents)?
        } else {
            Self::default()
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`HostAppError::Settings`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, HostAppError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(yaml).map_err(|e| HostAppError::Settings {
            message: format!("failed to parse settings YAML: {e}"),
        })
    }

    /// Override directories with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override directories from `lookup`, keyed by environment variable
    /// name.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("KILLAWARDS_CONFIG_DIR") {
            self.config_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("KILLAWARDS_DATA_DIR") {
            self.data_dir = PathBuf::from(val);
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
config_dir: "/srv/killawards/config"
data_dir: "/srv/killawards/data"
log_level: "debug"
json_logs: true
gear_provisioning: false
"#;
        let settings = HostSettings::parse(yaml).unwrap();
        assert_eq!(settings.config_dir, PathBuf::from("/srv/killawards/config"));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/killawards/data"));
        assert_eq!(settings.log_level, "debug");
        assert!(settings.json_logs);
        assert!(!settings.gear_provisioning);
    }

    #[test]
    fn parse_minimal_yaml() {
        let settings = HostSettings::parse("json_logs: true\n").unwrap();
        assert!(settings.json_logs);
        assert_eq!(settings.config_dir, PathBuf::from("config"));
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.log_level, "info");
        assert!(settings.gear_provisioning);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(HostSettings::parse("").unwrap(), HostSettings::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            HostSettings::parse("json_logs: [not, a, bool]"),
            Err(HostAppError::Settings { .. })
        ));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut expected = HostSettings::default();
        expected.apply_env_overrides();

        let settings = HostSettings::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, expected);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.json_logs);
        assert!(settings.gear_provisioning);
    }

    #[test]
    fn file_settings_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("killawards-host.yaml");
        std::fs::write(&path, "log_level: warn\ngear_provisioning: false\n").unwrap();

        let settings = HostSettings::load(&path).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(!settings.gear_provisioning);
    }

    #[test]
    fn overrides_replace_directories() {
        let mut settings = HostSettings::default();
        settings.apply_overrides(|key| match key {
            "KILLAWARDS_CONFIG_DIR" => Some("/etc/killawards".to_owned()),
            "KILLAWARDS_DATA_DIR" => Some("/var/lib/killawards".to_owned()),
            _ => None,
        });
        assert_eq!(settings.config_dir, PathBuf::from("/etc/killawards"));
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/killawards"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn unset_overrides_keep_directories() {
        let mut settings = HostSettings::default();
        settings.apply_overrides(|_| None);
        assert_eq!(settings, HostSettings::default());
    }
}
