//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Local config: `<data_dir>/.orgchart.toml` (directory of the input table)
//! 4. Environment variables: `ORGCHART_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{ViewMode, DEFAULT_COMPANY, UNASSIGNED_GROUP};

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub company_name: Option<String>,
    pub unassigned_group: Option<String>,
    pub default_view: Option<ViewMode>,
}

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Company name for rows without one (default: CardX)
    pub company_name: String,
    /// Label of the container for employees without a group
    pub unassigned_group: String,
    /// View used when none is given on the command line
    pub default_view: ViewMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            unassigned_group: UNASSIGNED_GROUP.to_string(),
            default_view: ViewMode::Reporting,
        }
    }
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Get the path to the local config file in a data directory.
pub fn local_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".orgchart.toml")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            company_name: overlay
                .company_name
                .clone()
                .unwrap_or_else(|| self.company_name.clone()),
            unassigned_group: overlay
                .unassigned_group
                .clone()
                .unwrap_or_else(|| self.unassigned_group.clone()),
            default_view: overlay.default_view.unwrap_or(self.default_view),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `data_dir` - Optional directory of the input table for local config
    pub fn load(data_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = data_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply ORGCHART_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGCHART")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("company_name") {
            settings.company_name = val;
        }
        if let Ok(val) = config.get_string("unassigned_group") {
            settings.unassigned_group = val;
        }
        if let Ok(val) = config.get_string("default_view") {
            settings.default_view = val.parse()?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgchart configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/orgchart/orgchart.toml
#   Local:  <data_dir>/.orgchart.toml   (next to the employee table)
#   Env:    ORGCHART_* environment variables

# Company name used for rows without a Company value
# company_name = "CardX"

# Container label for employees without a Group
# unassigned_group = "Unassigned Group"

# View used when --view is not given: "reporting" or "organization"
# default_view = "reporting"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unspecified_values() {
        let base = Settings::default();
        let merged = base.merge_with(&RawSettings {
            company_name: Some("Acme".into()),
            ..RawSettings::default()
        });
        assert_eq!(merged.company_name, "Acme");
        assert_eq!(merged.unassigned_group, UNASSIGNED_GROUP);
        assert_eq!(merged.default_view, ViewMode::Reporting);
    }

    #[test]
    fn test_template_parses_as_empty_raw_settings() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.company_name.is_none());
        assert!(raw.default_view.is_none());
    }
}
