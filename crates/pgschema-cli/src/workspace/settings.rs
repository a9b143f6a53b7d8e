use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::WorkspaceResult;

/// Explicit run configuration: where schemas are read from and where the
/// sample dataset is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub schemas_dir: PathBuf,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schemas_dir: PathBuf::from("schemas"),
            output: PathBuf::from("data").join("data.json"),
        }
    }
}

impl Settings {
    /// Apply command-line overrides on top of file or default values.
    pub fn with_overrides(mut self, schemas_dir: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(schemas_dir) = schemas_dir {
            self.schemas_dir = schemas_dir;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }
}

/// Load settings from a TOML file, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> WorkspaceResult<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
