use crate::error::ConfigError;
use crate::roster::{MalformedPolicy, RosterOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct InputConfig {
    pub roster_path: PathBuf,
    pub reference_path: PathBuf,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct OutputConfig {
    /// Labeled roster; stdout when absent.
    pub out_path: Option<PathBuf>,
    /// Unknown names; not collected when absent.
    pub unknowns_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct ParseConfig {
    pub on_malformed: MalformedPolicy,
    pub roster_has_header: bool,
}

impl ParseConfig {
    pub fn roster_options(&self) -> RosterOptions {
        RosterOptions {
            on_malformed: self.on_malformed,
            has_header: self.roster_has_header,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parse: ParseConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.roster_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "input.roster_path",
            });
        }
        if self.input.reference_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "input.reference_path",
            });
        }

        let inputs = [
            comparable_path(&self.input.roster_path),
            comparable_path(&self.input.reference_path),
        ];
        let outputs = [
            ("output.out_path", self.output.out_path.as_ref()),
            ("output.unknowns_path", self.output.unknowns_path.as_ref()),
            ("output.summary_path", self.output.summary_path.as_ref()),
        ];
        let mut seen: Vec<PathBuf> = Vec::new();
        for &(field, path) in &outputs {
            let Some(path) = path else { continue };
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "path is empty".into(),
                });
            }
            let key = comparable_path(path);
            if inputs.contains(&key) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{} would overwrite an input file", path.display()),
                });
            }
            if seen.contains(&key) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{} is already used by another output", path.display()),
                });
            }
            seen.push(key);
        }
        Ok(())
    }
}

/// Absolute form of `path` with `.` components and repeated separators
/// removed, so `./names.csv` and `names.csv` compare equal. `..` and symlinks
/// are not resolved.
fn comparable_path(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .components()
        .collect()
}
