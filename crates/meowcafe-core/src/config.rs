//! Stage config loading - JSON files validated before a session uses them

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use meowcafe_logic::config::{validate_config, ConfigError, StageConfig};

/// Error type for config loading.
#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Parsed, but failed validation.
    Invalid(Vec<ConfigError>),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLoadError::Io(e) => write!(f, "IO error: {}", e),
            ConfigLoadError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigLoadError::Invalid(errors) => {
                write!(f, "invalid config:")?;
                for e in errors {
                    write!(f, " {};", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigLoadError::Io(e) => Some(e),
            ConfigLoadError::Json(e) => Some(e),
            ConfigLoadError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(e: std::io::Error) -> Self {
        ConfigLoadError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigLoadError {
    fn from(e: serde_json::Error) -> Self {
        ConfigLoadError::Json(e)
    }
}

/// Parse and validate a stage config from JSON. Missing fields take their
/// defaults.
pub fn load_config<R: Read>(reader: R) -> Result<StageConfig, ConfigLoadError> {
    let config: StageConfig = serde_json::from_reader(reader)?;
    let errors = validate_config(&config);
    if !errors.is_empty() {
        for e in &errors {
            log::warn!("Config rejected: {}", e);
        }
        return Err(ConfigLoadError::Invalid(errors));
    }
    Ok(config)
}

/// Load a stage config from a JSON file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<StageConfig, ConfigLoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config = load_config(BufReader::new(file))?;
    log::info!("Loaded stage config from {}", path.display());
    Ok(config)
}
