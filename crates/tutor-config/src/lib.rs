//! Tutor configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tutor_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("serving on {}:{}", config.server.host, config.server.port);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{TutorConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use tutor_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// The default path gets a documented template written to it when no file
/// exists yet. An explicit path must exist. Either way the result is
/// validated and validation failures are returned as errors.
pub fn load_config(path: Option<&Path>) -> Result<TutorConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_file_not_found() {
        let err = load_config(Some(Path::new("/tmp/definitely_missing_tutor.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn explicit_path_with_invalid_values_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model]\ntemperature = 9.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("model.temperature"));
    }

    #[test]
    fn explicit_path_with_valid_values_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }
}
