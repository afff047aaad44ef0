//! Crate-level error type for the fallible outer layers.
//!
//! Token parsing and command rendering never fail. Errors only come from
//! reading config and batch files and from (de)serializing them.
use crate::config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io(e) => Error::Io(e),
            ConfigError::Toml(e) => Error::Toml(e),
            ConfigError::Validation(msg) => Error::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_becomes_config_variant() {
        let err = Error::from(ConfigError::Validation("tool.program must not be empty".into()));
        assert!(matches!(&err, Error::Config(msg) if msg == "tool.program must not be empty"));
        assert_eq!(err.to_string(), "Invalid config: tool.program must not be empty");
    }

    #[test]
    fn toml_error_keeps_its_variant() {
        let parse_err = toml::from_str::<toml::Value>("not [[[ toml").unwrap_err();
        let err = Error::from(ConfigError::Toml(parse_err));
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn io_error_keeps_its_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(Error::from(ConfigError::Io(io)), Error::Io(_)));
    }

    #[test]
    fn load_config_errors_convert_with_question_mark() {
        fn load(path: &std::path::Path) -> Result<crate::config::Config> {
            Ok(crate::config::load_config(Some(path))?)
        }
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[processing]\nmax_processes = 0\n").unwrap();
        assert!(matches!(load(&path), Err(Error::Config(_))));
    }
}
