//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and addresses
//! - Check that the assets directory exists
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from the assets directory check

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("app.assets_dir must not be empty")]
    EmptyAssetsDir,

    #[error("app.assets_dir {0:?} is not a directory")]
    AssetsDirMissing(PathBuf),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.server.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let assets_dir = &config.app.assets_dir;
    if assets_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyAssetsDir);
    } else if !assets_dir.is_dir() {
        errors.push(ValidationError::AssetsDirMissing(assets_dir.clone()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.app.assets_dir = dir.path().to_path_buf();
        (dir, config)
    }

    #[test]
    fn test_defaults_with_existing_assets_dir_pass() {
        let (_dir, config) = valid();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let (_dir, mut config) = valid();
        config.server.bind_address = "not-an-address".into();
        config.server.max_body_size = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_assets_dir_checks() {
        let (_dir, mut config) = valid();
        config.app.assets_dir = PathBuf::new();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyAssetsDir])
        );

        config.app.assets_dir = PathBuf::from("/definitely/not/here");
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::AssetsDirMissing(PathBuf::from(
                "/definitely/not/here"
            ))])
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let (_dir, mut config) = valid();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nope".into())])
        );
    }
}
