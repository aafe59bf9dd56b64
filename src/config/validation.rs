//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{CampusError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_catalog_config(&settings.catalog)?;
    validate_image_config(&settings.images)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(CampusError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(CampusError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CampusError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CampusError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if config.directory.is_empty() || config.file_prefix.is_empty() {
        return Err(CampusError::Config(
            "Log directory and file prefix are required".to_string(),
        ));
    }

    Ok(())
}

/// Validate catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.default_upcoming_limit == Some(0) {
        return Err(CampusError::Config(
            "Default upcoming limit must be greater than 0 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validate image upload configuration
fn validate_image_config(config: &super::ImageConfig) -> Result<()> {
    if config.bucket.is_empty() {
        return Err(CampusError::Config("Image bucket is required".to_string()));
    }

    if config.max_size_bytes == 0 {
        return Err(CampusError::Config(
            "Image size limit must be greater than 0".to_string(),
        ));
    }

    if config.allowed_content_types.is_empty() {
        return Err(CampusError::Config(
            "At least one image content type must be allowed".to_string(),
        ));
    }

    if let Some(bad) = config
        .allowed_content_types
        .iter()
        .find(|content_type| !content_type.starts_with("image/"))
    {
        return Err(CampusError::Config(format!(
            "Invalid image content type: {}",
            bad
        )));
    }

    Ok(())
}
