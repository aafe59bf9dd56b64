//! Event image upload policy
//!
//! Decides whether an upload is acceptable and where in object storage it
//! goes. Moving the bytes is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ImageConfig;
use crate::utils::errors::{CampusError, Result};
use crate::utils::helpers::{format_bytes, generate_random_string, sanitize_extension};

/// Metadata of a file the user picked for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Where an accepted upload should be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ImagePolicy {
    config: ImageConfig,
}

impl ImagePolicy {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, upload: &ImageUpload) -> Result<()> {
        if upload.size_bytes > self.config.max_size_bytes {
            return Err(CampusError::Validation(format!(
                "Image is {}, the limit is {}",
                format_bytes(upload.size_bytes),
                format_bytes(self.config.max_size_bytes)
            )));
        }

        let content_type = upload.content_type.trim().to_ascii_lowercase();
        if !self
            .config
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
        {
            return Err(CampusError::Validation(format!(
                "Unsupported image type: {}",
                upload.content_type
            )));
        }

        Ok(())
    }

    /// Validate `upload` and pick a fresh object path for it
    pub fn object_path(&self, upload: &ImageUpload) -> Result<ObjectLocation> {
        self.validate(upload)?;

        let extension = upload
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| sanitize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| fallback_extension(&upload.content_type).to_string());

        let path = format!(
            "{}/{}.{}",
            self.config.path_prefix.trim_end_matches('/'),
            generate_random_string(12),
            extension
        );
        debug!(bucket = %self.config.bucket, path = %path, "Assigned image object path");

        Ok(ObjectLocation {
            bucket: self.config.bucket.clone(),
            path,
        })
    }
}

fn fallback_extension(content_type: &str) -> &'static str {
    if content_type.eq_ignore_ascii_case("image/png") {
        "png"
    } else {
        "jpg"
    }
}
