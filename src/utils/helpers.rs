//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::utils::errors::{CampusError, Result};

/// Trim a required text field, rejecting blank input
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CampusError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Reject non-positive capacities
pub fn require_capacity(field: &str, capacity: i32) -> Result<i32> {
    if capacity < 1 {
        return Err(CampusError::Validation(format!(
            "{} must be at least 1, got {}",
            field, capacity
        )));
    }
    Ok(capacity)
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9()\- ]{5,23}[0-9]$").expect("phone pattern is valid")
    })
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone.trim())
}

/// Format an event start for display, e.g. `Mar 4, 2025 6:30 PM`
pub fn format_event_start(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Generate a random lowercase alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Sanitize a file extension for storage paths
pub fn sanitize_extension(extension: &str) -> String {
    extension
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Convert bytes to human readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
