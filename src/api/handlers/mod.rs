//! API handlers and shared utilities for Raporto.
//!
//! This module organizes the service's route handlers and provides common
//! functions for input validation and token timestamps.

pub mod auth;
pub mod geocode;
pub mod health;
pub mod reports;
pub mod root;

use regex::Regex;
use std::time::SystemTime;

/// Lightweight email sanity check used before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Unix seconds for token issue and expiry stamps.
pub fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
