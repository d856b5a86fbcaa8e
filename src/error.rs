// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling across the store, session and submission layers.
#[derive(Debug)]
pub enum AppError {
    // Local cache read/write failures
    Storage(String),

    // Seed fetch/parse failures (recovered by the store with fallback data)
    SeedLoad(String),

    // Form or record validation failures
    Validation(String),

    // Missing resource or empty selection slot
    NotFound(String),

    // Duplicate entries in interactive lists (e.g. repeated competency)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts `std::io::Error` into `AppError::Storage`.
/// Allows using `?` operator on cache file operations.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::SeedLoad(err.to_string())
    }
}
