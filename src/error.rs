//! Unified error types for the gallery application.

use std::fmt;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// Error loading or decoding an image file
    ImageLoad(String),
    /// Error scanning a category directory
    DirectoryScan(String),
    /// Error parsing the configuration file
    Config(String),
    /// No category with the given slug exists
    CategoryNotFound(String),
    /// The category exists but holds no displayable artworks
    EmptyCategory(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ImageLoad(msg) => write!(f, "Image load error: {}", msg),
            AppError::DirectoryScan(msg) => write!(f, "Directory scan error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::CategoryNotFound(slug) => write!(f, "Unknown category: {}", slug),
            AppError::EmptyCategory(slug) => write!(f, "Category has no artworks: {}", slug),
        }
    }
}

impl std::error::Error for AppError {}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageLoad(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::DirectoryScan(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
