//! Error types for style construction

use thiserror::Error;

/// Errors produced while building colors and path styles
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Unknown color: {0:?} (expected a CSS color name or #rgb/#rrggbb)")]
    InvalidColor(String),

    #[error("Opacity out of range: {field} = {value} (expected 0.0..=1.0)")]
    InvalidOpacity { field: &'static str, value: f64 },

    #[error("Stroke weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),
}

/// Result type alias for style operations
pub type Result<T> = std::result::Result<T, StyleError>;
