//! Error types for template substitution

use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors that can occur while substituting placeholders
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// A placeholder matcher could not be built
    #[error("invalid placeholder pattern for '{placeholder}': {source}")]
    Pattern {
        placeholder: String,
        source: regex::Error,
    },
}
