//! Error types for form assembly, change detection and pagination

use std::path::PathBuf;

use dataform_fields::FieldsError;
use dataform_templating::TemplatingError;
use thiserror::Error;

/// Result type for dataform operations
pub type Result<T> = std::result::Result<T, DataformError>;

/// Errors that can occur in dataform operations
#[derive(Debug, Error)]
pub enum DataformError {
    /// A field plugin failed
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// Template substitution failed
    #[error(transparent)]
    Templating(#[from] TemplatingError),

    /// The upload transport rejected the files
    #[error("file upload failed: {message}")]
    Upload { message: String },

    /// The ordered entry ids could not be fetched
    #[error("failed to list entries of database {database_id}: {message}")]
    EntrySource { database_id: i64, message: String },

    /// Configuration parsing failed
    #[error("failed to parse configuration: {source}")]
    Config { source: Box<figment::Error> },

    /// Configuration file format not supported
    #[error("unsupported configuration file format: {}", .path.display())]
    UnsupportedConfigFormat { path: PathBuf },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataformError {
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    pub fn entry_source(database_id: i64, message: impl Into<String>) -> Self {
        Self::EntrySource {
            database_id,
            message: message.into(),
        }
    }
}

impl From<figment::Error> for DataformError {
    fn from(error: figment::Error) -> Self {
        Self::Config {
            source: Box::new(error),
        }
    }
}
