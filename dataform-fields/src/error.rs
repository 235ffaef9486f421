//! Error types for field plugins

use thiserror::Error;

/// Result type for field plugin operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while a plugin interprets a form snapshot
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A plugin could not produce data for its field
    #[error("plugin '{field_type}' failed on field '{field}': {message}")]
    PluginFailed {
        field_type: String,
        field: String,
        message: String,
    },

    /// A plugin was registered twice for the same field type
    #[error("duplicate plugin for field type: {field_type}")]
    DuplicatePlugin { field_type: String },

    /// A snapshot value had a shape the plugin cannot read
    #[error("unexpected value for control '{control}': expected {expected}")]
    UnexpectedValue { control: String, expected: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldsError {
    /// Build a `PluginFailed` error for a field.
    pub fn plugin_failed(
        field_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PluginFailed {
            field_type: field_type.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
