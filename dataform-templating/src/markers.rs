//! Render markers written in place of placeholders.
//!
//! A marker is the markup the host turns into a live field widget. Its
//! element name and binding names are configurable.

use dataform_fields::{BuiltinSearchField, FieldDescriptor};
use serde::{Deserialize, Serialize};

/// Prefix of the anchor token written for `[[name#id]]`.
pub const ANCHOR_PREFIX: &str = "field_";

/// How render markers are spelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Element the host renders as a field widget.
    pub element: String,
    /// Translation key prefix of the built-in search inputs' placeholder.
    pub label_key_prefix: String,
    /// Binding of the database record in edit markers.
    pub database_binding: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            element: "mma-mod-data-field".to_string(),
            label_key_prefix: "mma.mod_data.author".to_string(),
            database_binding: "data".to_string(),
        }
    }
}

impl MarkerStyle {
    pub fn search(&self, field: &FieldDescriptor) -> String {
        format!(
            r#"<{el} mode="search" field="fields[{id}]"></{el}>"#,
            el = self.element,
            id = field.id
        )
    }

    pub fn edit(&self, field: &FieldDescriptor) -> String {
        format!(
            r#"<{el} mode="edit" field="fields[{id}]" value="entryContents[{id}]" database="{db}" error="errors[{id}]"></{el}>"#,
            el = self.element,
            id = field.id,
            db = self.database_binding
        )
    }

    pub fn anchor(&self, field: &FieldDescriptor) -> String {
        format!("{ANCHOR_PREFIX}{}", field.id)
    }

    /// Text input for a built-in search field with a translated placeholder.
    pub fn builtin_input(&self, builtin: &BuiltinSearchField) -> String {
        format!(
            r#"<input type="text" name="{name}" placeholder="{{{{ '{prefix}{token}' | translate }}}}">"#,
            name = builtin.name,
            prefix = self.label_key_prefix,
            token = builtin.token
        )
    }
}
