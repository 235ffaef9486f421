//! Core field and payload types.
//!
//! Field descriptors identify the questions of an entry form. Plugins turn a
//! form snapshot into [`FieldValue`]s, which the assembly pipeline encodes
//! into wire-ready [`FieldPayloadItem`]s.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a field within a database activity.
pub type FieldId = i64;

/// One question of the entry form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl FieldDescriptor {
    pub fn new(id: FieldId, name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type_: type_.into(),
        }
    }

    /// Name of the form control rendered for this field (`f_<id>`).
    pub fn control_name(&self) -> String {
        format!("f_{}", self.id)
    }

    /// Name of a secondary control of this field (`f_<id>_<suffix>`).
    pub fn sub_control_name(&self, suffix: &str) -> String {
        format!("f_{}_{}", self.id, suffix)
    }
}

/// A file attached to a field, either freshly picked or already stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    /// Local path of a file that still has to be uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    /// Remote URL of a file that is already stored on the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fileurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

impl FileEntry {
    /// A file picked locally that has not been uploaded yet.
    pub fn local(filename: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            filepath: Some(filepath.into()),
            fileurl: None,
            filesize: None,
            mimetype: None,
        }
    }

    /// A file already stored on the site.
    pub fn stored(filename: impl Into<String>, fileurl: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            filepath: None,
            fileurl: Some(fileurl.into()),
            filesize: None,
            mimetype: None,
        }
    }

    /// True when the file only exists locally.
    pub fn is_local(&self) -> bool {
        self.fileurl.is_none()
    }
}

/// A value produced by a field plugin, before wire encoding.
///
/// `files` is only set by plugins that manage uploads; the pipeline replaces
/// `value` with the upload area id once the files are uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            subfield: None,
            files: None,
        }
    }

    pub fn with_subfield(mut self, subfield: impl Into<String>) -> Self {
        self.subfield = Some(subfield.into());
        self
    }

    pub fn with_files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = Some(files);
        self
    }
}

/// One item of a search or edit payload as sent over the wire.
///
/// `value` always holds JSON text, even for plain strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldPayloadItem {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub subfield: String,
}

/// The stored value of one field in an already saved entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryContent {
    #[serde(rename = "fieldid")]
    pub field_id: FieldId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content4: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileEntry>,
}

impl EntryContent {
    pub fn new(field_id: FieldId, content: impl Into<String>) -> Self {
        Self {
            field_id,
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Main content, empty when nothing was stored.
    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Stored contents of an entry, indexed by field id.
pub type EntryContents = HashMap<FieldId, EntryContent>;

/// A search input that is not backed by a field plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSearchField {
    /// Control and payload name (`fn`, `ln`).
    pub name: &'static str,
    /// Long token name, also the suffix of the label translation key.
    pub token: &'static str,
}

/// The author name inputs every advanced search form offers.
pub const BUILTIN_SEARCH_FIELDS: &[BuiltinSearchField] = &[
    BuiltinSearchField {
        name: "fn",
        token: "firstname",
    },
    BuiltinSearchField {
        name: "ln",
        token: "lastname",
    },
];

/// True for values that carry nothing to save: `null` and the empty string.
///
/// `0` and `false` are real answers and are not blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
