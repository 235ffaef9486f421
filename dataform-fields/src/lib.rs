//! Field descriptors, form snapshots and field plugins
//!
//! `dataform-fields` owns everything a database activity form knows about
//! its fields, without rendering any of them.
//!
//! # Architecture
//!
//! - **Descriptors**: `FieldDescriptor` identifies a question by id, name and type
//! - **Snapshots**: `FormSnapshot::extract` reads live control state through the `Form` trait
//! - **Plugins**: one `FieldPlugin` per field type interprets the snapshot
//! - **Registry**: `FieldPluginRegistry` dispatches by type; unknown types contribute nothing

pub mod error;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use error::{FieldsError, Result};
pub use plugin::FieldPlugin;
pub use plugins::{
    AttachmentSession, FilePlugin, LatLongPlugin, OptionSetPlugin, TextPlugin, OPTION_SEPARATOR,
};
pub use registry::FieldPluginRegistry;
pub use snapshot::{ControlKind, Form, FormControl, FormSnapshot, SnapshotValue};
pub use types::{
    is_blank, BuiltinSearchField, EntryContent, EntryContents, FieldDescriptor, FieldId,
    FieldPayloadItem, FieldValue, FileEntry, BUILTIN_SEARCH_FIELDS,
};
