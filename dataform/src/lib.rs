//! Form assembly, change detection and entry pagination for database activities
//!
//! A database activity lets authors lay out their entry forms as HTML
//! templates. This crate works on the rendered form through snapshots of
//! its controls:
//!
//! - [`FormAssembler`] builds search and edit payloads, uploading attached
//!   files through a [`FileUploader`]
//! - [`ChangeDetector`] tells whether the user edited anything
//! - [`EntryNavigator`] and [`locate_by_entry`] / [`locate_by_page`] compute
//!   one-entry-per-page navigation over ids from an [`EntryIdSource`]
//!
//! Templates are rendered with [`dataform_templating::TemplateEngine`] and
//! fields are interpreted by plugins from [`dataform_fields`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dataform::{FormAssembler, DataformConfig};
//! use dataform_fields::{AttachmentSession, FieldPluginRegistry};
//!
//! let config = DataformConfig::load()?;
//! let registry = Arc::new(FieldPluginRegistry::with_defaults(Arc::new(AttachmentSession::new())));
//! let assembler = FormAssembler::new(registry, uploader).with_config(config);
//! let payload = assembler
//!     .build_edit_payload(&fields, &form, Some(database_id), &contents)
//!     .await?;
//! ```

pub mod assembly;
pub mod change;
pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod upload;

pub use assembly::FormAssembler;
pub use change::ChangeDetector;
pub use config::{DataformConfig, ENV_PREFIX};
pub use error::{DataformError, Result};
pub use pagination::{
    locate_by_entry, locate_by_page, EntryId, EntryIdSource, EntryNavigator, PaginationRecord,
};
pub use upload::FileUploader;
