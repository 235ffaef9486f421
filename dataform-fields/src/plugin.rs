//! The capability set every field type implements.

use async_trait::async_trait;

use crate::error::Result;
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldValue, FileEntry};

/// Per-type interpretation of a form snapshot.
///
/// Every method has a "no contribution" default so a plugin only implements
/// what its field type supports.
#[async_trait]
pub trait FieldPlugin: Send + Sync {
    /// Field types this plugin handles (`"text"`, `"checkbox"`, ...).
    fn field_types(&self) -> &[&'static str];

    /// Search criteria for `field`, or `None` when the user left it empty.
    fn search_data(
        &self,
        _field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
    ) -> Option<Vec<FieldValue>> {
        None
    }

    /// Values to store for `field`. Items may carry files to upload.
    async fn edit_data(
        &self,
        _field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> Result<Option<Vec<FieldValue>>> {
        Ok(None)
    }

    /// Temporary files the edit form holds for `field`.
    async fn edit_files(
        &self,
        _field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> Result<Vec<FileEntry>> {
        Ok(Vec::new())
    }

    /// Whether the user changed `field` compared to the stored entry.
    async fn has_changed(
        &self,
        _field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> Result<bool> {
        Ok(false)
    }
}
