use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::non_empty;
use crate::error::Result;
use crate::plugin::FieldPlugin;
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldId, FieldValue, FileEntry};

/// Files attached to the fields of the form being edited.
///
/// The host fills it as the user picks or removes files. A field that was
/// never touched has no entry and keeps the files of the stored entry.
#[derive(Debug, Default)]
pub struct AttachmentSession {
    files: DashMap<FieldId, Vec<FileEntry>>,
}

impl AttachmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the files attached to a field.
    pub fn set_files(&self, field_id: FieldId, files: Vec<FileEntry>) {
        self.files.insert(field_id, files);
    }

    pub fn add_file(&self, field_id: FieldId, file: FileEntry) {
        self.files.entry(field_id).or_default().push(file);
    }

    /// Files attached to a field, `None` if the field was never touched.
    pub fn files(&self, field_id: FieldId) -> Option<Vec<FileEntry>> {
        self.files.get(&field_id).map(|files| files.to_vec())
    }

    pub fn clear(&self, field_id: FieldId) {
        self.files.remove(&field_id);
    }
}

/// File and picture fields. Values are uploaded by the assembly pipeline,
/// which swaps the files for the upload area id.
pub struct FilePlugin {
    session: Arc<AttachmentSession>,
}

impl FilePlugin {
    pub fn new(session: Arc<AttachmentSession>) -> Self {
        Self { session }
    }

    fn current_files(
        &self,
        field: &FieldDescriptor,
        prior: Option<&EntryContent>,
    ) -> Vec<FileEntry> {
        self.session
            .files(field.id)
            .unwrap_or_else(|| prior.map(|p| p.files.clone()).unwrap_or_default())
    }
}

#[async_trait]
impl FieldPlugin for FilePlugin {
    fn field_types(&self) -> &[&'static str] {
        &["file", "picture"]
    }

    fn search_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
    ) -> Option<Vec<FieldValue>> {
        let control = field.control_name();
        let value = non_empty(snapshot, &control)?;
        Some(vec![FieldValue::new(control, value)])
    }

    async fn edit_data(
        &self,
        field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<Option<Vec<FieldValue>>> {
        let files = self.current_files(field, prior);
        let value = FieldValue::new(field.control_name(), Value::Null)
            .with_subfield("file")
            .with_files(files);
        Ok(Some(vec![value]))
    }

    async fn edit_files(
        &self,
        field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<Vec<FileEntry>> {
        Ok(self.current_files(field, prior))
    }

    async fn has_changed(
        &self,
        field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<bool> {
        let current = self.current_files(field, prior);
        let stored = prior.map(|p| p.files.as_slice()).unwrap_or_default();
        let changed = current.len() != stored.len()
            || current
                .iter()
                .zip(stored)
                .any(|(a, b)| a.filename != b.filename);
        Ok(changed)
    }
}
