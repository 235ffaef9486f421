//! Search and edit payload assembly.
//!
//! Every operation takes one snapshot of the form and asks each field's
//! plugin for its share. Edit work is fanned out over all fields at once
//! and joined before returning; items keep field order whatever order the
//! plugins finish in. Any failure aborts the whole payload.

use std::sync::Arc;

use dataform_fields::{
    is_blank, BuiltinSearchField, EntryContent, EntryContents, FieldDescriptor, FieldPayloadItem,
    FieldPluginRegistry, FieldValue, FileEntry, Form, FormSnapshot, BUILTIN_SEARCH_FIELDS,
};
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::DataformConfig;
use crate::error::Result;
use crate::logging::Pretty;
use crate::upload::FileUploader;

/// Builds wire payloads from a live form.
pub struct FormAssembler {
    registry: Arc<FieldPluginRegistry>,
    uploader: Arc<dyn FileUploader>,
    config: DataformConfig,
    builtins: &'static [BuiltinSearchField],
    site_id: Option<String>,
}

impl FormAssembler {
    pub fn new(registry: Arc<FieldPluginRegistry>, uploader: Arc<dyn FileUploader>) -> Self {
        Self {
            registry,
            uploader,
            config: DataformConfig::default(),
            builtins: BUILTIN_SEARCH_FIELDS,
            site_id: None,
        }
    }

    pub fn with_config(mut self, config: DataformConfig) -> Self {
        self.config = config;
        self
    }

    /// Site files are uploaded to; the transport's current site when unset.
    pub fn with_site(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Replace the table of non-pluggable search inputs.
    pub fn with_builtins(mut self, builtins: &'static [BuiltinSearchField]) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn registry(&self) -> &Arc<FieldPluginRegistry> {
        &self.registry
    }

    /// Advanced search criteria entered in `form`.
    pub fn build_search_payload<F: Form + ?Sized>(
        &self,
        fields: &[FieldDescriptor],
        form: &F,
    ) -> Result<Vec<FieldPayloadItem>> {
        let snapshot = FormSnapshot::extract(form);
        let mut payload = Vec::new();

        for field in fields {
            let Some(data) = self.registry.field_search_data(field, &snapshot) else {
                continue;
            };
            for item in data {
                payload.push(FieldPayloadItem {
                    value: serde_json::to_string(&item.value)?,
                    name: item.name,
                    subfield: item.subfield.unwrap_or_default(),
                });
            }
        }

        for builtin in self.builtins {
            if let Some(value) = snapshot.get(builtin.name).filter(|v| v.is_truthy()) {
                payload.push(FieldPayloadItem {
                    name: builtin.name.to_string(),
                    value: serde_json::to_string(value)?,
                    subfield: String::new(),
                });
            }
        }

        debug!(items = payload.len(), "search payload assembled");
        Ok(payload)
    }

    /// Values to save for the entry being edited in `form`.
    ///
    /// When `database_id` is given, files attached to an item are uploaded
    /// first and the item's value becomes the id of their draft area.
    pub async fn build_edit_payload<F: Form + ?Sized>(
        &self,
        fields: &[FieldDescriptor],
        form: &F,
        database_id: Option<i64>,
        contents: &EntryContents,
    ) -> Result<Vec<FieldPayloadItem>> {
        let snapshot = FormSnapshot::extract(form);

        let pending = fields.iter().map(|field| {
            let prior = contents.get(&field.id);
            self.field_edit_payload(field, &snapshot, database_id, prior)
        });
        let per_field = try_join_all(pending).await?;

        let payload: Vec<FieldPayloadItem> = per_field.into_iter().flatten().collect();
        debug!(items = payload.len(), ?database_id, "edit payload assembled");
        trace!("edit payload: {}", Pretty(&payload));
        Ok(payload)
    }

    /// Temporary files held by the edit form, in field order.
    pub async fn collect_edit_temp_files<F: Form + ?Sized>(
        &self,
        fields: &[FieldDescriptor],
        form: &F,
        contents: &EntryContents,
    ) -> Result<Vec<FileEntry>> {
        let snapshot = FormSnapshot::extract(form);

        let pending = fields.iter().map(|field| {
            let prior = contents.get(&field.id);
            self.registry.field_edit_files(field, &snapshot, prior)
        });
        let per_field = try_join_all(pending).await?;

        Ok(per_field.into_iter().flatten().collect())
    }

    async fn field_edit_payload(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        database_id: Option<i64>,
        prior: Option<&EntryContent>,
    ) -> Result<Vec<FieldPayloadItem>> {
        let registry = &self.registry;
        let Some(data) = registry.field_edit_data(field, snapshot, prior).await? else {
            return Ok(Vec::new());
        };

        let pending = data
            .into_iter()
            .map(|item| self.encode_edit_item(field, item, database_id));
        try_join_all(pending).await
    }

    async fn encode_edit_item(
        &self,
        field: &FieldDescriptor,
        mut item: FieldValue,
        database_id: Option<i64>,
    ) -> Result<FieldPayloadItem> {
        let files = item.files.take();
        if let (Some(database_id), Some(files)) = (database_id, files) {
            let item_id = self
                .uploader
                .upload_files(
                    &files,
                    &self.config.component,
                    self.config.upload_item_id,
                    self.site_id.as_deref(),
                )
                .await
                .inspect_err(|err| {
                    warn!(field = %field.name, database_id, error = %err, "file upload failed");
                })?;
            debug!(field = %field.name, files = files.len(), item_id, "uploaded field files");
            item.value = Value::from(item_id);
        }

        // Blank values go out as empty strings, everything else as JSON text.
        let value = if is_blank(&item.value) {
            String::new()
        } else {
            serde_json::to_string(&item.value)?
        };

        Ok(FieldPayloadItem {
            name: item.name,
            value,
            subfield: item.subfield.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dataform_fields::{AttachmentSession, FormControl};

    struct NoUpload;

    #[async_trait]
    impl FileUploader for NoUpload {
        async fn upload_files(
            &self,
            _files: &[FileEntry],
            _component: &str,
            _item_id: Option<i64>,
            _site_id: Option<&str>,
        ) -> Result<i64> {
            Err(crate::DataformError::upload("uploads disabled"))
        }
    }

    fn assembler() -> FormAssembler {
        let registry = FieldPluginRegistry::with_defaults(Arc::new(AttachmentSession::new()));
        FormAssembler::new(Arc::new(registry), Arc::new(NoUpload))
    }

    #[test]
    fn search_values_are_json_text() {
        let fields = vec![FieldDescriptor::new(1, "Title", "text")];
        let form = vec![FormControl::text("f_1", "hello")];
        let payload = assembler().build_search_payload(&fields, &form).unwrap();
        assert_eq!(
            payload,
            vec![FieldPayloadItem {
                name: "f_1".into(),
                value: "\"hello\"".into(),
                subfield: String::new(),
            }]
        );
    }

    #[test]
    fn builtin_author_fields_follow_plugin_items() {
        let fields = vec![FieldDescriptor::new(1, "Title", "text")];
        let form = vec![
            FormControl::text("ln", "Lovelace"),
            FormControl::text("fn", ""),
            FormControl::text("f_1", "engine"),
        ];
        let payload = assembler().build_search_payload(&fields, &form).unwrap();
        let names: Vec<_> = payload.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["f_1", "ln"]);
        assert_eq!(payload[1].value, "\"Lovelace\"");
    }

    #[tokio::test]
    async fn files_are_not_uploaded_without_database() {
        let fields = vec![FieldDescriptor::new(4, "Doc", "file")];
        let form: Vec<FormControl> = Vec::new();
        let payload = assembler()
            .build_edit_payload(&fields, &form, None, &EntryContents::new())
            .await
            .unwrap();
        assert_eq!(
            payload,
            vec![FieldPayloadItem {
                name: "f_4".into(),
                value: String::new(),
                subfield: "file".into(),
            }]
        );
    }
}
