//! Lookup of field plugins by field type.
//!
//! The registry is the only place that knows which plugin serves which
//! type. A type without a plugin is not an error: it simply contributes
//! nothing, which is what every `field_*` dispatch method returns for it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{FieldsError, Result};
use crate::plugin::FieldPlugin;
use crate::plugins::{AttachmentSession, FilePlugin, LatLongPlugin, OptionSetPlugin, TextPlugin};
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldValue, FileEntry};

/// Field plugins indexed by the field types they handle.
#[derive(Default)]
pub struct FieldPluginRegistry {
    plugins: Vec<Arc<dyn FieldPlugin>>,
    type_index: HashMap<String, usize>,
}

impl FieldPluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in plugins. File fields read their
    /// attachments from `attachments`.
    pub fn with_defaults(attachments: Arc<AttachmentSession>) -> Self {
        let builtins: Vec<Arc<dyn FieldPlugin>> = vec![
            Arc::new(TextPlugin),
            Arc::new(OptionSetPlugin),
            Arc::new(LatLongPlugin),
            Arc::new(FilePlugin::new(attachments)),
        ];

        let mut registry = Self::new();
        for plugin in builtins {
            registry.insert(plugin);
        }
        registry
    }

    /// Register a plugin for every type it declares.
    ///
    /// Fails without registering anything if one of its types is taken.
    pub fn register(&mut self, plugin: Arc<dyn FieldPlugin>) -> Result<()> {
        if let Some(taken) = plugin
            .field_types()
            .iter()
            .find(|t| self.type_index.contains_key(**t))
        {
            return Err(FieldsError::DuplicatePlugin {
                field_type: (*taken).to_string(),
            });
        }

        debug!(types = ?plugin.field_types(), "registered field plugin");
        self.insert(plugin);
        Ok(())
    }

    fn insert(&mut self, plugin: Arc<dyn FieldPlugin>) {
        let idx = self.plugins.len();
        for field_type in plugin.field_types() {
            self.type_index.insert((*field_type).to_string(), idx);
        }
        self.plugins.push(plugin);
    }

    /// Plugin serving `field_type`, if any.
    pub fn get(&self, field_type: &str) -> Option<&Arc<dyn FieldPlugin>> {
        self.type_index
            .get(field_type)
            .and_then(|&idx| self.plugins.get(idx))
    }

    pub fn has_plugin(&self, field_type: &str) -> bool {
        self.type_index.contains_key(field_type)
    }

    /// All registered field types.
    pub fn field_types(&self) -> impl Iterator<Item = &str> {
        self.type_index.keys().map(String::as_str)
    }

    fn plugin_for(&self, field: &FieldDescriptor) -> Option<&Arc<dyn FieldPlugin>> {
        let plugin = self.get(&field.type_);
        if plugin.is_none() {
            trace!(field = %field.name, field_type = %field.type_, "no plugin for field type");
        }
        plugin
    }

    pub fn field_search_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
    ) -> Option<Vec<FieldValue>> {
        self.plugin_for(field)?.search_data(field, snapshot)
    }

    pub async fn field_edit_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<Option<Vec<FieldValue>>> {
        match self.plugin_for(field) {
            Some(plugin) => plugin.edit_data(field, snapshot, prior).await,
            None => Ok(None),
        }
    }

    pub async fn field_edit_files(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<Vec<FileEntry>> {
        match self.plugin_for(field) {
            Some(plugin) => plugin.edit_files(field, snapshot, prior).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn field_has_changed(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<bool> {
        match self.plugin_for(field) {
            Some(plugin) => plugin.has_changed(field, snapshot, prior).await,
            None => Ok(false),
        }
    }
}
