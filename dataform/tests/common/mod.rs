//! Scripted plugins, uploader and entry source shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dataform::{DataformError, EntryId, EntryIdSource, FileUploader};
use dataform_fields::{
    EntryContent, FieldDescriptor, FieldPlugin, FieldValue, FieldsError, FileEntry, FormSnapshot,
};

/// What a scripted plugin answers to a change check.
#[derive(Clone, Copy)]
pub enum Signal {
    Unchanged,
    Changed,
    Fails,
    /// Never resolves.
    Hangs,
}

/// A plugin whose answers are fixed up front, after an optional delay.
pub struct ScriptedPlugin {
    pub field_type: &'static str,
    pub delay: Duration,
    pub edit: Option<Vec<FieldValue>>,
    pub files: Vec<FileEntry>,
    pub signal: Signal,
    pub fail_edit: bool,
}

impl ScriptedPlugin {
    pub fn new(field_type: &'static str) -> Self {
        Self {
            field_type,
            delay: Duration::ZERO,
            edit: None,
            files: Vec::new(),
            signal: Signal::Unchanged,
            fail_edit: false,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn edit(mut self, values: Vec<FieldValue>) -> Self {
        self.edit = Some(values);
        self
    }

    pub fn files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = files;
        self
    }

    pub fn signal(mut self, signal: Signal) -> Self {
        self.signal = signal;
        self
    }

    pub fn failing_edit(mut self) -> Self {
        self.fail_edit = true;
        self
    }

    fn failure(&self, field: &FieldDescriptor) -> FieldsError {
        FieldsError::plugin_failed(self.field_type, &field.name, "scripted failure")
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl FieldPlugin for ScriptedPlugin {
    fn field_types(&self) -> &[&'static str] {
        std::slice::from_ref(&self.field_type)
    }

    fn search_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
    ) -> Option<Vec<FieldValue>> {
        let value = snapshot.text(&field.control_name())?;
        Some(vec![FieldValue::new(field.control_name(), value)])
    }

    async fn edit_data(
        &self,
        field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> dataform_fields::Result<Option<Vec<FieldValue>>> {
        self.wait().await;
        if self.fail_edit {
            return Err(self.failure(field));
        }
        Ok(self.edit.clone())
    }

    async fn edit_files(
        &self,
        _field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> dataform_fields::Result<Vec<FileEntry>> {
        self.wait().await;
        Ok(self.files.clone())
    }

    async fn has_changed(
        &self,
        field: &FieldDescriptor,
        _snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> dataform_fields::Result<bool> {
        self.wait().await;
        match self.signal {
            Signal::Unchanged => Ok(false),
            Signal::Changed => Ok(true),
            Signal::Fails => Err(self.failure(field)),
            Signal::Hangs => std::future::pending().await,
        }
    }
}

/// One recorded call to [`RecordingUploader`].
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCall {
    pub filenames: Vec<String>,
    pub component: String,
    pub item_id: Option<i64>,
    pub site_id: Option<String>,
}

/// Uploader answering with consecutive draft ids, or failing.
pub struct RecordingUploader {
    pub calls: Mutex<Vec<UploadCall>>,
    pub next_id: Mutex<i64>,
    pub fail: bool,
}

impl RecordingUploader {
    pub fn new(first_id: i64) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(first_id),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    pub fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileUploader for RecordingUploader {
    async fn upload_files(
        &self,
        files: &[FileEntry],
        component: &str,
        item_id: Option<i64>,
        site_id: Option<&str>,
    ) -> dataform::Result<i64> {
        self.calls.lock().unwrap().push(UploadCall {
            filenames: files.iter().map(|f| f.filename.clone()).collect(),
            component: component.to_string(),
            item_id,
            site_id: site_id.map(String::from),
        });
        if self.fail {
            return Err(DataformError::upload("quota exceeded"));
        }
        let mut next = self.next_id.lock().unwrap();
        let id = *next;
        *next += 1;
        Ok(id)
    }
}

/// Entry source serving a fixed list and counting fetches.
pub struct FixedEntries {
    pub ids: Vec<EntryId>,
    pub fetches: Mutex<Vec<(i64, i64, Option<String>)>>,
}

impl FixedEntries {
    pub fn new(ids: Vec<EntryId>) -> Self {
        Self {
            ids,
            fetches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EntryIdSource for FixedEntries {
    async fn list_entry_ids(
        &self,
        database_id: i64,
        group_id: i64,
        site_id: Option<&str>,
    ) -> dataform::Result<Vec<EntryId>> {
        self.fetches
            .lock()
            .unwrap()
            .push((database_id, group_id, site_id.map(String::from)));
        if database_id < 0 {
            return Err(DataformError::entry_source(database_id, "no such database"));
        }
        Ok(self.ids.clone())
    }
}
