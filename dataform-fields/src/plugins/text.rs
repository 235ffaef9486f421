use async_trait::async_trait;

use super::non_empty;
use crate::error::Result;
use crate::plugin::FieldPlugin;
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldValue};

/// Fields holding one string: free text, numbers, URLs and single-choice
/// menus or radio groups.
pub struct TextPlugin;

#[async_trait]
impl FieldPlugin for TextPlugin {
    fn field_types(&self) -> &[&'static str] {
        &["text", "textarea", "url", "number", "menu", "radiobutton"]
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
        snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> Result<Option<Vec<FieldValue>>> {
        let control = field.control_name();
        let value = snapshot.text(&control).unwrap_or_default().to_string();
        Ok(Some(vec![FieldValue::new(control, value)]))
    }

    async fn has_changed(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<bool> {
        let input = snapshot.text(&field.control_name()).unwrap_or_default();
        let stored = prior.map(EntryContent::content_str).unwrap_or_default();
        Ok(input != stored)
    }
}
