use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::plugin::FieldPlugin;
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldValue};

/// Separator of the options stored for a multi-choice field.
pub const OPTION_SEPARATOR: &str = "##";

/// Multi-choice fields. Hosts expose each option as a checkbox control named
/// after the field; a second `f_<id>_allreq` checkbox asks search to match
/// all selected options.
pub struct OptionSetPlugin;

fn checked(snapshot: &FormSnapshot, control: &str) -> Vec<String> {
    snapshot
        .get(control)
        .map(|value| {
            value
                .checked_options()
                .into_iter()
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn as_json(options: Vec<String>) -> Value {
    Value::Array(options.into_iter().map(Value::String).collect())
}

#[async_trait]
impl FieldPlugin for OptionSetPlugin {
    fn field_types(&self) -> &[&'static str] {
        &["checkbox", "multimenu"]
    }

    fn search_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
    ) -> Option<Vec<FieldValue>> {
        let control = field.control_name();
        let selected = checked(snapshot, &control);
        if selected.is_empty() {
            return None;
        }

        let mut data = vec![FieldValue::new(control, as_json(selected))];
        let all_required = field.sub_control_name("allreq");
        if !checked(snapshot, &all_required).is_empty() {
            data.push(FieldValue::new(all_required, true));
        }
        Some(data)
    }

    async fn edit_data(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        _prior: Option<&EntryContent>,
    ) -> Result<Option<Vec<FieldValue>>> {
        let control = field.control_name();
        let selected = checked(snapshot, &control);
        Ok(Some(vec![FieldValue::new(control, as_json(selected))]))
    }

    async fn has_changed(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<bool> {
        let input: BTreeSet<String> = checked(snapshot, &field.control_name())
            .into_iter()
            .collect();
        let stored: BTreeSet<String> = prior
            .map(EntryContent::content_str)
            .unwrap_or_default()
            .split(OPTION_SEPARATOR)
            .filter(|option| !option.is_empty())
            .map(String::from)
            .collect();
        Ok(input != stored)
    }
}
