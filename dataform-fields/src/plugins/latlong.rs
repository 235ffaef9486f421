use async_trait::async_trait;

use super::non_empty;
use crate::error::Result;
use crate::plugin::FieldPlugin;
use crate::snapshot::FormSnapshot;
use crate::types::{EntryContent, FieldDescriptor, FieldValue};

/// Coordinates stored as two subfields: `0` latitude, `1` longitude.
pub struct LatLongPlugin;

#[async_trait]
impl FieldPlugin for LatLongPlugin {
    fn field_types(&self) -> &[&'static str] {
        &["latlong"]
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
        let data = ["0", "1"]
            .into_iter()
            .map(|sub| {
                let value = snapshot
                    .text(&field.sub_control_name(sub))
                    .unwrap_or_default()
                    .to_string();
                FieldValue::new(control.clone(), value).with_subfield(sub)
            })
            .collect();
        Ok(Some(data))
    }

    async fn has_changed(
        &self,
        field: &FieldDescriptor,
        snapshot: &FormSnapshot,
        prior: Option<&EntryContent>,
    ) -> Result<bool> {
        let coordinate = |suffix| {
            snapshot
                .text(&field.sub_control_name(suffix))
                .unwrap_or_default()
        };
        let stored = prior.cloned().unwrap_or_default();
        let stored_lat = stored.content.as_deref().unwrap_or_default();
        let stored_long = stored.content1.as_deref().unwrap_or_default();
        let (lat, long) = (coordinate("0"), coordinate("1"));
        Ok(lat != stored_lat || long != stored_long)
    }
}
