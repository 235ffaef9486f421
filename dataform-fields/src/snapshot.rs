//! Form snapshot extraction.
//!
//! The host owns the live form. Instead of relying on bindings, which miss
//! values changed programmatically, the snapshot reads every control's
//! current state through the read-only [`Form`] capability.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of a form control, as far as extraction cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    Radio,
    Submit,
    Button,
    /// Any other input, select or textarea. Holds the host's type name.
    Other(String),
}

impl ControlKind {
    /// Map an HTML `type` attribute (or tag name for buttons) to a kind.
    pub fn from_type(type_: &str) -> Self {
        match type_.to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "button" => Self::Button,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Current state of one control of the live form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
}

impl FormControl {
    pub fn new(name: impl Into<String>, kind: ControlKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Other("text".into()), value)
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Checkbox, value)
        }
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Radio, value)
        }
    }
}

/// Read-only access to the controls of a live form.
pub trait Form {
    /// Current state of every control, in document order.
    fn controls(&self) -> Vec<FormControl>;
}

impl Form for [FormControl] {
    fn controls(&self) -> Vec<FormControl> {
        self.to_vec()
    }
}

impl Form for Vec<FormControl> {
    fn controls(&self) -> Vec<FormControl> {
        self.clone()
    }
}

/// The value one control name contributes to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    /// Text-like control.
    Text(String),
    /// Checkbox group: option value → checked.
    Options(IndexMap<String, bool>),
    /// Checked option of a radio group.
    Selected(String),
}

impl SnapshotValue {
    /// The string held by text and radio values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Selected(s) => Some(s),
            Self::Options(_) => None,
        }
    }

    pub fn as_options(&self) -> Option<&IndexMap<String, bool>> {
        match self {
            Self::Options(options) => Some(options),
            _ => None,
        }
    }

    /// Checked options of a checkbox group, in control order.
    pub fn checked_options(&self) -> Vec<&str> {
        self.as_options()
            .map(|options| {
                options
                    .iter()
                    .filter(|(_, checked)| **checked)
                    .map(|(value, _)| value.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empty strings are falsy; option sets never are.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) | Self::Selected(s) => !s.is_empty(),
            Self::Options(_) => true,
        }
    }
}

/// Point-in-time state of a form, keyed by control name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    values: IndexMap<String, SnapshotValue>,
}

impl FormSnapshot {
    /// Read the current state of every relevant control of `form`.
    pub fn extract<F: Form + ?Sized>(form: &F) -> Self {
        let mut values: IndexMap<String, SnapshotValue> = IndexMap::new();

        for control in form.controls() {
            if control.name.is_empty()
                || matches!(control.kind, ControlKind::Submit | ControlKind::Button)
            {
                continue;
            }

            match control.kind {
                ControlKind::Checkbox => {
                    let entry = values
                        .entry(control.name)
                        .or_insert_with(|| SnapshotValue::Options(IndexMap::new()));
                    if !matches!(entry, SnapshotValue::Options(_)) {
                        *entry = SnapshotValue::Options(IndexMap::new());
                    }
                    if let SnapshotValue::Options(options) = entry {
                        options.insert(control.value, control.checked);
                    }
                }
                ControlKind::Radio => {
                    if control.checked {
                        values.insert(control.name, SnapshotValue::Selected(control.value));
                    }
                }
                _ => {
                    values.insert(control.name, SnapshotValue::Text(control.value));
                }
            }
        }

        tracing::trace!(controls = values.len(), "form snapshot extracted");
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&SnapshotValue> {
        self.values.get(name)
    }

    /// String value of a text or radio control.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(SnapshotValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkboxes_accumulate_into_option_set() {
        let form = vec![
            FormControl::checkbox("opts", "x", true),
            FormControl::checkbox("opts", "y", false),
        ];
        let snapshot = FormSnapshot::extract(&form);

        let options = snapshot
            .get("opts")
            .and_then(SnapshotValue::as_options)
            .unwrap();
        assert_eq!(options.get("x"), Some(&true));
        assert_eq!(options.get("y"), Some(&false));
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            serde_json::json!({"opts": {"x": true, "y": false}})
        );
    }

    #[test]
    fn radio_contributes_only_checked_option() {
        let form = vec![
            FormControl::radio("choice", "a", false),
            FormControl::radio("choice", "b", true),
            FormControl::radio("choice", "c", false),
        ];
        let snapshot = FormSnapshot::extract(&form);
        assert_eq!(
            snapshot.get("choice"),
            Some(&SnapshotValue::Selected("b".into()))
        );
    }

    #[test]
    fn unchecked_radio_group_is_absent() {
        let form = vec![FormControl::radio("choice", "a", false)];
        assert!(!FormSnapshot::extract(&form).contains("choice"));
    }

    #[test]
    fn skips_unnamed_submit_and_button_controls() {
        let form = vec![
            FormControl::text("", "orphan"),
            FormControl::new("save", ControlKind::Submit, "Save"),
            FormControl::new("cancel", ControlKind::Button, "Cancel"),
            FormControl::text("f_1", "kept"),
        ];
        let snapshot = FormSnapshot::extract(&form);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.text("f_1"), Some("kept"));
    }

    #[test]
    fn later_text_value_overwrites() {
        let form = vec![
            FormControl::text("f_1", "first"),
            FormControl::text("f_1", "second"),
        ];
        assert_eq!(FormSnapshot::extract(&form).text("f_1"), Some("second"));
    }

    #[test]
    fn control_kind_from_html_type() {
        assert_eq!(ControlKind::from_type("CHECKBOX"), ControlKind::Checkbox);
        assert_eq!(ControlKind::from_type("submit"), ControlKind::Submit);
        assert_eq!(
            ControlKind::from_type("textarea"),
            ControlKind::Other("textarea".into())
        );
    }

    #[test]
    fn checked_options_keep_control_order() {
        let form = vec![
            FormControl::checkbox("f_2", "red", true),
            FormControl::checkbox("f_2", "green", false),
            FormControl::checkbox("f_2", "blue", true),
        ];
        let snapshot = FormSnapshot::extract(&form);
        assert_eq!(
            snapshot.get("f_2").unwrap().checked_options(),
            vec!["red", "blue"]
        );
    }
}
