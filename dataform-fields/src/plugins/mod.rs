//! Built-in field plugins.
//!
//! Each plugin reads the controls rendered for its field, named after
//! [`FieldDescriptor::control_name`](crate::types::FieldDescriptor::control_name).

mod file;
mod latlong;
mod option_set;
mod text;

pub use file::{AttachmentSession, FilePlugin};
pub use latlong::LatLongPlugin;
pub use option_set::{OptionSetPlugin, OPTION_SEPARATOR};
pub use text::TextPlugin;

use crate::snapshot::FormSnapshot;

/// Non-empty string value of a control.
fn non_empty<'a>(snapshot: &'a FormSnapshot, control: &str) -> Option<&'a str> {
    snapshot.text(control).filter(|value| !value.is_empty())
}
