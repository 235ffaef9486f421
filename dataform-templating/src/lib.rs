//! Entry template rendering for dataform
//!
//! Turns user-authored HTML templates into markup with one render marker
//! per field placeholder. See [`engine`] for the placeholder grammar.

pub mod engine;
pub mod error;
pub mod markers;

pub use engine::{escape_placeholder, Mode, TemplateEngine, PLACEHOLDER_METACHARACTERS};
pub use error::{Result, TemplatingError};
pub use markers::{MarkerStyle, ANCHOR_PREFIX};
