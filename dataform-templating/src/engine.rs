//! Placeholder substitution for entry templates
//!
//! Authors write `[[name]]` where a field's widget goes and, in edit
//! templates, `[[name#id]]` where its anchor id goes. Search templates may
//! also hold the built-in author tokens `##fn##` / `##firstname##` and
//! `##ln##` / `##lastname##`.
//!
//! Names are matched literally. Placeholders naming no field stay in the
//! output untouched.

use dataform_fields::{BuiltinSearchField, FieldDescriptor, BUILTIN_SEARCH_FIELDS};
use regex::{NoExpand, Regex};
use tracing::trace;

use crate::error::{Result, TemplatingError};
use crate::markers::MarkerStyle;

/// Characters escaped in a placeholder before it becomes a matcher.
pub const PLACEHOLDER_METACHARACTERS: &[char] = &[
    '-', '[', ']', '/', '{', '}', '(', ')', '*', '+', '?', '.', '\\', '^', '$', '|',
];

/// Which form a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Edit,
}

/// Escape `text` so it matches only itself.
pub fn escape_placeholder(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if PLACEHOLDER_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Replace every occurrence of the literal `placeholder` in `template`.
fn replace_placeholder(template: &str, placeholder: &str, replacement: &str) -> Result<String> {
    let pattern = escape_placeholder(placeholder);
    let matcher = Regex::new(&pattern).map_err(|source| TemplatingError::Pattern {
        placeholder: placeholder.to_string(),
        source,
    })?;
    Ok(matcher
        .replace_all(template, NoExpand(replacement))
        .into_owned())
}

/// Substitution engine for search and edit templates
pub struct TemplateEngine {
    style: MarkerStyle,
    builtins: &'static [BuiltinSearchField],
}

impl TemplateEngine {
    /// Create an engine with default markers and the built-in author fields
    pub fn new() -> Self {
        Self::with_style(MarkerStyle::default())
    }

    pub fn with_style(style: MarkerStyle) -> Self {
        Self {
            style,
            builtins: BUILTIN_SEARCH_FIELDS,
        }
    }

    /// Replace the table of non-pluggable search tokens.
    pub fn with_builtins(mut self, builtins: &'static [BuiltinSearchField]) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Substitute every field placeholder of `template` for `mode`.
    pub fn substitute(
        &self,
        template: &str,
        fields: &[FieldDescriptor],
        mode: Mode,
    ) -> Result<String> {
        let mut output = template.to_string();

        for field in fields {
            let marker = match mode {
                Mode::Search => self.style.search(field),
                Mode::Edit => self.style.edit(field),
            };
            output = replace_placeholder(&output, &format!("[[{}]]", field.name), &marker)?;

            if mode == Mode::Edit {
                output = replace_placeholder(
                    &output,
                    &format!("[[{}#id]]", field.name),
                    &self.style.anchor(field),
                )?;
            }
        }

        if mode == Mode::Search {
            for builtin in self.builtins {
                let input = self.style.builtin_input(builtin);
                for token in [builtin.name, builtin.token] {
                    output = replace_placeholder(&output, &format!("##{token}##"), &input)?;
                }
            }
        }

        trace!(fields = fields.len(), ?mode, "template substituted");
        Ok(output)
    }

    /// Render the advanced search form template.
    pub fn render_search(&self, template: &str, fields: &[FieldDescriptor]) -> Result<String> {
        self.substitute(template, fields, Mode::Search)
    }

    /// Render the add/edit entry template.
    pub fn render_edit(&self, template: &str, fields: &[FieldDescriptor]) -> Result<String> {
        self.substitute(template, fields, Mode::Edit)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
