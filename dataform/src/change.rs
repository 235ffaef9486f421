//! Detection of user edits against a stored entry.
//!
//! Unlike payload assembly, a failing per-field check is not an error here:
//! it counts as a change. The first field that reports a change (or fails)
//! settles the answer; checks still pending are dropped.

use std::sync::Arc;

use dataform_fields::{EntryContents, FieldDescriptor, FieldPluginRegistry, Form, FormSnapshot};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

/// Compares a live edit form with the entry it was opened on.
pub struct ChangeDetector {
    registry: Arc<FieldPluginRegistry>,
}

impl ChangeDetector {
    pub fn new(registry: Arc<FieldPluginRegistry>) -> Self {
        Self { registry }
    }

    /// True as soon as any field differs from `contents`.
    pub async fn has_changed<F: Form + ?Sized>(
        &self,
        fields: &[FieldDescriptor],
        form: &F,
        contents: &EntryContents,
    ) -> bool {
        let snapshot = FormSnapshot::extract(form);
        let snapshot = &snapshot;

        let mut pending: FuturesUnordered<_> = fields
            .iter()
            .map(|field| async move {
                let signal = self
                    .registry
                    .field_has_changed(field, snapshot, contents.get(&field.id))
                    .await;
                (field, signal)
            })
            .collect();

        while let Some((field, signal)) = pending.next().await {
            match signal {
                Ok(false) => continue,
                Ok(true) => {
                    debug!(field = %field.name, "field changed");
                    return true;
                }
                Err(err) => {
                    debug!(field = %field.name, error = %err, "change check failed");
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataform_fields::{AttachmentSession, EntryContent, FormControl};

    fn detector() -> ChangeDetector {
        let attachments = Arc::new(AttachmentSession::new());
        let registry = FieldPluginRegistry::with_defaults(attachments);
        ChangeDetector::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn unchanged_form() {
        let fields = vec![FieldDescriptor::new(1, "Title", "text")];
        let form = vec![FormControl::text("f_1", "same")];
        let contents = EntryContents::from([(1, EntryContent::new(1, "same"))]);
        assert!(!detector().has_changed(&fields, &form, &contents).await);
    }

    #[tokio::test]
    async fn edited_text_is_a_change() {
        let fields = vec![FieldDescriptor::new(1, "Title", "text")];
        let form = vec![FormControl::text("f_1", "edited")];
        let contents = EntryContents::from([(1, EntryContent::new(1, "same"))]);
        assert!(detector().has_changed(&fields, &form, &contents).await);
    }

    #[tokio::test]
    async fn no_fields_means_no_change() {
        assert!(!detector()
            .has_changed(&[], &Vec::<FormControl>::new(), &EntryContents::new())
            .await);
    }
}
