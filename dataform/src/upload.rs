//! File upload transport boundary.

use async_trait::async_trait;
use dataform_fields::FileEntry;

use crate::error::Result;

/// Uploads the files of an edited entry to a draft area.
///
/// Implementations report failures with [`DataformError::upload`](crate::DataformError::upload);
/// a failure aborts the whole edit payload.
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Upload (or re-upload) `files` into the draft area `item_id`, creating a
    /// new area when `None`. Returns the id of the area holding the files.
    async fn upload_files(
        &self,
        files: &[FileEntry],
        component: &str,
        item_id: Option<i64>,
        site_id: Option<&str>,
    ) -> Result<i64>;
}
