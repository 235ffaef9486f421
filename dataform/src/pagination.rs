//! Entry pagination index.
//!
//! Entries are shown one per page. Given the ordered entry ids of a
//! database (and group), these functions find an entry's page and
//! neighbours, or the entry on a page. Ids outside the list are an expected
//! outcome (deleted entry, stale link) and come back as `None`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Identifier of an entry.
pub type EntryId = i64;

/// Position of one entry within the ordered entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRecord {
    /// Entry before this one; serialized as `false` on the first page.
    #[serde(with = "id_or_false")]
    pub previous_id: Option<EntryId>,
    /// Entry after this one; serialized as `false` on the last page.
    #[serde(with = "id_or_false")]
    pub next_id: Option<EntryId>,
    pub entry_id: EntryId,
    /// 1-based page number.
    pub page: i64,
    pub num_entries: usize,
}

impl PaginationRecord {
    fn at(ids: &[EntryId], index: usize, page: i64) -> Self {
        Self {
            previous_id: index.checked_sub(1).and_then(|i| ids.get(i)).copied(),
            next_id: ids.get(index + 1).copied(),
            entry_id: ids[index],
            page,
            num_entries: ids.len(),
        }
    }

    pub fn is_first(&self) -> bool {
        self.previous_id.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next_id.is_none()
    }
}

/// Page of the first occurrence of `entry_id` in `ids`.
pub fn locate_by_entry(ids: &[EntryId], entry_id: EntryId) -> Option<PaginationRecord> {
    let index = ids.iter().position(|&id| id == entry_id)?;
    let page = i64::try_from(index).ok()? + 1;
    Some(PaginationRecord::at(ids, index, page))
}

/// Entry shown on 1-based `page`; the record echoes `page` back.
pub fn locate_by_page(ids: &[EntryId], page: i64) -> Option<PaginationRecord> {
    let index = usize::try_from(page.checked_sub(1)?).ok()?;
    if index >= ids.len() {
        return None;
    }
    Some(PaginationRecord::at(ids, index, page))
}

/// Source of the complete, ordered entry ids of a database.
#[async_trait]
pub trait EntryIdSource: Send + Sync {
    /// All entry ids visible in `group_id`, in display order. One full fetch.
    async fn list_entry_ids(
        &self,
        database_id: i64,
        group_id: i64,
        site_id: Option<&str>,
    ) -> Result<Vec<EntryId>>;
}

#[async_trait]
impl<T: EntryIdSource + ?Sized> EntryIdSource for Arc<T> {
    async fn list_entry_ids(
        &self,
        database_id: i64,
        group_id: i64,
        site_id: Option<&str>,
    ) -> Result<Vec<EntryId>> {
        (**self)
            .list_entry_ids(database_id, group_id, site_id)
            .await
    }
}

/// Fetches the entry list and locates entries or pages in it.
///
/// The list is fetched again for every query.
pub struct EntryNavigator<S> {
    source: S,
}

impl<S: EntryIdSource> EntryNavigator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Page info of `entry_id`, `None` if it is not in the list.
    pub async fn page_info_by_entry(
        &self,
        database_id: i64,
        entry_id: EntryId,
        group_id: i64,
        site_id: Option<&str>,
    ) -> Result<Option<PaginationRecord>> {
        let ids = self
            .source
            .list_entry_ids(database_id, group_id, site_id)
            .await?;
        let record = locate_by_entry(&ids, entry_id);
        let found = record.is_some();
        debug!(database_id, group_id, entry_id, found, "located entry");
        Ok(record)
    }

    /// Page info of `page`, `None` if the list has no such page.
    pub async fn page_info_by_page(
        &self,
        database_id: i64,
        page: i64,
        group_id: i64,
        site_id: Option<&str>,
    ) -> Result<Option<PaginationRecord>> {
        let ids = self
            .source
            .list_entry_ids(database_id, group_id, site_id)
            .await?;
        let record = locate_by_page(&ids, page);
        let found = record.is_some();
        debug!(database_id, group_id, page, found, "located page");
        Ok(record)
    }
}

/// Serde adapter writing a missing neighbour as `false`.
mod id_or_false {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::EntryId;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum IdOrFlag {
        Id(EntryId),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(
        id: &Option<EntryId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => IdOrFlag::Id(*id).serialize(serializer),
            None => IdOrFlag::Flag(false).serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<EntryId>, D::Error> {
        Ok(match IdOrFlag::deserialize(deserializer)? {
            IdOrFlag::Id(id) => Some(id),
            IdOrFlag::Flag(_) => None,
        })
    }
}
