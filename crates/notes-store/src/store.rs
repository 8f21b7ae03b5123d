//! The storage seam between the HTTP handlers and a document database

use async_trait::async_trait;

use crate::{FolderCount, FolderName, Note, NoteQuery, StoreResult, Window};

/// Read access to the note collection
///
/// Every call reflects the live contents of the store; implementations do
/// not cache. Implementations must be `Send + Sync` so one handle can be
/// shared by all request handlers.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Notes matching `query` in the store's natural order, optionally windowed
    async fn find(&self, query: &NoteQuery, window: Option<Window>) -> StoreResult<Vec<Note>>;

    /// Number of notes matching `query`
    async fn count(&self, query: &NoteQuery) -> StoreResult<u64>;

    /// One uniformly sampled note, `None` when the collection is empty
    async fn sample(&self) -> StoreResult<Option<Note>>;

    /// Notes per folder, largest folder first
    async fn folder_counts(&self) -> StoreResult<Vec<FolderCount>>;

    /// Distinct folder names containing `needle` (case-insensitive), ascending
    ///
    /// Notes without a folder never match.
    async fn search_folders(&self, needle: &str) -> StoreResult<Vec<FolderName>>;

    /// Round-trip to the backend without touching data
    async fn ping(&self) -> StoreResult<()>;
}

/// Stable sort, largest count first; ties keep their incoming order
pub(crate) fn sort_by_count_desc(folders: &mut [FolderCount]) {
    folders.sort_by(|a, b| b.note_count.cmp(&a.note_count));
}

/// Alphabetical by name, `None` first
pub(crate) fn sort_by_name(folders: &mut [FolderName]) {
    folders.sort_by(|a, b| a.name.cmp(&b.name));
}
