//! In-process note store
//!
//! Holds a fixed snapshot of notes and answers every [`NoteStore`] call by
//! scanning it. Semantics match [`crate::SurrealNoteStore`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use crate::store::{sort_by_count_desc, sort_by_name};
use crate::types::contains_folded;
use crate::{FolderCount, FolderName, Note, NoteQuery, NoteStore, StoreResult, Window};

#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    notes: Vec<Note>,
}

impl MemoryNoteStore {
    /// Store serving `notes` in the given order
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl FromIterator<Note> for MemoryNoteStore {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find(&self, query: &NoteQuery, window: Option<Window>) -> StoreResult<Vec<Note>> {
        let matching = self.notes.iter().filter(|note| query.matches(note));
        let notes = match window {
            Some(window) => matching
                .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(notes)
    }

    async fn count(&self, query: &NoteQuery) -> StoreResult<u64> {
        Ok(self.notes.iter().filter(|note| query.matches(note)).count() as u64)
    }

    async fn sample(&self) -> StoreResult<Option<Note>> {
        Ok(self.notes.choose(&mut rand::rng()).cloned())
    }

    async fn folder_counts(&self) -> StoreResult<Vec<FolderCount>> {
        let mut groups: BTreeMap<Option<&str>, u64> = BTreeMap::new();
        for note in &self.notes {
            *groups.entry(note.folder.as_deref()).or_default() += 1;
        }

        let mut folders: Vec<FolderCount> = groups
            .into_iter()
            .map(|(name, note_count)| FolderCount {
                name: name.map(String::from),
                note_count,
            })
            .collect();
        sort_by_count_desc(&mut folders);
        Ok(folders)
    }

    async fn search_folders(&self, needle: &str) -> StoreResult<Vec<FolderName>> {
        let needle = needle.to_lowercase();
        let mut folders: Vec<FolderName> = self
            .notes
            .iter()
            .filter_map(|note| note.folder.as_deref())
            .filter(|folder| contains_folded(Some(*folder), &needle))
            .map(|name| FolderName {
                name: Some(name.to_string()),
            })
            .collect();
        sort_by_name(&mut folders);
        folders.dedup();
        Ok(folders)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
