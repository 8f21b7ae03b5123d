//! Note and folder types shared by every backend

use serde::{Deserialize, Serialize};

/// A single stored note (quote)
///
/// `id` is the record key rendered as a string. Absent fields are left out
/// of the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            body: Some(body.into()),
            folder: Some(folder.into()),
        }
    }
}

/// A folder and how many notes carry it
///
/// `name` is `None` for the group of notes without a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCount {
    pub name: Option<String>,
    pub note_count: u64,
}

/// A folder name as returned by folder search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderName {
    pub name: Option<String>,
}

/// Filter for `find` and `count`
///
/// `text` matches title OR body, case-insensitively, as a literal substring.
/// `folder` matches exactly. When both are set both must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub text: Option<String>,
    pub folder: Option<String>,
}

impl NoteQuery {
    /// Every note
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: Some(folder.into()),
            ..Self::default()
        }
    }

    pub fn matching(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Whether `note` satisfies this filter
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(folder) = &self.folder {
            if note.folder.as_deref() != Some(folder.as_str()) {
                return false;
            }
        }
        match &self.text {
            Some(text) => {
                let needle = text.to_lowercase();
                contains_folded(note.title.as_deref(), &needle)
                    || contains_folded(note.body.as_deref(), &needle)
            }
            None => true,
        }
    }
}

/// `needle` must already be lowercase
pub(crate) fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// A `skip`/`limit` slice of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

impl Window {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}
