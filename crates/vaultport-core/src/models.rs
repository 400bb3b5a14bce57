//! Core data models for the import run.
//!
//! [`FileRecord`] is the per-file bookkeeping entry that lives for exactly one
//! run. [`Note`] and [`Page`] mirror the host's journal documents; the engine
//! treats them as text buffers it can read and rewrite, never owning their
//! lifecycle. [`LinkMatch`] and [`PageSection`] are the ephemeral results of
//! pattern application and heading splitting.

use serde::{Deserialize, Serialize};

/// Host identifier of a folder document.
pub type FolderId = String;
/// Host identifier of a journal entry (note).
pub type NoteId = String;
/// Host identifier of a page within a note.
pub type PageId = String;

/// What kind of file a vault entry is, with kind-specific state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// A markdown note, imported as a journal entry
    Markdown,
    /// Any other file, uploaded as an asset
    Other {
        /// Destination URL/path, set once after upload
        upload_path: Option<String>,
    },
}

/// One entry per imported file, discarded at the end of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Relative path as recorded by the vault walk, `/`-separated
    pub original_path: String,
    /// Base name without the final extension
    pub file_stem: String,
    /// Lower-cased extension
    pub extension: String,
    /// Every string by which this file may be referenced from a note,
    /// most-specific first, bare name last
    pub keys: Vec<String>,
    /// Path segments excluding the file name
    pub directories: Vec<String>,
    /// Note created from this file; written exactly once during pass one
    pub note_id: Option<NoteId>,
    pub kind: FileKind,
}

impl FileRecord {
    /// The file name including extension (last path segment).
    pub fn file_name(&self) -> &str {
        self.original_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.original_path)
    }

    /// True for markdown notes.
    pub fn is_markdown(&self) -> bool {
        matches!(self.kind, FileKind::Markdown)
    }

    /// Host-native canvas files are skipped entirely by the importer.
    pub fn is_canvas(&self) -> bool {
        self.extension == "canvas"
    }

    /// Upload destination recorded for asset files, if any.
    pub fn upload_path(&self) -> Option<&str> {
        match &self.kind {
            FileKind::Markdown => None,
            FileKind::Other { upload_path } => upload_path.as_deref(),
        }
    }
}

/// A named markdown page within a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub text: String,
}

/// A host journal entry: an identifier, a display name, a parent folder,
/// and an ordered sequence of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub name: String,
    pub folder: Option<FolderId>,
    pub pages: Vec<Page>,
}

impl Note {
    /// The host's display link for this note.
    pub fn link(&self) -> String {
        format!("@UUID[JournalEntry.{}]{{{}}}", self.id, self.name)
    }
}

/// Ephemeral result of applying a link pattern to page text.
///
/// The second and third captures are positional: header fragments carry a
/// leading `#`, alias fragments a leading `|`. Which is which is decided by
/// the resolver, not the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Entire matched text
    pub full: String,
    /// Byte offset of the match within the scanned page
    pub start: usize,
    /// Captured target-page key
    pub page: Option<String>,
    pub group2: Option<String>,
    pub group3: Option<String>,
}

impl LinkMatch {
    /// A match with no captures at all is not a real link.
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.group2.is_none() && self.group3.is_none()
    }
}

/// A (title, body) fragment produced by the heading splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub title: String,
    pub body: String,
}

/// Summary of a completed import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub notes_created: usize,
    pub notes_updated: usize,
    pub notes_skipped: usize,
    pub assets_uploaded: usize,
    pub pages_rewritten: usize,
    pub links_replaced: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let record = FileRecord {
            original_path: "vault/folder/Note.md".to_string(),
            file_stem: "Note".to_string(),
            extension: "md".to_string(),
            keys: vec!["Note".to_string()],
            directories: vec!["vault".to_string(), "folder".to_string()],
            note_id: None,
            kind: FileKind::Markdown,
        };
        assert_eq!(record.file_name(), "Note.md");
        assert!(record.is_markdown());
        assert!(!record.is_canvas());
    }

    #[test]
    fn test_note_link() {
        let note = Note {
            id: "abc123".to_string(),
            name: "My Note".to_string(),
            folder: None,
            pages: vec![],
        };
        assert_eq!(note.link(), "@UUID[JournalEntry.abc123]{My Note}");
    }

    #[test]
    fn test_link_match_empty() {
        let m = LinkMatch {
            full: "[[]]".to_string(),
            start: 0,
            page: None,
            group2: None,
            group3: None,
        };
        assert!(m.is_empty());

        let m = LinkMatch {
            full: "[[Note]]".to_string(),
            start: 0,
            page: Some("Note".to_string()),
            group2: None,
            group3: None,
        };
        assert!(!m.is_empty());
    }
}
