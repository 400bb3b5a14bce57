//! Host-store seams.
//!
//! The host's document store is an opaque collaborator: folders, journal
//! entries, pages, and asset uploads behind async traits. Every call is
//! attempted exactly once; a failure aborts the run and already-created
//! documents are left in place.

use async_trait::async_trait;
use std::path::Path;
use vaultport_core::{FolderId, Note, NoteId, Page, PageId, Result};

/// Folder, note, and page operations against the host's journal store.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Find a folder by name under `parent`, creating it if absent.
    async fn find_or_create_folder(
        &self,
        name: &str,
        parent: Option<&FolderId>,
    ) -> Result<FolderId>;

    /// Create an empty note. `observer` grants default read access.
    async fn create_note(
        &self,
        name: &str,
        folder: Option<&FolderId>,
        observer: bool,
    ) -> Result<Note>;

    /// Find a note by name and parent folder.
    async fn find_note(&self, name: &str, folder: Option<&FolderId>) -> Result<Option<Note>>;

    /// Fetch a note with its current pages.
    async fn get_note(&self, id: &NoteId) -> Result<Note>;

    /// Append a page to a note.
    async fn create_page(&self, note: &NoteId, name: &str, text: &str) -> Result<Page>;

    /// Delete every page of a note.
    async fn delete_pages(&self, note: &NoteId) -> Result<()>;

    /// Replace a page's text.
    async fn update_page(&self, note: &NoteId, page: &PageId, text: &str) -> Result<()>;
}

/// Upload target for non-markdown files.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Make sure the destination exists and is writable. Called once before
    /// the first upload; a failure here is a configuration error.
    async fn prepare_destination(&self, destination: &str) -> Result<()>;

    /// Store the file under `destination`, returning the path it is
    /// reachable at.
    async fn upload(&self, destination: &str, source: &Path) -> Result<String>;
}
