//! In-memory reference implementation of the host-store seams.
//!
//! Backs the test suite and the CLI. Ids are random v4 uuids; pages keep
//! insertion order, which is the page order the resolver depends on.

use crate::store::{AssetStore, JournalStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;
use vaultport_core::{Error, FolderId, Note, NoteId, Page, PageId, Result};

/// A folder document in the in-memory store.
#[derive(Debug, Clone)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent: Option<FolderId>,
}

#[derive(Default)]
struct Inner {
    folders: Vec<Folder>,
    notes: Vec<Note>,
    assets: HashMap<String, Vec<u8>>,
}

/// In-memory host store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every journal entry, in creation order.
    pub async fn journals(&self) -> Vec<Note> {
        self.inner.read().await.notes.clone()
    }

    /// Snapshot of every folder, in creation order.
    pub async fn folders(&self) -> Vec<Folder> {
        self.inner.read().await.folders.clone()
    }

    /// Raw bytes of an uploaded asset, if present.
    pub async fn asset(&self, path: &str) -> Option<Vec<u8>> {
        self.inner.read().await.assets.get(path).cloned()
    }

    fn new_id() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn find_or_create_folder(
        &self,
        name: &str,
        parent: Option<&FolderId>,
    ) -> Result<FolderId> {
        let mut inner = self.inner.write().await;
        if let Some(folder) = inner
            .folders
            .iter()
            .find(|f| f.name == name && f.parent.as_ref() == parent)
        {
            return Ok(folder.id.clone());
        }
        let folder = Folder {
            id: Self::new_id(),
            name: name.to_string(),
            parent: parent.cloned(),
        };
        let id = folder.id.clone();
        inner.folders.push(folder);
        Ok(id)
    }

    async fn create_note(
        &self,
        name: &str,
        folder: Option<&FolderId>,
        _observer: bool,
    ) -> Result<Note> {
        let mut inner = self.inner.write().await;
        let note = Note {
            id: Self::new_id(),
            name: name.to_string(),
            folder: folder.cloned(),
            pages: Vec::new(),
        };
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn find_note(&self, name: &str, folder: Option<&FolderId>) -> Result<Option<Note>> {
        let inner = self.inner.read().await;
        Ok(inner
            .notes
            .iter()
            .find(|n| n.name == name && n.folder.as_ref() == folder)
            .cloned())
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let inner = self.inner.read().await;
        inner
            .notes
            .iter()
            .find(|n| n.id == *id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("JournalEntry.{id}")))
    }

    async fn create_page(&self, note: &NoteId, name: &str, text: &str) -> Result<Page> {
        let mut inner = self.inner.write().await;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == *note)
            .ok_or_else(|| Error::not_found(format!("JournalEntry.{note}")))?;
        let page = Page {
            id: Self::new_id(),
            name: name.to_string(),
            text: text.to_string(),
        };
        note.pages.push(page.clone());
        Ok(page)
    }

    async fn delete_pages(&self, note: &NoteId) -> Result<()> {
        let mut inner = self.inner.write().await;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == *note)
            .ok_or_else(|| Error::not_found(format!("JournalEntry.{note}")))?;
        note.pages.clear();
        Ok(())
    }

    async fn update_page(&self, note: &NoteId, page: &PageId, text: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let note = inner
            .notes
            .iter_mut()
            .find(|n| n.id == *note)
            .ok_or_else(|| Error::not_found(format!("JournalEntry.{note}")))?;
        let page = note
            .pages
            .iter_mut()
            .find(|p| p.id == *page)
            .ok_or_else(|| Error::not_found(format!("JournalEntryPage.{page}")))?;
        page.text = text.to_string();
        Ok(())
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn prepare_destination(&self, _destination: &str) -> Result<()> {
        Ok(())
    }

    async fn upload(&self, destination: &str, source: &Path) -> Result<String> {
        let bytes = tokio::fs::read(source).await?;
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::other(format!("Not a file: {}", source.display())))?;
        let path = format!("{}/{}", destination.trim_end_matches('/'), file_name);
        self.inner.write().await.assets.insert(path.clone(), bytes);
        Ok(path)
    }
}
