//! The three-pass import orchestrator.
//!
//! Pass one walks the vault and creates a note per markdown file (uploading
//! assets along the way). Pass two rewrites links across every imported note,
//! which can only run once all notes exist: links may reference any other
//! file regardless of processing order. Pass three optionally builds the
//! index journal and backlink sections.
//!
//! Execution is single-threaded and cooperative; every store call is awaited
//! once, and a failure aborts the remaining work with already-created
//! documents left in place.

use crate::index;
use crate::resolver::{resolve_asset_link, resolve_markdown_link};
use crate::store::{AssetStore, JournalStore};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;
use vaultport_core::prelude::*;
use vaultport_parser::{
    classify, collect_matches, is_hidden, link_patterns, split_by_headings, strip_frontmatter,
};
use walkdir::WalkDir;

/// Name of the journal built by the optional index pass.
const INDEX_NOTE_NAME: &str = "Index";

/// A classified vault file together with its on-disk location.
struct WalkedFile {
    record: FileRecord,
    source: PathBuf,
}

/// Drives a full import run against a host store.
pub struct VaultImporter<S> {
    settings: ImportSettings,
    store: Arc<S>,
}

impl<S: JournalStore + AssetStore> VaultImporter<S> {
    pub fn new(settings: ImportSettings, store: Arc<S>) -> Self {
        Self { settings, store }
    }

    /// Run the import: validate, import every file, relink, then build the
    /// optional index and backlinks.
    #[instrument(skip_all, name = "vault_import")]
    pub async fn run(&self) -> Result<ImportReport> {
        self.settings.validate()?;
        log::info!("Begin import of {}", self.settings.vault_path.display());
        let mut report = ImportReport::default();

        if self.settings.import_non_markdown {
            self.store
                .prepare_destination(&self.settings.media_folder)
                .await?;
        }

        let root = match &self.settings.root_folder_name {
            Some(name) => Some(self.store.find_or_create_folder(name, None).await?),
            None => None,
        };

        let mut files = self.collect_files()?;
        log::info!("Found {} importable files", files.len());

        for file in &mut files {
            self.import_file(file, root.as_ref(), &mut report).await?;
        }

        let records: Vec<FileRecord> = files.into_iter().map(|f| f.record).collect();
        let notes = self.relink(&records, &mut report).await?;

        if self.settings.create_index_file {
            self.build_index(&records, &notes, root.as_ref(), &mut report)
                .await?;
        }
        if self.settings.create_backlinks {
            self.build_backlinks(&records, &notes).await?;
        }

        log::info!(
            "Import complete: {} notes created, {} updated, {} links rewritten",
            report.notes_created,
            report.notes_updated,
            report.links_replaced
        );
        Ok(report)
    }

    /// Walk the vault directory, classifying every visible file.
    ///
    /// Relative paths are prefixed with the vault directory's own name so
    /// full-path keys line up with how the vault was selected.
    fn collect_files(&self) -> Result<Vec<WalkedFile>> {
        let vault_path = &self.settings.vault_path;
        let vault_name = vault_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vault".to_string());

        let mut files = Vec::new();
        for entry in WalkDir::new(vault_path).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::other(format!("Vault walk failed: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(vault_path)
                .map_err(|e| Error::other(format!("Path outside vault: {e}")))?;
            let mut segments = vec![vault_name.clone()];
            segments.extend(
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            );
            let relative = segments.join("/");

            if is_hidden(&relative) {
                log::debug!("Skipping hidden file {relative}");
                continue;
            }
            let record = classify(&relative);
            if record.is_canvas() {
                log::debug!("Skipping canvas file {relative}");
                continue;
            }
            files.push(WalkedFile {
                record,
                source: entry.path().to_path_buf(),
            });
        }
        Ok(files)
    }

    async fn import_file(
        &self,
        file: &mut WalkedFile,
        root: Option<&FolderId>,
        report: &mut ImportReport,
    ) -> Result<()> {
        match file.record.kind {
            FileKind::Markdown => self.import_markdown(file, root, report).await,
            FileKind::Other { .. } => {
                if self.settings.import_non_markdown {
                    self.import_asset(file, report).await
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn import_markdown(
        &self,
        file: &mut WalkedFile,
        root: Option<&FolderId>,
        report: &mut ImportReport,
    ) -> Result<()> {
        let record = &mut file.record;

        let mut parent = root.cloned();
        let skip = if self.settings.create_root_folder { 0 } else { 1 };
        for dir in record.directories.iter().skip(skip) {
            parent = Some(self.store.find_or_create_folder(dir, parent.as_ref()).await?);
        }

        let name = record.file_stem.clone();
        let raw = tokio::fs::read_to_string(&file.source).await?;
        let content = strip_frontmatter(&raw);

        let existing = self.store.find_note(&name, parent.as_ref()).await?;
        let note_id = match existing {
            Some(note) if self.settings.overwrite => {
                self.replace_note_pages(&note, &content).await?;
                report.notes_updated += 1;
                note.id
            }
            Some(note) if self.settings.ignore_duplicate => {
                log::debug!("Keeping existing note {name}");
                report.notes_skipped += 1;
                note.id
            }
            _ => {
                let note = self
                    .store
                    .create_note(&name, parent.as_ref(), self.settings.player_observe)
                    .await?;
                self.create_note_pages(&note.id, &name, &content).await?;
                report.notes_created += 1;
                note.id
            }
        };

        record.note_id = Some(note_id);
        Ok(())
    }

    async fn import_asset(&self, file: &mut WalkedFile, report: &mut ImportReport) -> Result<()> {
        let path = self
            .store
            .upload(&self.settings.media_folder, &file.source)
            .await?;
        let upload_path = match self.settings.s3_base_url() {
            Some(base) => format!("{base}/{path}"),
            None => path,
        };
        log::debug!("Uploaded {} -> {}", file.record.original_path, upload_path);
        file.record.kind = FileKind::Other {
            upload_path: Some(upload_path),
        };
        report.assets_uploaded += 1;
        Ok(())
    }

    /// Create a note's pages from content: one page per heading section when
    /// splitting is on, a single page otherwise.
    async fn create_note_pages(&self, note: &NoteId, title: &str, content: &str) -> Result<()> {
        if self.settings.header_to_page {
            for section in split_by_headings(title, content) {
                self.store
                    .create_page(note, &section.title, &section.body)
                    .await?;
            }
        } else {
            self.store.create_page(note, title, content).await?;
        }
        Ok(())
    }

    /// Overwrite an existing note's content in place.
    async fn replace_note_pages(&self, note: &Note, content: &str) -> Result<()> {
        if self.settings.header_to_page {
            self.store.delete_pages(&note.id).await?;
            self.create_note_pages(&note.id, &note.name, content).await
        } else if let Some(first) = note.pages.first() {
            self.store.update_page(&note.id, &first.id, content).await
        } else {
            self.store
                .create_page(&note.id, &note.name, content)
                .await
                .map(|_| ())
        }
    }

    /// Pass two: rewrite links to every imported file across all notes.
    ///
    /// Matches are collected per page as an immutable snapshot, then applied
    /// by descending offset so earlier replacements never shift later ones.
    /// Returns the post-rewrite note snapshot for the index/backlink pass.
    #[instrument(skip_all, name = "vault_relink")]
    async fn relink(
        &self,
        records: &[FileRecord],
        report: &mut ImportReport,
    ) -> Result<Vec<Note>> {
        let mut notes: Vec<Note> = Vec::new();
        let mut seen: HashSet<NoteId> = HashSet::new();
        for record in records {
            if let Some(id) = &record.note_id
                && seen.insert(id.clone())
            {
                notes.push(self.store.get_note(id).await?);
            }
        }
        log::info!("Relinking across {} notes", notes.len());

        for record in records {
            let patterns = link_patterns(record)?;
            let subject: Option<Note> = record
                .note_id
                .as_ref()
                .and_then(|id| notes.iter().find(|n| n.id == *id).cloned());
            if record.is_markdown() && subject.is_none() {
                continue;
            }

            for note_idx in 0..notes.len() {
                let scanning = notes[note_idx].id.clone();
                for page_idx in 0..notes[note_idx].pages.len() {
                    let text = notes[note_idx].pages[page_idx].text.clone();
                    let mut matches: Vec<LinkMatch> = patterns
                        .iter()
                        .flat_map(|p| collect_matches(p, &text))
                        .collect();
                    if matches.is_empty() {
                        continue;
                    }
                    matches.sort_by(|a, b| b.start.cmp(&a.start));

                    let mut new_text = text;
                    let mut floor = usize::MAX;
                    let mut replaced = 0usize;
                    for m in &matches {
                        let end = m.start + m.full.len();
                        if end > floor {
                            // overlaps a replacement already applied
                            continue;
                        }
                        let resolved = match &record.kind {
                            FileKind::Markdown => subject
                                .as_ref()
                                .and_then(|s| resolve_markdown_link(s, &scanning, m)),
                            FileKind::Other { .. } => resolve_asset_link(record, m),
                        };
                        let Some(resolved) = resolved else { continue };
                        new_text.replace_range(m.start..end, &resolved);
                        floor = m.start;
                        replaced += 1;
                    }

                    if replaced > 0 {
                        let page_id = notes[note_idx].pages[page_idx].id.clone();
                        self.store.update_page(&scanning, &page_id, &new_text).await?;
                        notes[note_idx].pages[page_idx].text = new_text;
                        report.pages_rewritten += 1;
                        report.links_replaced += replaced;
                    }
                }
            }
        }
        Ok(notes)
    }

    async fn build_index(
        &self,
        records: &[FileRecord],
        notes: &[Note],
        root: Option<&FolderId>,
        report: &mut ImportReport,
    ) -> Result<()> {
        let content = index::build_index_content(records, notes);
        match self.store.find_note(INDEX_NOTE_NAME, root).await? {
            Some(note) => {
                self.replace_note_pages(&note, &content).await?;
                report.notes_updated += 1;
            }
            None => {
                let note = self
                    .store
                    .create_note(INDEX_NOTE_NAME, root, self.settings.player_observe)
                    .await?;
                self.create_note_pages(&note.id, INDEX_NOTE_NAME, &content).await?;
                report.notes_created += 1;
            }
        }
        Ok(())
    }

    async fn build_backlinks(&self, records: &[FileRecord], notes: &[Note]) -> Result<()> {
        let mut done: HashSet<&str> = HashSet::new();
        for record in records.iter().filter(|r| r.is_markdown()) {
            let Some(note_id) = record.note_id.as_deref() else {
                continue;
            };
            if !done.insert(note_id) {
                continue;
            }
            let sources = index::backlink_sources(record, records, notes);
            if sources.is_empty() {
                continue;
            }
            let links: Vec<String> = sources.iter().map(|n| n.link()).collect();
            let Some(note) = notes.iter().find(|n| n.id == note_id) else {
                continue;
            };
            let Some(first) = note.pages.first() else {
                continue;
            };
            let new_text = index::append_references(&first.text, &links);
            self.store
                .update_page(&note.id, &first.id, &new_text)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn vault(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::Builder::new().prefix("vault").tempdir().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    async fn run_import(settings: ImportSettings, store: Arc<MemoryStore>) -> ImportReport {
        VaultImporter::new(settings, store).run().await.unwrap()
    }

    #[tokio::test]
    async fn test_simple_link_rewrite() {
        let dir = vault(&[("Foo.md", "see [[Bar]]"), ("Bar.md", "bar body")]);
        let store = Arc::new(MemoryStore::new());
        let report = run_import(ImportSettings::new(dir.path()), store.clone()).await;
        assert_eq!(report.notes_created, 2);
        assert_eq!(report.links_replaced, 1);

        let journals = store.journals().await;
        let bar_id = journals.iter().find(|n| n.name == "Bar").unwrap().id.clone();
        let foo = journals.iter().find(|n| n.name == "Foo").unwrap();
        assert_eq!(foo.pages[0].text, format!("see @UUID[JournalEntry.{bar_id}]"));
    }

    #[tokio::test]
    async fn test_hidden_and_canvas_skipped() {
        let dir = vault(&[
            ("Note.md", "body"),
            (".obsidian/app.json", "{}"),
            ("board.canvas", "{}"),
        ]);
        let store = Arc::new(MemoryStore::new());
        let report = run_import(ImportSettings::new(dir.path()), store.clone()).await;
        assert_eq!(report.notes_created, 1);
        assert_eq!(store.journals().await.len(), 1);
    }

    #[tokio::test]
    async fn test_folder_chain_created() {
        let dir = vault(&[("npcs/wizards/Gale.md", "body")]);
        let store = Arc::new(MemoryStore::new());
        let settings = ImportSettings {
            root_folder_name: Some("Imported".to_string()),
            ..ImportSettings::new(dir.path())
        };
        run_import(settings, store.clone()).await;

        let folders = store.folders().await;
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        // vault top directory is skipped unless create_root_folder is set
        assert_eq!(names, vec!["Imported", "npcs", "wizards"]);
        let gale = store.find_note("Gale", Some(&folders[2].id)).await.unwrap();
        assert!(gale.is_some());
    }

    #[tokio::test]
    async fn test_overwrite_reuses_note() {
        let dir = vault(&[("Note.md", "second version")]);
        let store = Arc::new(MemoryStore::new());
        let existing = store.create_note("Note", None, false).await.unwrap();
        store.create_page(&existing.id, "Note", "first version").await.unwrap();

        let report = run_import(ImportSettings::new(dir.path()), store.clone()).await;
        assert_eq!(report.notes_updated, 1);
        assert_eq!(report.notes_created, 0);
        let note = store.get_note(&existing.id).await.unwrap();
        assert_eq!(note.pages[0].text, "second version");
    }

    #[tokio::test]
    async fn test_relink_is_idempotent() {
        let dir = vault(&[("Foo.md", "see [[Bar]]"), ("Bar.md", "bar body")]);
        let store = Arc::new(MemoryStore::new());
        run_import(ImportSettings::new(dir.path()), store.clone()).await;
        let first = store.journals().await;

        // importing again overwrites content and relinks; the rewritten
        // references must not match the link patterns a second time
        let report = run_import(ImportSettings::new(dir.path()), store.clone()).await;
        assert_eq!(report.notes_updated, 2);
        assert_eq!(store.journals().await, first);
    }

    #[tokio::test]
    async fn test_asset_upload_and_rewrite() {
        let dir = vault(&[
            ("Note.md", "map: ![[img.png|300]]"),
            ("img.png", "not really a png"),
        ]);
        let store = Arc::new(MemoryStore::new());
        let settings = ImportSettings {
            import_non_markdown: true,
            media_folder: "media".to_string(),
            ..ImportSettings::new(dir.path())
        };
        let report = run_import(settings, store.clone()).await;
        assert_eq!(report.assets_uploaded, 1);

        let journals = store.journals().await;
        assert_eq!(journals[0].pages[0].text, "map: ![img.png](media/img.png =300x*)");
    }

    #[tokio::test]
    async fn test_assets_untouched_when_disabled() {
        let dir = vault(&[("Note.md", "map: ![[img.png]]"), ("img.png", "bytes")]);
        let store = Arc::new(MemoryStore::new());
        let report = run_import(ImportSettings::new(dir.path()), store.clone()).await;
        assert_eq!(report.assets_uploaded, 0);
        assert_eq!(store.journals().await[0].pages[0].text, "map: ![[img.png]]");
    }
}
