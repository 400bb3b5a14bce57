//! # Vaultport
//!
//! Imports a folder of interlinked markdown notes (an Obsidian vault) into a
//! host journal store, rewriting wiki-style `[[...]]` links and markdown
//! image links into the host's `@UUID[...]` reference format, optionally
//! splitting documents into pages at level-1 headings.
//!
//! This crate is the facade: it re-exports the core types, the parsing
//! layer, and the import engine, and carries the `vaultport` CLI binary.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vaultport::{ImportSettings, MemoryStore, VaultImporter};
//!
//! # async fn demo() -> vaultport::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let settings = ImportSettings::new("/path/to/vault");
//! let report = VaultImporter::new(settings, store.clone()).run().await?;
//! println!("{} notes imported", report.notes_created);
//! # Ok(())
//! # }
//! ```

pub use vaultport_core::{
    Error, FileKind, FileRecord, FolderId, ImportReport, ImportSettings, LinkMatch, Note, NoteId,
    Page, PageId, PageSection, Result,
};
pub use vaultport_import::{
    AssetStore, JournalStore, MemoryStore, VaultImporter, resolve_asset_link,
    resolve_markdown_link,
};
pub use vaultport_parser::{
    classify, collect_matches, derive_keys, is_hidden, link_patterns, split_by_headings,
    strip_frontmatter,
};
