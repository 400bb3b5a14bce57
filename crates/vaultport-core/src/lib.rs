//! # Vaultport Core
//!
//! Core data models, error types, and settings for the vault import system.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Per-run file records and host document snapshots
//! - [`error`] - Error type and Result alias
//! - [`config`] - Import run settings

pub mod config;
pub mod error;
pub mod models;

pub use config::ImportSettings;
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::ImportSettings;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        FileKind, FileRecord, FolderId, ImportReport, LinkMatch, Note, NoteId, Page, PageId,
        PageSection,
    };
}
