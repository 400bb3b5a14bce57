//! # Vaultport Parser
//!
//! The pure-text half of the import engine: reference-key derivation, file
//! classification, link pattern compilation, heading-based page splitting,
//! and frontmatter stripping. Everything here is synchronous and side-effect
//! free; resolution against imported notes lives in `vaultport-import`.

pub mod classify;
pub mod frontmatter;
pub mod keys;
pub mod patterns;
pub mod splitter;

pub use classify::{classify, is_hidden};
pub use frontmatter::strip_frontmatter;
pub use keys::derive_keys;
pub use patterns::{asset_link_patterns, collect_matches, link_patterns, markdown_link_patterns};
pub use splitter::split_by_headings;
