//! Link pattern compilation.
//!
//! For every key a file can be referenced by, compile the case-insensitive
//! patterns that detect references to it in note text. Markdown notes match
//! the wiki-link grammar `[[key#header|alias]]` with every inner group
//! optional; assets match embed syntax `![[key|caption]]` and markdown image
//! syntax `![alt](key)`. Keys are escaped before interpolation, so file names
//! containing regex metacharacters match literally.
//!
//! The patterns deliberately over-match: the same bracket group can be a page
//! reference, a header reference, or an alias depending on position. The
//! resolver, not the pattern, disambiguates.

use regex::Regex;
use vaultport_core::{Error, FileKind, FileRecord, LinkMatch, Result};

fn compile(source: String) -> Result<Regex> {
    Regex::new(&source).map_err(|e| Error::parse_error(format!("Bad link pattern: {e}")))
}

/// Patterns matching wiki-links to a markdown note, one per key.
///
/// Capture groups: 1 = page key, 2 = header fragment (leading `#`),
/// 3 = alias fragment (leading `|`). All optional, so pure same-page header
/// links (`[[#Header]]`) and alias-less links both match.
pub fn markdown_link_patterns(keys: &[String]) -> Result<Vec<Regex>> {
    keys.iter()
        .map(|k| {
            compile(format!(
                r"(?i)!?\[\[({})?(#[^|\]]*)?(\|[^\]]*)?\]\]",
                regex::escape(k)
            ))
        })
        .collect()
}

/// Patterns matching references to a non-markdown asset, one pair of
/// families per key: wiki-style embeds, then markdown image syntax.
pub fn asset_link_patterns(keys: &[String]) -> Result<Vec<Regex>> {
    let embeds = keys
        .iter()
        .map(|k| compile(format!(r"(?i)!\[\[{}(\s*\|[^\]]*)?\]\]", regex::escape(k))));
    let images = keys
        .iter()
        .map(|k| compile(format!(r"(?i)!\[[^\]]+\]\({}\)", regex::escape(k))));
    embeds.chain(images).collect()
}

/// The full pattern list for a file record.
pub fn link_patterns(record: &FileRecord) -> Result<Vec<Regex>> {
    match record.kind {
        FileKind::Markdown => markdown_link_patterns(&record.keys),
        FileKind::Other { .. } => asset_link_patterns(&record.keys),
    }
}

/// Apply one pattern to page text, returning every match as an immutable
/// snapshot (replacements are applied later, by descending offset).
pub fn collect_matches(pattern: &Regex, text: &str) -> Vec<LinkMatch> {
    pattern
        .captures_iter(text)
        .map(|caps| {
            let full = caps.get(0).map(|m| (m.as_str(), m.start()));
            let (full_text, start) = full.unwrap_or(("", 0));
            LinkMatch {
                full: full_text.to_string(),
                start,
                page: caps.get(1).map(|m| m.as_str().to_string()),
                group2: caps.get(2).map(|m| m.as_str().to_string()),
                group3: caps.get(3).map(|m| m.as_str().to_string()),
            }
        })
        .collect()
}
