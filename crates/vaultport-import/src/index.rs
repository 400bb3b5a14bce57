//! Index and backlink content builders.
//!
//! Pure text assembly for the optional third pass: an `Index` journal
//! grouping every imported note by top-level vault directory, and a
//! references section appended to notes that are linked from elsewhere.

use std::collections::{HashMap, HashSet};
use vaultport_core::{FileRecord, Note};

/// The directory a record is grouped under in the index.
///
/// `directories[0]` is the vault root itself, so the first real subfolder
/// decides the group; files sitting at the vault root are uncategorized.
pub fn top_directory(record: &FileRecord) -> &str {
    if record.directories.len() > 1 {
        &record.directories[1]
    } else {
        "Uncategorized"
    }
}

/// Markdown body of the Index journal: one heading per directory, one
/// display link per imported note, directories sorted, notes in import order.
pub fn build_index_content(records: &[FileRecord], notes: &[Note]) -> String {
    let by_id: HashMap<&str, &Note> = notes.iter().map(|n| (n.id.as_str(), n)).collect();
    let imported: Vec<&FileRecord> = records
        .iter()
        .filter(|r| r.is_markdown() && r.note_id.is_some())
        .collect();

    let mut directories: Vec<&str> = imported.iter().map(|r| top_directory(r)).collect();
    directories.sort();
    directories.dedup();

    let mut content = String::new();
    for dir in directories {
        content.push_str("# ");
        content.push_str(dir);
        content.push('\n');
        for record in imported.iter().filter(|r| top_directory(r) == dir) {
            if let Some(note) = record.note_id.as_deref().and_then(|id| by_id.get(id)) {
                content.push_str("- ");
                content.push_str(&note.link());
                content.push('\n');
            }
        }
        content.push('\n');
    }
    content
}

/// Notes that link to `target`, detected by the presence of the target's
/// note id in their page text after relinking. Sorted by the linking file's
/// stem; the target itself is excluded.
pub fn backlink_sources<'a>(
    target: &FileRecord,
    records: &[FileRecord],
    notes: &'a [Note],
) -> Vec<&'a Note> {
    let Some(target_id) = target.note_id.as_deref() else {
        return Vec::new();
    };
    let by_id: HashMap<&str, &Note> = notes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut sources: Vec<(&str, &Note)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records.iter().filter(|r| r.is_markdown()) {
        let Some(id) = record.note_id.as_deref() else {
            continue;
        };
        if id == target_id || !seen.insert(id) {
            continue;
        }
        let Some(note) = by_id.get(id).copied() else {
            continue;
        };
        if note.pages.iter().any(|p| p.text.contains(target_id)) {
            sources.push((record.file_stem.as_str(), note));
        }
    }
    sources.sort_by(|a, b| a.0.cmp(b.0));
    sources.into_iter().map(|(_, n)| n).collect()
}

/// Append a references section listing the given display links.
pub fn append_references(text: &str, links: &[String]) -> String {
    let mut out = String::from(text);
    out.push_str("\n\n# References\n");
    for link in links {
        out.push_str("- ");
        out.push_str(link);
        out.push('\n');
    }
    out
}
