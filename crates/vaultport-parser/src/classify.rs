//! File classification.
//!
//! Decides whether a vault entry is a markdown note or an asset, and builds
//! the per-file [`FileRecord`] with its derived reference keys. Hidden and
//! canvas files are reported by predicate only; excluding them is the
//! importer's call.

use crate::keys::derive_keys;
use vaultport_core::{FileKind, FileRecord};

/// Build a [`FileRecord`] for a relative, `/`-separated vault path.
///
/// The extension check is case-sensitive on `md`, matching how vaults name
/// their notes. Markdown files are keyed by stem (links omit `.md`); other
/// files are keyed by full file name.
pub fn classify(relative_path: &str) -> FileRecord {
    let mut segments: Vec<String> = relative_path.split('/').map(str::to_string).collect();
    let file_name = segments.pop().unwrap_or_default();

    let (file_stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), ext.to_string()),
        None => (file_name.clone(), String::new()),
    };

    let kind = if extension == "md" {
        FileKind::Markdown
    } else {
        FileKind::Other { upload_path: None }
    };

    let keys = match kind {
        FileKind::Markdown => derive_keys(&segments, &file_stem),
        FileKind::Other { .. } => derive_keys(&segments, &file_name),
    };

    FileRecord {
        original_path: relative_path.to_string(),
        file_stem,
        extension: extension.to_ascii_lowercase(),
        keys,
        directories: segments,
        note_id: None,
        kind,
    }
}

/// True iff any path segment starts with `.` (Obsidian config dirs,
/// `.trash`, dotfiles).
pub fn is_hidden(relative_path: &str) -> bool {
    relative_path.split('/').any(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_markdown() {
        let record = classify("vault/people/Gale.md");
        assert!(record.is_markdown());
        assert_eq!(record.file_stem, "Gale");
        assert_eq!(record.extension, "md");
        assert_eq!(record.directories, vec!["vault", "people"]);
        assert_eq!(record.keys.last().unwrap(), "Gale");
        assert_eq!(record.keys[0], "vault/people/Gale");
    }

    #[test]
    fn test_classify_asset() {
        let record = classify("vault/img.png");
        assert!(!record.is_markdown());
        assert_eq!(record.extension, "png");
        // assets are keyed by full file name, extension included
        assert_eq!(record.keys, vec!["vault/img.png", "img.png"]);
    }

    #[test]
    fn test_classify_uppercase_md_is_asset() {
        let record = classify("Note.MD");
        assert!(!record.is_markdown());
        assert_eq!(record.extension, "md");
    }

    #[test]
    fn test_classify_multi_dot_name() {
        let record = classify("vault/my.file.png");
        assert_eq!(record.file_stem, "my.file");
        assert_eq!(record.extension, "png");
    }

    #[test]
    fn test_classify_no_extension() {
        let record = classify("vault/LICENSE");
        assert!(!record.is_markdown());
        assert_eq!(record.extension, "");
        assert_eq!(record.file_stem, "LICENSE");
    }

    #[test]
    fn test_canvas_predicate() {
        let record = classify("vault/board.canvas");
        assert!(record.is_canvas());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden("vault/.obsidian/app.json"));
        assert!(is_hidden(".trash/old.md"));
        assert!(!is_hidden("vault/notes/visible.md"));
    }
}
