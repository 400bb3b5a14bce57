//! Leading YAML frontmatter removal.
//!
//! Obsidian notes often start with a `---` fenced properties block that has
//! no meaning to the host. The import pass strips it, along with the blank
//! lines that follow the closing fence.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A frontmatter block at the very start of the document, CRLF tolerated
    static ref FRONTMATTER_PATTERN: Regex =
        Regex::new(r"\A---\r?\n(?:[^-].*\r?\n)+---(?:\r?\n)+").unwrap();
}

/// Remove a leading frontmatter block, if present.
pub fn strip_frontmatter(text: &str) -> String {
    if text.len() <= 6 {
        return text.to_string();
    }
    FRONTMATTER_PATTERN.replace(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_frontmatter() {
        let text = "---\ntags: [npc]\naliases: [G]\n---\n\n# Gale\nbody";
        assert_eq!(strip_frontmatter(text), "# Gale\nbody");
    }

    #[test]
    fn test_strips_crlf_frontmatter() {
        let text = "---\r\ntags: [npc]\r\n---\r\nbody";
        assert_eq!(strip_frontmatter(text), "body");
    }

    #[test]
    fn test_no_frontmatter_untouched() {
        let text = "# Gale\nbody with --- a rule\n";
        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_mid_document_fence_untouched() {
        let text = "intro\n---\nkey: value\n---\n";
        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_short_document_untouched() {
        assert_eq!(strip_frontmatter("---\n"), "---\n");
    }
}
