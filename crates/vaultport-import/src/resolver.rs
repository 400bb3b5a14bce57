//! Link resolution.
//!
//! Turns a [`LinkMatch`] into the host's structured reference string, or
//! decides the match should be left alone. Unresolved headers degrade (the
//! raw header text is kept visible after the reference) rather than erroring;
//! an empty match is discarded silently.

use lazy_static::lazy_static;
use regex::Regex;
use vaultport_core::{FileKind, FileRecord, LinkMatch, Note, NoteId};

lazy_static! {
    /// Trailing resize directive on an embed: `|300x200]` or `|300]`
    static ref RESIZE_PATTERN: Regex = Regex::new(r"(?i)\|\d+(x\d+)?\]").unwrap();
}

/// Resolve a wiki-link match against the subject note it targets.
///
/// `scanning` identifies the note whose page is currently being rewritten.
/// Returns `None` when the match must be skipped: an empty `[[]]`, a
/// same-page header link found in some other note, or a same-page header
/// that matches none of the subject's pages.
pub fn resolve_markdown_link(subject: &Note, scanning: &NoteId, m: &LinkMatch) -> Option<String> {
    if m.is_empty() {
        return None;
    }

    let page = m.page.clone().unwrap_or_default();

    // Header and alias share a syntactic slot, so either may land in either
    // capture; the sigil decides which is which.
    let header = match (&m.group2, &m.group3) {
        (_, Some(g3)) if g3.starts_with('#') => g3.clone(),
        (Some(g2), _) if g2.starts_with('#') => g2.clone(),
        _ => String::new(),
    };
    let alias = match (&m.group2, &m.group3) {
        (_, Some(g3)) if g3.starts_with('|') => g3.clone(),
        (Some(g2), None) if g2.starts_with('|') => g2.clone(),
        _ => String::new(),
    };

    // A bare header link is only meaningful relative to "this page": it
    // resolves while scanning the subject's own note and nowhere else.
    if page.is_empty() && !header.is_empty() && subject.id != *scanning {
        return None;
    }

    let mut link = String::from("@UUID[");
    if !page.is_empty() {
        link.push_str("JournalEntry.");
        link.push_str(&subject.id);
    }

    let mut anchored = true;
    if !header.is_empty() {
        let header_text = &header[1..];
        let anchor = valid_link_header(subject, header_text);
        anchored = anchor.is_some();
        match page_id_for(subject, header_text) {
            Some(page_id) => {
                if !page.is_empty() {
                    link.push_str(".JournalEntryPage");
                }
                link.push('.');
                link.push_str(page_id);
                if let Some(anchor) = &anchor {
                    link.push_str(anchor);
                }
                link.push(']');
            }
            None if page.is_empty() => return None,
            // no page carries the heading: degrade to the bare note reference
            None => link.push(']'),
        }
    } else {
        link.push(']');
    }

    if !alias.is_empty() {
        link.push('{');
        link.push_str(&alias[1..]);
        link.push('}');
    }

    // Degraded link: the header exists in the source but no valid anchor can
    // be derived, so keep it as trailing plain text instead of dropping it.
    if !anchored && !page.is_empty() && !header.is_empty() {
        link.push(' ');
        link.push_str(&header);
    }

    Some(link)
}

/// Resolve an asset match to a markdown image reference pointing at the
/// uploaded path, carrying over any resize directive from the source.
pub fn resolve_asset_link(record: &FileRecord, m: &LinkMatch) -> Option<String> {
    let upload_path = match &record.kind {
        FileKind::Markdown => return None,
        FileKind::Other { upload_path } => upload_path.as_deref()?,
    };

    let mut link = format!(
        "![{}]({})",
        record.file_name(),
        encode_upload_path(upload_path)
    );

    if let Some(resize) = RESIZE_PATTERN.find(&m.full) {
        let raw = resize
            .as_str()
            .trim_start_matches('|')
            .trim_end_matches(']')
            .to_ascii_lowercase();
        let mut dims: Vec<&str> = raw.split('x').collect();
        if dims.len() == 1 {
            dims.push("*");
        }
        link.pop();
        link.push_str(&format!(" ={})", dims.join("x")));
    }

    Some(link)
}

/// The id of the first subject page whose name equals the header text or
/// whose body carries it as a heading.
fn page_id_for<'a>(note: &'a Note, header_or_page: &str) -> Option<&'a str> {
    let heading_probe = format!("# {header_or_page}");
    note.pages
        .iter()
        .find(|p| p.name == header_or_page || p.text.contains(&heading_probe))
        .map(|p| p.id.as_str())
}

/// Derive a valid anchor fragment for a header, if the host can address it.
///
/// A page named like the header anchors to the page name. Otherwise heading
/// lines are scanned across all pages; the host only renders anchors for
/// headings up to level 2, and the last addressable match wins.
fn valid_link_header(note: &Note, header_text: &str) -> Option<String> {
    if header_text.is_empty() {
        return None;
    }
    let heading_line = match Regex::new(&format!(
        r"(?mi)^(#+)\s({})$",
        regex::escape(header_text)
    )) {
        Ok(re) => re,
        Err(e) => {
            log::debug!("Header pattern failed to compile for {header_text:?}: {e}");
            return None;
        }
    };

    let mut valid = None;
    for page in &note.pages {
        if page.name == header_text {
            return Some(slug_anchor(&page.name));
        }
        for caps in heading_line.captures_iter(&page.text) {
            if caps[1].len() > 2 {
                continue;
            }
            valid = Some(slug_anchor(&caps[2]));
        }
    }
    valid
}

/// Anchor form of a heading: lower-cased, spaces to hyphens, apostrophes
/// stripped (the host drops them when rendering anchors).
fn slug_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len() + 1);
    anchor.push('#');
    for c in text.to_lowercase().chars() {
        match c {
            ' ' => anchor.push('-'),
            '\'' => {}
            c => anchor.push(c),
        }
    }
    anchor
}

/// Percent-encode a path for embedding in markdown image syntax, keeping
/// `/` separators and any scheme/host prefix intact.
fn encode_upload_path(path: &str) -> String {
    match path.split_once("://") {
        Some((scheme, rest)) => match rest.split_once('/') {
            Some((host, tail)) => format!("{scheme}://{host}/{}", encode_segments(tail)),
            None => path.to_string(),
        },
        None => encode_segments(path),
    }
}

fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
