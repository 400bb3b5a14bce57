//! Heading-based page splitting.
//!
//! A single markdown document becomes an ordered sequence of (title, body)
//! sections, one per level-1 heading region. Nested headings are promoted a
//! level in each split-out section, since the sub-document no longer nests
//! under its original level-1 heading.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use vaultport_core::PageSection;

lazy_static! {
    /// Matches a level-1 heading line: `# ` through end of line
    static ref HEADING1_PATTERN: Regex = Regex::new(r"(?m)^# .*$").unwrap();
    /// Matches nested heading markers, level 2 through 6
    static ref NESTED_HEADING_PATTERN: Regex = Regex::new(r"(?m)^(#{2,6}) ").unwrap();
}

/// Split `text` into page sections at level-1 heading boundaries.
///
/// The first section is titled `title` unless the document opens with a
/// heading, which then names it. A document with no level-1 headings yields
/// exactly one section containing the text verbatim. Section order is
/// appearance order, which is the page order used when creating sub-pages.
pub fn split_by_headings(title: &str, text: &str) -> Vec<PageSection> {
    let mut sections = Vec::new();
    let mut cursor = 0usize;
    let mut current_title = title.to_string();

    for m in HEADING1_PATTERN.find_iter(text) {
        let heading = heading_text(m.as_str());
        if m.start() == 0 {
            // the document opens with a heading: it names the first
            // section, nothing has been consumed yet
            current_title = heading;
            cursor = skip_line_break(text, m.end());
            continue;
        }
        sections.push(PageSection {
            title: std::mem::replace(&mut current_title, heading),
            body: promote_headings(&text[cursor..m.start()]),
        });
        cursor = skip_line_break(text, m.end());
    }

    if sections.is_empty() && cursor == 0 {
        // no level-1 headings at all: one section, input untouched
        return vec![PageSection {
            title: current_title,
            body: text.to_string(),
        }];
    }

    sections.push(PageSection {
        title: current_title,
        body: promote_headings(&text[cursor..]),
    });
    sections
}

/// Promote every nested heading one level (`## X` becomes `# X`).
fn promote_headings(body: &str) -> String {
    NESTED_HEADING_PATTERN
        .replace_all(body, |caps: &Captures| format!("{} ", &caps[1][1..]))
        .into_owned()
}

fn heading_text(line: &str) -> String {
    line.strip_prefix("# ")
        .unwrap_or(line)
        .trim_end_matches('\r')
        .to_string()
}

/// The matched heading line stops before its `\n`; consume it too so the
/// following section body does not start with a stray line break.
fn skip_line_break(text: &str, end: usize) -> usize {
    if text.as_bytes().get(end) == Some(&b'\n') {
        end + 1
    } else {
        end
    }
}
