//! Comment Scanner: a line-oriented two-state scan over the raw source
//! text, collecting per-key inline comments.
//!
//! The source format is one entry per line by convention, so a cheap line
//! scanner is enough; no expression grammar is involved. The scanner walks
//! the text independently of the resolver and classifies matched keys into
//! section headers (the uppercase `'GFX' => array(` style lines) and leaf
//! entries underneath them.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Trimmed line that opens the top-level returned literal.
const BLOCK_OPEN: &str = "return array(";

/// Trimmed line that closes it.
const BLOCK_CLOSE: &str = ");";

// Matches one key assignment: a quoted key, the arrow token, and the value
// expression occupying the rest of the line.
static KEY_ASSIGNMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([[:alnum:]_-]*)["']\s*=>(.*)"#).unwrap()
});

// Matches a trailing inline comment in the value remainder: a comma, then a
// line comment to end of line.
static TRAILING_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",[\t ]*//(.*)").unwrap());

/// Comments collected for one section: the section header's own comment
/// plus one comment per leaf entry, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub comment: String,
    pub entries: IndexMap<String, String>,
}

/// Per-key comments, mainKey -> subKey -> comment, in first-seen order on
/// both levels. The order is user-visible: the emitter iterates it as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTree {
    sections: IndexMap<String, Section>,
}

impl CommentTree {
    pub fn sections(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.sections.iter()
    }

    pub fn get(&self, main_key: &str) -> Option<&Section> {
        self.sections.get(main_key)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn record_section(&mut self, main_key: &str, comment: String) {
        // reopening a section keeps its position and entries
        self.sections.entry(main_key.to_string()).or_default().comment = comment;
    }

    fn record_entry(&mut self, main_key: &str, sub_key: &str, comment: String) {
        self.sections
            .entry(main_key.to_string())
            .or_default()
            .entries
            .insert(sub_key.to_string(), comment);
    }
}

/// Heuristic that distinguishes a section header from a leaf assignment:
/// the value expression opens a composite literal and the key is written in
/// uppercase. Cheap, but reliable for the conventional source layout.
fn is_section_header(key: &str, value_expr: &str) -> bool {
    value_expr.trim().to_lowercase().starts_with("array") && key == key.to_uppercase()
}

/// Extract the trailing inline comment from a value remainder, trimmed;
/// empty when the line carries none.
fn trailing_comment(value_expr: &str) -> String {
    TRAILING_COMMENT_REGEX
        .captures(value_expr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Scan raw source text into a [`CommentTree`].
///
/// Two states: outside the returned literal and inside it. Lines inside
/// that match no key assignment, and matched keys outside any recognized
/// section, are dropped silently. An unterminated block is not an error;
/// scanning simply stops at end of input.
pub fn scan(raw: &str) -> CommentTree {
    let mut tree = CommentTree::default();
    let mut inside = false;
    let mut main_key: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();

        if inside {
            if line == BLOCK_CLOSE {
                inside = false;
                main_key = None;
            } else if let Some(caps) = KEY_ASSIGNMENT_REGEX.captures(line) {
                let key = caps.get(1).map_or("", |m| m.as_str());
                let value_expr = caps.get(2).map_or("", |m| m.as_str());
                let comment = trailing_comment(value_expr);

                if is_section_header(key, value_expr) {
                    tree.record_section(key, comment);
                    main_key = Some(key.to_string());
                } else if let Some(main) = &main_key {
                    tree.record_entry(main, key, comment);
                }
                // no active section: stray match, dropped
            }
        } else if line == BLOCK_OPEN {
            inside = true;
        }
    }

    tree
}
