//! Property Emitter: reconciles the scanner's comment tree with the
//! resolver's value tree and formats the flat properties listing.

use std::fmt::Write;

use crate::resolver::ConfigTree;
use crate::scanner::CommentTree;

/// Marker prefixing each emitted comment line.
pub const COMMENT_MARKER: char = '#';

/// One finished transform: the properties text plus the per-record skip
/// counts the verbose summary reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesOutput {
    pub text: String,
    pub emitted: usize,
    /// Entries with no inline comment; undocumented means internal-use-only.
    pub undocumented: usize,
    /// Documented entries whose value is a composite and cannot be a flat
    /// property line.
    pub composite: usize,
    /// Documented entries the evaluated configuration does not contain: the
    /// two independently derived trees disagree. Skipped rather than fatal,
    /// so one malformed entry cannot block the rest of the output.
    pub inconsistent: usize,
}

/// Merge both trees into the final properties text.
///
/// Iterates the comment tree in its insertion order, mainKeys outer and
/// subKeys inner. Each qualifying record becomes two lines:
///
/// ```text
/// # <comment>
/// <mainKey>.<subKey>=<value>
/// ```
///
/// Section-level comments never produce standalone records. The text is
/// empty when no record qualifies.
pub fn emit(comments: &CommentTree, values: &ConfigTree) -> PropertiesOutput {
    let mut out = PropertiesOutput::default();

    for (main_key, section) in comments.sections() {
        for (sub_key, comment) in &section.entries {
            if comment.is_empty() {
                out.undocumented += 1;
                continue;
            }
            let Some(value) = values.get(main_key).and_then(|s| s.get(sub_key)) else {
                out.inconsistent += 1;
                continue;
            };
            if !value.is_scalar() {
                out.composite += 1;
                continue;
            }
            // infallible: writing into a String
            let _ = write!(
                out.text,
                "{} {}\n{}.{}={}\n",
                COMMENT_MARKER, comment, main_key, sub_key, value
            );
            out.emitted += 1;
        }
    }

    out
}
