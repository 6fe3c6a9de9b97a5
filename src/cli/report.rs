//! Verbose summary printing for the extract command.
//!
//! The properties text itself goes to stdout (or the output file); the
//! summary goes to stderr so a piped consumer never sees it.

use std::path::Path;

use colored::Colorize;

use crate::emitter::PropertiesOutput;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print_summary(result: &PropertiesOutput, source: &Path, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!(
        "{} {} properties extracted from {}",
        SUCCESS_MARK.green(),
        result.emitted.to_string().bold(),
        source.display()
    );

    if result.undocumented > 0 {
        eprintln!(
            "  {} undocumented entries skipped",
            result.undocumented.to_string().dimmed()
        );
    }
    if result.composite > 0 {
        eprintln!(
            "  {} composite values skipped",
            result.composite.to_string().dimmed()
        );
    }
    if result.inconsistent > 0 {
        eprintln!(
            "  {} {}",
            result.inconsistent.to_string().yellow(),
            "documented entries missing from the evaluated configuration".yellow()
        );
    }
}
