use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by one extraction transform.
///
/// All variants are fatal for the transform that raised them: no partial
/// properties text is produced. Reconciliation mismatches between the
/// comment tree and the evaluated configuration are deliberately *not*
/// errors; they are skipped per record (see `emitter`).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured source file cannot be read.
    #[error("cannot read configuration source {path:?}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The substituted source could not be staged as a temporary artifact.
    #[error("cannot stage substituted source in {dir:?}")]
    CacheArtifact {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The substituted source does not evaluate as the expected two-level
    /// configuration literal.
    #[error("configuration source does not evaluate: {0}")]
    Evaluation(String),
}
