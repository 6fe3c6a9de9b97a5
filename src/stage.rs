//! The pipeline stage: one transform from a configuration source file to
//! the flat properties listing.
//!
//! The stage sits in a chain of text transforms, but any text piped into it
//! from an upstream stage is ignored by contract: the stage always re-reads
//! its configured source file. Each transform rebuilds both trees from
//! scratch; nothing is cached across invocations.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, SubstitutionTable, builtin_substitutions};
use crate::emitter::{self, PropertiesOutput};
use crate::error::ExtractError;
use crate::resolver;
use crate::scanner;

#[derive(Debug, Clone)]
pub struct ExtractStage {
    source: PathBuf,
    cache_dir: PathBuf,
    substitutions: SubstitutionTable,
}

impl ExtractStage {
    /// Stage for one source file, with the built-in substitution table and
    /// the platform temp dir for the evaluation artifact.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        ExtractStage {
            source: source.into(),
            cache_dir: env::temp_dir(),
            substitutions: builtin_substitutions().clone(),
        }
    }

    /// Stage configured from a loaded [`Config`].
    pub fn with_config(source: impl Into<PathBuf>, config: &Config) -> Self {
        ExtractStage {
            source: source.into(),
            cache_dir: config.cache_dir.clone(),
            substitutions: config.substitution_table(),
        }
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn substitutions(mut self, table: SubstitutionTable) -> Self {
        self.substitutions = table;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Run one transform: read the source, resolve values, scan comments,
    /// merge into the properties text.
    ///
    /// `piped` is whatever an upstream stage produced; it is deliberately
    /// unused (documented behavior of the stage, not a defect).
    pub fn transform(&self, piped: Option<&str>) -> Result<PropertiesOutput, ExtractError> {
        let _ = piped;

        let raw = fs::read_to_string(&self.source).map_err(|source| {
            ExtractError::SourceUnavailable {
                path: self.source.clone(),
                source,
            }
        })?;

        let values = resolver::resolve(&raw, &self.substitutions, &self.cache_dir)?;
        let comments = scanner::scan(&raw);
        Ok(emitter::emit(&comments, &values))
    }
}
