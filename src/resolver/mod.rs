//! Literal Resolver: turns raw configuration source text into the concrete
//! two-level value tree.
//!
//! Symbolic references the literal parser cannot evaluate are first replaced
//! with literal stand-ins from the substitution table. The substituted text
//! is staged as a uniquely named temporary artifact in the cache directory
//! and parsed from there, mirroring the original stage's
//! substitute/cache/evaluate/unlink cycle; the artifact is removed on every
//! exit path, success or failure.

mod parser;
mod value;

pub use value::ConfigValue;

use std::fs;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;

use crate::config::SubstitutionTable;
use crate::error::ExtractError;
use parser::Literal;

/// Evaluated configuration values: mainKey -> subKey -> value, in source
/// order on both levels.
pub type ConfigTree = IndexMap<String, IndexMap<String, ConfigValue>>;

/// Resolve raw source text into a [`ConfigTree`].
///
/// Fails with [`ExtractError::Evaluation`] when the substituted text does
/// not parse as a mapping of mappings of scalar-or-composite.
pub fn resolve(
    raw: &str,
    substitutions: &SubstitutionTable,
    cache_dir: &Path,
) -> Result<ConfigTree, ExtractError> {
    let substituted = apply_substitutions(raw, substitutions);

    // The NamedTempFile guard unlinks the artifact when it drops, so the
    // cleanup guarantee holds on the error paths below as well.
    let mut artifact = tempfile::Builder::new()
        .prefix("confdoc-")
        .suffix(".src")
        .tempfile_in(cache_dir)
        .map_err(|source| ExtractError::CacheArtifact {
            dir: cache_dir.to_path_buf(),
            source,
        })?;
    artifact
        .write_all(substituted.as_bytes())
        .and_then(|_| artifact.flush())
        .map_err(|source| ExtractError::CacheArtifact {
            dir: cache_dir.to_path_buf(),
            source,
        })?;

    let staged = fs::read_to_string(artifact.path()).map_err(|source| {
        ExtractError::CacheArtifact {
            dir: cache_dir.to_path_buf(),
            source,
        }
    })?;

    shape(parser::parse_document(&staged)?)
}

/// Apply every substitution pair as an independent literal find-and-replace.
fn apply_substitutions(raw: &str, substitutions: &SubstitutionTable) -> String {
    let mut text = raw.to_string();
    for (token, replacement) in substitutions {
        text = text.replace(token.as_str(), replacement);
    }
    text
}

/// Force the parsed literal into the expected two-level shape. Arrays below
/// the second level collapse into [`ConfigValue::Composite`].
fn shape(doc: Literal) -> Result<ConfigTree, ExtractError> {
    let Literal::Array(sections) = doc else {
        return Err(ExtractError::Evaluation(
            "top-level value is not an array".to_string(),
        ));
    };

    let mut tree = ConfigTree::new();
    for (main_key, section) in sections {
        let Literal::Array(entries) = section else {
            return Err(ExtractError::Evaluation(format!(
                "`{}` is not an array of configuration entries",
                main_key
            )));
        };
        let shaped = entries
            .into_iter()
            .map(|(sub_key, value)| {
                let value = match value {
                    Literal::Scalar(scalar) => scalar,
                    Literal::Array(_) => ConfigValue::Composite,
                };
                (sub_key, value)
            })
            .collect();
        tree.insert(main_key, shaped);
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin_substitutions;

    const SOURCE: &str = "return array(\n    'GFX' => array( //graphics settings\n        'png_to_gif' => FALSE, // convert pngs\n        'undocumented' => TRUE,\n        'colorspaces' => array('RGB', ),\n    ),\n);\n";

    fn temp_cache() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_resolve_two_level_tree() {
        let cache = temp_cache();
        let table = SubstitutionTable::new();
        let tree = resolve(SOURCE, &table, cache.path()).unwrap();

        assert_eq!(tree["GFX"]["png_to_gif"], ConfigValue::Bool(false));
        assert_eq!(tree["GFX"]["undocumented"], ConfigValue::Bool(true));
    }

    #[test]
    fn test_deeper_arrays_collapse_to_composite() {
        let cache = temp_cache();
        let tree = resolve(SOURCE, &SubstitutionTable::new(), cache.path()).unwrap();
        assert_eq!(tree["GFX"]["colorspaces"], ConfigValue::Composite);
        assert!(!tree["GFX"]["colorspaces"].is_scalar());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let cache = temp_cache();
        let table = builtin_substitutions().clone();
        let first = resolve(SOURCE, &table, cache.path()).unwrap();
        let second = resolve(SOURCE, &table, cache.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_substitution_replaces_symbolic_token() {
        let cache = temp_cache();
        let raw = "return array(\n    'SYS' => array(\n        'errorLevel' => \\TYPO3\\CMS\\Core\\Log\\LogLevel::WARNING, // threshold\n    ),\n);\n";
        let tree = resolve(raw, builtin_substitutions(), cache.path()).unwrap();
        assert_eq!(tree["SYS"]["errorLevel"], ConfigValue::Int(4));
    }

    #[test]
    fn test_unsubstituted_token_fails_evaluation() {
        let cache = temp_cache();
        let raw = "return array('SYS' => array('x' => SOME_CONSTANT));";
        let err = resolve(raw, &SubstitutionTable::new(), cache.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Evaluation(_)));
    }

    #[test]
    fn test_scalar_section_fails_shape_check() {
        let cache = temp_cache();
        let raw = "return array('GFX' => 1);";
        let err = resolve(raw, &SubstitutionTable::new(), cache.path()).unwrap_err();
        assert!(err.to_string().contains("GFX"));
    }

    #[test]
    fn test_artifact_removed_on_success() {
        let cache = temp_cache();
        resolve(SOURCE, &SubstitutionTable::new(), cache.path()).unwrap();
        assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_artifact_removed_on_evaluation_failure() {
        let cache = temp_cache();
        let raw = "return array('GFX' => array('x' => BROKEN));";
        assert!(resolve(raw, &SubstitutionTable::new(), cache.path()).is_err());
        assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_substitutions_are_independent() {
        let mut table = SubstitutionTable::new();
        table.insert("FIRST".to_string(), "1".to_string());
        table.insert("SECOND".to_string(), "2".to_string());
        let out = apply_substitutions("'a' => FIRST, 'b' => SECOND,", &table);
        assert_eq!(out, "'a' => 1, 'b' => 2,");
    }
}
