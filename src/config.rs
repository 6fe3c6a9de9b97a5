use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".confdocrc.json";

/// Ordered (symbolic token, literal replacement) pairs applied to the raw
/// source text before evaluation.
pub type SubstitutionTable = IndexMap<String, String>;

// Built-in stand-ins for the symbolic references the shipped default
// configuration is known to carry: log-level constant references and the
// base constants its host environment would define before inclusion.
// Replacements are source-text literals, so string stand-ins stay quoted.
static BUILTIN_SUBSTITUTIONS: LazyLock<SubstitutionTable> = LazyLock::new(|| {
    SubstitutionTable::from([
        (
            r"\TYPO3\CMS\Core\Log\LogLevel::DEBUG".to_string(),
            "7".to_string(),
        ),
        (
            r"\TYPO3\CMS\Core\Log\LogLevel::WARNING".to_string(),
            "4".to_string(),
        ),
        (
            "PHP_EXTENSIONS_DEFAULT".to_string(),
            "'php,php3,php4,php5,php6,phpsh,inc,phtml'".to_string(),
        ),
        (
            "FILE_DENY_PATTERN_DEFAULT".to_string(),
            r"'\\.(php[3-6]?|phpsh|phtml)(\\..*)?$|^\\.htaccess$'".to_string(),
        ),
        ("TYPO3_version".to_string(), "'6.0.6'".to_string()),
    ])
});

/// Process-wide, lazily-initialized, read-only substitution defaults.
pub fn builtin_substitutions() -> &'static SubstitutionTable {
    &BUILTIN_SUBSTITUTIONS
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extra substitution pairs, merged over the built-in table.
    #[serde(default)]
    pub substitutions: SubstitutionTable,
    /// Directory for the transient evaluation artifact.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    env::temp_dir()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            substitutions: SubstitutionTable::new(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl Config {
    /// Effective substitution table: built-ins first, then the configured
    /// extras (an extra with the same token overrides the built-in).
    pub fn substitution_table(&self) -> SubstitutionTable {
        let mut table = builtin_substitutions().clone();
        for (token, replacement) in &self.substitutions {
            table.insert(token.clone(), replacement.clone());
        }
        table
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
