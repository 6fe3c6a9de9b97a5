use std::fmt;

/// An evaluated configuration value.
///
/// Scalars carry the concrete default; nested arrays below the second level
/// collapse into the opaque `Composite` marker, since they cannot be
/// represented as a single flat property line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Composite,
}

impl ConfigValue {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::Composite)
    }
}

/// Canonical textual form used on the emitted property line.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Str(s) => f.write_str(s),
            ConfigValue::Int(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{}", n),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Composite => f.write_str("array(...)"),
        }
    }
}
