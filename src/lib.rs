//! Confdoc - documented-defaults extractor for configuration literals
//!
//! Confdoc is a CLI tool and library that reads a framework's shipped
//! default configuration file (a commented, nested key/value literal),
//! evaluates its default values, pairs them with the inline comments that
//! document them, and emits a flat properties listing - one
//! `# comment` / `mainKey.subKey=value` record per documented scalar
//! entry. It runs as one stage of a build pipeline that turns the shipped
//! defaults into documentation/property artifacts.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and the substitution table
//! - `resolver`: Literal Resolver (substitution + literal-only evaluation)
//! - `scanner`: Comment Scanner (two-state line scan of the raw source)
//! - `emitter`: Property Emitter (comment/value reconciliation and output)
//! - `stage`: The pipeline stage tying the three together

pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod resolver;
pub mod scanner;
pub mod stage;

pub use error::ExtractError;
