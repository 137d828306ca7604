//! Error types.
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`create_number_formatter`](crate::create_number_formatter).
///
/// Only configuration mistakes end up here. A bad format string never does: the factory turns
/// it into a fallback formatter instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatterError {
    /// A mandatory configuration field was not provided.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field, e.g. `config.formatString`.
        field: &'static str,
    },
}

/// Errors raised while compiling a pattern into a format function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The specifier does not match the pattern grammar.
    #[error("invalid format: {specifier}")]
    InvalidSpecifier {
        /// The offending specifier.
        specifier: String,
    },

    /// The locale definition cannot be used to render numbers.
    #[error("invalid locale: {reason}")]
    InvalidLocale {
        /// What is wrong with the definition.
        reason: String,
    },
}

/// Errors raised while loading a locale definition from disk.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// Failed to open the locale file.
    #[error("failed to open locale file '{path}': {source}")]
    Open {
        /// Path of the locale file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the locale file.
    #[error("failed to parse locale file '{path}': {source}")]
    Parse {
        /// Path of the locale file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type for pattern compilation.
pub type PatternResult<T> = std::result::Result<T, PatternError>;
