//! Builds [`NumberFormatter`]s from a [`FormatterConfig`].
//!
//! The format string either names the adaptive byte mode ([`BYTES_IEC_ADAPTIVE`]) or is a pattern
//! specifier compiled against the default or a supplied locale. A pattern that fails to compile
//! does not fail the factory: the formatter falls back to echoing the value with a diagnostic and
//! reports [`NumberFormatter::is_invalid`].
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    bytes::format_bytes_adaptive,
    error::{FormatterError, PatternResult},
    formatter::{NumberFormatFunction, NumberFormatter},
    pattern::{Locale, LocaleDefinition, PatternEngine, digits::number_to_string},
};

/// Format string selecting adaptive IEC byte units (B, KiB, MiB, ..., EiB).
pub const BYTES_IEC_ADAPTIVE: &str = "bytes-iec-adaptive";

/// Input of [`create_number_formatter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfig {
    /// Free-form description carried onto the formatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pattern specifier or [`BYTES_IEC_ADAPTIVE`]. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_string: Option<String>,
    /// Human readable label carried onto the formatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Locale used to compile the pattern; the default locale when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<LocaleDefinition>,
}

impl FormatterConfig {
    /// A config with only the format string set.
    pub fn new(format_string: impl Into<String>) -> Self {
        Self { format_string: Some(format_string.into()), ..Default::default() }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the locale.
    pub fn with_locale(mut self, locale: LocaleDefinition) -> Self {
        self.locale = Some(locale);
        self
    }
}

/// What a format string resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSource {
    /// Adaptive IEC byte units.
    AdaptiveBytes,
    /// A pattern specifier, with the locale to compile it against.
    Pattern {
        /// The specifier, e.g. `,.2f`.
        specifier: String,
        /// Locale definition; the default locale when absent.
        locale: Option<LocaleDefinition>,
    },
}

impl FormatSource {
    /// Resolves a format string and optional locale.
    pub fn resolve(format_string: &str, locale: Option<LocaleDefinition>) -> Self {
        match format_string {
            BYTES_IEC_ADAPTIVE => Self::AdaptiveBytes,
            specifier => Self::Pattern { specifier: specifier.to_string(), locale },
        }
    }

    /// Builds the format function. Only the pattern variant can fail.
    pub fn compile(&self) -> PatternResult<NumberFormatFunction> {
        match self {
            Self::AdaptiveBytes => Ok(Arc::new(format_bytes_adaptive)),
            Self::Pattern { specifier, locale: None } => Locale::default().compile(specifier),
            Self::Pattern { specifier, locale: Some(definition) } => {
                #[cfg(feature = "tracing")]
                log::debug!("Compiling '{specifier}' with locale {definition:?}");
                Locale::new(definition)?.compile(specifier)
            }
        }
    }
}

/// Unwraps a mandatory configuration field.
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, FormatterError> {
    value.ok_or(FormatterError::MissingField { field })
}

/// The fallback used when `format_string` cannot be compiled.
pub fn invalid_format_func(format_string: String) -> NumberFormatFunction {
    Arc::new(move |value| format!("{} (Invalid format: {format_string})", number_to_string(value)))
}

/// Creates a formatter from `config`.
///
/// Fails only when `format_string` is missing. An unusable format string or locale produces a
/// fallback formatter flagged with [`NumberFormatter::is_invalid`].
///
/// # Example
///
/// ```
/// use numfmt::{FormatterConfig, create_number_formatter};
///
/// let formatter = create_number_formatter(FormatterConfig::new(",.2f")).unwrap();
/// assert_eq!(formatter.format(1234.5), "1,234.50");
///
/// let formatter = create_number_formatter(FormatterConfig::new("bytes-iec-adaptive")).unwrap();
/// assert_eq!(formatter.format(1536.0), "1.50 KiB");
///
/// let formatter = create_number_formatter(FormatterConfig::new("foo")).unwrap();
/// assert!(formatter.is_invalid());
/// assert_eq!(formatter.format(5.0), "5 (Invalid format: foo)");
/// ```
pub fn create_number_formatter(config: FormatterConfig) -> Result<NumberFormatter, FormatterError> {
    let FormatterConfig { description, format_string, label, locale } = config;
    let format_string = require(format_string, "config.formatString")?;

    let (format_func, is_invalid) = match FormatSource::resolve(&format_string, locale).compile() {
        Ok(format_func) => (format_func, false),
        Err(err) => {
            cfg_if::cfg_if! {
                if #[cfg(feature = "tracing")] {
                    log::warn!("Falling back for format string '{format_string}': {err}");
                } else {
                    let _ = err;
                }
            }
            (invalid_format_func(format_string.clone()), true)
        }
    };

    Ok(NumberFormatter::new(format_string, format_func)
        .with_label(label)
        .with_description(description)
        .with_invalid(is_invalid))
}
