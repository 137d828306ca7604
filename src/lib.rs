//! Number formatters built from a format string.
//!
//! A format string is either a pattern specifier such as `,.2f`, `.3s` or `$,.2~f`, or the
//! sentinel [`BYTES_IEC_ADAPTIVE`], which picks a binary unit (B, KiB, MiB, ..., EiB) from the
//! magnitude of the value. A pattern that cannot be compiled does not fail: the factory hands
//! back a fallback formatter that echoes the value with a diagnostic and reports
//! [`NumberFormatter::is_invalid`].
//!
//! ## Features
//!
//! - **Pattern engine**: fill, alignment, sign, currency, grouping, precision and SI prefixes.
//! - **Locales**: decimal and grouping separators, currency and numerals from a JSON definition.
//! - **Adaptive bytes**: human readable byte counts with three significant digits.
//! - **CLI**: the `numfmt` binary formats values from the command line as text or JSON.
//!
//! ## Example
//!
//! ```
//! use numfmt::{FormatterConfig, create_number_formatter};
//!
//! let formatter = create_number_formatter(FormatterConfig::new(".3s").with_label("Requests")).unwrap();
//! assert_eq!(formatter.id(), ".3s");
//! assert_eq!(formatter.label(), "Requests");
//! assert_eq!(formatter.format(12345.0), "12.3k");
//!
//! let bytes = create_number_formatter(FormatterConfig::new("bytes-iec-adaptive")).unwrap();
//! assert_eq!(bytes.format(1048576.0), "1.00 MiB");
//! ```
#![deny(missing_docs)]

mod bytes;
mod error;
mod factory;
mod formatter;
mod report;

pub mod cli;
pub mod pattern;
pub mod reporter;

pub use crate::{
    bytes::{BYTE, BYTE_MAGNITUDES, ByteMagnitude, IntoAdaptiveBytes, format_bytes_adaptive},
    error::{FormatterError, LocaleError, PatternError, PatternResult},
    factory::{BYTES_IEC_ADAPTIVE, FormatSource, FormatterConfig, create_number_formatter, invalid_format_func, require},
    formatter::{NumberFormatFunction, NumberFormatter},
    pattern::{Locale, LocaleDefinition},
    report::{FormatReport, FormattedValue},
};
