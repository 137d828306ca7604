//! The pattern format engine.
//!
//! A format specifier such as `,.2f` or `.3s` is parsed into a [`FormatSpecifier`] and compiled
//! against a [`Locale`] into a [`PatternFormat`], which renders `f64` values.
//!
//! ```
//! use numfmt::pattern::Locale;
//!
//! let format = Locale::default().parse("$,.2f").unwrap();
//! assert_eq!(format.format(-1234.5), "-$1,234.50");
//! ```

pub(crate) mod digits;
mod locale;
mod specifier;

use std::sync::Arc;

pub use locale::{Locale, LocaleDefinition, PatternFormat};
pub use specifier::{Align, FormatSpecifier, MAX_WIDTH, Sign, Symbol};

use crate::{error::PatternResult, formatter::NumberFormatFunction};

/// Something that can turn a format specifier into a format function.
pub trait PatternEngine {
    /// Compiles `specifier` into a reusable format function.
    fn compile(&self, specifier: &str) -> PatternResult<NumberFormatFunction>;
}

impl PatternEngine for Locale {
    fn compile(&self, specifier: &str) -> PatternResult<NumberFormatFunction> {
        let format = self.parse(specifier)?;
        Ok(Arc::new(move |value| format.format(value)))
    }
}
