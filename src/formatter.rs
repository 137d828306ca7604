//! The formatter value object returned by the factory.
use std::{fmt, sync::Arc};

use crate::pattern::digits::number_to_string;

/// A reusable number format function.
pub type NumberFormatFunction = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Value shown by [`NumberFormatter::preview`].
const PREVIEW_VALUE: f64 = 12345.432;

/// A format function together with its identity and display metadata.
#[derive(Clone)]
pub struct NumberFormatter {
    id: String,
    label: Option<String>,
    description: Option<String>,
    format_func: NumberFormatFunction,
    is_invalid: bool,
}

impl NumberFormatter {
    /// Creates a valid formatter without label or description.
    pub fn new(id: impl Into<String>, format_func: NumberFormatFunction) -> Self {
        Self { id: id.into(), label: None, description: None, format_func, is_invalid: false }
    }

    /// Sets the human readable label.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Marks the formatter as a fallback for an unusable format string.
    pub fn with_invalid(mut self, is_invalid: bool) -> Self {
        self.is_invalid = is_invalid;
        self
    }

    /// The format string this formatter was built from.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The label, or the id when none was given.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// The description, or an empty string when none was given.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the format string could not be compiled and a fallback is in use.
    pub fn is_invalid(&self) -> bool {
        self.is_invalid
    }

    /// The raw format function, without the special cases of [`format`](Self::format).
    pub fn format_func(&self) -> &NumberFormatFunction {
        &self.format_func
    }

    /// Formats a value. NaN and infinities are rendered here and never reach the format function.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            number_to_string(value)
        } else if value == f64::INFINITY {
            "∞".into()
        } else if value == f64::NEG_INFINITY {
            "-∞".into()
        } else {
            (self.format_func)(value)
        }
    }

    /// Formats an optional value; a missing value renders as `null`.
    pub fn format_opt(&self, value: Option<f64>) -> String {
        match value {
            Some(v) => self.format(v),
            None => "null".into(),
        }
    }

    /// Shows how a sample value is rendered, e.g. `12345.432 => 12.3k`.
    pub fn preview(&self) -> String {
        self.preview_value(PREVIEW_VALUE)
    }

    /// Shows how `value` is rendered.
    pub fn preview_value(&self, value: f64) -> String {
        format!("{} => {}", number_to_string(value), self.format(value))
    }
}

impl fmt::Debug for NumberFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormatter")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("is_invalid", &self.is_invalid)
            .finish_non_exhaustive()
    }
}
