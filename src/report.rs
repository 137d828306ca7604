//! The format report module.
use serde::Serialize;

use crate::formatter::NumberFormatter;

/// One formatted input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedValue {
    /// The input value.
    pub value: f64,
    /// What the formatter made of it.
    pub formatted: String,
}

/// The result of running a formatter over a list of values.
#[derive(Debug, Clone)]
pub struct FormatReport {
    /// Format string of the formatter.
    pub id: String,
    /// Label of the formatter.
    pub label: String,
    /// Description of the formatter, possibly empty.
    pub description: String,
    /// Whether the formatter is a fallback for an invalid format string.
    pub invalid: bool,
    /// Formatted values, in input order.
    pub values: Vec<FormattedValue>,
}

impl FormatReport {
    /// Formats every value in `values` with `formatter`.
    pub fn new(formatter: &NumberFormatter, values: &[f64]) -> Self {
        Self {
            id: formatter.id().to_string(),
            label: formatter.label().to_string(),
            description: formatter.description().to_string(),
            invalid: formatter.is_invalid(),
            values: values
                .iter()
                .map(|&value| FormattedValue { value, formatted: formatter.format(value) })
                .collect(),
        }
    }
}
