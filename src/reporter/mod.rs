//! This module defines a trait for printing format reports.
mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::report::FormatReport;

/// A trait for reporting formatted values.
pub trait FormatReporter {
    /// Print the report to the given writer.
    fn print(&self, w: &mut dyn std::io::Write, report: &FormatReport) -> anyhow::Result<()>;
}
