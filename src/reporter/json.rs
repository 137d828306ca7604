use crate::report::{FormatReport, FormattedValue};

use super::FormatReporter;

use serde::Serialize;
use std::io::Write;

/// JSON reporter.
pub struct JsonReporter;

impl FormatReporter for JsonReporter {
    fn print(&self, w: &mut dyn Write, report: &FormatReport) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(
            &mut *w,
            &Report {
                id: &report.id,
                label: &report.label,
                description: &report.description,
                invalid: report.invalid,
                values: &report.values,
            },
        )?;

        writeln!(w)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Report<'a> {
    id: &'a str,
    label: &'a str,
    description: &'a str,
    invalid: bool,
    values: &'a [FormattedValue],
}
