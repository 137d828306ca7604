use crossterm::style::{StyledContent, Stylize};
use std::io::Write;
use tabled::settings::Padding;
use tabled::settings::object::{Columns, Object, Rows};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Margin, Style, themes::Colorization},
};

use crate::{pattern::digits::number_to_string, report::FormatReport};

/// Text reporter with colored tables.
pub struct TextReporter;

impl super::FormatReporter for TextReporter {
    fn print(&self, w: &mut dyn Write, report: &FormatReport) -> anyhow::Result<()> {
        print_summary(w, report)?;
        writeln!(w)?;

        if !report.values.is_empty() {
            print_values(w, report)?;
            writeln!(w)?;
        }

        Ok(())
    }
}

#[rustfmt::skip]
fn print_summary(w: &mut dyn Write, report: &FormatReport) -> anyhow::Result<()> {
    writeln!(w, "{}", report.label.h1())?;
    writeln!(w,       "  Format:      {}", report.id.as_str().green().bold())?;
    if !report.description.is_empty() {
        writeln!(w,   "  Description: {}", report.description)?;
    }
    if report.invalid {
        writeln!(w,   "  {}", format!("Invalid format: {}", report.id).red().bold())?;
    }
    Ok(())
}

fn print_values(w: &mut dyn Write, report: &FormatReport) -> anyhow::Result<()> {
    writeln!(w, "{}", "  Values".h2())?;
    let rows = report
        .values
        .iter()
        .map(|v| vec![number_to_string(v.value), v.formatted.clone()]);
    let mut values = Builder::from_iter(std::iter::once(vec!["Value".into(), "Formatted".into()]).chain(rows)).build();
    let color = if report.invalid { Color::FG_RED } else { Color::FG_GREEN };
    values
        .with(Style::empty())
        .with(Margin::new(3, 0, 0, 0))
        .with(Alignment::right())
        .with(Padding::new(1, 1, 0, 0))
        .with(Colorization::exact([Color::BOLD], Rows::new(0..1)))
        .with(Colorization::exact([color], Rows::new(1..).not(Columns::new(0..1))));
    writeln!(w, "{}", values)?;
    Ok(())
}

trait ReportStyle {
    fn h1(&self) -> StyledContent<&str>;
    fn h2(&self) -> StyledContent<&str>;
}

impl<T: AsRef<str>> ReportStyle for T {
    fn h1(&self) -> StyledContent<&str> {
        self.as_ref().bold().underlined().yellow()
    }

    fn h2(&self) -> StyledContent<&str> {
        self.as_ref().bold().cyan()
    }
}
