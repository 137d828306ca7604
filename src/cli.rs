//! This module provides the command line front end of `numfmt`.
//!
//! ```shell
//! $ numfmt --help
//! Usage: numfmt [OPTIONS] --format <FORMAT> [VALUES]...
//!
//! Arguments:
//!   [VALUES]...
//!           Values to format
//!
//! Options:
//!   -f, --format <FORMAT>
//!           Format string
//!
//!           Either a pattern such as ',.2f' or '.3s', or 'bytes-iec-adaptive'.
//!
//!       --label <LABEL>
//!           Human readable label of the formatter
//!
//!       --description <DESCRIPTION>
//!           Description of the formatter
//!
//!       --locale <LOCALE>
//!           Locale definition file in JSON
//!
//!   -o, --output <OUTPUT>
//!           Output format for the report
//!
//!           [default: text]
//!
//!           Possible values:
//!           - text: Report in plain text format
//!           - json: Report in JSON format
//!
//!   -O, --output-file <OUTPUT_FILE>
//!           Output file path for the report
//!
//!   -h, --help
//!           Print help (see a summary with '-h')
//! ```
use std::{
    fs::File,
    io::{BufReader, stdout},
    path::{Path, PathBuf},
};

use clap::{
    Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use crate::{
    error::LocaleError,
    factory::{FormatterConfig, create_number_formatter},
    pattern::LocaleDefinition,
    report::FormatReport,
    reporter::{FormatReporter, JsonReporter, TextReporter},
};

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "numfmt",
    version,
    allow_negative_numbers = true,
    styles(Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
    )
)]
#[allow(missing_docs)]
pub struct FormatCli {
    /// Format string
    ///
    /// Either a pattern such as ',.2f' or '.3s', or 'bytes-iec-adaptive'.
    #[clap(long, short = 'f')]
    pub format: String,

    /// Human readable label of the formatter
    #[clap(long)]
    pub label: Option<String>,

    /// Description of the formatter
    #[clap(long)]
    pub description: Option<String>,

    /// Locale definition file in JSON
    #[clap(long)]
    pub locale: Option<PathBuf>,

    /// Output format for the report
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub output: OutputFormat,

    /// Output file path for the report
    ///
    /// When set, the report will be written to the specified file instead of stdout.
    #[clap(long, short = 'O')]
    pub output_file: Option<PathBuf>,

    /// Values to format
    pub values: Vec<f64>,
}

impl FormatCli {
    /// Builds the factory input from the options, reading the locale file if one was given.
    pub fn config(&self) -> Result<FormatterConfig, LocaleError> {
        Ok(FormatterConfig {
            description: self.description.clone(),
            format_string: Some(self.format.clone()),
            label: self.label.clone(),
            locale: self.locale.as_deref().map(load_locale).transpose()?,
        })
    }
}

/// Report format.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Report in plain text format. See [`TextReporter`].
    Text,

    /// Report in JSON format. See [`JsonReporter`].
    Json,
}

/// Reads a JSON locale definition.
pub fn load_locale(path: &Path) -> Result<LocaleDefinition, LocaleError> {
    let file = File::open(path).map_err(|source| LocaleError::Open { path: path.to_path_buf(), source })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| LocaleError::Parse { path: path.to_path_buf(), source })
}

/// Format the values with the given CLI options and print the report.
pub fn run(cli: &FormatCli) -> anyhow::Result<()> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("format", format = %cli.format, values = cli.values.len()).entered();

    let formatter = create_number_formatter(cli.config()?)?;
    let report = FormatReport::new(&formatter, &cli.values);

    let reporter: &dyn FormatReporter = match cli.output {
        OutputFormat::Text => &TextReporter,
        OutputFormat::Json => &JsonReporter,
    };

    match &cli.output_file {
        Some(path) => reporter.print(&mut File::create(path)?, &report)?,
        None => reporter.print(&mut stdout(), &report)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("numfmt-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_parse_args() {
        let cli = FormatCli::parse_from(["numfmt", "-f", ",.2f", "--label", "Revenue", "-o", "json", "1234.5", "-3", "NaN"]);
        assert_eq!(cli.format, ",.2f");
        assert_eq!(cli.label.as_deref(), Some("Revenue"));
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.values.len(), 3);
        assert_eq!(cli.values[..2], [1234.5, -3.0]);
        assert!(cli.values[2].is_nan());
    }

    #[test]
    fn test_format_is_required() {
        assert!(FormatCli::try_parse_from(["numfmt", "1"]).is_err());
    }

    #[test]
    fn test_config() {
        let cli = FormatCli::parse_from(["numfmt", "--format", "bytes-iec-adaptive", "--description", "Disk"]);
        let config = cli.config().unwrap();
        assert_eq!(config.format_string.as_deref(), Some("bytes-iec-adaptive"));
        assert_eq!(config.description.as_deref(), Some("Disk"));
        assert_eq!(config.label, None);
        assert_eq!(config.locale, None);
    }

    #[test]
    fn test_load_locale() {
        let path = scratch("locale.json");
        std::fs::write(&path, r#"{"decimal": ",", "thousands": " ", "grouping": [3]}"#).unwrap();
        let locale = load_locale(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(locale.decimal.as_deref(), Some(","));
        assert_eq!(locale.grouping, Some(vec![3]));
    }

    #[test]
    fn test_load_locale_errors() {
        let missing = scratch("missing.json");
        assert!(matches!(load_locale(&missing), Err(LocaleError::Open { .. })));

        let path = scratch("broken.json");
        std::fs::write(&path, "{").unwrap();
        let result = load_locale(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(LocaleError::Parse { .. })));
    }

    #[test]
    fn test_run_to_file() {
        let path = scratch("report.json");
        let output_file = path.to_string_lossy().into_owned();
        let cli = FormatCli::parse_from(["numfmt", "-f", "foo", "-o", "json", "-O", &output_file, "5"]);
        run(&cli).unwrap();

        let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(report["invalid"], true);
        assert_eq!(report["values"][0]["formatted"], "5 (Invalid format: foo)");
    }
}
