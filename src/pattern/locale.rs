//! Locale definitions and the pattern formats compiled against them.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    digits,
    specifier::{Align, FormatSpecifier, MAX_WIDTH, Sign, Symbol},
};
use crate::error::{PatternError, PatternResult};

/// SI prefixes from yocto (`10^-24`) to yotta (`10^24`).
const SI_PREFIXES: [&str; 17] =
    ["y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Precision used when the specifier gives none.
const DEFAULT_PRECISION: usize = 6;

/// Precision used by the implicit `.12~g` format.
const GENERAL_PRECISION: usize = 12;

/// The symbols a locale uses to render numbers. Every field is optional.
///
/// This is the serialized form, typically loaded from JSON:
///
/// ```json
/// { "decimal": ",", "thousands": ".", "grouping": [3], "currency": ["", " €"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDefinition {
    /// Decimal point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,
    /// Group separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousands: Option<String>,
    /// Group sizes, from the right; the list repeats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Vec<usize>>,
    /// Currency prefix and suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<[String; 2]>,
    /// Replacements for the digits `0` through `9`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerals: Option<Vec<String>>,
    /// Percent sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
    /// Minus sign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minus: Option<String>,
    /// Rendering of NaN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nan: Option<String>,
}

impl LocaleDefinition {
    /// The en-US definition used by [`Locale::default`].
    pub fn en_us() -> Self {
        Self {
            decimal: Some(".".into()),
            thousands: Some(",".into()),
            grouping: Some(vec![3]),
            currency: Some(["$".into(), "".into()]),
            minus: Some("-".into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
struct Grouping {
    sizes: Vec<usize>,
    thousands: String,
}

impl Grouping {
    /// Inserts separators into a run of digits, stopping once `width` characters are covered.
    fn apply(&self, value: &str, width: usize) -> String {
        let chars = value.chars().collect_vec();
        let mut sizes = self.sizes.iter().copied().cycle();
        let mut size = sizes.next().unwrap_or(0);
        let mut end = chars.len();
        let mut length = 0usize;
        let mut groups = Vec::new();
        while end > 0 && size > 0 {
            if length.saturating_add(size + 1) > width {
                size = width.saturating_sub(length).max(1);
            }
            let start = end.saturating_sub(size);
            groups.push(chars[start..end].iter().collect::<String>());
            end = start;
            length = length.saturating_add(size + 1);
            if length > width {
                break;
            }
            size = sizes.next().unwrap_or(0);
        }
        groups.iter().rev().join(&self.thousands)
    }
}

/// A resolved locale, ready to compile format specifiers.
#[derive(Debug, Clone)]
pub struct Locale {
    grouping: Option<Grouping>,
    currency: [String; 2],
    decimal: String,
    numerals: Option<Vec<String>>,
    percent: String,
    minus: String,
    nan: String,
}

impl Locale {
    /// Resolves a locale definition, filling in defaults for absent fields.
    ///
    /// A `numerals` list must hold exactly ten digits. Shorter or longer lists are rejected with
    /// [`PatternError::InvalidLocale`] rather than rendering missing digits as placeholder text,
    /// so the factory hands back a fallback formatter for them.
    pub fn new(definition: &LocaleDefinition) -> PatternResult<Self> {
        if let Some(numerals) = &definition.numerals {
            if numerals.len() != 10 {
                return Err(PatternError::InvalidLocale {
                    reason: format!("expected 10 numerals, got {}", numerals.len()),
                });
            }
        }

        let grouping = match (&definition.grouping, &definition.thousands) {
            (Some(sizes), Some(thousands)) if !sizes.is_empty() => {
                Some(Grouping { sizes: sizes.clone(), thousands: thousands.clone() })
            }
            _ => None,
        };

        Ok(Self {
            grouping,
            currency: definition.currency.clone().unwrap_or_default(),
            decimal: definition.decimal.clone().unwrap_or_else(|| ".".into()),
            numerals: definition.numerals.clone(),
            percent: definition.percent.clone().unwrap_or_else(|| "%".into()),
            minus: definition.minus.clone().unwrap_or_else(|| "-".into()),
            nan: definition.nan.clone().unwrap_or_else(|| "NaN".into()),
        })
    }

    /// Parses `specifier` and compiles it against this locale.
    pub fn parse(&self, specifier: &str) -> PatternResult<PatternFormat> {
        Ok(self.pattern(specifier.parse()?))
    }

    /// Compiles an already parsed specifier against this locale.
    pub fn pattern(&self, spec: FormatSpecifier) -> PatternFormat {
        let mut comma = spec.comma;
        let mut precision = spec.precision;
        let mut trim = spec.trim;
        let kind = match spec.kind {
            Some('n') => {
                comma = true;
                FormatType::General
            }
            kind => match kind.and_then(FormatType::from_char) {
                Some(kind) => kind,
                None => {
                    precision.get_or_insert(GENERAL_PRECISION);
                    trim = true;
                    FormatType::General
                }
            },
        };

        let (fill, align, zero) = if spec.zero || (spec.fill == '0' && spec.align == Align::AfterSign) {
            ('0', Align::AfterSign, true)
        } else {
            (spec.fill, spec.align, false)
        };

        let prefix = match (spec.symbol, kind) {
            (Some(Symbol::Currency), _) => self.currency[0].clone(),
            (Some(Symbol::Base), FormatType::Binary) => "0b".into(),
            (Some(Symbol::Base), FormatType::Octal) => "0o".into(),
            (Some(Symbol::Base), FormatType::HexLower | FormatType::HexUpper) => "0x".into(),
            _ => String::new(),
        };
        let suffix = match (spec.symbol, kind) {
            (Some(Symbol::Currency), _) => self.currency[1].clone(),
            (_, FormatType::Percent | FormatType::PercentRounded) => self.percent.clone(),
            _ => String::new(),
        };

        let precision = match precision {
            None => DEFAULT_PRECISION,
            Some(p) if kind.counts_significant_digits() => p.clamp(1, 21),
            Some(p) => p.min(20),
        };

        PatternFormat {
            locale: self.clone(),
            fill,
            align,
            sign: spec.sign,
            zero,
            width: spec.width.unwrap_or(0).min(MAX_WIDTH),
            comma,
            precision,
            trim,
            kind,
            prefix,
            suffix,
        }
    }

    fn group(&self, value: &str, width: usize) -> String {
        match &self.grouping {
            Some(grouping) => grouping.apply(value, width),
            None => value.to_string(),
        }
    }

    fn substitute_numerals(&self, value: String) -> String {
        let Some(numerals) = &self.numerals else {
            return value;
        };
        value
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => numerals[d as usize].clone(),
                None => c.to_string(),
            })
            .collect()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            grouping: Some(Grouping { sizes: vec![3], thousands: ",".into() }),
            currency: ["$".into(), "".into()],
            decimal: ".".into(),
            numerals: None,
            percent: "%".into(),
            minus: "-".into(),
            nan: "NaN".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatType {
    /// `e`
    Exponent,
    /// `f`
    Fixed,
    /// `g`
    General,
    /// `r`
    Rounded,
    /// `s`
    SiPrefix,
    /// `%`
    Percent,
    /// `p`
    PercentRounded,
    /// `b`
    Binary,
    /// `o`
    Octal,
    /// `d`
    Decimal,
    /// `x`
    HexLower,
    /// `X`
    HexUpper,
    /// `c`
    Char,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        let kind = match c {
            'e' => Self::Exponent,
            'f' => Self::Fixed,
            'g' => Self::General,
            'r' => Self::Rounded,
            's' => Self::SiPrefix,
            '%' => Self::Percent,
            'p' => Self::PercentRounded,
            'b' => Self::Binary,
            'o' => Self::Octal,
            'd' => Self::Decimal,
            'x' => Self::HexLower,
            'X' => Self::HexUpper,
            'c' => Self::Char,
            _ => return None,
        };
        Some(kind)
    }

    fn counts_significant_digits(self) -> bool {
        matches!(self, Self::General | Self::PercentRounded | Self::Rounded | Self::SiPrefix)
    }

    /// Whether the rendering may carry a fractional or exponent tail that must not be grouped.
    fn has_tail(self) -> bool {
        !matches!(self, Self::Binary | Self::Octal | Self::HexLower | Self::HexUpper | Self::Char)
    }
}

/// A compiled pattern format.
#[derive(Debug, Clone)]
pub struct PatternFormat {
    locale: Locale,
    fill: char,
    align: Align,
    sign: Sign,
    zero: bool,
    width: usize,
    comma: bool,
    precision: usize,
    trim: bool,
    kind: FormatType,
    prefix: String,
    suffix: String,
}

impl PatternFormat {
    /// Formats a single value.
    pub fn format(&self, value: f64) -> String {
        let locale = &self.locale;
        let mut prefix = self.prefix.clone();
        let mut suffix = self.suffix.clone();
        let mut body;

        if self.kind == FormatType::Char {
            suffix.insert_str(0, &digits::number_to_string(value));
            body = String::new();
        } else {
            let mut negative = value < 0.0 || (value == 0.0 && value.is_sign_negative());
            let (rendered, power) = if value.is_nan() {
                (locale.nan.clone(), None)
            } else {
                self.render(value.abs())
            };
            body = if self.trim { digits::trim_insignificant(&rendered) } else { rendered };

            // a negative value that rounds to zero loses its sign unless `+` asks for it
            if negative && self.sign != Sign::Plus && body.parse::<f64>().is_ok_and(|v| v == 0.0) {
                negative = false;
            }

            let sign = match (negative, self.sign) {
                (true, Sign::Parentheses) => "(",
                (true, _) => locale.minus.as_str(),
                (false, Sign::Plus) => "+",
                (false, Sign::Space) => " ",
                (false, _) => "",
            };
            prefix.insert_str(0, sign);

            let si = power.map_or("", |p| SI_PREFIXES[(p + 8) as usize]);
            let close = if negative && self.sign == Sign::Parentheses { ")" } else { "" };
            suffix = format!("{si}{suffix}{close}");

            if self.kind.has_tail() {
                if let Some(i) = body.find(|c: char| !c.is_ascii_digit()) {
                    let tail = match body[i..].strip_prefix('.') {
                        Some(fraction) => format!("{}{fraction}", locale.decimal),
                        None => body[i..].to_string(),
                    };
                    suffix.insert_str(0, &tail);
                    body.truncate(i);
                }
            }
        }

        if self.comma && !self.zero {
            body = locale.group(&body, usize::MAX);
        }

        let length = prefix.chars().count() + body.chars().count() + suffix.chars().count();
        let mut padding = self.width.saturating_sub(length);

        // zero fill is grouped together with the digits it pads
        if self.comma && self.zero {
            let width = if padding > 0 { self.width - suffix.chars().count() } else { usize::MAX };
            body = locale.group(&format!("{}{body}", self.pad(padding)), width);
            padding = 0;
        }

        let out = match self.align {
            Align::Left => format!("{prefix}{body}{suffix}{}", self.pad(padding)),
            Align::AfterSign => format!("{prefix}{}{body}{suffix}", self.pad(padding)),
            Align::Center => {
                let half = padding / 2;
                format!("{}{prefix}{body}{suffix}{}", self.pad(half), self.pad(padding - half))
            }
            Align::Right => format!("{}{prefix}{body}{suffix}", self.pad(padding)),
        };
        locale.substitute_numerals(out)
    }

    /// Renders the absolute value, returning the SI power for the `s` type.
    fn render(&self, x: f64) -> (String, Option<i32>) {
        let p = self.precision;
        let rendered = match self.kind {
            FormatType::Exponent => digits::exponential(x, p),
            FormatType::Fixed => digits::fixed(x, p),
            FormatType::General => digits::precision(x, p),
            FormatType::Rounded => digits::rounded(x, p),
            FormatType::SiPrefix => {
                let (rendered, power) = digits::si_prefixed(x, p);
                return (rendered, Some(power));
            }
            FormatType::Percent => digits::fixed(x * 100.0, p),
            FormatType::PercentRounded => digits::rounded(x * 100.0, p),
            FormatType::Binary => digits::radix(x, 1),
            FormatType::Octal => digits::radix(x, 3),
            FormatType::Decimal => digits::integer(x),
            FormatType::HexLower => digits::radix(x, 4),
            FormatType::HexUpper => digits::radix(x, 4).to_uppercase(),
            FormatType::Char => digits::number_to_string(x),
        };
        (rendered, None)
    }

    fn pad(&self, n: usize) -> String {
        self.fill.to_string().repeat(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(specifier: &str, value: f64) -> String {
        Locale::default().parse(specifier).unwrap().format(value)
    }

    #[test]
    fn test_default_type_is_trimmed_general() {
        assert_eq!(format("", 1.5), "1.5");
        assert_eq!(format("", 0.1 + 0.2), "0.3");
        assert_eq!(format("", 1e21), "1e+21");
        assert_eq!(format(",", 1234.5), "1,234.5");
        assert_eq!(format("q", 42.0), "42");
    }

    #[test]
    fn test_fixed_and_grouping() {
        assert_eq!(format(",.2f", 1234.5), "1,234.50");
        assert_eq!(format(",d", 1234567.0), "1,234,567");
        assert_eq!(format("d", 0.0), "0");
        assert_eq!(format(".1f", 0.05), "0.1");
    }

    #[test]
    fn test_si_prefix() {
        assert_eq!(format(".3s", 1500.0), "1.50k");
        assert_eq!(format("s", 1500.0), "1.50000k");
        assert_eq!(format("~s", 1500.0), "1.5k");
        assert_eq!(format(".3s", 0.0015), "1.50m");
        assert_eq!(format(".2s", 42e6), "42M");
        assert_eq!(format(".3s", 0.000_001), "1.00µ");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format(".0%", 0.123), "12%");
        assert_eq!(format(".2p", 0.123), "12%");
        assert_eq!(format("+.1%", 0.5), "+50.0%");
    }

    #[test]
    fn test_sign() {
        assert_eq!(format("+d", 5.0), "+5");
        assert_eq!(format(" d", 5.0), " 5");
        assert_eq!(format("-d", -5.0), "-5");
        assert_eq!(format("(,.2f", -1234.5), "(1,234.50)");
        assert_eq!(format("(,.2f", 1234.5), "1,234.50");
    }

    #[test]
    fn test_negative_zero_after_rounding() {
        assert_eq!(format(".2f", -0.001), "0.00");
        assert_eq!(format("+.2f", -0.001), "-0.00");
        assert_eq!(format("d", -0.0), "0");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format("$,.2f", 1234.567), "$1,234.57");
        assert_eq!(format("$,.2f", -1234.5), "-$1,234.50");
        assert_eq!(format("$.0%", 0.5), "$50");
    }

    #[test]
    fn test_base_symbol() {
        assert_eq!(format("#x", 255.0), "0xff");
        assert_eq!(format("#X", 255.0), "0xFF");
        assert_eq!(format("#b", 5.0), "0b101");
        assert_eq!(format("#o", 8.0), "0o10");
        assert_eq!(format("x", -255.0), "-ff");
    }

    #[test]
    fn test_padding_and_alignment() {
        assert_eq!(format("08.2f", -3.5), "-0003.50");
        assert_eq!(format("8d", 42.0), "      42");
        assert_eq!(format("<8d", 42.0), "42      ");
        assert_eq!(format("^9.2f", 1.5), "  1.50   ");
        assert_eq!(format("*=+8d", 42.0), "+*****42");
        assert_eq!(format("0=8d", -42.0), "-0000042");
    }

    #[test]
    fn test_zero_fill_with_grouping() {
        assert_eq!(format("013,d", 123456789.0), "0,123,456,789");
        assert_eq!(format("010,d", 1234.0), "00,001,234");
    }

    #[test]
    fn test_exponent_and_general() {
        assert_eq!(format(".2e", 12345.0), "1.23e+4");
        assert_eq!(format(".3g", 0.000012345), "0.0000123");
        assert_eq!(format(".2r", 1234.5), "1200");
        assert_eq!(format("n", 1234567.0), "1.23457e+6");
        assert_eq!(format(".7n", 1234567.0), "1,234,567");
    }

    #[test]
    fn test_char_type() {
        assert_eq!(format("c", 65.0), "65");
        assert_eq!(format(">4c", 7.0), "   7");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format(".2f", f64::NAN), "NaN");
        assert_eq!(format(".2f", f64::INFINITY), "Infinity");
        assert_eq!(format(".2f", f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_precision_is_clamped() {
        assert_eq!(format(".0g", 1234.0), "1e+3");
        assert_eq!(format(".99f", 1.0), format!("1.{}", "0".repeat(20)));
    }

    fn fr_fr() -> LocaleDefinition {
        LocaleDefinition {
            decimal: Some(",".into()),
            thousands: Some("\u{a0}".into()),
            grouping: Some(vec![3]),
            currency: Some(["".into(), "\u{a0}€".into()]),
            percent: Some("\u{202f}%".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_custom_locale() {
        let locale = Locale::new(&fr_fr()).unwrap();
        assert_eq!(locale.parse("$,.2f").unwrap().format(1234.5), "1\u{a0}234,50\u{a0}€");
        assert_eq!(locale.parse(".1%").unwrap().format(0.5), "50,0\u{202f}%");
    }

    #[test]
    fn test_locale_grouping_sizes_cycle() {
        let def = LocaleDefinition {
            thousands: Some(",".into()),
            grouping: Some(vec![3, 2]),
            ..Default::default()
        };
        let format = Locale::new(&def).unwrap().parse(",d").unwrap();
        assert_eq!(format.format(123456789.0), "1,234,56,789");
        assert_eq!(format.format(12345678901.0), "1,23,456,78,901");
    }

    #[test]
    fn test_oversized_width_is_capped() {
        let spec = FormatSpecifier { width: Some(usize::MAX), ..Default::default() };
        let format = Locale::default().pattern(spec);
        assert_eq!(format.format(1.0).chars().count(), MAX_WIDTH);
    }

    #[test]
    fn test_locale_without_thousands_does_not_group() {
        let def = LocaleDefinition { grouping: Some(vec![3]), ..Default::default() };
        let locale = Locale::new(&def).unwrap();
        assert_eq!(locale.parse(",d").unwrap().format(1234567.0), "1234567");
    }

    #[test]
    fn test_locale_numerals_and_symbols() {
        let def = LocaleDefinition {
            numerals: Some(["٠", "١", "٢", "٣", "٤", "٥", "٦", "٧", "٨", "٩"].map(String::from).to_vec()),
            minus: Some("\u{2212}".into()),
            nan: Some("N/A".into()),
            ..Default::default()
        };
        let locale = Locale::new(&def).unwrap();
        let format = locale.parse("d").unwrap();
        assert_eq!(format.format(-12.0), "\u{2212}١٢");
        assert_eq!(format.format(f64::NAN), "N/A");
    }

    #[test]
    fn test_locale_rejects_short_numerals() {
        let def = LocaleDefinition { numerals: Some(vec!["0".into()]), ..Default::default() };
        assert!(matches!(Locale::new(&def), Err(PatternError::InvalidLocale { .. })));
    }

    #[test]
    fn test_default_matches_en_us_definition() {
        let from_definition = Locale::new(&LocaleDefinition::en_us()).unwrap();
        for spec in ["$,.2f", ".3s", "+.1%", "08,d"] {
            for value in [-1234.5, 0.0, 0.001, 98765.4321] {
                assert_eq!(
                    from_definition.parse(spec).unwrap().format(value),
                    Locale::default().parse(spec).unwrap().format(value),
                );
            }
        }
    }

    #[test]
    fn test_locale_definition_from_json() {
        let json = r#"{"decimal": ",", "thousands": ".", "grouping": [3], "currency": ["", " €"]}"#;
        let def: LocaleDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.decimal.as_deref(), Some(","));
        assert_eq!(def.currency, Some(["".to_string(), " €".to_string()]));
        assert_eq!(def.minus, None);
    }
}
