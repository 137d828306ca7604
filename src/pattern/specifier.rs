//! Parsing of format specifiers.
//!
//! A specifier has the shape `[[fill]align][sign][symbol][0][width][,][.precision][~][type]`,
//! e.g. `,.2f`, `+.3s`, `>10d`, `#x` or `$,.2~f`.
use std::{fmt, str::FromStr};

use crate::error::PatternError;

/// Widest field a specifier may ask for. Wider ones are rejected, as padding is allocated eagerly.
pub const MAX_WIDTH: usize = 1 << 20;

/// Where the padding goes when a value is narrower than the field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Align {
    /// `<`
    #[strum(to_string = "<")]
    Left,
    /// `>`
    #[default]
    #[strum(to_string = ">")]
    Right,
    /// `^`
    #[strum(to_string = "^")]
    Center,
    /// `=`, padding goes between the sign and the digits.
    #[strum(to_string = "=")]
    AfterSign,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }
}

/// How the sign of a value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Sign {
    /// `-`, nothing for positive values and a minus for negative ones.
    #[default]
    #[strum(to_string = "-")]
    Minus,
    /// `+`, a plus for positive values and a minus for negative ones.
    #[strum(to_string = "+")]
    Plus,
    /// `(`, parentheses around negative values.
    #[strum(to_string = "(")]
    Parentheses,
    /// ` `, a space for positive values and a minus for negative ones.
    #[strum(to_string = " ")]
    Space,
}

impl Sign {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Minus),
            '+' => Some(Self::Plus),
            '(' => Some(Self::Parentheses),
            ' ' => Some(Self::Space),
            _ => None,
        }
    }
}

/// Optional symbol applied around the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Symbol {
    /// `$`, the locale currency prefix and suffix.
    #[strum(to_string = "$")]
    Currency,
    /// `#`, `0b`, `0o` or `0x` for binary, octal and hexadecimal types.
    #[strum(to_string = "#")]
    Base,
}

/// A parsed format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpecifier {
    /// Padding character.
    pub fill: char,
    /// Padding alignment.
    pub align: Align,
    /// Sign display.
    pub sign: Sign,
    /// Currency or base symbol.
    pub symbol: Option<Symbol>,
    /// Zero padding (`0` flag).
    pub zero: bool,
    /// Minimum field width.
    pub width: Option<usize>,
    /// Locale digit grouping (`,` flag).
    pub comma: bool,
    /// Requested precision, before clamping.
    pub precision: Option<usize>,
    /// Trim insignificant trailing zeros (`~` flag).
    pub trim: bool,
    /// Format type character, e.g. `f` or `s`.
    pub kind: Option<char>,
}

impl Default for FormatSpecifier {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::default(),
            sign: Sign::default(),
            symbol: None,
            zero: false,
            width: None,
            comma: false,
            precision: None,
            trim: false,
            kind: None,
        }
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Consumes the next character if `accept` maps it to a value.
    fn eat<T>(&mut self, accept: impl FnOnce(char) -> Option<T>) -> Option<T> {
        let c = self.rest.chars().next()?;
        let value = accept(c)?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(value)
    }

    fn eat_char(&mut self, expected: char) -> bool {
        self.eat(|c| (c == expected).then_some(())).is_some()
    }

    fn digits(&mut self) -> Option<&'a str> {
        let end = self.rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(digits)
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl FromStr for FormatSpecifier {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PatternError::InvalidSpecifier { specifier: s.to_string() };
        let mut spec = Self::default();
        let mut cursor = Cursor { rest: s };

        let mut chars = s.chars();
        match (chars.next(), chars.next().and_then(Align::from_char)) {
            (Some(fill), Some(align)) if !is_line_terminator(fill) => {
                spec.fill = fill;
                spec.align = align;
                cursor.rest = chars.as_str();
            }
            _ => {
                if let Some(align) = cursor.eat(Align::from_char) {
                    spec.align = align;
                }
            }
        }

        if let Some(sign) = cursor.eat(Sign::from_char) {
            spec.sign = sign;
        }
        spec.symbol = cursor.eat(|c| match c {
            '$' => Some(Symbol::Currency),
            '#' => Some(Symbol::Base),
            _ => None,
        });
        spec.zero = cursor.eat_char('0');
        spec.width = cursor
            .digits()
            .map(|d| d.parse::<usize>().ok().filter(|&width| width <= MAX_WIDTH).ok_or_else(invalid))
            .transpose()?;
        spec.comma = cursor.eat_char(',');
        if cursor.eat_char('.') {
            let digits = cursor.digits().ok_or_else(invalid)?;
            // clamped later, so an absurd precision simply saturates
            spec.precision = Some(digits.parse().unwrap_or(usize::MAX));
        }
        spec.trim = cursor.eat_char('~');
        spec.kind = cursor.eat(|c| (c.is_ascii_alphabetic() || c == '%').then_some(c));

        if !cursor.rest.is_empty() {
            return Err(invalid());
        }
        Ok(spec)
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.fill, self.align, self.sign)?;
        if let Some(symbol) = self.symbol {
            write!(f, "{symbol}")?;
        }
        if self.zero {
            f.write_str("0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{}", width.max(1))?;
        }
        if self.comma {
            f.write_str(",")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        if self.trim {
            f.write_str("~")?;
        }
        if let Some(kind) = self.kind {
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}
