//! Adaptive IEC byte formatting.
//!
//! A byte count is scaled to the largest binary unit it reaches and rendered with three
//! significant digits, e.g. `1536` -> `1.50 KiB` and `2^20` -> `1.00 MiB`.
use std::sync::LazyLock;

use byte_unit::Unit;

use crate::pattern::{FormatSpecifier, Locale, PatternFormat};

/// One row of the magnitude table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByteMagnitude {
    /// Smallest value rendered in this unit.
    pub threshold: f64,
    /// What the value is divided by before rendering.
    pub divisor: f64,
    /// Unit label.
    pub unit: Unit,
}

/// Byte magnitudes from the largest unit down. Values below 1 KiB, including zero, negative
/// and fractional counts, fall through to [`BYTE`].
pub const BYTE_MAGNITUDES: [ByteMagnitude; 6] = [
    ByteMagnitude { threshold: (1u64 << 60) as f64, divisor: (1u64 << 60) as f64, unit: Unit::EiB },
    ByteMagnitude { threshold: (1u64 << 50) as f64, divisor: (1u64 << 50) as f64, unit: Unit::PiB },
    ByteMagnitude { threshold: (1u64 << 40) as f64, divisor: (1u64 << 40) as f64, unit: Unit::TiB },
    ByteMagnitude { threshold: (1u64 << 30) as f64, divisor: (1u64 << 30) as f64, unit: Unit::GiB },
    ByteMagnitude { threshold: (1u64 << 20) as f64, divisor: (1u64 << 20) as f64, unit: Unit::MiB },
    ByteMagnitude { threshold: (1u64 << 10) as f64, divisor: (1u64 << 10) as f64, unit: Unit::KiB },
];

/// The catch-all unit.
pub const BYTE: ByteMagnitude = ByteMagnitude { threshold: 1.0, divisor: 1.0, unit: Unit::B };

/// `.3s` under the default locale.
static THREE_SIGNIFICANT: LazyLock<PatternFormat> = LazyLock::new(|| {
    Locale::default().pattern(FormatSpecifier { precision: Some(3), kind: Some('s'), ..Default::default() })
});

impl ByteMagnitude {
    /// Picks the largest magnitude whose threshold `value` reaches.
    pub fn for_value(value: f64) -> ByteMagnitude {
        BYTE_MAGNITUDES.iter().copied().find(|m| value >= m.threshold).unwrap_or(BYTE)
    }
}

/// Formats a byte count with an automatically chosen binary unit.
///
/// Quotients of 1000 and above, or below 1, keep the SI suffix of the three-significant-digit
/// rendering: `1023` renders as `1.02k B` and `0.5` as `500m B`.
pub fn format_bytes_adaptive(value: f64) -> String {
    let magnitude = ByteMagnitude::for_value(value);
    format!("{} {}", THREE_SIGNIFICANT.format(value / magnitude.divisor), magnitude.unit)
}

/// Types that can be rendered with [`format_bytes_adaptive`].
pub trait IntoAdaptiveBytes {
    /// Renders `self` as an adaptive byte count.
    fn to_adaptive_bytes(self) -> String;
}

impl IntoAdaptiveBytes for f64 {
    fn to_adaptive_bytes(self) -> String {
        format_bytes_adaptive(self)
    }
}

impl IntoAdaptiveBytes for u64 {
    fn to_adaptive_bytes(self) -> String {
        format_bytes_adaptive(self as f64)
    }
}
