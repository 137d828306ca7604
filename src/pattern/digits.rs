//! Decimal renderings of non-negative `f64` values.
//!
//! Fixed, exponential and significant-digit renderings round the exact binary value half-up, so
//! `0.5` becomes `1` and `1.125` at two places becomes `1.13`. `format!("{:.2}")` rounds exact
//! ties to even instead, so rounding decisions are taken on digits of the exact value.

/// Significant digits needed to spell out any finite `f64` exactly.
const EXACT_DIGITS: usize = 767;

/// Significant digits of the correctly rounded expansion used for most rounding decisions.
const SHORT_DIGITS: usize = 48;

/// Fixed notation gives up and falls back to [`number_to_string`] from here on.
const FIXED_LIMIT: f64 = 1e21;

/// `2^64`, the first value that no longer fits a `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

const RADIX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A finite non-negative decimal `d0.d1d2... * 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: Vec<u8>,
    exponent: i32,
}

impl Decimal {
    /// Exact expansion of `x`, trailing zeros included.
    fn exact(x: f64) -> Self {
        Self::from_scientific(&format!("{:.*e}", EXACT_DIGITS, x))
    }

    /// Correctly rounded expansion to [`SHORT_DIGITS`] digits.
    ///
    /// Falls back to the exact expansion when the digits past the first are all zero, since
    /// rounding may have carried into a new power of ten and moved the exponent.
    fn expansion(x: f64) -> Self {
        let short = Self::from_scientific(&format!("{:.*e}", SHORT_DIGITS - 1, x));
        if x != 0.0 && short.digits[1..].iter().all(|&d| d == 0) {
            return Self::exact(x);
        }
        short
    }

    /// Makes sure rounding half-up after `keep` digits decides as it would on the exact value.
    ///
    /// A correctly rounded expansion only misleads when its tail from `keep` on reads `500...0`,
    /// or when `keep` leaves no digit past the rounding position.
    fn settled(self, x: f64, keep: usize) -> Self {
        if self.digits.len() > SHORT_DIGITS {
            return self;
        }
        let ambiguous = self
            .digits
            .get(keep..)
            .is_none_or(|tail| tail.len() < 2 || (tail[0] == 5 && tail[1..].iter().all(|&d| d == 0)));
        if ambiguous { Self::exact(x) } else { self }
    }

    /// Shortest expansion that reads back as `x`.
    fn shortest(x: f64) -> Self {
        Self::from_scientific(&format!("{:e}", x))
    }

    /// `x` rounded half-up to `count` significant digits.
    fn significant(x: f64, count: usize) -> Self {
        let mut decimal = Self::expansion(x).settled(x, count);
        if round_half_up(&mut decimal.digits, count) {
            decimal.digits.truncate(count);
            decimal.exponent += 1;
        }
        decimal
    }

    /// `count` significant digits, or the shortest expansion when `count` is zero.
    fn parts(x: f64, count: usize) -> Self {
        match count {
            0 => Self::shortest(x),
            n => Self::significant(x, n),
        }
    }

    fn from_scientific(s: &str) -> Self {
        let (mantissa, exponent) = s.split_once('e').unwrap_or((s, "0"));
        let digits = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
        Self { digits, exponent: exponent.parse().unwrap_or(0) }
    }

    fn coefficient(&self) -> String {
        digit_string(&self.digits)
    }
}

fn digit_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

/// Keeps the first `keep` digits and rounds half-up on what follows.
///
/// Returns `true` when the carry ran off the front, in which case a leading `1` was inserted
/// and `digits` is one longer than `keep`.
fn round_half_up(digits: &mut Vec<u8>, keep: usize) -> bool {
    let up = digits.get(keep).is_some_and(|&d| d >= 5);
    digits.resize(keep, 0);
    if !up {
        return false;
    }
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    digits.insert(0, 1);
    true
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{}", exponent.unsigned_abs())
}

/// The plain string form of any `f64`: `5`, `1.5`, `0.000001`, `1e+21`, `1.5e-7`, `-2`, `NaN`.
pub(crate) fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".into();
    }
    if x == 0.0 {
        return "0".into();
    }
    if x < 0.0 {
        return format!("-{}", number_to_string(-x));
    }
    if x.is_infinite() {
        return "Infinity".into();
    }

    let decimal = Decimal::shortest(x);
    let s = decimal.coefficient();
    let k = s.len() as i32;
    let n = decimal.exponent + 1;
    if k <= n && n <= 21 {
        s + &"0".repeat((n - k) as usize)
    } else if 0 < n && n <= 21 {
        let (int, frac) = s.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{s}", "0".repeat(n.unsigned_abs() as usize))
    } else {
        let mantissa = if k == 1 { s } else { format!("{}.{}", &s[..1], &s[1..]) };
        mantissa + &exponent_suffix(n - 1)
    }
}

/// `x` with exactly `fraction` digits after the decimal point.
pub(crate) fn fixed(x: f64, fraction: usize) -> String {
    if !x.is_finite() || x >= FIXED_LIMIT {
        return number_to_string(x);
    }

    let expansion = Decimal::expansion(x);
    let keep = i64::from(expansion.exponent) + 1 + fraction as i64;
    let digits = if keep < 0 {
        Vec::new()
    } else {
        let mut digits = expansion.settled(x, keep as usize).digits;
        round_half_up(&mut digits, keep as usize);
        digits
    };

    let first = digits.iter().position(|&d| d != 0).unwrap_or(digits.len());
    let mut n = digit_string(&digits[first..]);
    if n.is_empty() {
        n.push('0');
    }
    if fraction == 0 {
        return n;
    }
    if n.len() <= fraction {
        n.insert_str(0, &"0".repeat(fraction + 1 - n.len()));
    }
    let (int, frac) = n.split_at(n.len() - fraction);
    format!("{int}.{frac}")
}

/// `x` in exponential notation with `fraction` digits after the decimal point.
pub(crate) fn exponential(x: f64, fraction: usize) -> String {
    if !x.is_finite() {
        return number_to_string(x);
    }

    let decimal = Decimal::significant(x, fraction + 1);
    let s = decimal.coefficient();
    let mantissa = if s.len() > 1 { format!("{}.{}", &s[..1], &s[1..]) } else { s };
    mantissa + &exponent_suffix(decimal.exponent)
}

/// `x` with `count` significant digits, switching to exponential notation for very small or
/// large magnitudes.
pub(crate) fn precision(x: f64, count: usize) -> String {
    if !x.is_finite() {
        return number_to_string(x);
    }

    let decimal = Decimal::significant(x, count);
    let s = decimal.coefficient();
    let e = decimal.exponent;
    let p = count as i32;
    if e < -6 || e >= p {
        let mantissa = if count == 1 { s } else { format!("{}.{}", &s[..1], &s[1..]) };
        mantissa + &exponent_suffix(e)
    } else if e == p - 1 {
        s
    } else if e >= 0 {
        let (int, frac) = s.split_at(e as usize + 1);
        format!("{int}.{frac}")
    } else {
        format!("0.{}{s}", "0".repeat((-(e + 1)) as usize))
    }
}

/// `x` with `count` significant digits, never in exponential notation.
pub(crate) fn rounded(x: f64, count: usize) -> String {
    if !x.is_finite() {
        return number_to_string(x);
    }

    let decimal = Decimal::parts(x, count);
    let c = decimal.coefficient();
    let e = decimal.exponent;
    if e < 0 {
        format!("0.{}{c}", "0".repeat((-e - 1) as usize))
    } else if c.len() > e as usize + 1 {
        let (int, frac) = c.split_at(e as usize + 1);
        format!("{int}.{frac}")
    } else {
        let zeros = e as usize + 1 - c.len();
        c + &"0".repeat(zeros)
    }
}

/// `x` with `count` significant digits scaled to an SI magnitude.
///
/// Returns the rendered digits and the power of one thousand they are scaled by, clamped to
/// `-8..=8` (yocto to yotta).
pub(crate) fn si_prefixed(x: f64, count: usize) -> (String, i32) {
    if !x.is_finite() {
        return (number_to_string(x), 0);
    }

    let decimal = Decimal::parts(x, count);
    let c = decimal.coefficient();
    let e = decimal.exponent;
    let power = e.div_euclid(3).clamp(-8, 8);
    let i = e - power * 3 + 1;
    let n = c.len() as i32;
    let rendered = if i == n {
        c
    } else if i > n {
        c + &"0".repeat((i - n) as usize)
    } else if i > 0 {
        let (int, frac) = c.split_at(i as usize);
        format!("{int}.{frac}")
    } else {
        // below 1y
        let tail = Decimal::parts(x, (count as i32 + i - 1).max(0) as usize).coefficient();
        format!("0.{}{tail}", "0".repeat(i.unsigned_abs() as usize))
    };
    (rendered, power)
}

/// `x` rounded to an integer, in decimal, without exponent.
pub(crate) fn integer(x: f64) -> String {
    let x = x.round();
    if !x.is_finite() {
        return number_to_string(x);
    }

    let decimal = Decimal::shortest(x);
    let s = decimal.coefficient();
    let zeros = (decimal.exponent + 1 - s.len() as i32).max(0) as usize;
    s + &"0".repeat(zeros)
}

/// `x` rounded to an integer, in base `2^bits` (`bits` is 1, 3 or 4), lowercase.
pub(crate) fn radix(x: f64, bits: usize) -> String {
    let x = x.round();
    if !x.is_finite() {
        return number_to_string(x);
    }

    if x < U64_LIMIT {
        let n = x as u64;
        return match bits {
            1 => format!("{n:b}"),
            3 => format!("{n:o}"),
            _ => format!("{n:x}"),
        };
    }

    // Past 2^64 every f64 is an integer of the form mantissa * 2^shift.
    let raw = x.to_bits();
    let mantissa = (raw & ((1 << 52) - 1)) | (1 << 52);
    let shift = ((raw >> 52) & 0x7ff) as usize - 1075;
    let mut binary = format!("{mantissa:b}{}", "0".repeat(shift));
    let pad = (bits - binary.len() % bits) % bits;
    binary.insert_str(0, &"0".repeat(pad));
    binary
        .as_bytes()
        .chunks(bits)
        .map(|chunk| {
            let value = chunk.iter().fold(0, |acc, &b| acc * 2 + usize::from(b - b'0'));
            char::from(RADIX_DIGITS[value])
        })
        .collect()
}

/// Removes insignificant trailing zeros from the fractional part, e.g. `1.2000k` -> `1.2k`.
pub(crate) fn trim_insignificant(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut seen_point = false;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b'.' => {
                seen_point = true;
                start = Some(i);
                end = i;
            }
            b'0' => {
                if seen_point && start.is_none() {
                    start = Some(i);
                }
                end = i;
            }
            b'1'..=b'9' => {
                if seen_point {
                    start = None;
                }
            }
            _ => break,
        }
    }
    match start {
        Some(start) => format!("{}{}", &s[..start], &s[end + 1..]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rounds_ties_up() {
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(1.5, 0), "2");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(1.125, 2), "1.13");
    }

    #[test]
    fn test_fixed_uses_exact_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(123.456, 1), "123.5");
        assert_eq!(fixed(0.05, 1), "0.1");
        assert_eq!(fixed(0.04, 0), "0");
        assert_eq!(fixed(9.99, 1), "10.0");
    }

    #[test]
    fn test_fixed_digits_past_shortest_form() {
        // 0.1 is stored as 0.1000000000000000055511151231257827...
        assert_eq!(fixed(0.1, 20), "0.10000000000000000555");
        assert_eq!(fixed(0.1 + 0.2, 17), "0.30000000000000004");
        assert_eq!(fixed(1e20 + 0.5, 1), "100000000000000000000.0");
    }

    #[test]
    fn test_rounding_matches_exact_expansion() {
        let values = [0.5, 1.005, 2.675, 0.125, 999.5, 1023.0 / 1024.0, 1e-10 / 3.0, 123456.789, 1e300 / 7.0];
        for x in values {
            for keep in 1..=21 {
                let mut exact = Decimal::exact(x);
                let mut fast = Decimal::expansion(x).settled(x, keep);
                let exact_carry = round_half_up(&mut exact.digits, keep);
                let fast_carry = round_half_up(&mut fast.digits, keep);
                assert_eq!((exact.digits, exact.exponent, exact_carry), (fast.digits, fast.exponent, fast_carry), "{x} {keep}");
            }
        }
    }

    #[test]
    fn test_expansion_is_short_away_from_ties() {
        assert_eq!(Decimal::expansion(1.5).settled(1.5, 4).digits.len(), SHORT_DIGITS);
        assert_eq!(Decimal::expansion(1.5).settled(1.5, 1).digits.len(), EXACT_DIGITS + 1);
        assert_eq!(Decimal::expansion(1000.0).digits.len(), EXACT_DIGITS + 1);
    }

    #[test]
    fn test_fixed_small_and_large() {
        assert_eq!(fixed(0.0, 2), "0.00");
        assert_eq!(fixed(1e-7, 20), "0.00000010000000000000");
        assert_eq!(fixed(1e21, 2), "1e+21");
        assert_eq!(fixed(f64::INFINITY, 2), "Infinity");
    }

    #[test]
    fn test_exponential() {
        assert_eq!(exponential(12345.0, 2), "1.23e+4");
        assert_eq!(exponential(0.0, 1), "0.0e+0");
        assert_eq!(exponential(2.5, 0), "3e+0");
        // 0.00015 is stored as 1.4999999999999999e-4
        assert_eq!(exponential(0.00015, 0), "1e-4");
        assert_eq!(exponential(999.5, 2), "1.00e+3");
    }

    #[test]
    fn test_precision() {
        assert_eq!(precision(123.456, 2), "1.2e+2");
        assert_eq!(precision(123.456, 4), "123.5");
        assert_eq!(precision(123.0, 3), "123");
        assert_eq!(precision(0.000001234, 2), "0.0000012");
        assert_eq!(precision(1e-7, 1), "1e-7");
        assert_eq!(precision(0.0, 6), "0.00000");
        assert_eq!(precision(0.0, 1), "0");
    }

    #[test]
    fn test_rounded() {
        assert_eq!(rounded(0.0, 3), "0.00");
        assert_eq!(rounded(12.3, 2), "12");
        assert_eq!(rounded(1234.5, 2), "1200");
        assert_eq!(rounded(0.012345, 3), "0.0123");
    }

    #[test]
    fn test_si_prefixed() {
        assert_eq!(si_prefixed(0.0, 3), ("0.00".to_string(), 0));
        assert_eq!(si_prefixed(1.0, 3), ("1.00".to_string(), 0));
        assert_eq!(si_prefixed(1023.0, 3), ("1.02".to_string(), 1));
        assert_eq!(si_prefixed(1500.0, 3), ("1.50".to_string(), 1));
        assert_eq!(si_prefixed(0.5, 3), ("500".to_string(), -1));
        assert_eq!(si_prefixed(999.5, 3), ("1.00".to_string(), 1));
        assert_eq!(si_prefixed(42e6, 3), ("42.0".to_string(), 2));
    }

    #[test]
    fn test_si_prefixed_below_smallest_prefix() {
        assert_eq!(si_prefixed(1e-30, 3), ("0.000001".to_string(), -8));
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(-2.0), "-2");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(100.0), "100");
        assert_eq!(number_to_string(0.000001), "0.000001");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(1.23e-18), "1.23e-18");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(123456789012345680000.0), "123456789012345680000");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(0.0), "0");
        assert_eq!(integer(1234.5), "1235");
        assert_eq!(integer(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_radix() {
        assert_eq!(radix(255.0, 4), "ff");
        assert_eq!(radix(5.0, 1), "101");
        assert_eq!(radix(2.5, 1), "11");
        assert_eq!(radix(8.0, 3), "10");
        assert_eq!(radix(U64_LIMIT, 4), format!("1{}", "0".repeat(16)));
        assert_eq!(radix(U64_LIMIT * 2.0, 3), format!("4{}", "0".repeat(21)));
    }

    #[test]
    fn test_trim_insignificant() {
        assert_eq!(trim_insignificant("1.2000"), "1.2");
        assert_eq!(trim_insignificant("1.000"), "1");
        assert_eq!(trim_insignificant("0.0100"), "0.01");
        assert_eq!(trim_insignificant("1.50e+3"), "1.5e+3");
        assert_eq!(trim_insignificant("120"), "120");
        assert_eq!(trim_insignificant("1.05"), "1.05");
    }
}
