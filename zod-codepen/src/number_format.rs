//! Numeric literal humanizer.
//!
//! Maps boundary values to a symbolic spelling that documents where the
//! number comes from (`2**31 - 1` instead of `2147483647`). Only exact
//! matches against a fixed table are rewritten; everything else keeps its
//! plain decimal form. No ranges are ever interpreted.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// `Number.MAX_SAFE_INTEGER`
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// `Number.MIN_SAFE_INTEGER`
pub const MIN_SAFE_INTEGER: f64 = -9_007_199_254_740_991.0;

/// Named platform constants, checked first.
const NAMED_CONSTANTS: &[(f64, &str)] = &[
    (MAX_SAFE_INTEGER, "Number.MAX_SAFE_INTEGER"),
    (MIN_SAFE_INTEGER, "Number.MIN_SAFE_INTEGER"),
];

/// Signed 8/16/32-bit maxima.
const SIGNED_MAX: &[(f64, &str)] = &[
    (127.0, "2**7 - 1"),
    (32_767.0, "2**15 - 1"),
    (2_147_483_647.0, "2**31 - 1"),
];

/// Signed 8/16/32-bit minima.
const SIGNED_MIN: &[(f64, &str)] = &[
    (-128.0, "-2**7"),
    (-32_768.0, "-2**15"),
    (-2_147_483_648.0, "-2**31"),
];

/// Unsigned 8/16/32-bit maxima plus one.
const POWERS: &[(f64, &str)] = &[
    (256.0, "2**8"),
    (65_536.0, "2**16"),
    (4_294_967_296.0, "2**32"),
];

/// Unsigned 8/16/32-bit maxima.
const UNSIGNED_MAX: &[(f64, &str)] = &[
    (255.0, "2**8 - 1"),
    (65_535.0, "2**16 - 1"),
    (4_294_967_295.0, "2**32 - 1"),
];

/// Exponents accepted by the big integer power-of-two recognizer.
const BIGINT_EXPONENTS: &[u64] = &[8, 16, 32, 64];

/// Format a number, preferring a symbolic spelling for known boundaries.
///
/// ```rust
/// use zod_codepen::number_format::format_number;
///
/// assert_eq!(format_number(2147483647.0), "2**31 - 1");
/// assert_eq!(format_number(2147483646.0), "2147483646");
/// assert_eq!(format_number(9007199254740991.0), "Number.MAX_SAFE_INTEGER");
/// ```
pub fn format_number(value: f64) -> String {
    [NAMED_CONSTANTS, SIGNED_MAX, SIGNED_MIN, POWERS, UNSIGNED_MAX]
        .iter()
        .flat_map(|table| table.iter())
        .find(|(constant, _)| *constant == value)
        .map(|(_, symbol)| (*symbol).to_string())
        .unwrap_or_else(|| number_to_string(value))
}

/// Format a big integer literal, preferring a symbolic spelling for 64-bit
/// boundaries and powers of two with exponent 8, 16, 32 or 64.
///
/// ```rust
/// use num_bigint::BigInt;
/// use zod_codepen::number_format::format_bigint;
///
/// assert_eq!(format_bigint(&BigInt::from(i64::MAX)), "2n**63n - 1n");
/// assert_eq!(format_bigint(&BigInt::from(65536)), "2n**16n");
/// assert_eq!(format_bigint(&BigInt::from(123)), "123n");
/// ```
pub fn format_bigint(value: &BigInt) -> String {
    if *value == BigInt::from(i64::MAX) {
        return "2n**63n - 1n".to_string();
    }
    if *value == BigInt::from(i64::MIN) {
        return "-2n**63n".to_string();
    }
    if *value == BigInt::from(u64::MAX) {
        return "2n**64n - 1n".to_string();
    }

    let negative = value.sign() == Sign::Minus;
    let magnitude = value.magnitude();

    if let Some(power) = power_of_two_exponent(magnitude).filter(is_known_exponent) {
        return if negative {
            format!("-2n**{power}n")
        } else {
            format!("2n**{power}n")
        };
    }

    let plus_one = magnitude + BigUint::one();
    if let Some(power) = power_of_two_exponent(&plus_one).filter(is_known_exponent) {
        return if negative {
            format!("-(2n**{power}n - 1n)")
        } else {
            format!("2n**{power}n - 1n")
        };
    }

    format!("{value}n")
}

fn is_known_exponent(power: &u64) -> bool {
    BIGINT_EXPONENTS.contains(power)
}

/// `Some(k)` when `n == 2^k`. Zero is not a power of two.
fn power_of_two_exponent(n: &BigUint) -> Option<u64> {
    if n.is_zero() {
        return None;
    }
    let below = n - BigUint::one();
    if (n & &below).is_zero() {
        Some(n.bits() - 1)
    } else {
        None
    }
}

/// The default textual form of a number (`String(value)` semantics).
///
/// Integral values print without a fraction, very large and very small
/// magnitudes switch to exponent notation (`1e+21`, `1e-7`).
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    // Rust prints `1e21` / `1.5e-7`; the host syntax carries an explicit sign.
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
