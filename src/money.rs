//! Money Conversion Module
//!
//! Unified conversion between sender-facing decimal strings and integer
//! minor units. All conversions MUST go through this module; no code past
//! this boundary touches binary floating point.
//!
//! ## Internal Representation
//! - Amounts are `u128` minor units (amount x 10^decimals)
//! - The authoritative source for decimals is the asset registry
//! - Sub-minor-unit digits are truncated (floored), never rounded up
//!
//! ## Usage
//! ```rust
//! use handlepay::money::{parse_amount, format_amount};
//!
//! let minor = parse_amount("1.5", 8, u128::MAX).unwrap();
//! assert_eq!(minor, 150_000_000);
//!
//! assert_eq!(format_amount(150_000_000, 8), "1.50000000");
//! ```

use rust_decimal::prelude::*;
use thiserror::Error;

/// Money conversion errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount must be positive")]
    NotPositive,

    #[error("amount exceeds the configured maximum")]
    AboveMaximum,

    #[error("invalid amount format: {0}")]
    InvalidFormat(String),
}

/// Convert a sender-facing decimal string to integer minor units.
///
/// Digits beyond `decimals` are truncated, never rounded up: the sender can
/// only be charged at most what they typed.
///
/// # Errors
/// * `InvalidFormat` - non-numeric input, signs, or ambiguous forms (".5", "5.")
/// * `NotPositive` - zero after truncation, or explicit zero
/// * `AboveMaximum` - result exceeds `max_minor`
pub fn parse_amount(amount_str: &str, decimals: u32, max_minor: u128) -> Result<u128, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    // Signed input is rejected outright; u128::parse would accept a leading '+'
    if amount_str.starts_with('-') || amount_str.starts_with('+') {
        return Err(MoneyError::InvalidFormat("sign not allowed".into()));
    }

    let parts: Vec<&str> = amount_str.split('.').collect();
    let (whole, frac) = match parts.len() {
        1 => (parts[0], ""),
        2 => {
            // Require both sides of the dot to be non-empty.
            // Prevents ambiguous forms like ".5" or "5."
            if parts[0].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                ));
            }
            if parts[1].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                ));
            }
            (parts[0], parts[1])
        }
        _ => return Err(MoneyError::InvalidFormat("multiple decimal points".into())),
    };

    if !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in whole part: {}",
            whole
        )));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in fractional part: {}",
            frac
        )));
    }

    // All-digit input that still fails to parse can only be out of range
    let whole_num: u128 = whole.parse().map_err(|_| MoneyError::AboveMaximum)?;

    // Truncate: keep at most `decimals` fractional digits, then right-pad
    let kept = &frac[..frac.len().min(decimals as usize)];
    let frac_num: u128 = if decimals == 0 || kept.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", kept, width = decimals as usize);
        padded.parse().map_err(|_| MoneyError::AboveMaximum)?
    };

    let multiplier = 10u128
        .checked_pow(decimals)
        .ok_or(MoneyError::AboveMaximum)?;
    let amount = whole_num
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(frac_num))
        .ok_or(MoneyError::AboveMaximum)?;

    if amount == 0 {
        return Err(MoneyError::NotPositive);
    }
    if amount > max_minor {
        return Err(MoneyError::AboveMaximum);
    }

    Ok(amount)
}

/// Convert integer minor units back to a full-precision decimal string.
///
/// Pure integer math; round-trips exactly with [`parse_amount`].
pub fn format_amount(minor: u128, decimals: u32) -> String {
    if decimals == 0 {
        return minor.to_string();
    }
    let divisor = 10u128.pow(decimals);
    let whole = minor / divisor;
    let frac = minor % divisor;
    format!("{}.{:0>width$}", whole, frac, width = decimals as usize)
}

/// Convert minor units to a display string with a reduced number of decimals.
///
/// Truncates to `display_decimals`, consistent with [`parse_amount`].
pub fn display_amount(minor: u128, decimals: u32, display_decimals: u32) -> String {
    let value = Decimal::from_i128_with_scale(minor as i128, decimals);
    let truncated = value.trunc_with_scale(display_decimals);
    format!("{:.prec$}", truncated, prec = display_decimals as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CAP: u128 = u128::MAX;

    #[test]
    fn parse_amount_basic() {
        assert_eq!(parse_amount("1.23", 2, NO_CAP).unwrap(), 123);
        assert_eq!(parse_amount("1.23", 8, NO_CAP).unwrap(), 123_000_000);
        assert_eq!(parse_amount("100", 8, NO_CAP).unwrap(), 10_000_000_000);
        assert_eq!(parse_amount("0.00000001", 8, NO_CAP).unwrap(), 1);
        assert_eq!(parse_amount("001.23", 2, NO_CAP).unwrap(), 123);
        assert_eq!(parse_amount("25.00", 6, NO_CAP).unwrap(), 25_000_000);
    }

    #[test]
    fn parse_amount_truncates_never_rounds() {
        assert_eq!(parse_amount("12.999999", 6, NO_CAP).unwrap(), 12_999_999);
        assert_eq!(parse_amount("1.1", 0, NO_CAP).unwrap(), 1);
        assert_eq!(parse_amount("1.999", 2, NO_CAP).unwrap(), 199);
        assert_eq!(parse_amount("0.129", 2, NO_CAP).unwrap(), 12);
        // Dust below one minor unit floors to zero and is rejected as non-positive
        assert!(matches!(
            parse_amount("0.001", 2, NO_CAP),
            Err(MoneyError::NotPositive)
        ));
    }

    #[test]
    fn parse_amount_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(parse_amount("7.654321", 6, NO_CAP).unwrap(), 7_654_321);
        }
    }

    #[test]
    fn parse_amount_rejects_non_positive() {
        assert!(matches!(
            parse_amount("0", 8, NO_CAP),
            Err(MoneyError::NotPositive)
        ));
        assert!(matches!(
            parse_amount("0.00", 2, NO_CAP),
            Err(MoneyError::NotPositive)
        ));
        assert!(parse_amount("-1", 8, NO_CAP).is_err());
        assert!(parse_amount("+1.23", 8, NO_CAP).is_err());
    }

    #[test]
    fn parse_amount_rejects_invalid_formats() {
        for case in ["", "abc", "1,000.00", "1.2.3", "1. 23", "1e2", "0x12", ".", ".5", "5."] {
            assert!(
                parse_amount(case, 8, NO_CAP).is_err(),
                "should reject: {:?}",
                case
            );
        }
    }

    #[test]
    fn parse_amount_enforces_maximum() {
        assert_eq!(parse_amount("10", 6, 10_000_000).unwrap(), 10_000_000);
        assert!(matches!(
            parse_amount("10.000001", 6, 10_000_000),
            Err(MoneyError::AboveMaximum)
        ));
        // A whole part this long overflows before the cap even applies
        assert!(matches!(
            parse_amount("999999999999999999999999999999999999999999", 0, NO_CAP),
            Err(MoneyError::AboveMaximum)
        ));
    }

    #[test]
    fn format_amount_full_precision() {
        assert_eq!(format_amount(100_000_000, 8), "1.00000000");
        assert_eq!(format_amount(50_000_000, 8), "0.50000000");
        assert_eq!(format_amount(1, 8), "0.00000001");
        assert_eq!(format_amount(25_000_000, 6), "25.000000");
        assert_eq!(format_amount(42, 0), "42");
    }

    #[test]
    fn display_amount_truncates() {
        assert_eq!(display_amount(199_900_000, 8, 2), "1.99");
        assert_eq!(display_amount(199_900_000, 8, 1), "1.9");
        assert_eq!(display_amount(199_900_000, 8, 8), "1.99900000");
    }

    #[test]
    fn roundtrip_consistency() {
        for (s, decimals) in [("1.5", 8u32), ("0.000001", 6), ("1234.5678", 4), ("999999", 2)] {
            let minor = parse_amount(s, decimals, NO_CAP).unwrap();
            let formatted = format_amount(minor, decimals);
            assert_eq!(parse_amount(&formatted, decimals, NO_CAP).unwrap(), minor);
        }
    }
}
