//! Canonical Account Addresses
//!
//! Account addresses travel in many shapes: with or without a `0x` prefix,
//! mixed case, and with leading zeros elided. Signing payloads and equality
//! checks require the single canonical form: `0x` + 64 lower-case hex chars.

use thiserror::Error;

/// Fixed width of a canonical address, in hex characters.
pub const ADDRESS_HEX_WIDTH: usize = 64;

/// Canonical address prefix.
pub const ADDRESS_PREFIX: &str = "0x";

/// Address canonicalization errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address exceeds {ADDRESS_HEX_WIDTH} hex characters")]
    TooLong,

    #[error("address contains non-hex characters")]
    NotHex,
}

/// Normalize an address to its canonical fixed-width form.
///
/// Strips an optional `0x` prefix, lower-cases, left-pads with `0` to
/// [`ADDRESS_HEX_WIDTH`], and re-attaches the prefix. Idempotent: a canonical
/// address passes through unchanged.
pub fn canonicalize(address: &str) -> Result<String, AddressError> {
    let trimmed = address.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        return Err(AddressError::Empty);
    }
    if stripped.len() > ADDRESS_HEX_WIDTH {
        return Err(AddressError::TooLong);
    }

    let padded = format!(
        "{:0>width$}",
        stripped.to_ascii_lowercase(),
        width = ADDRESS_HEX_WIDTH
    );
    // Width is even, so decoding doubles as the hex-character check
    hex::decode(&padded).map_err(|_| AddressError::NotHex)?;

    Ok(format!("{}{}", ADDRESS_PREFIX, padded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_addresses() {
        let canonical = canonicalize("1").unwrap();
        assert_eq!(canonical.len(), 2 + ADDRESS_HEX_WIDTH);
        assert!(canonical.starts_with("0x"));
        assert!(canonical.ends_with("01"));
        assert_eq!(&canonical[2..], format!("{:0>64}", "1"));
    }

    #[test]
    fn strips_prefix_and_lowercases() {
        let canonical = canonicalize("0xAB12").unwrap();
        assert!(canonical.ends_with("ab12"));
        assert_eq!(canonicalize("AB12").unwrap(), canonical);
        assert_eq!(canonicalize("0XAB12").unwrap(), canonical);
    }

    #[test]
    fn idempotent() {
        let once = canonicalize("0xdeadbeef").unwrap();
        let twice = canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(canonicalize(""), Err(AddressError::Empty));
        assert_eq!(canonicalize("0x"), Err(AddressError::Empty));
        assert_eq!(canonicalize("xyz"), Err(AddressError::NotHex));
        assert_eq!(canonicalize("12g4"), Err(AddressError::NotHex));

        let too_long = "a".repeat(ADDRESS_HEX_WIDTH + 1);
        assert_eq!(canonicalize(&too_long), Err(AddressError::TooLong));
    }

    #[test]
    fn full_width_passes_unchanged() {
        let full = format!("0x{}", "7".repeat(ADDRESS_HEX_WIDTH));
        assert_eq!(canonicalize(&full).unwrap(), full);
    }
}
