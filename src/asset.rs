//! Asset Registry
//!
//! Fixed process-wide table of transferable assets. Minor-unit precision and
//! on-chain type tags are compile-time constants, never mutated at runtime.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Entry function invoked by non-custodial signing payloads.
pub const TRANSFER_FUNCTION: &str = "0x1::coin::transfer";

/// A transferable asset: symbol, minor-unit precision, on-chain type tag.
///
/// The type tag is passed as the signing payload's type argument; `decimals`
/// is the exponent for minor-unit conversion (amount x 10^decimals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u32,
    pub type_tag: &'static str,
}

static ASSETS: Lazy<FxHashMap<&'static str, AssetSpec>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    for spec in [
        AssetSpec {
            symbol: "APT",
            name: "Aptos Coin",
            decimals: 8,
            type_tag: "0x1::aptos_coin::AptosCoin",
        },
        AssetSpec {
            symbol: "USDC",
            name: "USD Coin",
            decimals: 6,
            type_tag: "0x1::managed_coin::USDC",
        },
        AssetSpec {
            symbol: "USDT",
            name: "Tether USD",
            decimals: 6,
            type_tag: "0x1::managed_coin::USDT",
        },
    ] {
        table.insert(spec.symbol, spec);
    }
    table
});

/// Look up an asset by symbol, case-insensitively.
pub fn lookup(symbol: &str) -> Option<&'static AssetSpec> {
    ASSETS.get(symbol.to_ascii_uppercase().as_str())
}

/// All registered asset symbols, for validation messages and UI pickers.
pub fn symbols() -> Vec<&'static str> {
    let mut all: Vec<_> = ASSETS.keys().copied().collect();
    all.sort_unstable();
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("usdc").unwrap().decimals, 6);
        assert_eq!(lookup("USDC").unwrap().decimals, 6);
        assert_eq!(lookup("Apt").unwrap().decimals, 8);
    }

    #[test]
    fn unknown_symbol_is_none() {
        assert!(lookup("DOGE").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn every_asset_has_a_type_tag() {
        for symbol in symbols() {
            let spec = lookup(symbol).unwrap();
            assert!(spec.type_tag.contains("::"), "{} tag looks wrong", symbol);
        }
    }
}
