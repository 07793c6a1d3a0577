//! Execution Path Selection
//!
//! Pure derivation from the sender's account custody metadata. No I/O and no
//! caching: selecting from current metadata on every request avoids
//! stale-path bugs after the user switches custody mode.

use super::types::TransferPath;

/// Sender account metadata relevant to path selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountProfile {
    /// True when the backend custodies the signing key
    pub custodied: bool,
}

/// Pick the execution path. Depends only on custody metadata, never on
/// request content.
pub fn select_path(profile: AccountProfile) -> TransferPath {
    if profile.custodied {
        TransferPath::Custodial
    } else {
        TransferPath::NonCustodial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_custody_flag() {
        assert_eq!(
            select_path(AccountProfile { custodied: true }),
            TransferPath::Custodial
        );
        assert_eq!(
            select_path(AccountProfile { custodied: false }),
            TransferPath::NonCustodial
        );
    }

    #[test]
    fn deterministic() {
        let profile = AccountProfile { custodied: true };
        assert_eq!(select_path(profile), select_path(profile));
    }
}
