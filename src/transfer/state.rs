//! Pipeline State Definitions
//!
//! Terminal states: CONFIRMED, FAILED, CANCELLED.

use std::fmt;

/// Non-custodial pipeline states
///
/// The custodial path collapses to a single backend call and only ever
/// surfaces the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Backend resolves the recipient and fixes canonical transfer details
    Preparing,

    /// Blocked on the external signer; unbounded wait on user interaction
    AwaitingSignature,

    /// Signer accepted; the transaction is on its way to the network
    Submitting,

    /// Chain transfer done; reporting the hash for the durable record
    Reconciling,

    /// Terminal: transfer final at the network level
    Confirmed,

    /// Terminal: no funds moved
    Failed,

    /// Terminal: user dismissed the signer prompt; leaves no record
    Cancelled,
}

impl PipelineState {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Confirmed | PipelineState::Failed | PipelineState::Cancelled
        )
    }

    /// True while the external signer owns the request.
    ///
    /// A second transfer must not start while any state reports true here.
    #[inline]
    pub fn holds_signer(&self) -> bool {
        matches!(
            self,
            PipelineState::AwaitingSignature | PipelineState::Submitting
        )
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Preparing => "PREPARING",
            PipelineState::AwaitingSignature => "AWAITING_SIGNATURE",
            PipelineState::Submitting => "SUBMITTING",
            PipelineState::Reconciling => "RECONCILING",
            PipelineState::Confirmed => "CONFIRMED",
            PipelineState::Failed => "FAILED",
            PipelineState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(PipelineState::Confirmed.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(PipelineState::Cancelled.is_terminal());

        assert!(!PipelineState::Preparing.is_terminal());
        assert!(!PipelineState::AwaitingSignature.is_terminal());
        assert!(!PipelineState::Submitting.is_terminal());
        assert!(!PipelineState::Reconciling.is_terminal());
    }

    #[test]
    fn signer_holding_states() {
        assert!(PipelineState::AwaitingSignature.holds_signer());
        assert!(PipelineState::Submitting.holds_signer());

        assert!(!PipelineState::Preparing.holds_signer());
        assert!(!PipelineState::Reconciling.holds_signer());
        assert!(!PipelineState::Confirmed.holds_signer());
    }

    #[test]
    fn display_names() {
        assert_eq!(PipelineState::Preparing.to_string(), "PREPARING");
        assert_eq!(
            PipelineState::AwaitingSignature.to_string(),
            "AWAITING_SIGNATURE"
        );
        assert_eq!(PipelineState::Cancelled.to_string(), "CANCELLED");
    }
}
