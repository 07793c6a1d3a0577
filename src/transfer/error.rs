//! Transfer Error Taxonomy
//!
//! Failure signals arrive from three sources with three different shapes:
//! HTTP transport errors, backend reason codes, and external-signer errors.
//! All of them are classified HERE, at the boundary, into one closed set.
//! Downstream code matches on variants, never on raw message strings, and
//! nothing is dropped: an unclassified failure becomes `Unknown` carrying
//! the original message.

use thiserror::Error;

use crate::address::AddressError;
use crate::money::MoneyError;

use super::signer::SignerError;

/// Closed transfer failure taxonomy
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("identifier resolution unavailable: {0}")]
    ResolutionUnavailable(String),

    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("external signer is not available")]
    SignerUnavailable,

    #[error("user cancelled the transfer")]
    UserCancelled,

    #[error("signer fault: {0}")]
    SignerFault(String),

    #[error("reconciliation failed: {0}")]
    ReconciliationFailed(String),

    #[error("network timeout: {0}")]
    NetworkTimeout(String),

    #[error("unsupported asset: {0}")]
    UnsupportedAsset(String),

    #[error("a transfer is already in progress")]
    TransferInProgress,

    #[error("{0}")]
    Unknown(String),
}

impl TransferError {
    /// Stable code for API responses and log correlation
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount(_) => "INVALID_AMOUNT",
            TransferError::MalformedAddress(_) => "MALFORMED_ADDRESS",
            TransferError::RecipientNotFound(_) => "RECIPIENT_NOT_FOUND",
            TransferError::ResolutionUnavailable(_) => "RESOLUTION_UNAVAILABLE",
            TransferError::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            TransferError::SignerUnavailable => "SIGNER_UNAVAILABLE",
            TransferError::UserCancelled => "USER_CANCELLED",
            TransferError::SignerFault(_) => "SIGNER_FAULT",
            TransferError::ReconciliationFailed(_) => "RECONCILIATION_FAILED",
            TransferError::NetworkTimeout(_) => "NETWORK_TIMEOUT",
            TransferError::UnsupportedAsset(_) => "UNSUPPORTED_ASSET",
            TransferError::TransferInProgress => "TRANSFER_IN_PROGRESS",
            TransferError::Unknown(_) => "UNKNOWN",
        }
    }

    /// Whether the caller may retry with the same request.
    ///
    /// Only reconciliation failures are retried automatically (in the
    /// background); the other two require explicit user re-initiation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransferError::ResolutionUnavailable(_)
                | TransferError::NetworkTimeout(_)
                | TransferError::ReconciliationFailed(_)
        )
    }
}

impl From<MoneyError> for TransferError {
    fn from(e: MoneyError) -> Self {
        TransferError::InvalidAmount(e.to_string())
    }
}

impl From<AddressError> for TransferError {
    fn from(e: AddressError) -> Self {
        TransferError::MalformedAddress(e.to_string())
    }
}

impl From<anyhow::Error> for TransferError {
    fn from(e: anyhow::Error) -> Self {
        TransferError::Unknown(e.to_string())
    }
}

impl From<SignerError> for TransferError {
    fn from(e: SignerError) -> Self {
        match e {
            SignerError::Rejected => TransferError::UserCancelled,
            // Balance and fee-allowance shortfalls share one kind; the
            // original message keeps them distinguishable for diagnostics
            SignerError::InsufficientBalance(msg) | SignerError::InsufficientGas(msg) => {
                TransferError::InsufficientFunds(msg)
            }
            SignerError::Fault(msg) => TransferError::SignerFault(msg),
        }
    }
}

/// Backend reason codes (non-2xx response bodies) -> taxonomy.
///
/// Codes the backend does not document map to `Unknown` with both code and
/// message preserved.
pub fn classify_backend_reason(code: &str, message: &str) -> TransferError {
    match code {
        "INSUFFICIENT_BALANCE" | "INSUFFICIENT_FUNDS" => {
            TransferError::InsufficientFunds(message.to_string())
        }
        "RECIPIENT_NOT_FOUND" | "IDENTIFIER_NOT_FOUND" => {
            TransferError::RecipientNotFound(message.to_string())
        }
        "INVALID_AMOUNT" | "AMOUNT_TOO_LARGE" => TransferError::InvalidAmount(message.to_string()),
        "INVALID_RECIPIENT" | "MALFORMED_ADDRESS" => {
            TransferError::MalformedAddress(message.to_string())
        }
        _ => TransferError::Unknown(format!("{}: {}", code, message)),
    }
}

/// Transport-level failures -> taxonomy.
///
/// Resolution calls degrade to the retryable `ResolutionUnavailable`; other
/// calls have no generic retryable kind, so non-timeout I/O failures stay
/// `Unknown` with the transport message.
pub fn classify_transport(e: &reqwest::Error, during_resolution: bool) -> TransferError {
    classify_io(e.is_timeout(), during_resolution, e.to_string())
}

fn classify_io(is_timeout: bool, during_resolution: bool, message: String) -> TransferError {
    if is_timeout {
        TransferError::NetworkTimeout(message)
    } else if during_resolution {
        TransferError::ResolutionUnavailable(message)
    } else {
        TransferError::Unknown(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(TransferError::SignerUnavailable.code(), "SIGNER_UNAVAILABLE");
        assert_eq!(TransferError::UserCancelled.code(), "USER_CANCELLED");
        assert_eq!(
            TransferError::InsufficientFunds("x".into()).code(),
            "INSUFFICIENT_FUNDS"
        );
    }

    #[test]
    fn retryable_set_is_exact() {
        assert!(TransferError::ResolutionUnavailable("x".into()).is_retryable());
        assert!(TransferError::NetworkTimeout("x".into()).is_retryable());
        assert!(TransferError::ReconciliationFailed("x".into()).is_retryable());

        assert!(!TransferError::InvalidAmount("x".into()).is_retryable());
        assert!(!TransferError::InsufficientFunds("x".into()).is_retryable());
        assert!(!TransferError::UserCancelled.is_retryable());
        assert!(!TransferError::SignerUnavailable.is_retryable());
        assert!(!TransferError::Unknown("x".into()).is_retryable());
    }

    #[test]
    fn signer_errors_classify() {
        assert!(matches!(
            TransferError::from(SignerError::Rejected),
            TransferError::UserCancelled
        ));
        assert!(matches!(
            TransferError::from(SignerError::InsufficientGas("gas".into())),
            TransferError::InsufficientFunds(_)
        ));
        let fault = TransferError::from(SignerError::Fault("simulation aborted".into()));
        assert_eq!(fault.to_string(), "signer fault: simulation aborted");
    }

    #[test]
    fn backend_reasons_classify() {
        assert!(matches!(
            classify_backend_reason("INSUFFICIENT_BALANCE", "not enough USDC"),
            TransferError::InsufficientFunds(_)
        ));
        assert!(matches!(
            classify_backend_reason("RECIPIENT_NOT_FOUND", "no such handle"),
            TransferError::RecipientNotFound(_)
        ));
        // Unclassified codes keep both code and message
        let unknown = classify_backend_reason("QUOTA_EXCEEDED", "daily limit hit");
        assert!(matches!(unknown, TransferError::Unknown(_)));
        assert!(unknown.to_string().contains("QUOTA_EXCEEDED"));
        assert!(unknown.to_string().contains("daily limit hit"));
    }

    #[test]
    fn io_failures_classify() {
        assert!(matches!(
            classify_io(true, false, "deadline".into()),
            TransferError::NetworkTimeout(_)
        ));
        assert!(matches!(
            classify_io(false, true, "refused".into()),
            TransferError::ResolutionUnavailable(_)
        ));
        assert!(matches!(
            classify_io(false, false, "refused".into()),
            TransferError::Unknown(_)
        ));
    }
}
