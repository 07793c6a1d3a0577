//! Core Transfer Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TransferError;
use super::state::PipelineState;

/// A user-initiated transfer, immutable once handed to an executor.
///
/// `amount` stays a sender-facing decimal string until the converter turns it
/// into minor units; it is never parsed into a float anywhere.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Recipient handle, optionally prefixed with the `@` marker
    pub recipient: String,
    /// Decimal string amount as the sender typed it
    pub amount: String,
    /// Asset symbol, resolved through the asset registry
    pub asset: String,
    /// Free-text memo recorded with the transfer
    pub description: Option<String>,
    /// Authorization secret, required on the custodial path only
    pub auth_secret: Option<String>,
}

impl TransferRequest {
    pub fn new(
        recipient: impl Into<String>,
        amount: impl Into<String>,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
            asset: asset.into(),
            description: None,
            auth_secret: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_auth_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth_secret = Some(secret.into());
        self
    }
}

/// Execution path, derived from the sender's account custody metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPath {
    /// Backend holds the signing key and executes on the user's behalf
    Custodial,
    /// A browser-injected wallet signs under direct user control
    NonCustodial,
}

/// Resolver output. Consumed once per request and never cached: handles may
/// be rebound between requests.
#[derive(Debug, Clone)]
pub struct ResolvedRecipient {
    pub handle: String,
    /// Canonical fixed-width address
    pub address: String,
    pub exists: bool,
}

/// Payload handed to the external signer.
///
/// Rebuilt fresh for every attempt; the amount encoding is never reused
/// across retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningPayload {
    /// Entry function target
    pub function: String,
    /// Single element: the asset's on-chain type tag
    pub type_arguments: Vec<String>,
    /// Ordered: canonical recipient address, minor-unit amount string
    pub arguments: Vec<String>,
}

/// Terminal status of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    Pending,
    Confirmed,
    Failed,
    Cancelled,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Pending => "PENDING",
            OutcomeStatus::Confirmed => "CONFIRMED",
            OutcomeStatus::Failed => "FAILED",
            OutcomeStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final result of one pipeline run.
///
/// Constructors enforce the record invariants: a confirmed outcome always
/// carries a hash, a cancelled one never does.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub status: OutcomeStatus,
    /// Chain transaction hash; always present when confirmed
    pub hash: Option<String>,
    /// Network fee in minor units, when the backend reported one
    pub fee: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Classified failure; its `Display` is the human-readable reason
    pub failure: Option<TransferError>,
    /// Pipeline state the failure occurred in, when failed
    pub failed_at: Option<PipelineState>,
    /// False only while a confirmed transfer's history append is still being
    /// retried in the background
    pub history_synced: bool,
}

impl TransferOutcome {
    pub fn confirmed(hash: String, fee: Option<String>) -> Self {
        debug_assert!(!hash.is_empty());
        Self {
            status: OutcomeStatus::Confirmed,
            hash: Some(hash),
            fee,
            submitted_at: Utc::now(),
            completed_at: Some(Utc::now()),
            failure: None,
            failed_at: None,
            history_synced: true,
        }
    }

    /// Confirmed on chain, but the durable history append is lagging.
    pub fn confirmed_unsynced(hash: String, fee: Option<String>) -> Self {
        Self {
            history_synced: false,
            ..Self::confirmed(hash, fee)
        }
    }

    /// Failure on the custodial path, which has no client-visible states.
    pub fn failed(failure: TransferError) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            hash: None,
            fee: None,
            submitted_at: Utc::now(),
            completed_at: Some(Utc::now()),
            failure: Some(failure),
            failed_at: None,
            history_synced: true,
        }
    }

    /// Failure in a named non-custodial pipeline state.
    pub fn failed_at(at: PipelineState, failure: TransferError) -> Self {
        Self {
            failed_at: Some(at),
            ..Self::failed(failure)
        }
    }

    pub fn cancelled() -> Self {
        Self {
            status: OutcomeStatus::Cancelled,
            hash: None,
            fee: None,
            submitted_at: Utc::now(),
            completed_at: Some(Utc::now()),
            failure: None,
            failed_at: None,
            history_synced: true,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OutcomeStatus::Confirmed
    }
}
