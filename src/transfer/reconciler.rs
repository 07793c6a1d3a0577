//! Confirmation Reconciler
//!
//! Produces the terminal [`TransferOutcome`] for both paths. The custodial
//! backend already holds the ledger entry when its call returns, so that
//! path needs no extra round-trip. The non-custodial path reports the chain
//! hash back for the durable record; a failed append NEVER downgrades a
//! confirmed chain transfer. The outcome stays Confirmed with
//! `history_synced = false` and a background task keeps retrying the append.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ReconcileConfig;
use crate::session::SessionContext;

use super::backend::{BackendApi, ConfirmTransferRequest, ExecuteTransferResponse, status};
use super::error::TransferError;
use super::types::{TransferOutcome, TransferRequest};

#[derive(Clone)]
pub struct ConfirmationReconciler {
    backend: Arc<dyn BackendApi>,
    config: ReconcileConfig,
}

impl ConfirmationReconciler {
    pub fn new(backend: Arc<dyn BackendApi>, config: ReconcileConfig) -> Self {
        Self { backend, config }
    }

    /// Custodial outcomes surface the backend's authoritative record directly.
    pub fn custodial_outcome(
        &self,
        request_id: Uuid,
        response: ExecuteTransferResponse,
    ) -> TransferOutcome {
        if response.status != status::CONFIRMED {
            return TransferOutcome::failed(TransferError::Unknown(format!(
                "backend reported status {}",
                response.status
            )));
        }
        if response.hash.is_empty() {
            // A confirmed record must carry a hash
            return TransferOutcome::failed(TransferError::Unknown(
                "backend confirmed without a transaction hash".to_string(),
            ));
        }

        info!(%request_id, hash = %response.hash, "custodial transfer confirmed");
        TransferOutcome::confirmed(response.hash, response.fee)
    }

    /// Record a chain-confirmed non-custodial transfer in backend history.
    pub async fn finalize_noncustodial(
        &self,
        ctx: &SessionContext,
        request_id: Uuid,
        request: &TransferRequest,
        hash: &str,
        fee: Option<String>,
        amount_minor: &str,
    ) -> TransferOutcome {
        let confirm = ConfirmTransferRequest {
            request_id,
            hash: hash.to_string(),
            recipient: request.recipient.clone(),
            amount: amount_minor.to_string(),
            asset: request.asset.clone(),
            description: request.description.clone(),
        };

        match self.backend.confirm_transfer(ctx, confirm.clone()).await {
            Ok(response) if response.recorded => {
                info!(%request_id, hash, "transfer recorded in history");
                TransferOutcome::confirmed(hash.to_string(), fee)
            }
            Ok(_) => {
                self.defer(ctx, request_id, "backend declined to record", confirm);
                TransferOutcome::confirmed_unsynced(hash.to_string(), fee)
            }
            Err(cause) => {
                // The chain transfer already succeeded; only bookkeeping lags
                let classified = TransferError::ReconciliationFailed(cause.to_string());
                self.defer(ctx, request_id, classified.code(), confirm);
                TransferOutcome::confirmed_unsynced(hash.to_string(), fee)
            }
        }
    }

    fn defer(
        &self,
        ctx: &SessionContext,
        request_id: Uuid,
        why: &str,
        confirm: ConfirmTransferRequest,
    ) {
        warn!(
            %request_id,
            why,
            interval_secs = self.config.retry_interval_secs,
            "history append deferred to background retry"
        );
        tokio::spawn(retry_confirm(
            Arc::clone(&self.backend),
            self.config.clone(),
            ctx.clone(),
            confirm,
        ));
    }
}

/// Retry loop for a deferred history append.
///
/// Runs until the backend records the transfer or attempts run out. Giving
/// up is loud: an unrecorded confirmed transfer is an ops problem, not
/// something to drop silently.
pub(crate) async fn retry_confirm(
    backend: Arc<dyn BackendApi>,
    config: ReconcileConfig,
    ctx: SessionContext,
    confirm: ConfirmTransferRequest,
) -> bool {
    let request_id = confirm.request_id;

    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(Duration::from_secs(config.retry_interval_secs)).await;

        match backend.confirm_transfer(&ctx, confirm.clone()).await {
            Ok(response) if response.recorded => {
                info!(%request_id, attempt, "deferred reconciliation recorded");
                return true;
            }
            Ok(_) => warn!(%request_id, attempt, "backend declined to record transfer"),
            Err(e) => warn!(%request_id, attempt, code = e.code(), "reconciliation retry failed"),
        }
    }

    error!(
        %request_id,
        attempts = config.max_attempts,
        hash = %confirm.hash,
        "giving up on history reconciliation"
    );
    false
}
