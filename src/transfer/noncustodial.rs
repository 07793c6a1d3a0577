//! Non-Custodial Executor
//!
//! Drives one transfer through the signing pipeline:
//!
//! ```text
//! PREPARING → AWAITING_SIGNATURE → SUBMITTING → RECONCILING → CONFIRMED
//!     ↓               ↓ (reject)                      ↓ (append fails)
//!  FAILED          CANCELLED                  CONFIRMED (history lagging)
//! ```
//!
//! # Invariants
//!
//! 1. Steps run strictly in order; each awaits the previous, nothing is
//!    speculative.
//! 2. Rejection during AWAITING_SIGNATURE is terminal and leaves no durable
//!    record; `confirm-transfer` is never called for it.
//! 3. Once the signer returns a hash the transfer is final at the network
//!    level. Later failures only affect bookkeeping, never the outcome.
//! 4. The signing payload and its amount encoding are rebuilt for every
//!    attempt, never reused across retries.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::address;
use crate::asset::{AssetSpec, TRANSFER_FUNCTION};
use crate::session::SessionContext;

use super::backend::{BackendApi, PrepareTransferRequest, PreparedTransfer};
use super::error::TransferError;
use super::reconciler::ConfirmationReconciler;
use super::signer::WalletSigner;
use super::state::PipelineState;
use super::types::{SigningPayload, TransferOutcome, TransferRequest};

pub struct NonCustodialExecutor {
    backend: Arc<dyn BackendApi>,
    /// Injected by the host environment; `None` when no wallet is present
    signer: Option<Arc<dyn WalletSigner>>,
    reconciler: ConfirmationReconciler,
}

impl NonCustodialExecutor {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        signer: Option<Arc<dyn WalletSigner>>,
        reconciler: ConfirmationReconciler,
    ) -> Self {
        Self {
            backend,
            signer,
            reconciler,
        }
    }

    /// Run one non-custodial transfer to a terminal outcome.
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        request_id: Uuid,
        request: &TransferRequest,
        spec: &AssetSpec,
        amount_minor: &str,
    ) -> TransferOutcome {
        // PREPARING: the backend re-resolves the recipient and fixes the
        // canonical transfer details; client-side resolution was advisory
        debug!(%request_id, state = %PipelineState::Preparing, "preparing transfer");
        let prepared = match self
            .backend
            .prepare_transfer(
                ctx,
                PrepareTransferRequest {
                    request_id,
                    recipient: request.recipient.clone(),
                    amount: amount_minor.to_string(),
                    asset: request.asset.clone(),
                },
            )
            .await
        {
            Ok(prepared) => prepared,
            Err(error) => {
                // No signer was invoked; nothing moved
                warn!(%request_id, code = error.code(), "preparation failed");
                return TransferOutcome::failed_at(PipelineState::Preparing, error);
            }
        };

        // AWAITING_SIGNATURE: a missing capability fails here, before any
        // signing attempt. Offering a wallet-install prompt is the caller's
        // reaction to this result, never pipeline behavior.
        let Some(signer) = self.signer.as_deref() else {
            warn!(%request_id, "external signer capability absent");
            return TransferOutcome::failed_at(
                PipelineState::AwaitingSignature,
                TransferError::SignerUnavailable,
            );
        };

        let payload = match build_payload(spec, &prepared, amount_minor) {
            Ok(payload) => payload,
            Err(error) => {
                return TransferOutcome::failed_at(PipelineState::AwaitingSignature, error);
            }
        };

        // Blocks on user interaction; deliberately no timeout here
        info!(
            %request_id,
            state = %PipelineState::AwaitingSignature,
            signer = signer.name(),
            "delegating to external signer"
        );
        let submitted = match signer.sign_and_submit(&payload).await {
            Ok(submitted) => submitted,
            Err(signer_error) => {
                let error = TransferError::from(signer_error);
                if matches!(error, TransferError::UserCancelled) {
                    // Terminal by user choice: no record is written
                    info!(%request_id, "user cancelled at the signer prompt");
                    return TransferOutcome::cancelled();
                }
                warn!(%request_id, code = error.code(), error = %error, "signer failed");
                return TransferOutcome::failed_at(PipelineState::AwaitingSignature, error);
            }
        };

        if submitted.hash.is_empty() {
            return TransferOutcome::failed_at(
                PipelineState::Submitting,
                TransferError::SignerFault("signer returned an empty transaction hash".to_string()),
            );
        }
        info!(
            %request_id,
            state = %PipelineState::Submitting,
            hash = %submitted.hash,
            "signer accepted and submitted"
        );

        // RECONCILING: failure here is non-fatal; the reconciler keeps the
        // outcome Confirmed and defers the append to a background retry
        debug!(%request_id, state = %PipelineState::Reconciling, "reporting hash for the durable record");
        self.reconciler
            .finalize_noncustodial(
                ctx,
                request_id,
                request,
                &submitted.hash,
                Some(prepared.fee.clone()),
                amount_minor,
            )
            .await
    }
}

/// Build the signing payload from the backend's canonical details and a
/// freshly generated amount encoding.
fn build_payload(
    spec: &AssetSpec,
    prepared: &PreparedTransfer,
    amount_minor: &str,
) -> Result<SigningPayload, TransferError> {
    let recipient = address::canonicalize(&prepared.recipient_address)?;

    if prepared.amount != amount_minor {
        // The payload carries the client's own conversion of what the sender
        // typed; a differing server view is logged, not silently adopted
        warn!(
            backend_amount = %prepared.amount,
            client_amount = %amount_minor,
            "prepare response amount differs from client conversion"
        );
    }

    Ok(SigningPayload {
        function: TRANSFER_FUNCTION.to_string(),
        type_arguments: vec![spec.type_tag.to_string()],
        arguments: vec![recipient, amount_minor.to_string()],
    })
}
