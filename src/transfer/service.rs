//! Transfer Service
//!
//! Front door of the pipeline. One call validates and normalizes the
//! request, resolves the recipient, selects the execution path, runs the
//! matching executor, and hands back the terminal outcome.
//!
//! Validation failures return `Err` before any executor runs (and, for
//! amount and asset problems, before any network call at all). Pipeline
//! failures return `Ok` with a Failed outcome annotated by the classified
//! cause, so callers can distinguish "never started" from "ran and failed".

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::config::{AppConfig, ReconcileConfig, TransferConfig};
use crate::session::{SessionContext, TransferGate};
use crate::{asset, money};

use super::backend::BackendApi;
use super::custodial::CustodialExecutor;
use super::error::TransferError;
use super::noncustodial::NonCustodialExecutor;
use super::path::{AccountProfile, select_path};
use super::reconciler::ConfirmationReconciler;
use super::resolver;
use super::signer::WalletSigner;
use super::types::{TransferOutcome, TransferPath, TransferRequest};

pub struct TransferService {
    backend: Arc<dyn BackendApi>,
    custodial: CustodialExecutor,
    noncustodial: NonCustodialExecutor,
    gate: Arc<TransferGate>,
    max_amount_minor: u128,
}

impl TransferService {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        signer: Option<Arc<dyn WalletSigner>>,
        gate: Arc<TransferGate>,
        transfer_config: TransferConfig,
        reconcile_config: ReconcileConfig,
    ) -> Self {
        let reconciler = ConfirmationReconciler::new(Arc::clone(&backend), reconcile_config);
        Self {
            custodial: CustodialExecutor::new(Arc::clone(&backend), reconciler.clone()),
            noncustodial: NonCustodialExecutor::new(Arc::clone(&backend), signer, reconciler),
            backend,
            gate,
            max_amount_minor: transfer_config.max_amount_minor as u128,
        }
    }

    pub fn from_config(
        backend: Arc<dyn BackendApi>,
        signer: Option<Arc<dyn WalletSigner>>,
        gate: Arc<TransferGate>,
        config: &AppConfig,
    ) -> Self {
        Self::new(
            backend,
            signer,
            gate,
            config.transfer.clone(),
            config.reconcile.clone(),
        )
    }

    /// Run one transfer to a terminal outcome.
    pub async fn send(
        &self,
        ctx: &SessionContext,
        profile: AccountProfile,
        request: TransferRequest,
    ) -> Result<TransferOutcome, TransferError> {
        // One transfer per session: the external signer has no isolation
        // between concurrent calls. Held until the outcome is terminal.
        let _in_flight = self
            .gate
            .try_begin()
            .ok_or(TransferError::TransferInProgress)?;

        let spec = asset::lookup(&request.asset)
            .ok_or_else(|| TransferError::UnsupportedAsset(request.asset.clone()))?;
        let amount_minor =
            money::parse_amount(&request.amount, spec.decimals, self.max_amount_minor)?.to_string();

        // Advisory resolution: fail fast on dead handles before the executor
        // runs; each path re-resolves server-side at its own trust boundary
        let resolved =
            resolver::resolve_recipient(self.backend.as_ref(), ctx, &request.recipient).await?;

        let request_id = Uuid::new_v4();
        let path = select_path(profile);
        info!(
            %request_id,
            path = ?path,
            asset = spec.symbol,
            recipient = %resolved.address,
            "starting transfer"
        );

        let outcome = match path {
            TransferPath::Custodial => {
                self.custodial
                    .execute(ctx, request_id, &request, &amount_minor)
                    .await
            }
            TransferPath::NonCustodial => {
                self.noncustodial
                    .execute(ctx, request_id, &request, spec, &amount_minor)
                    .await
            }
        };

        info!(
            %request_id,
            status = %outcome.status,
            hash = outcome.hash.as_deref().unwrap_or("-"),
            history_synced = outcome.history_synced,
            "transfer finished"
        );
        Ok(outcome)
    }

    /// Sender balances per asset, for display.
    ///
    /// The pipeline never gates on this: the backend and signer are
    /// authoritative for shortfalls at execution time.
    pub async fn balances(
        &self,
        ctx: &SessionContext,
    ) -> Result<HashMap<String, String>, TransferError> {
        Ok(self.backend.get_balances(ctx).await?.balances)
    }
}
