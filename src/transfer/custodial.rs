//! Custodial Executor
//!
//! One backend call: resolution, conversion, signing, submission, and the
//! durable record happen server-side, atomically from the client's
//! perspective. The client never sees a signing payload or an intermediate
//! Pending state on this path.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::session::SessionContext;

use super::backend::{BackendApi, ExecuteTransferRequest};
use super::error::TransferError;
use super::reconciler::ConfirmationReconciler;
use super::types::{TransferOutcome, TransferRequest};

pub struct CustodialExecutor {
    backend: Arc<dyn BackendApi>,
    reconciler: ConfirmationReconciler,
}

impl CustodialExecutor {
    pub fn new(backend: Arc<dyn BackendApi>, reconciler: ConfirmationReconciler) -> Self {
        Self {
            backend,
            reconciler,
        }
    }

    /// Run one custodial transfer to a terminal outcome.
    ///
    /// Backend-reported failure reasons (insufficient balance, bad
    /// authorization, invalid recipient) pass through classification with
    /// their message intact.
    pub async fn execute(
        &self,
        ctx: &SessionContext,
        request_id: Uuid,
        request: &TransferRequest,
        amount_minor: &str,
    ) -> TransferOutcome {
        let Some(secret) = request.auth_secret.as_deref() else {
            return TransferOutcome::failed(TransferError::Unknown(
                "custodial transfer requires an authorization secret".to_string(),
            ));
        };

        info!(%request_id, asset = %request.asset, "executing custodial transfer");

        let response = self
            .backend
            .execute_transfer(
                ctx,
                ExecuteTransferRequest {
                    request_id,
                    recipient: request.recipient.clone(),
                    amount: amount_minor.to_string(),
                    asset: request.asset.clone(),
                    description: request.description.clone(),
                    auth_secret: secret.to_string(),
                },
            )
            .await;

        match response {
            Ok(executed) => self.reconciler.custodial_outcome(request_id, executed),
            Err(error) => {
                warn!(%request_id, code = error.code(), "custodial transfer failed");
                TransferOutcome::failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReconcileConfig;
    use crate::transfer::backend::MockBackend;
    use crate::transfer::types::OutcomeStatus;

    fn executor(backend: Arc<MockBackend>) -> CustodialExecutor {
        let reconciler = ConfirmationReconciler::new(backend.clone(), ReconcileConfig::default());
        CustodialExecutor::new(backend, reconciler)
    }

    fn ctx() -> SessionContext {
        SessionContext::new(7, "token")
    }

    #[tokio::test]
    async fn happy_path_sends_minor_units() {
        let backend = Arc::new(MockBackend::new());
        let executor = executor(backend.clone());

        let request = TransferRequest::new("@alice", "25.00", "USDC").with_auth_secret("123456");
        let outcome = executor
            .execute(&ctx(), Uuid::new_v4(), &request, "25000000")
            .await;

        assert!(outcome.is_confirmed());
        assert!(outcome.hash.is_some());

        let seen = backend.last_execute.lock().unwrap().clone().unwrap();
        assert_eq!(seen.amount, "25000000");
        assert_eq!(seen.auth_secret, "123456");
    }

    #[tokio::test]
    async fn missing_secret_fails_before_any_call() {
        let backend = Arc::new(MockBackend::new());
        let executor = executor(backend.clone());

        let request = TransferRequest::new("@alice", "25.00", "USDC");
        let outcome = executor
            .execute(&ctx(), Uuid::new_v4(), &request, "25000000")
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(backend.execute_count(), 0);
    }

    #[tokio::test]
    async fn backend_reason_passes_through() {
        let backend = Arc::new(MockBackend::new());
        backend.set_execute_error(TransferError::InsufficientFunds(
            "balance 10.00 below requested 25.00".to_string(),
        ));
        let executor = executor(backend.clone());

        let request = TransferRequest::new("@alice", "25.00", "USDC").with_auth_secret("123456");
        let outcome = executor
            .execute(&ctx(), Uuid::new_v4(), &request, "25000000")
            .await;

        assert_eq!(outcome.status, OutcomeStatus::Failed);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.code(), "INSUFFICIENT_FUNDS");
        assert!(failure.to_string().contains("balance 10.00"));
    }
}
