//! Backend Port
//!
//! The five backend calls the pipeline consumes, behind one trait, plus the
//! HTTP implementation. Every call takes an explicit [`SessionContext`]; the
//! pipeline never reads ambient storage. Transport and reason-code failures
//! are classified here, at the boundary, so callers only ever see the closed
//! taxonomy.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::session::SessionContext;

use super::error::{TransferError, classify_backend_reason, classify_transport};

/// Status strings in execute responses
pub mod status {
    pub const CONFIRMED: &str = "CONFIRMED";
    pub const FAILED: &str = "FAILED";
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub exists: bool,
    /// Present whenever `exists` is true
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    /// Asset symbol -> decimal string amount
    pub balances: HashMap<String, String>,
}

/// Custodial execution request. `amount` is already in minor units; the
/// backend signs and submits without further client involvement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransferRequest {
    pub request_id: Uuid,
    pub recipient: String,
    pub amount: String,
    pub asset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub auth_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTransferResponse {
    pub hash: String,
    #[serde(default)]
    pub fee: Option<String>,
    pub status: String,
}

/// Non-custodial preparation request; the backend re-resolves the recipient
/// as the trust boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareTransferRequest {
    pub request_id: Uuid,
    pub recipient: String,
    /// Minor-unit amount string
    pub amount: String,
    pub asset: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedTransfer {
    pub sender_address: String,
    pub recipient_address: String,
    /// Minor-unit amount string, the backend's canonical view
    pub amount: String,
    /// Estimated network fee in minor units
    pub fee: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransferRequest {
    pub request_id: Uuid,
    pub hash: String,
    pub recipient: String,
    pub amount: String,
    pub asset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransferResponse {
    pub recorded: bool,
}

/// Error body the backend returns on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Port Trait
// ============================================================================

/// Backend calls the pipeline depends on.
///
/// Implementations classify their own failures: every error crossing this
/// boundary is already a [`TransferError`].
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Resolve a handle to existence + address. Idempotent, side-effect-free.
    async fn resolve_identifier(
        &self,
        ctx: &SessionContext,
        req: ResolveRequest,
    ) -> Result<ResolveResponse, TransferError>;

    /// Sender balances per asset.
    async fn get_balances(&self, ctx: &SessionContext) -> Result<BalancesResponse, TransferError>;

    /// Custodial execution: resolve, convert, sign, submit, record, in one
    /// call that is atomic from the client's perspective.
    async fn execute_transfer(
        &self,
        ctx: &SessionContext,
        req: ExecuteTransferRequest,
    ) -> Result<ExecuteTransferResponse, TransferError>;

    /// Non-custodial preparation: canonical transfer details.
    async fn prepare_transfer(
        &self,
        ctx: &SessionContext,
        req: PrepareTransferRequest,
    ) -> Result<PreparedTransfer, TransferError>;

    /// Non-custodial reconciliation: append the durable record.
    async fn confirm_transfer(
        &self,
        ctx: &SessionContext,
        req: ConfirmTransferRequest,
    ) -> Result<ConfirmTransferResponse, TransferError>;
}

// ============================================================================
// HTTP Implementation
// ============================================================================

/// Backend client over HTTP with a bounded per-request timeout.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, TransferError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransferError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        path: &str,
        body: &B,
        during_resolution: bool,
    ) -> Result<T, TransferError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&ctx.auth_token)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport(&e, during_resolution))?;

        Self::read_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &SessionContext,
        path: &str,
    ) -> Result<T, TransferError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&ctx.auth_token)
            .send()
            .await
            .map_err(|e| classify_transport(&e, false))?;

        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransferError> {
        let http_status = response.status();
        if http_status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| TransferError::Unknown(format!("malformed backend response: {}", e)));
        }

        // Structured reason codes classify; anything else stays Unknown with
        // the HTTP status preserved
        match response.json::<ApiErrorBody>().await {
            Ok(body) => Err(classify_backend_reason(&body.code, &body.message)),
            Err(_) => Err(TransferError::Unknown(format!(
                "backend returned {}",
                http_status
            ))),
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn resolve_identifier(
        &self,
        ctx: &SessionContext,
        req: ResolveRequest,
    ) -> Result<ResolveResponse, TransferError> {
        self.post_json(ctx, "/v1/identifiers/resolve", &req, true)
            .await
    }

    async fn get_balances(&self, ctx: &SessionContext) -> Result<BalancesResponse, TransferError> {
        self.get_json(ctx, "/v1/balances").await
    }

    async fn execute_transfer(
        &self,
        ctx: &SessionContext,
        req: ExecuteTransferRequest,
    ) -> Result<ExecuteTransferResponse, TransferError> {
        self.post_json(ctx, "/v1/transfers/execute", &req, false)
            .await
    }

    async fn prepare_transfer(
        &self,
        ctx: &SessionContext,
        req: PrepareTransferRequest,
    ) -> Result<PreparedTransfer, TransferError> {
        self.post_json(ctx, "/v1/transfers/prepare", &req, false)
            .await
    }

    async fn confirm_transfer(
        &self,
        ctx: &SessionContext,
        req: ConfirmTransferRequest,
    ) -> Result<ConfirmTransferResponse, TransferError> {
        self.post_json(ctx, "/v1/transfers/confirm", &req, false)
            .await
    }
}

// ============================================================================
// Mock Implementation
// ============================================================================


#[cfg(test)]
pub use mock::MockBackend;
