//! Identifier Resolution
//!
//! Maps a human-readable handle to a canonical account address. Client-side
//! resolution is advisory: both execution paths re-resolve server-side at
//! their own trust boundary. A "does not exist" answer is definitive and is
//! not retried; transport failures are retryable by the caller only, never
//! automatically. Results are consumed once and never cached, since handles
//! may be rebound between requests.

use tracing::debug;

use crate::address;
use crate::session::SessionContext;

use super::backend::{BackendApi, ResolveRequest};
use super::error::TransferError;
use super::types::ResolvedRecipient;

/// Marker prefix denoting "this is a handle, not a raw address".
pub const HANDLE_MARKER: char = '@';

/// Resolve a recipient handle. Idempotent and side-effect-free.
pub async fn resolve_recipient(
    backend: &dyn BackendApi,
    ctx: &SessionContext,
    recipient: &str,
) -> Result<ResolvedRecipient, TransferError> {
    let trimmed = recipient.trim();
    let handle = trimmed.strip_prefix(HANDLE_MARKER).unwrap_or(trimmed);
    if handle.is_empty() {
        return Err(TransferError::RecipientNotFound("empty handle".to_string()));
    }

    let response = backend
        .resolve_identifier(
            ctx,
            ResolveRequest {
                handle: handle.to_string(),
            },
        )
        .await?;

    if !response.exists {
        return Err(TransferError::RecipientNotFound(handle.to_string()));
    }

    let raw = response.address.ok_or_else(|| {
        TransferError::Unknown(format!(
            "resolver returned no address for existing handle {}",
            handle
        ))
    })?;
    let canonical = address::canonicalize(&raw)?;
    debug!(handle, address = %canonical, "recipient resolved");

    Ok(ResolvedRecipient {
        handle: handle.to_string(),
        address: canonical,
        exists: true,
    })
}
