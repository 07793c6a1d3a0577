//! Dual-Path Transfer Pipeline
//!
//! Moves value to a recipient addressed by a human-readable handle, over one
//! of two trust models:
//! - **Custodial**: the backend holds the signing key and executes the
//!   transfer in a single call.
//! - **Non-custodial**: a browser-injected wallet signs under direct user
//!   control; the backend prepares the transfer and reconciles it afterwards.
//!
//! # Non-Custodial State Machine
//!
//! ```text
//! PREPARING → AWAITING_SIGNATURE → SUBMITTING → RECONCILING → CONFIRMED
//!     ↓               ↓ (reject)                      ↓ (append fails)
//!  FAILED          CANCELLED                  CONFIRMED (history lagging)
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Single flight**: one transfer per session between signer hand-off
//!    and terminal state; the session gate refuses a second.
//! 2. **No record on cancel**: user rejection at the signer prompt leaves no
//!    durable record and never calls the reconciliation endpoint.
//! 3. **Confirmed is final**: once the signer returns a hash, bookkeeping
//!    failures are retried in the background and never downgrade the outcome.
//! 4. **Classify at the boundary**: HTTP, signer, and validation failures map
//!    to one closed taxonomy before anything downstream sees them.

pub mod backend;
pub mod custodial;
pub mod error;
pub mod noncustodial;
pub mod path;
pub mod reconciler;
pub mod resolver;
pub mod service;
pub mod signer;
pub mod state;
pub mod types;


// Re-exports for convenience
pub use backend::{BackendApi, HttpBackend};
pub use custodial::CustodialExecutor;
pub use error::TransferError;
pub use noncustodial::NonCustodialExecutor;
pub use path::{AccountProfile, select_path};
pub use reconciler::ConfirmationReconciler;
pub use resolver::{HANDLE_MARKER, resolve_recipient};
pub use service::TransferService;
pub use signer::{SignerError, SubmittedTransaction, WalletSigner};
pub use state::PipelineState;
pub use types::{
    OutcomeStatus, ResolvedRecipient, SigningPayload, TransferOutcome, TransferPath,
    TransferRequest,
};
