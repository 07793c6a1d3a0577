//! handlepay - dual-path transfer pipeline for handle-addressed payments
//!
//! Moves value to a user addressed by a human-readable handle instead of a
//! raw account identifier, over either a custodial backend or an external
//! wallet the user controls.
//!
//! # Modules
//!
//! - [`money`] - decimal string <-> minor-unit conversion
//! - [`address`] - canonical fixed-width account addresses
//! - [`asset`] - fixed registry of transferable assets
//! - [`session`] - explicit session context and the single-flight gate
//! - [`transfer`] - resolution, path selection, executors, reconciliation
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod address;
pub mod asset;
pub mod config;
pub mod logging;
pub mod money;
pub mod session;
pub mod transfer;

// Convenient re-exports at crate root
pub use asset::AssetSpec;
pub use config::AppConfig;
pub use session::{SessionContext, TransferGate};
pub use transfer::{
    AccountProfile, BackendApi, HttpBackend, OutcomeStatus, PipelineState, SignerError,
    SigningPayload, TransferError, TransferOutcome, TransferPath, TransferRequest,
    TransferService, WalletSigner,
};
