//! Session Context and Single-Flight Gate
//!
//! The pipeline never reads ambient storage: the current user and their
//! bearer token are passed explicitly into every backend call. The session
//! layer also owns the "transfer in progress" flag; the external signer
//! exposes no isolation between concurrent calls, so exactly one transfer
//! may be between signer hand-off and terminal state at a time.

use std::sync::atomic::{AtomicBool, Ordering};

/// Identity and credentials scoping a backend call.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: u64,
    pub auth_token: String,
}

impl SessionContext {
    pub fn new(user_id: u64, auth_token: impl Into<String>) -> Self {
        Self {
            user_id,
            auth_token: auth_token.into(),
        }
    }
}

/// Serializes transfers within one session.
///
/// `try_begin` hands out at most one [`InFlightGuard`]; the flag clears when
/// the guard drops, so a panic or early return cannot wedge the session.
#[derive(Debug, Default)]
pub struct TransferGate {
    in_flight: AtomicBool,
}

impl TransferGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a transfer is already in flight.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| InFlightGuard { gate: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII claim on the gate; releases on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    gate: &'a TransferGate,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}
