//! External Wallet Signer Port
//!
//! The non-custodial path delegates signing and submission to a wallet the
//! client does not control. The capability may or may not exist at runtime
//! (it is injected by the host environment), so executors hold an
//! `Option<Arc<dyn WalletSigner>>`: absence is a first-class failure at the
//! point of use, never a null check scattered through the pipeline.

use async_trait::async_trait;
use thiserror::Error;

use super::types::SigningPayload;

/// Errors the wallet capability reports
#[derive(Debug, Error, Clone)]
pub enum SignerError {
    /// The user dismissed or rejected the signing prompt
    #[error("user rejected the signing request")]
    Rejected,

    #[error("insufficient balance in wallet: {0}")]
    InsufficientBalance(String),

    #[error("insufficient gas allowance: {0}")]
    InsufficientGas(String),

    /// Anything else the signer reports; the message is preserved verbatim
    #[error("{0}")]
    Fault(String),
}

/// Result of a successful sign-and-submit round-trip.
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    pub hash: String,
}

/// Sign-and-submit capability of an external wallet.
///
/// `sign_and_submit` blocks on user interaction with unbounded wait time.
/// Callers must not impose a pipeline-level timeout; any timeout there is a
/// presentation concern.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Wallet name for logging
    fn name(&self) -> &'static str;

    /// Have the wallet sign the payload and submit it to the network.
    async fn sign_and_submit(
        &self,
        payload: &SigningPayload,
    ) -> Result<SubmittedTransaction, SignerError>;
}

/// Mock signer for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct MockSigner {
        /// Next call's behavior
        behavior: Mutex<Result<String, SignerError>>,
        calls: AtomicUsize,
        /// Last payload received, for verification
        pub last_payload: Mutex<Option<SigningPayload>>,
    }

    impl MockSigner {
        pub fn returning_hash(hash: &str) -> Self {
            Self {
                behavior: Mutex::new(Ok(hash.to_string())),
                calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
            }
        }

        pub fn rejecting() -> Self {
            Self {
                behavior: Mutex::new(Err(SignerError::Rejected)),
                calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
            }
        }

        pub fn failing(error: SignerError) -> Self {
            Self {
                behavior: Mutex::new(Err(error)),
                calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WalletSigner for MockSigner {
        fn name(&self) -> &'static str {
            "mock-wallet"
        }

        async fn sign_and_submit(
            &self,
            payload: &SigningPayload,
        ) -> Result<SubmittedTransaction, SignerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());

            self.behavior
                .lock()
                .unwrap()
                .clone()
                .map(|hash| SubmittedTransaction { hash })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn mock_signer_records_payload() {
            let signer = MockSigner::returning_hash("0xfeed");
            let payload = SigningPayload {
                function: "0x1::coin::transfer".into(),
                type_arguments: vec!["0x1::aptos_coin::AptosCoin".into()],
                arguments: vec!["0x1".into(), "42".into()],
            };

            let tx = signer.sign_and_submit(&payload).await.unwrap();
            assert_eq!(tx.hash, "0xfeed");
            assert_eq!(signer.call_count(), 1);
            assert_eq!(
                signer.last_payload.lock().unwrap().as_ref().unwrap(),
                &payload
            );
        }

        #[tokio::test]
        async fn mock_signer_rejects() {
            let signer = MockSigner::rejecting();
            let payload = SigningPayload {
                function: "0x1::coin::transfer".into(),
                type_arguments: vec![],
                arguments: vec![],
            };

            let err = signer.sign_and_submit(&payload).await.unwrap_err();
            assert!(matches!(err, SignerError::Rejected));
        }
    }
}

#[cfg(test)]
pub use mock::MockSigner;
