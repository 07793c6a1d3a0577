use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    pub backend: BackendConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Bounded timeout for backend round-trips; expiry surfaces as a timeout
    /// error. The external signer interaction is never subject to this.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferConfig {
    /// Upper bound for a single transfer, in minor units of the asset.
    pub max_amount_minor: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_amount_minor: 1_000_000_000_000_000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReconcileConfig {
    /// Delay between background reconciliation retries.
    pub retry_interval_secs: u64,
    /// Retries before the reconciliation is abandoned (loudly).
    pub max_attempts: u32,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            retry_interval_secs: 30,
            max_attempts: 20,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
