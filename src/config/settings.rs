//! Harness configuration
//!
//! Settings are assembled from defaults, an optional TOML file and
//! environment variables. The defaults point at NEAR testnet; the contract
//! and client account have no defaults and must be supplied.

use crate::near::DEFAULT_FUNCTION_CALL_GAS;
use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

// Helper functions for serde defaults
fn default_network_id() -> String {
    "testnet".to_string()
}

fn default_node_url() -> String {
    "https://rpc.testnet.near.org".to_string()
}

fn default_wallet_url() -> String {
    "https://wallet.testnet.near.org".to_string()
}

fn default_helper_url() -> String {
    "https://helper.testnet.near.org".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_gas() -> u64 {
    DEFAULT_FUNCTION_CALL_GAS
}

fn default_deposit() -> String {
    "0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Network and RPC configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Contract under test
    #[serde(default)]
    pub contract: ContractSettings,
    /// Signing client account
    #[serde(default)]
    pub client: ClientSettings,
    /// Function-call defaults
    #[serde(default)]
    pub transaction: TransactionSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Network endpoints and RPC behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Network identifier, also the key store namespace
    #[serde(default = "default_network_id")]
    pub network_id: String,
    /// JSON-RPC endpoint
    #[serde(default = "default_node_url")]
    pub node_url: String,
    /// Wallet URL (informational)
    #[serde(default = "default_wallet_url")]
    pub wallet_url: String,
    /// Helper URL (informational)
    #[serde(default = "default_helper_url")]
    pub helper_url: String,
    /// Upper bound in seconds for connecting and for each client call
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// The deployed contract the cases target
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractSettings {
    /// Contract account id (CONTRACT_NAME)
    #[serde(default)]
    pub contract_name: Option<String>,
}

/// Credentials of the account that signs function calls
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ClientSettings {
    /// Client account id (CLIENT_ID)
    #[serde(default)]
    pub account_id: Option<String>,
    /// Secret key, `ed25519:<base58>` (CLIENT_PRIVATE_KEY)
    #[serde(default)]
    pub private_key: Option<String>,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("account_id", &self.account_id)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Defaults for signed calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSettings {
    /// Gas attached to function calls
    #[serde(default = "default_gas")]
    pub gas: u64,
    /// Deposit in yoctoNEAR, as a decimal string (TOML has no u128)
    #[serde(default = "default_deposit")]
    pub deposit: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            network_id: default_network_id(),
            node_url: default_node_url(),
            wallet_url: default_wallet_url(),
            helper_url: default_helper_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            gas: default_gas(),
            deposit: default_deposit(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of the defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Apply environment variable overrides. Only variables that are set
    /// replace the current value.
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(network_id) = std::env::var("NEAR_NETWORK_ID") {
            self.network.network_id = network_id;
        }
        if let Ok(node_url) = std::env::var("NEAR_NODE_URL") {
            self.network.node_url = node_url;
        }
        if let Ok(wallet_url) = std::env::var("NEAR_WALLET_URL") {
            self.network.wallet_url = wallet_url;
        }
        if let Ok(helper_url) = std::env::var("NEAR_HELPER_URL") {
            self.network.helper_url = helper_url;
        }
        if let Ok(timeout) = std::env::var("NEAR_RPC_TIMEOUT") {
            self.network.request_timeout = timeout.parse().map_err(|e| {
                crate::Error::config("NEAR_RPC_TIMEOUT", format!("Invalid timeout: {}", e))
            })?;
        }

        if let Ok(contract_name) = std::env::var("CONTRACT_NAME") {
            self.contract.contract_name = Some(contract_name);
        }

        if let Ok(client_id) = std::env::var("CLIENT_ID") {
            self.client.account_id = Some(client_id);
        }
        if let Ok(private_key) = std::env::var("CLIENT_PRIVATE_KEY") {
            self.client.private_key = Some(private_key);
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Contract account id, validated
    pub fn contract_id(&self) -> crate::Result<AccountId> {
        let name = self.contract.contract_name.as_deref().ok_or_else(|| {
            crate::Error::config("contract_name", "CONTRACT_NAME is not set")
        })?;
        parse_account_id(name)
    }

    /// Client account id, validated
    pub fn client_id(&self) -> crate::Result<AccountId> {
        let id = self
            .client
            .account_id
            .as_deref()
            .ok_or_else(|| crate::Error::config("client.account_id", "CLIENT_ID is not set"))?;
        parse_account_id(id)
    }

    /// Client secret key string
    pub fn client_private_key(&self) -> crate::Result<&str> {
        self.client.private_key.as_deref().ok_or_else(|| {
            crate::Error::config("client.private_key", "CLIENT_PRIVATE_KEY is not set")
        })
    }

    /// Deposit in yoctoNEAR
    pub fn deposit(&self) -> crate::Result<u128> {
        self.transaction.deposit.parse().map_err(|e| {
            crate::Error::config(
                "transaction.deposit",
                format!("Invalid deposit '{}': {}", self.transaction.deposit, e),
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.network.network_id.is_empty() {
            return Err(crate::Error::config("network_id", "Network id cannot be empty"));
        }

        for (name, value) in [
            ("node_url", &self.network.node_url),
            ("wallet_url", &self.network.wallet_url),
            ("helper_url", &self.network.helper_url),
        ] {
            if let Err(e) = url::Url::parse(value) {
                return Err(crate::Error::config(
                    name,
                    format!("Invalid URL '{}': {}", value, e),
                ));
            }
        }

        if self.network.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        self.contract_id()?;
        self.client_id()?;
        self.client_private_key()?;
        self.deposit()?;

        if self.transaction.gas == 0 {
            return Err(crate::Error::config("transaction.gas", "Gas cannot be 0"));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(crate::Error::config(
                "log_format",
                format!("Invalid log format: {}", other),
            )),
        }
    }
}

fn parse_account_id(id: &str) -> crate::Result<AccountId> {
    id.parse::<AccountId>()
        .map_err(|e| crate::Error::invalid_account_id(id, e.to_string()))
}
