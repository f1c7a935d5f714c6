//! Error types for the harness
//!
//! One error enum covers the whole run: configuration problems, key
//! parsing, the NEAR client, contract failures and assertion mismatches.

use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// Errors from the NEAR client that no narrower variant covers
    #[error("NEAR client error: {0}")]
    Near(#[from] near_workspaces::error::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Malformed private or public key material
    #[error("Invalid key: {message}")]
    KeyFormat {
        /// What was wrong with the key string
        message: String,
    },

    /// Account identifier does not follow NEAR naming rules
    #[error("Invalid account id '{account_id}': {reason}")]
    InvalidAccountId {
        /// The rejected identifier
        account_id: String,
        /// Which rule it broke
        reason: String,
    },

    /// The node does not know the requested account
    #[error("Account {account_id} does not exist on {network_id}")]
    UnknownAccount {
        /// Account that was looked up
        account_id: String,
        /// Network the connection points to
        network_id: String,
    },

    /// The account has no access key matching our public key
    #[error("Access key {public_key} not found for {account_id}")]
    AccessKeyNotFound {
        /// Account that was queried
        account_id: String,
        /// Public key in `ed25519:<base58>` form
        public_key: String,
    },

    /// The key store has no key for the signer
    #[error("No key for {account_id} on network {network_id} in key store")]
    MissingKey {
        /// Network id the lookup used
        network_id: String,
        /// Account id the lookup used
        account_id: String,
    },

    /// A contract method panicked or the transaction failed
    #[error("Contract call {contract_id}::{method} failed: {message}")]
    Contract {
        /// Contract account
        contract_id: String,
        /// Invoked method name
        method: String,
        /// Failure description from the node
        message: String,
    },

    /// Timeout errors
    #[error("Operation timed out: {operation}")]
    Timeout {
        /// The operation that timed out
        operation: String,
    },

    /// Observed value differs from the expected one
    #[error("Assertion failed in '{case}': expected {expected}, got {actual}")]
    Assertion {
        /// Test case that asserted
        case: String,
        /// Expected value, rendered
        expected: String,
        /// Actual value, rendered
        actual: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a key format error
    pub fn key_format(message: impl Into<String>) -> Self {
        Self::KeyFormat {
            message: message.into(),
        }
    }

    /// Create an invalid account id error
    pub fn invalid_account_id(account_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAccountId {
            account_id: account_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a contract failure error
    pub fn contract(
        contract_id: impl Into<String>,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Contract {
            contract_id: contract_id.into(),
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create an assertion error
    pub fn assertion(
        case: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::Assertion {
            case: case.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure came from the network rather than from the
    /// contract or the harness. Only used for reporting; nothing retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Timeout { .. } | Error::Near(..))
    }

    /// Get error category for logging and reports
    pub fn category(&self) -> &'static str {
        match self {
            Error::Near(..) => "rpc",
            Error::Json(..) => "json",
            Error::Toml(..) => "config",
            Error::Url(..) => "config",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::KeyFormat { .. } => "key",
            Error::InvalidAccountId { .. } => "config",
            Error::UnknownAccount { .. } => "account",
            Error::AccessKeyNotFound { .. } => "auth",
            Error::MissingKey { .. } => "auth",
            Error::Contract { .. } => "contract",
            Error::Timeout { .. } => "timeout",
            Error::Assertion { .. } => "assertion",
            Error::Internal { .. } => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("contract_name", "missing");
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error in contract_name: missing");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
        assert_eq!(err.category(), "json");
    }

    #[test]
    fn test_assertion_error() {
        let err = Error::assertion("test turn right", "\"South\"", "\"North\"");
        assert_eq!(
            err.to_string(),
            "Assertion failed in 'test turn right': expected \"South\", got \"North\""
        );
        assert_eq!(err.category(), "assertion");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_contract_error() {
        let err = Error::contract("robot.testnet", "turn_right", "Smart contract panicked");
        assert!(err.to_string().contains("robot.testnet::turn_right"));
        assert_eq!(err.category(), "contract");
    }

    #[test]
    fn test_timeout_is_transient() {
        let err = Error::timeout("call robot.testnet::turn_right");
        assert!(err.is_transient());
        assert_eq!(err.category(), "timeout");
    }

    #[test]
    fn test_missing_key_message() {
        let err = Error::MissingKey {
            network_id: "testnet".to_string(),
            account_id: "bob.testnet".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No key for bob.testnet on network testnet in key store"
        );
        assert_eq!(err.category(), "auth");
    }
}
