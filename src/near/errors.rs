//! Classification of NEAR client failures
//!
//! The client reports most node-side problems as one error type with the
//! node's cause in the message chain. The harness needs them apart, so the
//! chain text is matched against the names and messages nodes send.

use crate::Error;
use crate::error::error_chain;
use near_workspaces::types::AccountId;

const UNKNOWN_ACCOUNT: &[&str] = &["UNKNOWN_ACCOUNT", "UnknownAccount", "does not exist"];

const UNKNOWN_ACCESS_KEY: &[&str] = &[
    "UNKNOWN_ACCESS_KEY",
    "UnknownAccessKey",
    "access key",
    "AccessKeyNotFound",
];

const CONTRACT_FAILURE: &[&str] = &[
    "CONTRACT_EXECUTION_ERROR",
    "ContractExecutionError",
    "Function call returned an error",
    "wasm execution failed",
    "Smart contract panicked",
    "MethodNotFound",
    "NO_CONTRACT_CODE",
    "has never been observed",
];

fn mentions(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn mentions_timeout(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.contains("timeout") || lower.contains("timed out")
}

/// `view_account` failed while resolving `account_id`
pub(crate) fn account_lookup(
    err: near_workspaces::error::Error,
    account_id: &AccountId,
    network_id: &str,
) -> Error {
    let text = error_chain(&err);
    if mentions(&text, UNKNOWN_ACCOUNT) {
        Error::UnknownAccount {
            account_id: account_id.to_string(),
            network_id: network_id.to_string(),
        }
    } else if mentions_timeout(&text) {
        Error::timeout(format!("view_account {}", account_id))
    } else {
        Error::Near(err)
    }
}

/// A view call on `contract_id` failed
pub(crate) fn view_failure(
    err: near_workspaces::error::Error,
    contract_id: &AccountId,
    method_name: &str,
) -> Error {
    let text = error_chain(&err);
    if mentions_timeout(&text) {
        Error::timeout(format!("view {}::{}", contract_id, method_name))
    } else if mentions(&text, CONTRACT_FAILURE) {
        Error::contract(contract_id.as_str(), method_name, text)
    } else {
        Error::Near(err)
    }
}

/// Submitting a signed call failed before an outcome came back
pub(crate) fn transact_failure(
    err: near_workspaces::error::Error,
    signer_id: &AccountId,
    public_key: &str,
    contract_id: &AccountId,
    method_name: &str,
) -> Error {
    let text = error_chain(&err);
    if mentions_timeout(&text) {
        Error::timeout(format!("call {}::{}", contract_id, method_name))
    } else if mentions(&text, UNKNOWN_ACCESS_KEY) {
        Error::AccessKeyNotFound {
            account_id: signer_id.to_string(),
            public_key: public_key.to_string(),
        }
    } else {
        Error::Near(err)
    }
}
