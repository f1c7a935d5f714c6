//! Account handle issuing view and function calls

use super::{Connection, errors};
use crate::types::AccountId;
use crate::{Error, Result};
use near_workspaces::types::{Gas, NearToken};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

/// Gas attached to a function call unless configured otherwise (30 TGas)
pub const DEFAULT_FUNCTION_CALL_GAS: u64 = 30_000_000_000_000;

/// Parameters of a signed contract call
#[derive(Debug, Clone)]
pub struct FunctionCallOptions {
    pub contract_id: AccountId,
    pub method_name: String,
    pub args: serde_json::Value,
    pub gas: u64,
    /// Attached deposit in yoctoNEAR
    pub deposit: u128,
}

impl FunctionCallOptions {
    /// Call `method_name` with empty JSON args, default gas, no deposit
    pub fn new(contract_id: AccountId, method_name: impl Into<String>) -> Self {
        Self {
            contract_id,
            method_name: method_name.into(),
            args: json!({}),
            gas: DEFAULT_FUNCTION_CALL_GAS,
            deposit: 0,
        }
    }

    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = args;
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    pub fn with_deposit(mut self, deposit: u128) -> Self {
        self.deposit = deposit;
        self
    }
}

/// Executed function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    pub transaction_hash: String,
    /// Logs of the transaction and every receipt, in execution order
    pub logs: Vec<String>,
    pub gas_burnt: u64,
    /// Raw bytes the method returned, empty for `()`
    pub return_value: Vec<u8>,
}

/// Resolved on-chain account bound to a [`Connection`]
#[derive(Debug, Clone)]
pub struct Account {
    account_id: AccountId,
    connection: Connection,
    balance: NearToken,
}

impl Account {
    pub(crate) fn new(account_id: AccountId, connection: Connection, balance: NearToken) -> Self {
        Self {
            account_id,
            connection,
            balance,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Balance as seen when the handle was resolved
    pub fn balance(&self) -> NearToken {
        self.balance
    }

    /// Call a read-only contract method and parse its JSON result.
    /// No signature is involved.
    pub async fn view_function<T: DeserializeOwned>(
        &self,
        contract_id: &AccountId,
        method_name: &str,
        args: &serde_json::Value,
    ) -> Result<T> {
        debug!("View {}::{}", contract_id, method_name);

        let query = self
            .connection
            .worker()
            .view(contract_id, method_name)
            .args_json(args.clone());
        let result = self
            .connection
            .within(method_name, query)
            .await?
            .map_err(|e| errors::view_failure(e, contract_id, method_name))?;

        for log in &result.logs {
            debug!("{}::{} log: {}", contract_id, method_name, log);
        }

        if result.result.is_empty() {
            Ok(serde_json::from_value(serde_json::Value::Null)?)
        } else {
            Ok(serde_json::from_slice(&result.result)?)
        }
    }

    /// Sign and submit a function call, returning once the network reports
    /// its final execution outcome.
    ///
    /// Fails with [`Error::MissingKey`] before any request if the key store
    /// has no key for this account on the connection's network.
    pub async fn function_call(&self, options: FunctionCallOptions) -> Result<CallOutcome> {
        let network_id = self.connection.network_id();
        let key_pair = self
            .connection
            .key_store()
            .get_key(network_id, self.account_id.as_str())
            .ok_or_else(|| Error::MissingKey {
                network_id: network_id.to_string(),
                account_id: self.account_id.to_string(),
            })?;
        let public_key = key_pair.public_key();

        let signer = near_workspaces::Account::from_secret_key(
            self.account_id.clone(),
            key_pair.to_signer_key()?,
            self.connection.worker(),
        );

        info!(
            "Submitting {}::{} as {} with key {}",
            options.contract_id, options.method_name, self.account_id, public_key
        );

        let transaction = signer
            .call(&options.contract_id, &options.method_name)
            .args_json(options.args.clone())
            .gas(Gas::from_gas(options.gas))
            .deposit(NearToken::from_yoctonear(options.deposit));

        let result = self
            .connection
            .within(&options.method_name, transaction.transact())
            .await?
            .map_err(|e| {
                errors::transact_failure(
                    e,
                    &self.account_id,
                    &public_key,
                    &options.contract_id,
                    &options.method_name,
                )
            })?;

        let transaction_hash = result.outcome().transaction_hash.to_string();
        let logs: Vec<String> = result.logs().into_iter().map(str::to_string).collect();
        let gas_burnt = result.total_gas_burnt.as_gas();

        for log in &logs {
            debug!("{}::{} log: {}", options.contract_id, options.method_name, log);
        }

        match result.into_result() {
            Ok(success) => {
                info!(
                    "Transaction {} executed (gas burnt {})",
                    transaction_hash, gas_burnt
                );
                Ok(CallOutcome {
                    transaction_hash,
                    logs,
                    gas_burnt,
                    return_value: success.raw_bytes().unwrap_or_default(),
                })
            }
            Err(failure) => Err(Error::contract(
                options.contract_id.as_str(),
                options.method_name.as_str(),
                format!("transaction {} failed: {:?}", transaction_hash, failure),
            )),
        }
    }
}
