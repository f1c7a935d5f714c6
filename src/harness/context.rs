//! Shared state for a test run
//!
//! Built once by [`TestContext::setup`] and handed to every case by
//! reference. Nothing in here changes after setup.

use crate::config::Settings;
use crate::crypto::{InMemoryKeyStore, KeyPair, KeyStore};
use crate::near::{Account, CallOutcome, Connection, DEFAULT_FUNCTION_CALL_GAS, FunctionCallOptions};
use crate::types::AccountId;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Resolved client account plus the contract under test
#[derive(Debug, Clone)]
pub struct TestContext {
    account: Account,
    contract_id: AccountId,
    gas: u64,
    deposit: u128,
}

impl TestContext {
    /// Key pair → in-memory key store → connection → account handle.
    ///
    /// Any failure here aborts the whole run.
    pub async fn setup(settings: &Settings) -> Result<Self> {
        let contract_id = settings.contract_id()?;
        let client_id = settings.client_id()?;
        let key_pair = KeyPair::from_string(settings.client_private_key()?)?;
        key_pair.to_signer_key()?;

        info!(
            "Setting up {} on {} with key {}",
            client_id,
            settings.network.network_id,
            key_pair.public_key()
        );

        let key_store = Arc::new(InMemoryKeyStore::new());
        key_store.set_key(&settings.network.network_id, client_id.as_str(), key_pair);

        let connection = Connection::connect(&settings.network, key_store).await?;
        let account = connection.account(client_id).await?;

        Ok(Self::new(account, contract_id)
            .with_call_defaults(settings.transaction.gas, settings.deposit()?))
    }

    /// Context around an already resolved account
    pub fn new(account: Account, contract_id: AccountId) -> Self {
        Self {
            account,
            contract_id,
            gas: DEFAULT_FUNCTION_CALL_GAS,
            deposit: 0,
        }
    }

    /// Gas and deposit attached by [`TestContext::call`]
    pub fn with_call_defaults(mut self, gas: u64, deposit: u128) -> Self {
        self.gas = gas;
        self.deposit = deposit;
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    /// View `method_name` on the contract under test with empty args
    pub async fn view<T: DeserializeOwned>(&self, method_name: &str) -> Result<T> {
        self.account
            .view_function(&self.contract_id, method_name, &json!({}))
            .await
    }

    /// Signed call of `method_name` on the contract under test with empty
    /// args, awaited until its outcome is final
    pub async fn call(&self, method_name: &str) -> Result<CallOutcome> {
        let options = FunctionCallOptions::new(self.contract_id.clone(), method_name)
            .with_gas(self.gas)
            .with_deposit(self.deposit);
        self.account.function_call(options).await
    }
}
