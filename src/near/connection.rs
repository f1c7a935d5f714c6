//! Connection to a NEAR network
//!
//! Bundles the NEAR client worker, the key store and the network id so
//! account handles can sign for the right (network, account) pair.

use super::{Account, errors};
use crate::config::settings::NetworkSettings;
use crate::crypto::KeyStore;
use crate::types::AccountId;
use crate::{Error, Result};
use near_workspaces::Worker;
use near_workspaces::network::Testnet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Shared, read-only handle to a node plus credentials
#[derive(Clone)]
pub struct Connection {
    network_id: String,
    worker: Worker<Testnet>,
    key_store: Arc<dyn KeyStore>,
    request_timeout: Duration,
}

impl Connection {
    /// Open a connection to the configured node and wait until it answers
    /// a status request.
    ///
    /// The client is always built with testnet parameters; `node_url`
    /// decides which node it talks to and `network_id` only namespaces the
    /// key store.
    pub async fn connect(settings: &NetworkSettings, key_store: Arc<dyn KeyStore>) -> Result<Self> {
        let request_timeout = Duration::from_secs(settings.request_timeout);
        info!("Connecting to {} ({})", settings.node_url, settings.network_id);

        let worker = within(
            request_timeout,
            "connect",
            near_workspaces::testnet().rpc_addr(&settings.node_url),
        )
        .await??;
        debug!("Node at {} is answering", settings.node_url);

        Ok(Self {
            network_id: settings.network_id.clone(),
            worker,
            key_store,
            request_timeout,
        })
    }

    /// Resolve an account handle, checking the account exists on chain
    pub async fn account(&self, account_id: AccountId) -> Result<Account> {
        let details = self
            .within("view_account", self.worker.view_account(&account_id))
            .await?
            .map_err(|e| errors::account_lookup(e, &account_id, &self.network_id))?;

        debug!(
            "Resolved account {} (balance {}, storage {} bytes)",
            account_id, details.balance, details.storage_usage
        );

        Ok(Account::new(account_id, self.clone(), details.balance))
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn worker(&self) -> &Worker<Testnet> {
        &self.worker
    }

    pub fn key_store(&self) -> &Arc<dyn KeyStore> {
        &self.key_store
    }

    /// Upper bound for a single client operation
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Run `operation` under the request timeout
    pub(crate) async fn within<F: IntoFuture>(&self, operation: &str, future: F) -> Result<F::Output> {
        within(self.request_timeout, operation, future).await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("network_id", &self.network_id)
            .field("key_store", &self.key_store)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

async fn within<F: IntoFuture>(limit: Duration, operation: &str, future: F) -> Result<F::Output> {
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| Error::timeout(operation))
}
