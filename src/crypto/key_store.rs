//! Credential storage keyed by (network id, account id)

use super::KeyPair;
use std::collections::HashMap;
use std::sync::RwLock;

/// Source of signing keys for a connection
pub trait KeyStore: Send + Sync + std::fmt::Debug {
    /// Store `key_pair` for `account_id` on `network_id`, replacing any previous key
    fn set_key(&self, network_id: &str, account_id: &str, key_pair: KeyPair);

    /// Look up the key for `account_id` on `network_id`
    fn get_key(&self, network_id: &str, account_id: &str) -> Option<KeyPair>;

    /// Drop the key for `account_id` on `network_id`
    fn remove_key(&self, network_id: &str, account_id: &str) -> Option<KeyPair>;

    /// Forget every key
    fn clear(&self);

    /// Accounts that have a key on `network_id`, sorted
    fn accounts(&self, network_id: &str) -> Vec<String>;
}

/// Process-local key store; nothing is written to disk
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<(String, String), KeyPair>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn set_key(&self, network_id: &str, account_id: &str, key_pair: KeyPair) {
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.insert((network_id.to_string(), account_id.to_string()), key_pair);
    }

    fn get_key(&self, network_id: &str, account_id: &str) -> Option<KeyPair> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        keys.get(&(network_id.to_string(), account_id.to_string()))
            .cloned()
    }

    fn remove_key(&self, network_id: &str, account_id: &str) -> Option<KeyPair> {
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.remove(&(network_id.to_string(), account_id.to_string()))
    }

    fn clear(&self) {
        self.keys
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn accounts(&self, network_id: &str) -> Vec<String> {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        let mut accounts: Vec<String> = keys
            .keys()
            .filter(|(network, _)| network == network_id)
            .map(|(_, account)| account.clone())
            .collect();
        accounts.sort();
        accounts
    }
}
