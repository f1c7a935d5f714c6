//! Client keys and the credential store

pub mod key_pair;
pub mod key_store;

pub use key_pair::KeyPair;
pub use key_store::{InMemoryKeyStore, KeyStore};
