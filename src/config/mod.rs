//! Configuration management for the harness
//!
//! This module handles loading and validating the network, contract and
//! client settings.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{
    ClientSettings, ContractSettings, LoggingSettings, NetworkSettings, Settings,
    TransactionSettings,
};
