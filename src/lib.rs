//! robot-e2e
//!
//! End-to-end checks for the robot simulator contract deployed on NEAR
//! testnet. The harness signs in as a client account, calls the contract
//! through the `near-workspaces` client and asserts the results.
//!
//! # Features
//!
//! - **Any RPC node**: the client is pointed at the configured endpoint, so
//!   testnet, a localnet or a mocked node all work
//! - **Suite runner**: sequential cases with a text or JSON report and a
//!   non-zero exit code on failure
//! - **Ad-hoc calls**: `view` and `call` subcommands for poking the contract
//!
//! # Usage
//!
//! ```bash
//! CONTRACT_NAME=robot.alice.testnet \
//! CLIENT_ID=alice.testnet \
//! CLIENT_PRIVATE_KEY=ed25519:... \
//! robot-e2e
//! ```
//!
//! # Examples
//!
//! ```rust
//! use robot_e2e::{Direction, Suite};
//!
//! let suite = Suite::default();
//! assert_eq!(suite.names(), vec!["test owner_id", "test turn right"]);
//! assert_eq!(Direction::South.turned_right(), Direction::West);
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod harness;
pub mod near;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Settings};
pub use crypto::{InMemoryKeyStore, KeyPair, KeyStore};
pub use error::{Error, Result};
pub use harness::{Report, Suite, TestContext};
pub use near::{Account, CallOutcome, Connection, FunctionCallOptions};
pub use types::{AccountId, Direction};
