//! # End-to-end harness
//!
//! Runs the contract checks against a live (or mocked) node.
//!
//! ## Flow
//!
//! 1. [`TestContext::setup`] parses the client key, fills an in-memory key
//!    store, connects to the node and resolves the client account. Failure
//!    here ends the run.
//! 2. [`Suite::run`] executes each [`TestCase`] in order against the
//!    shared context and collects a [`Report`].
//!
//! ## Cases
//!
//! - [`OwnershipCheck`]: `get_owner` equals the contract id. Idempotent.
//! - [`StateTransitionCheck`]: `direction` is `South`, `turn_right`, then
//!   `direction` is `West`. Mutates the contract and is not repeatable
//!   against the same deployment without an external reset.
//!
//! ## Example
//!
//! ```rust,no_run
//! use robot_e2e::{ConfigLoader, Suite, TestContext};
//!
//! # tokio_test::block_on(async {
//! let settings = ConfigLoader::new().from_env_only()?;
//! let ctx = TestContext::setup(&settings).await?;
//! let report = Suite::default().run(&ctx).await;
//! println!("{}", report.render_text());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

pub mod cases;
pub mod context;
pub mod runner;

pub use cases::{OwnershipCheck, StateTransitionCheck, TestCase};
pub use context::TestContext;
pub use runner::{CaseOutcome, CaseReport, Report, Suite};
