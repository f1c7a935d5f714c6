//! The contract checks
//!
//! Case names match the labels the suite has always reported
//! (`test owner_id`, `test turn right`).

use super::TestContext;
use crate::types::Direction;
use crate::{Error, Result};
use tracing::info;

pub const GET_OWNER: &str = "get_owner";
pub const DIRECTION: &str = "direction";
pub const TURN_RIGHT: &str = "turn_right";

/// One named check run against a [`TestContext`]
#[async_trait::async_trait]
pub trait TestCase: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, ctx: &TestContext) -> Result<()>;
}

/// Exact string comparison, no normalization
fn expect_eq(case: &str, expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::assertion(
            case,
            format!("{:?}", expected),
            format!("{:?}", actual),
        ))
    }
}

/// `get_owner` must return the contract's own account id. Read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipCheck;

#[async_trait::async_trait]
impl TestCase for OwnershipCheck {
    fn name(&self) -> &str {
        "test owner_id"
    }

    async fn run(&self, ctx: &TestContext) -> Result<()> {
        let owner: String = ctx.view(GET_OWNER).await?;
        info!("{} returned {}", GET_OWNER, owner);
        expect_eq(self.name(), ctx.contract_id().as_str(), &owner)
    }
}

/// `direction` reads `initial`, one `turn_right`, then `direction` reads
/// `initial.turned_right()`.
///
/// Mutates the contract: a second run against the same deployment starts
/// from a different heading and fails its first assertion.
#[derive(Debug, Clone, Copy)]
pub struct StateTransitionCheck {
    initial: Direction,
}

impl StateTransitionCheck {
    pub fn new(initial: Direction) -> Self {
        Self { initial }
    }

    pub fn initial(&self) -> Direction {
        self.initial
    }

    pub fn expected_after(&self) -> Direction {
        self.initial.turned_right()
    }
}

impl Default for StateTransitionCheck {
    fn default() -> Self {
        Self::new(Direction::South)
    }
}

#[async_trait::async_trait]
impl TestCase for StateTransitionCheck {
    fn name(&self) -> &str {
        "test turn right"
    }

    async fn run(&self, ctx: &TestContext) -> Result<()> {
        let before: String = ctx.view(DIRECTION).await?;
        expect_eq(self.name(), self.initial.as_str(), &before)?;

        // Returns only once the final outcome is known, so the next view
        // observes it.
        let outcome = ctx.call(TURN_RIGHT).await?;
        info!("{} executed in tx {}", TURN_RIGHT, outcome.transaction_hash);

        let after: String = ctx.view(DIRECTION).await?;
        expect_eq(self.name(), self.expected_after().as_str(), &after)
    }
}
