//! Type definitions shared across the crate
//!
//! Account identifiers come from the NEAR client so validation follows the
//! chain's own naming rules. [`Direction`] is the robot's heading.

pub mod direction;

pub use direction::Direction;
pub use near_workspaces::types::AccountId;
