//! Connection and account handles on top of the NEAR client
//!
//! A [`Connection`] is opened once and shared read-only; [`Account`]
//! handles resolved from it issue view calls and signed function calls.

pub mod account;
pub mod connection;
mod errors;

pub use account::{Account, CallOutcome, DEFAULT_FUNCTION_CALL_GAS, FunctionCallOptions};
pub use connection::Connection;
