//! Environment domain types
//!
//! An environment is a named set of string variables. At most one
//! environment is active at a time; the active one feeds the variable
//! resolver.

mod set;
mod variables;

pub use set::EnvironmentSet;
pub use variables::{Environment, EnvironmentPatch};
