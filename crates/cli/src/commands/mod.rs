//! CLI command implementations.

pub mod quote;
pub mod store;
