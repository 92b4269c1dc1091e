//! Insura Core - Shared domain library.
//!
//! This crate provides the domain model used across all Insura components:
//! - `storefront` - The web storefront (catalog, quotes, checkout, history)
//! - `cli` - Command-line tools for seeding and inspecting the local store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage,
//! no HTTP. Anything that needs the current time takes it as an argument so
//! the calculators stay deterministic under test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, IDs, rupiah amounts, and statuses
//! - [`catalog`] - The static product catalog
//! - [`quote`] - Premium calculators for car, health, and life products
//! - [`purchase`] - Purchase drafts, checkout summaries, and invoice records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod purchase;
pub mod quote;
pub mod types;

pub use catalog::Product;
pub use types::*;
