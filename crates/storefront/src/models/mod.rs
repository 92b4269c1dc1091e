//! Domain models for the storefront.
//!
//! Catalog, quote, and invoice types live in `insura-core`; these are the
//! storefront-only records kept in the local store and the visitor session.

pub mod session;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
