//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Signup, login, and logout against the local user store
//! - `checkout` - Checkout summary and simulated payment
//! - `quote` - Form-to-calculator glue for the three product lines

pub mod auth;
pub mod checkout;
pub mod quote;
