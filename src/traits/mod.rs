//! Trait seams between the exchange core and its callers.
//!
//! [`Account`] is the capability a caller presents to pools, the router
//! and the [`Exchange`](crate::exchange::Exchange) facade.

mod account;

pub use account::Account;
