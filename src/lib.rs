//! Storefront
//!
//! Storefront is the core of a small e-commerce front end: a fixed product catalog, a
//! session-scoped shopping cart and a checkout summary.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
