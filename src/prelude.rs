//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartAction, CartLine, CartState,
        observer::{CartObserver, ObserverKey},
        reduce,
        store::CartStore,
    },
    catalog::{Catalog, CatalogError, Section},
    checkout::{CheckoutError, CheckoutSummary},
    pricing::{PricingError, discounted_price, total_price},
    products::{DiscountPercent, Product, ProductError, ProductId},
    session::{Session, SessionError},
};
