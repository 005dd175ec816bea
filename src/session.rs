//! Session
//!
//! A shopping session pairs the catalog with the cart store it feeds. Catalog lookups,
//! discounting and validation happen here, so the cart itself only ever sees well-formed,
//! already-priced products.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{
        CartState,
        observer::{CartObserver, ObserverKey},
        store::CartStore,
    },
    catalog::Catalog,
    checkout::{CheckoutError, CheckoutSummary},
    pricing::PricingError,
    products::{Product, ProductError},
};

/// Errors raised while handling a shopper's request.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No product in the catalog has this identifier.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog product failed validation.
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),

    /// The discounted price couldn't be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The checkout summary couldn't be built.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// One shopper's catalog and cart.
#[derive(Debug)]
pub struct Session<'a> {
    catalog: Catalog,
    cart: CartStore<'a>,
}

impl<'a> Session<'a> {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        info!(products = catalog.len(), "session started");

        let cart = CartStore::new(catalog.currency());

        Self { catalog, cart }
    }

    /// The catalog being browsed.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart snapshot.
    pub fn cart(&self) -> &CartState<'a> {
        self.cart.state()
    }

    /// Add one unit of a catalog product at its discounted price.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the product doesn't exist, fails validation or can't be
    /// priced. The cart is left untouched on error.
    pub fn add_to_cart(&mut self, id: &str) -> Result<(), SessionError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::ProductNotFound(id.to_string()))?;

        product.validate()?;

        let price = product.discounted_price()?;

        debug!(
            product = id,
            list_price = %product.price,
            price = %price,
            "adding product to cart"
        );

        self.cart.add_to_cart(Product {
            price,
            ..product.clone()
        });

        Ok(())
    }

    /// Remove a product's line from the cart. Unknown identifiers are ignored.
    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.remove_from_cart(id);
    }

    /// Empty the cart, e.g. once an order is placed.
    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    /// Register an observer on the cart.
    pub fn subscribe(&mut self, observer: impl CartObserver<'a> + 'a) -> ObserverKey {
        self.cart.subscribe(observer)
    }

    /// Remove a cart observer.
    pub fn unsubscribe(&mut self, key: ObserverKey) -> bool {
        self.cart.unsubscribe(key)
    }

    /// Summarise the cart for checkout.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError::Checkout`] if the summary can't be built.
    pub fn checkout(&self) -> Result<CheckoutSummary<'a>, SessionError> {
        Ok(CheckoutSummary::from_cart(self.cart.state())?)
    }
}
