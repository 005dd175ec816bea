//! Cart
//!
//! The cart is a list of line items, unique by product identifier, plus a total that is
//! recomputed in full after every transition. [`reduce`] is the only transition function;
//! [`CartStore`](store::CartStore) owns a state and publishes each new snapshot to observers.

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{line_total_minor, total_price},
    products::{Product, ProductId},
};

pub mod observer;
pub mod store;

/// A product in the cart along with how many of it were added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: Product<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Creates a new line with a quantity of one.
    #[must_use]
    pub fn new(product: Product<'a>) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Returns the product on this line.
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Returns the product identifier.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Returns the unit price fixed when the line was created.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.product.price
    }

    /// Returns the quantity, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'a, Currency> {
        Money::from_minor(line_total_minor(self), self.product.price.currency())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}

/// Cart mutation requests.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction<'a> {
    /// Add one of a product, merging with an existing line.
    Add(Product<'a>),

    /// Remove the whole line for a product.
    Remove(ProductId),

    /// Empty the cart.
    Clear,
}

impl CartAction<'_> {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::Add(_) => "add",
            CartAction::Remove(_) => "remove",
            CartAction::Clear => "clear",
        }
    }
}

/// Snapshot of the cart contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CartState<'a> {
    items: Vec<CartLine<'a>>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> CartState<'a> {
    /// Creates an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::from_minor(0, currency),
            currency,
        }
    }

    fn with_items(items: Vec<CartLine<'a>>, currency: &'static Currency) -> Self {
        let total = total_price(&items, currency);

        Self {
            items,
            total,
            currency,
        }
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[CartLine<'a>] {
        &self.items
    }

    /// Iterate over the line items.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.items.iter()
    }

    /// Find the line for a product.
    pub fn get(&self, id: &str) -> Option<&CartLine<'a>> {
        self.items.iter().find(|line| line.id().as_str() == id)
    }

    /// Sum of every line's unit price times quantity.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Applies an action to a cart state, returning the next state.
///
/// Adding a product that's already in the cart bumps its quantity and keeps the price it
/// was first added at. Removing an absent product leaves the lines untouched.
#[must_use]
pub fn reduce<'a>(state: CartState<'a>, action: CartAction<'a>) -> CartState<'a> {
    let CartState {
        mut items,
        currency,
        ..
    } = state;

    match action {
        CartAction::Add(product) => {
            match items.iter_mut().find(|line| line.id() == &product.id) {
                Some(line) => line.increment(),
                None => items.push(CartLine::new(product)),
            }

            CartState::with_items(items, currency)
        }
        CartAction::Remove(id) => {
            items.retain(|line| line.id() != &id);

            CartState::with_items(items, currency)
        }
        CartAction::Clear => CartState::new(currency),
    }
}
