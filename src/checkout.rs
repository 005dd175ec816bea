//! Checkout

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::cart::{CartLine, CartState};

/// Errors that can occur when building or printing a checkout summary.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Order summary shown at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSummary<'a> {
    lines: Vec<CartLine<'a>>,
    item_count: u64,
    subtotal: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> CheckoutSummary<'a> {
    /// Build a summary from a cart snapshot. Shipping is always free.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the order total can't be calculated.
    pub fn from_cart(cart: &CartState<'a>) -> Result<Self, CheckoutError> {
        let subtotal = cart.total();
        let shipping = Money::from_minor(0, cart.currency());
        let total = subtotal.add(shipping)?;

        Ok(Self {
            lines: cart.items().to_vec(),
            item_count: cart.item_count(),
            subtotal,
            shipping,
            total,
        })
    }

    /// Lines in the order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of the line totals.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Shipping and handling.
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Amount to pay.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Check if there is nothing to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Prints the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CheckoutError> {
        if self.is_empty() {
            return writeln!(
                out,
                "Your cart is empty. Add something from the catalog to check out."
            )
            .map_err(|_err| CheckoutError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Price"]);

        for line in &self.lines {
            builder.push_record([
                line.product().title.clone(),
                line.quantity().to_string(),
                format!("{}", line.line_total()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..3), Alignment::right());

        let noun = if self.item_count == 1 { "item" } else { "items" };

        writeln!(out, "\n{table}").map_err(|_err| CheckoutError::IO)?;
        writeln!(out, " Subtotal ({} {noun}): {}", self.item_count, self.subtotal)
            .map_err(|_err| CheckoutError::IO)?;
        writeln!(out, " Shipping & handling: {}", self.shipping)
            .map_err(|_err| CheckoutError::IO)?;
        writeln!(out, " \x1b[1mOrder total:\x1b[0m {}", self.total)
            .map_err(|_err| CheckoutError::IO)?;

        Ok(())
    }
}
