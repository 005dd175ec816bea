//! Products

use std::{borrow::Borrow, fmt};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::{PricingError, discounted_price};

/// Highest rating a product can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Errors raised when a product fails validation.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Product identifiers must be non-empty.
    #[error("product identifier must not be empty")]
    EmptyId,

    /// Unit prices can't be negative (product id).
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Ratings must sit between 0 and 5 (product id, rating).
    #[error("product {0} has rating {1}, expected a value between 0 and 5")]
    RatingOutOfRange(ProductId, Decimal),

    /// Discount percentages must sit between 0 and 100.
    #[error("discount of {0}% is out of range, expected 0 to 100")]
    DiscountOutOfRange(u8),
}

/// Opaque product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Whole-number discount percentage between 0 and 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Creates a new discount percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::DiscountOutOfRange`] if `percent` is above 100.
    pub fn new(percent: u8) -> Result<Self, ProductError> {
        if percent > 100 {
            return Err(ProductError::DiscountOutOfRange(percent));
        }

        Ok(Self(percent))
    }

    /// Returns the discount in whole percentage points.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Check if this is a zero discount.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns the discount as a fractional percentage (20% -> 0.20).
    #[must_use]
    pub fn as_percentage(self) -> Percentage {
        Percentage::from(Decimal::new(i64::from(self.0), 2))
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Display title
    pub title: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Customer rating, 0 to 5
    pub rating: Decimal,

    /// Image URI
    pub image: String,

    /// Eligible for prime delivery
    pub prime: bool,

    /// Discount advertised against the unit price
    pub discount: DiscountPercent,
}

impl<'a> Product<'a> {
    /// Creates a new product with no rating, image or discount.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            rating: Decimal::ZERO,
            image: String::new(),
            prime: false,
            discount: DiscountPercent::ZERO,
        }
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the image URI.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Marks the product as prime-eligible.
    #[must_use]
    pub fn with_prime(mut self, prime: bool) -> Self {
        self.prime = prime;
        self
    }

    /// Sets the discount.
    #[must_use]
    pub fn with_discount(mut self, discount: DiscountPercent) -> Self {
        self.discount = discount;
        self
    }

    /// Check the product is well formed before handing it to a cart.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyId`]: the identifier is empty.
    /// - [`ProductError::NegativePrice`]: the unit price is below zero.
    /// - [`ProductError::RatingOutOfRange`]: the rating is outside 0 to 5.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_empty() {
            return Err(ProductError::EmptyId);
        }

        if self.price.to_minor_units() < 0 {
            return Err(ProductError::NegativePrice(self.id.clone()));
        }

        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(ProductError::RatingOutOfRange(self.id.clone(), self.rating));
        }

        Ok(())
    }

    /// The unit price after applying the product's own discount.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the discount can't be represented in minor units.
    pub fn discounted_price(&self) -> Result<Money<'a, Currency>, PricingError> {
        discounted_price(self.price, self.discount)
    }
}
