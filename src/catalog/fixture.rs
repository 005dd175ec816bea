//! Catalog Fixtures

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    products::{DiscountPercent, Product, ProductId},
};

/// Catalog file layout
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code shared by every product (e.g., "USD")
    pub currency: String,

    /// Products in display order
    pub products: Vec<ProductFixture>,

    /// Named groups of products shown together
    #[serde(default)]
    pub sections: Vec<SectionFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Unit price as a decimal string (e.g., "249.99")
    pub price: String,

    /// Customer rating
    #[serde(default)]
    pub rating: f64,

    /// Image URI
    #[serde(default)]
    pub image: String,

    /// Prime delivery eligibility
    #[serde(default)]
    pub prime: bool,

    /// Whole-number discount percentage
    #[serde(default)]
    pub discount: u8,
}

/// Section Fixture
#[derive(Debug, Deserialize)]
pub struct SectionFixture {
    /// Section heading
    pub title: String,

    /// Identifiers of the products in the section
    pub products: Vec<String>,
}

impl ProductFixture {
    /// Convert into a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the price, rating or discount can't be parsed.
    pub fn into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product<'static>, CatalogError> {
        let minor_units = parse_price(&self.price)?;

        let rating = Decimal::from_f64(self.rating)
            .map(|rating| rating.round_dp(1))
            .ok_or_else(|| CatalogError::InvalidRating(self.id.clone()))?;

        let discount = DiscountPercent::new(self.discount).map_err(|source| {
            CatalogError::InvalidProduct {
                id: self.id.clone(),
                source,
            }
        })?;

        Ok(Product {
            id: ProductId::from(self.id),
            title: self.title,
            price: Money::from_minor(minor_units, currency),
            rating,
            image: self.image,
            prime: self.prime,
            discount,
        })
    }
}

/// Parse a decimal price string (e.g., "2.99") into minor units.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidPrice`] if the amount can't be parsed as a decimal or
/// doesn't fit in minor units.
pub fn parse_price(s: &str) -> Result<i64, CatalogError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for anything other than GBP, USD or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code.trim() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}
