//! Catalog
//!
//! The fixed list of products on sale, plus the named sections they are grouped into on the
//! storefront landing page.

use std::{fs, io, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::fixture::{CatalogFixture, parse_currency},
    pricing::PricingError,
    products::{Product, ProductError, ProductId},
};

pub mod fixture;

/// Built-in storefront catalog.
const STOREFRONT_CATALOG: &str = include_str!("../../fixtures/catalogs/storefront.yml");

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Rating could not be represented as a decimal (product id)
    #[error("Invalid rating for product {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product failed validation
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        /// Identifier of the offending product
        id: String,
        /// Validation failure
        source: ProductError,
    },

    /// Two products share an identifier
    #[error("Duplicate product identifier: {0}")]
    DuplicateProduct(ProductId),

    /// A section references a product that isn't in the catalog (section, product id)
    #[error("Section {0} references unknown product {1}")]
    UnknownSectionProduct(String, String),

    /// A product is priced in a different currency to the catalog (product id, product currency, catalog currency)
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Writing the catalog listing failed
    #[error("IO error")]
    Write,

    /// Discounted price could not be calculated
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A named group of products shown together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    products: SmallVec<[ProductId; 4]>,
}

impl Section {
    /// Creates a new section.
    pub fn new(title: impl Into<String>, products: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            title: title.into(),
            products: products.into_iter().collect(),
        }
    }

    /// Section heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Identifiers of the products in this section, in display order.
    pub fn product_ids(&self) -> &[ProductId] {
        &self.products
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product<'static>>,
    index: FxHashMap<ProductId, usize>,
    sections: Vec<Section>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a catalog from a list of products and sections.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a product fails validation, an identifier repeats,
    /// a product is priced in another currency or a section references an unknown product.
    pub fn new(
        currency: &'static Currency,
        products: impl Into<Vec<Product<'static>>>,
        sections: impl Into<Vec<Section>>,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let sections = sections.into();
        let mut index = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            product
                .validate()
                .map_err(|source| CatalogError::InvalidProduct {
                    id: product.id.to_string(),
                    source,
                })?;

            let product_currency = product.price.currency();

            if product_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id.clone(),
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        for section in &sections {
            if let Some(missing) = section
                .product_ids()
                .iter()
                .find(|id| !index.contains_key(*id))
            {
                return Err(CatalogError::UnknownSectionProduct(
                    section.title.clone(),
                    missing.to_string(),
                ));
            }
        }

        Ok(Self {
            products,
            index,
            sections,
            currency,
        })
    }

    /// Load the built-in storefront catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded fixture is invalid.
    pub fn storefront() -> Result<Self, CatalogError> {
        Self::from_yaml_str(STOREFRONT_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed, or the catalog is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&contents)?;

        info!(
            path = %path.display(),
            products = catalog.len(),
            sections = catalog.sections.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed or the catalog is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let currency = parse_currency(&fixture.currency)?;

        let products = fixture
            .products
            .into_iter()
            .map(|product| product.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let sections: Vec<Section> = fixture
            .sections
            .into_iter()
            .map(|section| {
                Section::new(
                    section.title,
                    section.products.into_iter().map(ProductId::from),
                )
            })
            .collect();

        Self::new(currency, products, sections)
    }

    /// Get a product by identifier.
    pub fn get(&self, id: &str) -> Option<&Product<'static>> {
        self.index
            .get(id)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Iterate over every product in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'static>> {
        self.products.iter()
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Products in a section, in display order.
    pub fn section_products<'s>(
        &'s self,
        section: &'s Section,
    ) -> impl Iterator<Item = &'s Product<'static>> {
        section
            .product_ids()
            .iter()
            .filter_map(|id| self.get(id.as_str()))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the catalog, one table per section.
    ///
    /// Products not in any section are listed under "All Products". A catalog without
    /// sections is listed as a single table.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a discounted price can't be calculated or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CatalogError> {
        for section in &self.sections {
            write_section(&mut out, section.title(), self.section_products(section))?;
        }

        let unlisted: Vec<&Product<'static>> = self
            .products
            .iter()
            .filter(|product| {
                !self
                    .sections
                    .iter()
                    .any(|section| section.product_ids().contains(&product.id))
            })
            .collect();

        if !unlisted.is_empty() {
            write_section(&mut out, "All Products", unlisted)?;
        }

        Ok(())
    }
}

fn write_section<'p>(
    out: &mut impl io::Write,
    title: &str,
    products: impl IntoIterator<Item = &'p Product<'static>>,
) -> Result<(), CatalogError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Rating", "Price", "Discount", "Our Price", ""]);

    for product in products {
        let price = product.discounted_price()?;

        let discount = if product.discount.is_zero() {
            String::new()
        } else {
            format!("{} off", product.discount)
        };

        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            format!("{:.1}", product.rating),
            format!("{}", product.price),
            discount,
            format!("{price}"),
            if product.prime {
                "Prime".to_string()
            } else {
                String::new()
            },
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "\n{title}\n{table}").map_err(|_err| CatalogError::Write)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, minor: i64) -> Product<'static> {
        Product::new(id, format!("Product {id}"), Money::from_minor(minor, USD))
    }

    #[test]
    fn storefront_catalog_loads() -> TestResult {
        let catalog = Catalog::storefront()?;

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.currency(), USD);

        let titles: Vec<&str> = catalog.sections().iter().map(Section::title).collect();
        assert_eq!(
            titles,
            vec!["Today's Deals", "Electronics & Devices", "Recommended For You"]
        );

        let earbuds = catalog.get("1").ok_or("missing product 1")?;
        assert_eq!(earbuds.price, Money::from_minor(24999, USD));
        assert_eq!(earbuds.rating, Decimal::new(47, 1));
        assert_eq!(earbuds.discount.value(), 20);
        assert!(earbuds.prime);

        let mouse = catalog.get("6").ok_or("missing product 6")?;
        assert!(mouse.discount.is_zero());

        Ok(())
    }

    #[test]
    fn section_products_follow_section_order() -> TestResult {
        let catalog = Catalog::storefront()?;
        let recommended = catalog
            .sections()
            .last()
            .ok_or("missing recommended section")?;

        let ids: Vec<&str> = catalog
            .section_products(recommended)
            .map(|product| product.id.as_str())
            .collect();

        assert_eq!(ids, vec!["3", "4", "5", "6"]);

        Ok(())
    }

    #[test]
    fn iter_keeps_catalog_order() -> TestResult {
        let catalog = Catalog::new(USD, [product("b", 1), product("a", 2)], [])?;

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
        assert!(catalog.get("c").is_none());

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(USD, [product("1", 100), product("1", 200)], []);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateProduct(id)) if id.as_str() == "1"
        ));
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let pounds = Product::new("2", "Tea", Money::from_minor(300, GBP));

        let result = Catalog::new(USD, [product("1", 100), pounds], []);

        match result {
            Err(CatalogError::CurrencyMismatch(id, product_currency, catalog_currency)) => {
                assert_eq!(id.as_str(), "2");
                assert_eq!(product_currency, GBP.iso_alpha_code);
                assert_eq!(catalog_currency, USD.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_products_are_rejected() {
        let result = Catalog::new(USD, [product("", 100)], []);

        assert!(matches!(
            result,
            Err(CatalogError::InvalidProduct {
                source: ProductError::EmptyId,
                ..
            })
        ));
    }

    #[test]
    fn unknown_section_product_is_rejected() {
        let result = Catalog::new(
            USD,
            [product("1", 100)],
            [Section::new("Deals", [ProductId::from("1"), ProductId::from("7")])],
        );

        assert!(matches!(
            result,
            Err(CatalogError::UnknownSectionProduct(section, id)) if section == "Deals" && id == "7"
        ));
    }

    #[test]
    fn from_yaml_str_rejects_unknown_currency() {
        let result = Catalog::from_yaml_str("currency: JPY\nproducts: []\n");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(_))));
    }

    #[test]
    fn from_yaml_str_rejects_bad_price() {
        let yaml = r#"
currency: USD
products:
  - id: "1"
    title: "Broken"
    price: "free"
"#;

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::InvalidPrice(_))
        ));
    }

    #[test]
    fn write_to_lists_sections_and_discounted_prices() -> TestResult {
        let catalog = Catalog::storefront()?;
        let mut out = Vec::new();

        catalog.write_to(&mut out)?;

        let listing = String::from_utf8(out)?;

        assert!(listing.contains("Today's Deals"));
        assert!(listing.contains("Recommended For You"));
        assert!(listing.contains("20% off"));
        assert!(listing.contains("$199.99"));
        assert!(!listing.contains("All Products"));

        Ok(())
    }

    #[test]
    fn write_to_lists_unsectioned_products() -> TestResult {
        let catalog = Catalog::new(USD, [product("1", 100)], [])?;
        let mut out = Vec::new();

        catalog.write_to(&mut out)?;

        assert!(String::from_utf8(out)?.contains("All Products"));

        Ok(())
    }
}
