//! Catalog
//!
//! The read-only product list the cart prices against. Catalogs are loaded
//! from YAML fixtures; the storefront ships with a built-in demo catalog.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{BRL, Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductId};

const SEEDED_CATALOG: &str = include_str!("../fixtures/catalog.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Negative price
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),

    /// Invalid rating format
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The catalog has no products
    #[error("Catalog has no products")]
    Empty,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: ProductId,
    name: String,
    category: String,

    /// Product price (e.g., "899.99 BRL")
    price: String,

    rating: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    features: SmallVec<[String; 3]>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        if minor_units < 0 {
            return Err(CatalogError::NegativePrice(fixture.id));
        }

        let rating = fixture
            .rating
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| CatalogError::InvalidRating(fixture.rating.clone()))?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            category: fixture.category,
            price: Money::from_minor(minor_units, currency),
            description: fixture.description,
            rating,
            features: fixture.features,
        })
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Builds a catalog from already constructed products.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, an id repeats, a price is
    /// negative or the products disagree on currency.
    pub fn new(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();

        let currency = products
            .first()
            .map(|product| product.price.currency())
            .ok_or(CatalogError::Empty)?;

        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if product.price.currency() != currency {
                return Err(CatalogError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    product.price.currency().iso_alpha_code.to_string(),
                ));
            }

            if product.price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }

            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// The built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled fixture is malformed.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(SEEDED_CATALOG)
    }

    /// Parses a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any product fails validation.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Checks whether the catalog carries a product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always `false` for a constructed catalog; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency every price in the catalog is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Parse price string (e.g., "899.99 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "BRL" => BRL,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    let minor_units = amount
        .parse::<Decimal>()
        .ok()
        .and_then(|value| value.checked_mul(Decimal::from(10_i64.pow(currency.exponent))))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
