//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw product id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw product id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Unit price
    pub price: Money<'static, Currency>,

    /// Product description
    pub description: String,

    /// Customer rating
    pub rating: Decimal,

    /// Feature tags
    pub features: SmallVec<[String; 3]>,
}
