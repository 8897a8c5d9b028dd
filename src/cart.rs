//! Cart

use serde::{Deserialize, Serialize};

use crate::products::ProductId;

pub mod store;

pub use store::{CartError, CartObserver, CartStore, MockCartObserver, PricedLine};

/// A product in the cart and how many units of it were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id
    pub id: ProductId,

    /// Selected units, never zero while the line is in a cart
    pub quantity: u32,
}

/// Ordered cart lines, at most one per product, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from persisted lines, dropping zero quantities and
    /// merging repeated ids into the first occurrence.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            match cart.position(line.id) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds one unit of a product, appending a new line when needed.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine { id, quantity: 1 });
        }
    }

    /// Shifts a line's quantity by `delta`. A result of zero or less removes
    /// the line.
    ///
    /// Returns `false` when the product isn't in the cart.
    pub fn adjust(&mut self, id: ProductId, delta: i64) -> bool {
        let current = self.quantity(id);

        if current == 0 {
            return false;
        }

        let quantity = i64::from(current).saturating_add(delta);

        if quantity <= 0 {
            self.remove(id);
        } else if let Some(line) = self.line_mut(id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        true
    }

    /// Deletes a product's line. Returns whether a line was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.id != id);

        self.lines.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Quantity of a product, zero when absent.
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}
