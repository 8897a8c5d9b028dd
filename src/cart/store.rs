//! Cart store.
//!
//! Owns the in-memory cart, mirrors it to persistent storage after every
//! mutation and tells observers about the new state.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use mockall::automock;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartLine},
    catalog::Catalog,
    pricing::line_total,
    products::{Product, ProductId},
    storage::{CART_KEY, PersistentStore, StoreError},
};

/// Cart store errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot could not be read or written. The in-memory cart keeps
    /// the mutation that triggered the write.
    #[error("failed to persist cart")]
    Persist(#[from] StoreError),

    /// The snapshot could not be serialized.
    #[error("failed to encode cart snapshot")]
    Encode(#[from] serde_json::Error),
}

/// Receives the cart after each mutation.
#[automock]
pub trait CartObserver: Send + Sync {
    /// Called once per mutation with the updated cart.
    fn cart_changed(&self, cart: &Cart);
}

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, Copy)]
pub struct PricedLine<'a> {
    /// Catalog entry for the line.
    pub product: &'a Product,

    /// Units in the cart.
    pub quantity: u32,
}

impl PricedLine<'_> {
    /// Unit price times quantity.
    pub fn total(&self) -> Money<'static, Currency> {
        line_total(&self.product.price, self.quantity)
    }
}

/// The shopping cart, persisted under [`CART_KEY`] after every mutation.
pub struct CartStore {
    catalog: Arc<Catalog>,
    cart: Cart,
    store: Arc<dyn PersistentStore>,
    observers: Vec<Box<dyn CartObserver>>,
}

impl CartStore {
    /// Restores the cart from the last persisted snapshot.
    ///
    /// A missing snapshot yields an empty cart, as does one that no longer
    /// parses. Lines for products the catalog doesn't carry are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend itself fails.
    pub fn restore(
        catalog: Arc<Catalog>,
        store: Arc<dyn PersistentStore>,
    ) -> Result<Self, CartError> {
        let cart = match store.load(CART_KEY)? {
            Some(snapshot) => Self::decode(&catalog, &snapshot),
            None => Cart::new(),
        };

        debug!(lines = cart.len(), items = cart.count(), "restored cart");

        Ok(Self {
            catalog,
            cart,
            store,
            observers: Vec::new(),
        })
    }

    fn decode(catalog: &Catalog, snapshot: &str) -> Cart {
        let lines: Vec<CartLine> = match serde_json::from_str(snapshot) {
            Ok(lines) => lines,
            Err(error) => {
                warn!("discarding unreadable cart snapshot: {error}");

                return Cart::new();
            }
        };

        Cart::from_lines(lines.into_iter().filter(|line| {
            let known = catalog.contains(line.id);

            if !known {
                warn!(product = %line.id, "dropping cart line for unknown product");
            }

            known
        }))
    }

    /// Registers an observer notified after every mutation.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Adds one unit of a product. Unknown products are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn add(&mut self, id: ProductId) -> Result<(), CartError> {
        if !self.catalog.contains(id) {
            debug!(product = %id, "ignoring add for unknown product");

            return Ok(());
        }

        self.cart.increment(id);

        debug!(product = %id, quantity = self.cart.quantity(id), "added product to cart");

        self.commit()
    }

    /// Shifts a line's quantity by `delta`, removing the line when the
    /// result drops to zero or below. Products not in the cart are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Result<(), CartError> {
        if !self.cart.adjust(id, delta) {
            debug!(product = %id, "ignoring quantity change for product not in cart");

            return Ok(());
        }

        debug!(product = %id, delta, quantity = self.cart.quantity(id), "updated quantity");

        self.commit()
    }

    /// Removes a product's line. Removing an absent product still persists
    /// and notifies.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartError> {
        let removed = self.cart.remove(id);

        debug!(product = %id, removed, "removed product from cart");

        self.commit()
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart.clear();

        debug!("cleared cart");

        self.commit()
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    /// Sum of unit price times quantity over the current lines.
    pub fn total(&self) -> Money<'static, Currency> {
        let minor = self
            .priced_lines()
            .map(|line| line.total().to_minor_units())
            .sum::<i64>();

        Money::from_minor(minor, self.catalog.currency())
    }

    /// Lines joined with their products, in cart order.
    pub fn priced_lines(&self) -> impl Iterator<Item = PricedLine<'_>> {
        self.cart.lines().iter().filter_map(|line| {
            self.catalog.get(line.id).map(|product| PricedLine {
                product,
                quantity: line.quantity,
            })
        })
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Catalog the cart prices against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn commit(&mut self) -> Result<(), CartError> {
        let persisted = self.persist();

        for observer in &self.observers {
            observer.cart_changed(&self.cart);
        }

        persisted
    }

    fn persist(&self) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(self.cart.lines())?;

        self.store.save(CART_KEY, &snapshot)?;

        Ok(())
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
