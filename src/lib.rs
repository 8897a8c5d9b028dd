//! Storefront
//!
//! Cart and checkout core for a small e-commerce storefront: a read-only
//! product catalog, a cart mirrored to persistent storage, a simulated
//! sign-in session and a checkout controller that submits the cart to a
//! remote payment processor.
//!
//! Storage and payment submission are injected through the
//! [`storage::PersistentStore`] and [`checkout::PaymentGateway`] traits.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod storage;
