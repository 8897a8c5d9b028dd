//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartObserver, CartStore, PricedLine},
    catalog::{Catalog, CatalogError},
    checkout::{
        CheckoutController, CheckoutError, CheckoutOutcome, CheckoutPhase, Customer,
        GatewayError, PaymentGateway, PaymentMethod, PaymentReceipt, PaymentRequest,
        PaymentResponse, PaymentSuccess,
    },
    products::{Product, ProductId},
    session::{Session, SessionError, User},
    storage::{MemoryStore, PersistentStore, StoreError},
};
