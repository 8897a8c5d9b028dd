//! Checkout
//!
//! Turns the cart into a payment request, submits it through a
//! [`PaymentGateway`] and interprets the processor's answer.

pub mod controller;
pub mod gateway;
pub mod method;
pub mod request;
pub mod response;
pub mod state;

pub use controller::{CheckoutController, CheckoutError, PaymentReceipt};
pub use gateway::{GatewayError, MockPaymentGateway, PaymentGateway};
pub use method::{PaymentMethod, UnknownPaymentMethod};
pub use request::{Customer, PaymentItem, PaymentRequest};
pub use response::{PaymentResponse, PaymentSuccess, ResponseError};
pub use state::{CheckoutOutcome, CheckoutPhase};
