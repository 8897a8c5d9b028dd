//! Checkout controller.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    cart::CartStore,
    checkout::{
        gateway::{GatewayError, PaymentGateway},
        method::PaymentMethod,
        request::{Customer, PaymentRequest},
        response::{PaymentResponse, PaymentSuccess},
        state::{CheckoutAttempt, CheckoutOutcome, CheckoutPhase},
    },
    session::User,
};

/// Why a checkout didn't go through. The cart is untouched in every case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to pay for.
    #[error("add products to the cart first")]
    EmptyCart,

    /// No payment method was chosen.
    #[error("select a payment method")]
    MethodRequired,

    /// Transport or decoding failure; safe to retry by hand.
    #[error("connection error, please try again")]
    Connection(#[source] GatewayError),

    /// The processor declined; the message is passed through as received.
    #[error("{0}")]
    Rejected(String),
}

/// What the customer is shown after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentReceipt {
    /// PIX payment awaiting the customer's scan.
    Pix {
        /// Absent when the processor created the charge without reporting an id.
        transaction_id: Option<String>,
        /// Amount charged.
        amount: Decimal,
        /// QR code image reference.
        qr_code: String,
        /// Copy-paste code, when the processor sent one.
        pix_code: Option<String>,
    },

    /// Card, boleto, or PIX without a QR code.
    Processed {
        /// Processor transaction id, if reported.
        transaction_id: Option<String>,
        /// Amount charged.
        amount: Decimal,
        /// Where to finish a redirecting payment such as boleto.
        payment_url: Option<String>,
    },
}

impl PaymentReceipt {
    fn new(method: PaymentMethod, success: PaymentSuccess) -> Self {
        match (method, success.qr_code) {
            (PaymentMethod::Pix, Some(qr_code)) => PaymentReceipt::Pix {
                transaction_id: success.transaction_id,
                amount: success.amount,
                qr_code,
                pix_code: success.pix_code,
            },
            _ => PaymentReceipt::Processed {
                transaction_id: success.transaction_id,
                amount: success.amount,
                payment_url: success.payment_url,
            },
        }
    }

    /// Processor transaction id, if one was reported.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            PaymentReceipt::Pix { transaction_id, .. }
            | PaymentReceipt::Processed { transaction_id, .. } => transaction_id.as_deref(),
        }
    }

    /// Amount charged.
    pub fn amount(&self) -> Decimal {
        match self {
            PaymentReceipt::Pix { amount, .. } | PaymentReceipt::Processed { amount, .. } => {
                *amount
            }
        }
    }
}

/// Drives a single checkout from the cart to a receipt.
pub struct CheckoutController {
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutController {
    /// Creates a controller submitting through `gateway`.
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Runs one checkout attempt to completion.
    ///
    /// Precondition failures return without touching the network. The only
    /// await is the gateway call, which is made at most once. On success the
    /// cart is cleared before this returns.
    pub async fn run(
        &self,
        cart: &mut CartStore,
        method: Option<PaymentMethod>,
        user: Option<&User>,
    ) -> CheckoutOutcome {
        let mut attempt = CheckoutAttempt::new();

        attempt.advance(CheckoutPhase::Validating);

        if cart.is_empty() {
            return attempt.finish(Err(CheckoutError::EmptyCart));
        }

        let Some(method) = method else {
            return attempt.finish(Err(CheckoutError::MethodRequired));
        };

        let request = PaymentRequest::from_cart(cart, method, Customer::from_user(user));

        attempt.advance(CheckoutPhase::AwaitingResponse);

        info!(%method, amount = %request.amount, items = request.items.len(), "submitting payment");

        let response = match self.gateway.submit(&request).await {
            Ok(response) => response,
            Err(gateway_error) => {
                warn!("payment request failed: {gateway_error}");

                return attempt.finish(Err(CheckoutError::Connection(gateway_error)));
            }
        };

        let success = match response {
            PaymentResponse::Success(success) => success,
            PaymentResponse::Failure { message } => {
                info!("payment rejected: {message}");

                return attempt.finish(Err(CheckoutError::Rejected(message)));
            }
        };

        let receipt = PaymentReceipt::new(method, success);

        info!(transaction = receipt.transaction_id(), "payment accepted");

        if let Err(clear_error) = cart.clear() {
            error!(
                transaction = receipt.transaction_id(),
                "payment accepted but the cart snapshot could not be cleared: {clear_error}"
            );
        }

        attempt.finish(Ok(receipt))
    }

    /// [`Self::run`], keeping only the result.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] the attempt ended with.
    pub async fn checkout(
        &self,
        cart: &mut CartStore,
        method: Option<PaymentMethod>,
        user: Option<&User>,
    ) -> Result<PaymentReceipt, CheckoutError> {
        self.run(cart, method, user).await.into_result()
    }
}

impl Debug for CheckoutController {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CheckoutController").finish_non_exhaustive()
    }
}
