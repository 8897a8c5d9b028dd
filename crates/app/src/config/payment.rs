//! Payment Config

use clap::Args;

/// Default checkout endpoint of the payment backend.
pub const DEFAULT_PAYMENT_ENDPOINT: &str =
    "https://techparts-pro-v2.onrender.com/api/payment/checkout";

/// Payment processor settings.
#[derive(Debug, Args)]
pub struct PaymentConfig {
    /// Checkout endpoint the cart is submitted to
    #[arg(long, env = "PAYMENT_ENDPOINT", default_value = DEFAULT_PAYMENT_ENDPOINT)]
    pub payment_endpoint: String,
}
