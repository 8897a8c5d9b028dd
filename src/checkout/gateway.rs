//! Payment gateway seam.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::checkout::{request::PaymentRequest, response::PaymentResponse};

/// Errors that keep a request from producing a [`PaymentResponse`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The endpoint could not be reached or the exchange broke off.
    #[error("payment endpoint unreachable: {0}")]
    Transport(String),

    /// The endpoint answered with something that isn't a payment response.
    #[error("invalid payment response: {0}")]
    InvalidResponse(String),
}

/// Submits payment requests to the remote processor.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Sends one request and waits for its answer. Implementations must not
    /// retry.
    async fn submit(&self, request: &PaymentRequest) -> Result<PaymentResponse, GatewayError>;
}
