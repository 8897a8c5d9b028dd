//! HTTP payment gateway.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::ACCEPT};
use storefront::checkout::{GatewayError, PaymentGateway, PaymentRequest, PaymentResponse};
use tracing::debug;

/// Posts checkout requests to the payment backend as a URL-encoded form.
///
/// No timeout and no retries: a request that never completes keeps the
/// checkout waiting.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    endpoint: String,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a gateway posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    /// Checkout endpoint in use.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(&self, request: &PaymentRequest) -> Result<PaymentResponse, GatewayError> {
        let fields = request
            .form_fields()
            .map_err(|error| GatewayError::Transport(format!("failed to encode items: {error}")))?;

        debug!(endpoint = %self.endpoint, method = %request.method, "posting checkout form");

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(&fields)
            .send()
            .await
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|error| GatewayError::Transport(error.to_string()))?;

        debug!(%status, bytes = body.len(), "payment endpoint answered");

        decode_response(status, &body)
    }
}

/// Reads the endpoint's answer. The backend reports declines in the JSON
/// body, so any status is accepted as long as the body parses; an
/// unparseable body is a transport error on an error status and an invalid
/// response otherwise.
fn decode_response(status: StatusCode, body: &str) -> Result<PaymentResponse, GatewayError> {
    match serde_json::from_str::<PaymentResponse>(body) {
        Ok(response) => Ok(response),
        Err(error) if status.is_success() => Err(GatewayError::InvalidResponse(error.to_string())),
        Err(error) => Err(GatewayError::Transport(format!(
            "payment endpoint returned {status}: {error}"
        ))),
    }
}
