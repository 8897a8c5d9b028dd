//! Payment response
//!
//! The processor answers with a flat JSON object keyed on `success`. It is
//! validated into [`PaymentResponse`] while deserializing, so a success that
//! lacks an amount never reaches the controller. The processor may create a
//! payment without reporting its id, so the transaction id is optional.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Fallback when a failure carries no message.
const DEFAULT_FAILURE_MESSAGE: &str = "payment was not approved";

/// Why a successful response could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    /// A field required on success is absent or null.
    #[error("successful response is missing `{0}`")]
    MissingField(&'static str),

    /// The amount is neither a number nor a decimal string.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Details of an accepted payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSuccess {
    /// Processor transaction id, when one was reported.
    pub transaction_id: Option<String>,

    /// Amount charged, in currency units.
    pub amount: Decimal,

    /// QR code image reference (URL or data URI).
    pub qr_code: Option<String>,

    /// PIX copy-paste code.
    pub pix_code: Option<String>,

    /// Hosted payment page for methods that redirect.
    pub payment_url: Option<String>,
}

/// Outcome reported by the payment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireResponse")]
pub enum PaymentResponse {
    /// The payment was created.
    Success(PaymentSuccess),

    /// The processor declined; `message` is shown to the customer.
    Failure {
        /// Reason given by the processor.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    success: bool,
    message: Option<String>,
    transaction_id: Option<WireScalar>,
    amount: Option<WireScalar>,
    qr_code: Option<String>,
    pix_code: Option<String>,
    payment_url: Option<String>,
}

/// Ids and amounts arrive as either JSON numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireScalar {
    Number(serde_json::Number),
    Text(String),
}

impl WireScalar {
    fn into_text(self) -> String {
        match self {
            WireScalar::Number(number) => number.to_string(),
            WireScalar::Text(text) => text,
        }
    }
}

impl TryFrom<WireResponse> for PaymentResponse {
    type Error = ResponseError;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        if !wire.success {
            return Ok(PaymentResponse::Failure {
                message: wire
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            });
        }

        let transaction_id = non_empty(wire.transaction_id.map(WireScalar::into_text));

        let amount = wire
            .amount
            .map(WireScalar::into_text)
            .ok_or(ResponseError::MissingField("amount"))
            .and_then(|amount| parse_amount(&amount))?;

        Ok(PaymentResponse::Success(PaymentSuccess {
            transaction_id,
            amount,
            qr_code: non_empty(wire.qr_code),
            pix_code: non_empty(wire.pix_code),
            payment_url: non_empty(wire.payment_url),
        }))
    }
}

fn parse_amount(text: &str) -> Result<Decimal, ResponseError> {
    let trimmed = text.trim();

    trimmed
        .parse::<Decimal>()
        .or_else(|_err| Decimal::from_scientific(trimmed))
        .map_err(|_err| ResponseError::InvalidAmount(text.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
