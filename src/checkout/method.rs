//! Payment methods

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment methods the processor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant transfer confirmed by scanning a QR code or pasting a code.
    Pix,

    /// Credit card.
    Card,

    /// Bank slip.
    Boleto,
}

impl PaymentMethod {
    /// Every supported method.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Pix, PaymentMethod::Card, PaymentMethod::Boleto];

    /// Wire name, as sent in the `payment_method` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Card => "card",
            PaymentMethod::Boleto => "boleto",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A payment method name that isn't pix, card or boleto.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}
