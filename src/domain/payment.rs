use crate::domain::provider::Provider;
use crate::error::PaymentError;
use serde::Serialize;
use std::fmt;

/// A positive payment amount in the smallest currency unit (Rial).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: u64) -> Result<Self, PaymentError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = PaymentError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Merchant-side order identifier.
///
/// Every supported bank stores the order id in a signed 64-bit field, so values
/// above `i64::MAX` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OrderId(u64);

impl OrderId {
    pub const MAX: u64 = i64::MAX as u64;

    pub fn new(value: u64) -> Result<Self, PaymentError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(format!(
                "Order id {value} does not fit the provider's numeric field"
            )))
        }
    }

    pub(crate) fn saturating(value: u64) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for OrderId {
    type Error = PaymentError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the end-user is sent to the bank's payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Redirect {
    /// A hidden form POSTing a single field to the bank's fixed pay URL.
    PostForm {
        action: &'static str,
        field: &'static str,
        value: String,
    },
    /// A ready-made confirmation form supplied by the bank, submitted as-is.
    HtmlForm { form_id: &'static str, body: String },
}

/// Outcome of a successful payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSession {
    pub provider: Provider,
    pub order_id: OrderId,
    /// Provider-issued token correlating the request with the later callback.
    pub token: String,
    /// Confirmation form body, only returned by Sadad.
    pub form: Option<String>,
    pub redirect: Redirect,
}

impl PaymentSession {
    pub fn redirect(&self) -> &Redirect {
        &self.redirect
    }
}

/// A settled transaction, returned only once every confirmation step succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub provider: Provider,
    pub reference_id: String,
    pub order_id: OrderId,
    pub card_number: Option<String>,
    pub tracking_code: Option<String>,
    pub gateway_transaction_id: Option<String>,
}
