use crate::catalog;
use crate::domain::provider::Provider;
use miette::Diagnostic;
use thiserror::Error;

/// Failures of the remote-call channel itself.
///
/// These never carry a bank status: they mean the provider could not be reached,
/// or answered with something that is not a well-formed envelope.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote fault {code}: {message}")]
    Fault { code: String, message: String },
    #[error("Undecodable response: {0}")]
    Decode(String),
    #[error("No response available for operation '{0}'")]
    Unscripted(String),
}

impl From<quick_xml::Error> for TransportError {
    fn from(err: quick_xml::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// A business-level non-success status reported by a bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} error {code}: {message}")]
pub struct GatewayError {
    pub provider: Provider,
    pub code: i64,
    /// Secondary textual status, only reported by Sadad.
    pub status: Option<String>,
    pub message: String,
}

impl GatewayError {
    /// Builds the error and resolves its message through the provider's catalog.
    pub fn new(provider: Provider, code: i64) -> Self {
        Self {
            provider,
            code,
            status: None,
            message: catalog::resolve(provider, code, None),
        }
    }

    pub fn with_status(provider: Provider, code: i64, status: impl Into<String>) -> Self {
        let status = status.into();
        Self {
            provider,
            code,
            message: catalog::resolve(provider, code, Some(&status)),
            status: Some(status),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum PaymentError {
    #[error("Transport error: {0}")]
    #[diagnostic(code(bankgate::transport))]
    Transport(#[from] TransportError),
    #[error("Malformed {provider} response: {message}")]
    #[diagnostic(code(bankgate::malformed_response))]
    MalformedResponse {
        provider: Provider,
        code: Option<i64>,
        message: String,
    },
    #[error(transparent)]
    #[diagnostic(code(bankgate::gateway))]
    Gateway(#[from] GatewayError),
    #[error("Invalid callback payload: {0}")]
    #[diagnostic(code(bankgate::invalid_callback))]
    InvalidCallback(String),
    #[error("Validation error: {0}")]
    #[diagnostic(code(bankgate::validation))]
    Validation(String),
}

impl PaymentError {
    /// A required field was missing from a response that the provider does not
    /// assign a dedicated code to.
    pub fn malformed(provider: Provider, message: impl Into<String>) -> Self {
        PaymentError::MalformedResponse {
            provider,
            code: None,
            message: message.into(),
        }
    }

    /// A malformed response the provider assigns its own error code to.
    pub fn malformed_with_code(provider: Provider, code: i64) -> Self {
        PaymentError::MalformedResponse {
            provider,
            code: Some(code),
            message: catalog::resolve(provider, code, None),
        }
    }

    /// The numeric code carried by the error, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            PaymentError::Gateway(err) => Some(err.code),
            PaymentError::MalformedResponse { code, .. } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_resolves_message() {
        let err = GatewayError::new(Provider::Mellat, 17);
        assert_eq!(err.message, "کاربر از انجام تراکنش منصرف شده است");
        assert!(err.to_string().contains("17"));
    }

    #[test]
    fn test_payment_error_code() {
        let err: PaymentError = GatewayError::new(Provider::Mellat, 12).into();
        assert_eq!(err.code(), Some(12));

        let err = PaymentError::malformed_with_code(Provider::Sadad, -2541);
        assert_eq!(err.code(), Some(-2541));

        let err = PaymentError::Validation("bad".to_string());
        assert_eq!(err.code(), None);
    }
}
