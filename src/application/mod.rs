//! Application layer: one adapter per bank, each driving that bank's
//! request → verify → settle sequence over a `RemoteCall` transport.

pub mod asanpardakht;
pub mod crypto_relay;
pub mod mellat;
pub mod sadad;
pub mod unique;

use crate::domain::payment::{OrderId, PaymentSession, Redirect};
use crate::domain::provider::Provider;
use crate::error::{PaymentError, Result};
use reqwest::Url;
use serde_json::Value;

/// Reads a scalar field of a structured response as text.
pub(crate) fn text_field(response: &Value, name: &str) -> Option<String> {
    match response.get(name)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn validate_callback_url(callback_url: &str) -> Result<()> {
    match Url::parse(callback_url) {
        Ok(url) if url.has_host() => Ok(()),
        _ => Err(PaymentError::Validation(format!(
            "Callback URL must be absolute: '{callback_url}'"
        ))),
    }
}

/// Session for the providers that redirect with a single `RefId` field.
pub(crate) fn ref_id_session(
    provider: Provider,
    order_id: OrderId,
    token: String,
    pay_url: &'static str,
) -> PaymentSession {
    PaymentSession {
        provider,
        order_id,
        redirect: Redirect::PostForm {
            action: pay_url,
            field: "RefId",
            value: token.clone(),
        },
        token,
        form: None,
    }
}
