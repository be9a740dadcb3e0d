//! Fields the banks post back to the merchant's callback endpoint.
//!
//! Reading the HTTP request into a field map is the caller's job; these types
//! only pick out and type-check the fields each protocol needs.

use crate::domain::payment::{Amount, OrderId};
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use std::str::FromStr;

pub type CallbackFields = HashMap<String, String>;

fn required<'a>(fields: &'a CallbackFields, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .map(|v| v.trim())
        .ok_or_else(|| PaymentError::InvalidCallback(format!("missing field '{name}'")))
}

fn numeric<T: FromStr>(fields: &CallbackFields, name: &str) -> Result<T> {
    let raw = required(fields, name)?;
    raw.parse().map_err(|_| {
        PaymentError::InvalidCallback(format!("field '{name}' is not numeric: '{raw}'"))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MellatCallback {
    pub ref_id: String,
    pub res_code: i64,
    pub sale_order_id: OrderId,
    pub sale_reference_id: String,
}

impl MellatCallback {
    pub fn from_fields(fields: &CallbackFields) -> Result<Self> {
        Ok(Self {
            ref_id: required(fields, "RefId")?.to_string(),
            res_code: numeric(fields, "ResCode")?,
            sale_order_id: OrderId::new(numeric(fields, "SaleOrderId")?)?,
            // Absent when the user cancelled; only needed once ResCode is 0.
            sale_reference_id: fields
                .get("SaleReferenceId")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Sadad does not post these back in a fixed shape; the caller supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SadadCallback {
    /// The merchant order id the payment was requested with.
    pub transaction_id: OrderId,
    /// The request key returned by the payment request.
    pub ref_id: String,
    pub amount: Amount,
}

impl SadadCallback {
    pub fn from_fields(fields: &CallbackFields) -> Result<Self> {
        Ok(Self {
            transaction_id: OrderId::new(numeric(fields, "transactionId")?)?,
            ref_id: required(fields, "refId")?.to_string(),
            amount: Amount::new(numeric(fields, "amount")?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsanpardakhtCallback {
    /// Opaque, provider-encrypted payload.
    pub returning_params: String,
}

impl AsanpardakhtCallback {
    pub fn from_fields(fields: &CallbackFields) -> Result<Self> {
        Ok(Self {
            returning_params: required(fields, "ReturningParams")?.to_string(),
        })
    }
}
