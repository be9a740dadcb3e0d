use crate::application::{text_field, validate_callback_url};
use crate::catalog::sadad::{INVALID_RESPONSE, UNABLE_TO_CONNECT};
use crate::domain::callback::SadadCallback;
use crate::domain::credentials::SadadCredentials;
use crate::domain::payment::{Amount, OrderId, PaymentSession, Redirect, VerificationResult};
use crate::domain::ports::{CallArgs, GatewayAdapter, TransportHandle};
use crate::domain::provider::Provider;
use crate::error::{GatewayError, PaymentError, Result};
use crate::infrastructure::lazy::LazyTransport;
use async_trait::async_trait;
use serde_json::Value;

pub const SOAP_URL: &str = "https://sadad.shaparak.ir/services/MerchantUtility.asmx?wsdl";
/// Id of the confirmation form Sadad returns; submitting it starts the payment.
pub const FORM_ID: &str = "paymentUTLfrm";

const PAYMENT_UTILITY: &str = "PaymentUtility";
const CHECK_STATUS: &str = "CheckRequestStatusResult";

/// Sadad (Bank Melli) adapter.
///
/// The payment request returns a ready confirmation form instead of a token,
/// and verification is a single status check: the bank settles on its own
/// once the status reads `0` / `commit`.
pub struct SadadAdapter {
    credentials: SadadCredentials,
    transport: LazyTransport,
}

impl SadadAdapter {
    pub fn new(credentials: SadadCredentials) -> Self {
        Self::with_slot(credentials, LazyTransport::soap(SOAP_URL))
    }

    pub fn with_transport(credentials: SadadCredentials, transport: TransportHandle) -> Self {
        Self::with_slot(credentials, LazyTransport::ready(transport))
    }

    pub fn with_slot(credentials: SadadCredentials, transport: LazyTransport) -> Self {
        Self {
            credentials,
            transport,
        }
    }
}

/// The status fields may come wrapped in a `{operation}Result` element.
fn status_body(response: &Value) -> &Value {
    response
        .get(format!("{CHECK_STATUS}Result"))
        .filter(|v| v.is_object())
        .unwrap_or(response)
}

#[async_trait]
impl GatewayAdapter for SadadAdapter {
    type Callback = SadadCallback;

    fn provider(&self) -> Provider {
        Provider::Sadad
    }

    async fn request(
        &self,
        amount: Amount,
        callback_url: &str,
        order_id: Option<OrderId>,
    ) -> Result<PaymentSession> {
        validate_callback_url(callback_url)?;
        let order_id = order_id.unwrap_or_else(|| self.unique_number());

        // Positional interface: argument order is the contract.
        let args = CallArgs::new()
            .arg("merchantID", self.credentials.merchant.as_str())
            .arg("amount", amount.value())
            .arg("orderId", order_id.value())
            .arg("transactionKey", self.credentials.transaction_key.as_str())
            .arg("terminalID", self.credentials.terminal_id)
            .arg("returnUrl", callback_url);

        let response = self.transport.get()?.call(PAYMENT_UTILITY, args).await?;
        let (Some(ref_id), Some(form)) = (
            text_field(&response, "RequestKey"),
            text_field(&response, "PaymentUtilityResult"),
        ) else {
            tracing::warn!(%order_id, "sadad payment request returned an incomplete response");
            return Err(PaymentError::malformed_with_code(Provider::Sadad, INVALID_RESPONSE));
        };

        tracing::info!(%order_id, "sadad payment requested");
        Ok(PaymentSession {
            provider: Provider::Sadad,
            order_id,
            token: ref_id,
            redirect: Redirect::HtmlForm {
                form_id: FORM_ID,
                body: form.clone(),
            },
            form: Some(form),
        })
    }

    async fn verify(&self, callback: SadadCallback) -> Result<VerificationResult> {
        let args = CallArgs::new()
            .arg("orderId", callback.transaction_id.value())
            .arg("merchantID", self.credentials.merchant.as_str())
            .arg("terminalID", self.credentials.terminal_id)
            .arg("transactionKey", self.credentials.transaction_key.as_str())
            .arg("RequestKey", callback.ref_id.as_str())
            .arg("amount", callback.amount.value());

        let response = self.transport.get()?.call(CHECK_STATUS, args).await?;
        let body = status_body(&response);

        let Some(raw_code) = text_field(body, "AppStatusCode").filter(|c| !c.is_empty()) else {
            return Err(PaymentError::malformed_with_code(Provider::Sadad, UNABLE_TO_CONNECT));
        };
        let description = text_field(body, "AppStatusDescription").unwrap_or_default();
        let code: i64 = raw_code.parse().map_err(|_| {
            PaymentError::malformed(Provider::Sadad, format!("non-numeric status '{raw_code}'"))
        })?;

        if code != 0 || !description.eq_ignore_ascii_case("commit") {
            tracing::warn!(
                order_id = %callback.transaction_id,
                code,
                status = %description,
                "sadad payment not committed"
            );
            return Err(GatewayError::with_status(Provider::Sadad, code, description).into());
        }

        tracing::info!(order_id = %callback.transaction_id, "sadad payment committed");
        Ok(VerificationResult {
            provider: Provider::Sadad,
            reference_id: callback.ref_id,
            order_id: callback.transaction_id,
            card_number: text_field(body, "CustomerCardNumber").filter(|c| !c.is_empty()),
            tracking_code: text_field(body, "TraceNo").filter(|c| !c.is_empty()),
            gateway_transaction_id: None,
        })
    }
}
