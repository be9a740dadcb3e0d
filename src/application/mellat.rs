use crate::application::{ref_id_session, text_field, validate_callback_url};
use crate::domain::callback::MellatCallback;
use crate::domain::credentials::MellatCredentials;
use crate::domain::payment::{Amount, OrderId, PaymentSession, VerificationResult};
use crate::domain::ports::{Binding, CallArgs, GatewayAdapter, TransportHandle};
use crate::domain::provider::Provider;
use crate::error::{GatewayError, PaymentError, Result};
use crate::infrastructure::lazy::LazyTransport;
use async_trait::async_trait;
use chrono::Local;

pub const SOAP_URL: &str = "https://bpm.shaparak.ir/pgwchannel/services/pgw?wsdl";
pub const PAY_URL: &str = "https://bpm.shaparak.ir/pgwchannel/startpay.mellat";
pub const NAMESPACE: &str = "http://interfaces.core.sw.bps.com/";

const PAY_REQUEST: &str = "bpPayRequest";
const VERIFY_REQUEST: &str = "bpVerifyRequest";
const SETTLE_REQUEST: &str = "bpSettleRequest";

/// Mellat (Behpardakht) adapter.
///
/// Every operation answers with a comma-separated `return` string whose first
/// field is the status code. A payment is only final once both the verify and
/// the settle call reported `0`.
pub struct MellatAdapter {
    credentials: MellatCredentials,
    transport: LazyTransport,
}

impl MellatAdapter {
    /// Connects to Mellat's public service on first use.
    pub fn new(credentials: MellatCredentials) -> Self {
        Self::with_slot(credentials, LazyTransport::soap(SOAP_URL))
    }

    pub fn with_transport(credentials: MellatCredentials, transport: TransportHandle) -> Self {
        Self::with_slot(credentials, LazyTransport::ready(transport))
    }

    pub fn with_slot(credentials: MellatCredentials, transport: LazyTransport) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    fn credential_args(&self) -> CallArgs {
        CallArgs::new()
            .namespace(NAMESPACE)
            .binding(Binding::Rpc)
            .arg("terminalId", self.credentials.terminal_id)
            .arg("userName", self.credentials.username.as_str())
            .arg("userPassword", self.credentials.password.as_str())
    }

    /// Calls `operation` and splits its `return` string on commas.
    async fn call(&self, operation: &str, args: CallArgs) -> Result<Vec<String>> {
        let response = self.transport.get()?.call(operation, args).await?;
        let raw = text_field(&response, "return")
            .ok_or_else(|| PaymentError::malformed_with_code(Provider::Mellat, 0))?;
        Ok(raw.split(',').map(|part| part.trim().to_string()).collect())
    }

    /// Calls a confirmation operation and requires status `0`.
    async fn confirm(&self, operation: &str, args: CallArgs) -> Result<()> {
        let fields = self.call(operation, args).await?;
        match status_code(&fields)? {
            0 => Ok(()),
            code => {
                tracing::warn!(operation, code, "mellat confirmation rejected");
                Err(GatewayError::new(Provider::Mellat, code).into())
            }
        }
    }
}

fn status_code(fields: &[String]) -> Result<i64> {
    let raw = fields.first().map(String::as_str).unwrap_or_default();
    raw.parse().map_err(|_| {
        PaymentError::malformed(Provider::Mellat, format!("non-numeric status '{raw}'"))
    })
}

#[async_trait]
impl GatewayAdapter for MellatAdapter {
    type Callback = MellatCallback;

    fn provider(&self) -> Provider {
        Provider::Mellat
    }

    async fn request(
        &self,
        amount: Amount,
        callback_url: &str,
        order_id: Option<OrderId>,
    ) -> Result<PaymentSession> {
        validate_callback_url(callback_url)?;
        let order_id = order_id.unwrap_or_else(|| self.unique_number());
        let now = Local::now();

        let args = self
            .credential_args()
            .arg("orderId", order_id.value())
            .arg("amount", amount.value())
            .arg("localDate", now.format("%Y%m%d").to_string())
            .arg("localTime", now.format("%H%M%S").to_string())
            .arg("additionalData", "")
            .arg("callBackUrl", callback_url)
            .arg("payerId", 0);

        let fields = self.call(PAY_REQUEST, args).await?;
        match status_code(&fields)? {
            0 => {
                let token = fields
                    .get(1)
                    .filter(|t| !t.is_empty())
                    .cloned()
                    .ok_or_else(|| PaymentError::malformed(Provider::Mellat, "missing token"))?;
                tracing::info!(%order_id, "mellat payment requested");
                Ok(ref_id_session(Provider::Mellat, order_id, token, PAY_URL))
            }
            code => {
                tracing::warn!(%order_id, code, "mellat pay request rejected");
                Err(GatewayError::new(Provider::Mellat, code).into())
            }
        }
    }

    async fn verify(&self, callback: MellatCallback) -> Result<VerificationResult> {
        if callback.res_code != 0 {
            return Err(GatewayError::new(Provider::Mellat, callback.res_code).into());
        }
        if callback.sale_reference_id.is_empty() {
            return Err(PaymentError::InvalidCallback(
                "missing field 'SaleReferenceId'".to_string(),
            ));
        }

        let args = self
            .credential_args()
            .arg("orderId", callback.sale_order_id.value())
            .arg("saleOrderId", callback.sale_order_id.value())
            .arg("saleReferenceId", callback.sale_reference_id.as_str());

        self.confirm(VERIFY_REQUEST, args.clone()).await?;
        self.confirm(SETTLE_REQUEST, args).await?;

        tracing::info!(order_id = %callback.sale_order_id, "mellat payment settled");
        Ok(VerificationResult {
            provider: Provider::Mellat,
            reference_id: callback.ref_id,
            order_id: callback.sale_order_id,
            card_number: None,
            tracking_code: Some(callback.sale_reference_id),
            gateway_transaction_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Redirect;
    use crate::infrastructure::scripted::ScriptedTransport;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn credentials() -> MellatCredentials {
        MellatCredentials {
            terminal_id: 1234,
            username: "shop".to_string(),
            password: "secret".to_string(),
        }
    }

    fn adapter(transport: &Arc<ScriptedTransport>) -> MellatAdapter {
        MellatAdapter::with_transport(credentials(), transport.clone())
    }

    fn callback(res_code: i64) -> MellatCallback {
        MellatCallback {
            ref_id: "AF82041a2Bf6989c7fF9".to_string(),
            res_code,
            sale_order_id: OrderId::new(42).unwrap(),
            sale_reference_id: "135792468".to_string(),
        }
    }

    #[tokio::test]
    async fn test_request_returns_token() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(PAY_REQUEST, json!({"return": "0,TOKEN123"})));
        let session = adapter(&transport)
            .request(
                Amount::new(1000).unwrap(),
                "https://cb",
                Some(OrderId::new(42).unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(session.token, "TOKEN123");
        assert_eq!(session.order_id.value(), 42);
        assert_eq!(
            session.redirect(),
            &Redirect::PostForm {
                action: PAY_URL,
                field: "RefId",
                value: "TOKEN123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_request_sends_fields_in_order() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(PAY_REQUEST, json!({"return": "0,T"})));
        adapter(&transport)
            .request(Amount::new(1000).unwrap(), "https://cb", Some(OrderId::new(42).unwrap()))
            .await
            .unwrap();

        let calls = transport.calls();
        let args = &calls[0].args;
        let names: Vec<&str> = args.params.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "terminalId",
                "userName",
                "userPassword",
                "orderId",
                "amount",
                "localDate",
                "localTime",
                "additionalData",
                "callBackUrl",
                "payerId"
            ]
        );
        assert_eq!(args.namespace, Some(NAMESPACE));
        assert_eq!(args.binding, Binding::Rpc);
        assert_eq!(args.get("additionalData"), Some(&Value::from("")));
        assert_eq!(args.get("payerId"), Some(&Value::from(0)));
        assert_eq!(args.get("localDate").and_then(Value::as_str).map(str::len), Some(8));
        assert_eq!(args.get("localTime").and_then(Value::as_str).map(str::len), Some(6));
    }

    #[tokio::test]
    async fn test_request_generates_order_id() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(PAY_REQUEST, json!({"return": "0,T"})));
        let session = adapter(&transport)
            .request(Amount::new(1000).unwrap(), "https://cb", None)
            .await
            .unwrap();
        assert!(session.order_id.value() > 0);
        assert_eq!(
            transport.calls()[0].args.get("orderId"),
            Some(&Value::from(session.order_id.value()))
        );
    }

    #[tokio::test]
    async fn test_request_rejected() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(PAY_REQUEST, json!({"return": "17,"})));
        let err = adapter(&transport)
            .request(Amount::new(1000).unwrap(), "https://cb", Some(OrderId::new(42).unwrap()))
            .await
            .unwrap_err();
        match err {
            PaymentError::Gateway(e) => {
                assert_eq!(e.code, 17);
                assert_eq!(e.message, "کاربر از انجام تراکنش منصرف شده است");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_return_is_malformed() {
        let transport = Arc::new(ScriptedTransport::new().respond(PAY_REQUEST, json!({})));
        let err = adapter(&transport)
            .request(Amount::new(1000).unwrap(), "https://cb", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MalformedResponse { code: Some(0), .. }));
    }

    #[tokio::test]
    async fn test_relative_callback_rejected_before_any_call() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = adapter(&transport)
            .request(Amount::new(1000).unwrap(), "callback.php", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Validation(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_then_settle() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(VERIFY_REQUEST, json!({"return": "0"}))
                .respond(SETTLE_REQUEST, json!({"return": "0"})),
        );
        let result = adapter(&transport).verify(callback(0)).await.unwrap();

        assert_eq!(transport.operations(), vec![VERIFY_REQUEST, SETTLE_REQUEST]);
        assert_eq!(result.reference_id, "AF82041a2Bf6989c7fF9");
        assert_eq!(result.order_id.value(), 42);
        assert_eq!(result.tracking_code.as_deref(), Some("135792468"));
        assert_eq!(result.card_number, None);

        let args = &transport.calls()[0].args;
        assert_eq!(args.get("orderId"), Some(&Value::from(42u64)));
        assert_eq!(args.get("saleOrderId"), Some(&Value::from(42u64)));
        assert_eq!(args.get("saleReferenceId"), Some(&Value::from("135792468")));
    }

    #[tokio::test]
    async fn test_settle_failure_after_verify_success() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(VERIFY_REQUEST, json!({"return": "0"}))
                .respond(SETTLE_REQUEST, json!({"return": "12"})),
        );
        let err = adapter(&transport).verify(callback(0)).await.unwrap_err();
        assert_eq!(err.code(), Some(12));
    }

    #[tokio::test]
    async fn test_verify_failure_skips_settle() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(VERIFY_REQUEST, json!({"return": "43"})),
        );
        let err = adapter(&transport).verify(callback(0)).await.unwrap_err();
        assert_eq!(err.code(), Some(43));
        assert_eq!(transport.operations(), vec![VERIFY_REQUEST]);
    }

    #[tokio::test]
    async fn test_non_zero_result_code_fails_without_calls() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = adapter(&transport).verify(callback(17)).await.unwrap_err();
        assert_eq!(err.code(), Some(17));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = adapter(&transport).verify(callback(0)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Transport(_)));
    }
}
