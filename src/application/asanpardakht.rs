use crate::application::crypto_relay::CryptoRelay;
use crate::application::{ref_id_session, text_field, validate_callback_url};
use crate::catalog::asanpardakht::{RECONCILED, VERIFIED};
use crate::domain::callback::AsanpardakhtCallback;
use crate::domain::credentials::AsanpardakhtCredentials;
use crate::domain::payment::{Amount, OrderId, PaymentSession, VerificationResult};
use crate::domain::ports::{CallArgs, GatewayAdapter, TransportHandle};
use crate::domain::provider::Provider;
use crate::error::{GatewayError, PaymentError, Result};
use crate::infrastructure::lazy::LazyTransport;
use async_trait::async_trait;
use chrono::Local;

pub const SOAP_URL: &str = "https://services.asanpardakht.net/paygate/merchantservices.asmx?wsdl";
pub const PAY_URL: &str = "https://asan.shaparak.ir";

const REQUEST_OPERATION: &str = "RequestOperation";
const REQUEST_VERIFICATION: &str = "RequestVerification";
const REQUEST_RECONCILIATION: &str = "RequestReconciliation";

/// Number of comma-separated values in the decrypted `ReturningParams`.
const RETURNING_PARAMS_LEN: usize = 8;

/// The decrypted callback, in the order the bank writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReturningParams {
    amount: String,
    order_id: String,
    ref_id: String,
    res_code: String,
    res_message: String,
    gateway_transaction_id: String,
    retrieval_reference_number: String,
    last_four_digits: String,
}

impl ReturningParams {
    fn parse(plain: &str) -> Result<Self> {
        let fields: Vec<&str> = plain.split(',').map(str::trim).collect();
        let [amount, order_id, ref_id, res_code, res_message, gateway_transaction_id, rrn, last_four] =
            fields.as_slice()
        else {
            return Err(PaymentError::malformed(
                Provider::Asanpardakht,
                format!(
                    "expected {RETURNING_PARAMS_LEN} returning params, got {}",
                    fields.len()
                ),
            ));
        };
        Ok(Self {
            amount: amount.to_string(),
            order_id: order_id.to_string(),
            ref_id: ref_id.to_string(),
            res_code: res_code.to_string(),
            res_message: res_message.to_string(),
            gateway_transaction_id: gateway_transaction_id.to_string(),
            retrieval_reference_number: rrn.to_string(),
            last_four_digits: last_four.to_string(),
        })
    }

    fn is_approved(&self) -> bool {
        self.res_code == "0" || self.res_code == "00"
    }
}

/// Asanpardakht adapter.
///
/// Requests and callbacks travel as a single encrypted, comma-joined string,
/// encrypted and decrypted by the bank's own [`CryptoRelay`]. Settlement is
/// verification (`500`) followed by reconciliation (`600`).
pub struct AsanpardakhtAdapter {
    credentials: AsanpardakhtCredentials,
    transport: LazyTransport,
    relay: CryptoRelay,
}

impl AsanpardakhtAdapter {
    pub fn new(credentials: AsanpardakhtCredentials) -> Self {
        let relay = CryptoRelay::new(credentials.aes_key.as_str(), credentials.aes_iv.as_str());
        Self::with_parts(credentials, LazyTransport::soap(SOAP_URL), relay)
    }

    /// Uses `transport` for the merchant services and `crypto` for the
    /// encryption service.
    pub fn with_transports(
        credentials: AsanpardakhtCredentials,
        transport: TransportHandle,
        crypto: TransportHandle,
    ) -> Self {
        let relay = CryptoRelay::with_transport(
            credentials.aes_key.as_str(),
            credentials.aes_iv.as_str(),
            crypto,
        );
        Self::with_parts(credentials, LazyTransport::ready(transport), relay)
    }

    pub fn with_parts(
        credentials: AsanpardakhtCredentials,
        transport: LazyTransport,
        relay: CryptoRelay,
    ) -> Self {
        Self {
            credentials,
            transport,
            relay,
        }
    }

    /// Encrypts through the relay; an empty result aborts the operation.
    async fn encrypt(&self, plain: &str, what: &str) -> Result<String> {
        let cipher = self.relay.encrypt(plain).await;
        if cipher.is_empty() {
            return Err(PaymentError::malformed(
                Provider::Asanpardakht,
                format!("encryption of {what} returned an empty payload"),
            ));
        }
        Ok(cipher)
    }

    /// Calls a settlement step and returns its numeric result.
    async fn settlement_step(&self, operation: &str, args: CallArgs) -> Result<i64> {
        let response = self.transport.get()?.call(operation, args).await?;
        let field = format!("{operation}Result");
        let raw = text_field(&response, &field).ok_or_else(|| {
            PaymentError::malformed(Provider::Asanpardakht, format!("missing '{field}'"))
        })?;
        raw.parse().map_err(|_| {
            PaymentError::malformed(
                Provider::Asanpardakht,
                format!("non-numeric '{field}': '{raw}'"),
            )
        })
    }
}

#[async_trait]
impl GatewayAdapter for AsanpardakhtAdapter {
    type Callback = AsanpardakhtCallback;

    fn provider(&self) -> Provider {
        Provider::Asanpardakht
    }

    async fn request(
        &self,
        amount: Amount,
        callback_url: &str,
        order_id: Option<OrderId>,
    ) -> Result<PaymentSession> {
        validate_callback_url(callback_url)?;
        let order_id = order_id.unwrap_or_else(|| self.unique_number());
        let local_date = Local::now().format("%Y%m%d %H%M%S");
        let additional_data = "";

        let plain = format!(
            "1,{},{},{order_id},{amount},{local_date},{additional_data},{callback_url},0",
            self.credentials.username, self.credentials.password,
        );
        let encrypted_request = self.encrypt(&plain, "payment request").await?;

        let args = CallArgs::new()
            .arg("merchantConfigurationID", self.credentials.merchant_id)
            .arg("encryptedRequest", encrypted_request);
        let response = self.transport.get()?.call(REQUEST_OPERATION, args).await?;
        let result = text_field(&response, "RequestOperationResult").ok_or_else(|| {
            PaymentError::malformed(Provider::Asanpardakht, "missing 'RequestOperationResult'")
        })?;

        let (status, token) = result.split_once(',').unwrap_or((result.as_str(), ""));
        let code: i64 = status.trim().parse().map_err(|_| {
            PaymentError::malformed(
                Provider::Asanpardakht,
                format!("non-numeric status '{status}'"),
            )
        })?;
        if code != 0 {
            tracing::warn!(%order_id, code, "asanpardakht payment request rejected");
            return Err(GatewayError::new(Provider::Asanpardakht, code).into());
        }

        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(PaymentError::malformed(Provider::Asanpardakht, "missing token"));
        }
        tracing::info!(%order_id, "asanpardakht payment requested");
        Ok(ref_id_session(Provider::Asanpardakht, order_id, token, PAY_URL))
    }

    async fn verify(&self, callback: AsanpardakhtCallback) -> Result<VerificationResult> {
        let plain = self.relay.decrypt(&callback.returning_params).await;
        if plain.is_empty() {
            return Err(PaymentError::malformed(
                Provider::Asanpardakht,
                "decryption of returning params returned an empty payload",
            ));
        }
        let params = ReturningParams::parse(&plain)?;

        if !params.is_approved() {
            let code: i64 = params.res_code.parse().map_err(|_| {
                PaymentError::malformed(
                    Provider::Asanpardakht,
                    format!("non-numeric result code '{}'", params.res_code),
                )
            })?;
            tracing::warn!(
                order_id = %params.order_id,
                code,
                message = %params.res_message,
                "asanpardakht payment declined"
            );
            return Err(GatewayError::new(Provider::Asanpardakht, code).into());
        }
        let order_id = params
            .order_id
            .parse()
            .map_err(|_| {
                PaymentError::malformed(
                    Provider::Asanpardakht,
                    format!("non-numeric order id '{}'", params.order_id),
                )
            })
            .and_then(OrderId::new)?;

        let credentials = format!("{},{}", self.credentials.username, self.credentials.password);
        let encrypted_credentials = self.encrypt(&credentials, "credentials").await?;
        let args = CallArgs::new()
            .arg("merchantConfigurationID", self.credentials.merchant_id)
            .arg("encryptedCredentials", encrypted_credentials)
            .arg("payGateTranID", params.gateway_transaction_id.as_str());

        let verified = self.settlement_step(REQUEST_VERIFICATION, args.clone()).await?;
        if verified != VERIFIED {
            tracing::warn!(%order_id, code = verified, "asanpardakht verification rejected");
            return Err(GatewayError::new(Provider::Asanpardakht, verified).into());
        }
        let reconciled = self.settlement_step(REQUEST_RECONCILIATION, args).await?;
        if reconciled != RECONCILED {
            tracing::warn!(%order_id, code = reconciled, "asanpardakht reconciliation rejected");
            return Err(GatewayError::new(Provider::Asanpardakht, reconciled).into());
        }

        tracing::info!(
            %order_id,
            amount = %params.amount,
            rrn = %params.retrieval_reference_number,
            "asanpardakht payment settled"
        );
        Ok(VerificationResult {
            provider: Provider::Asanpardakht,
            reference_id: params.ref_id,
            order_id,
            card_number: Some(params.last_four_digits).filter(|d| !d.is_empty()),
            tracking_code: Some(params.retrieval_reference_number).filter(|r| !r.is_empty()),
            gateway_transaction_id: Some(params.gateway_transaction_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scripted::ScriptedTransport;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const RETURNING: &str = "5000,77,REF-9,0,approved,GW-555,RRN-1,1234";

    fn credentials() -> AsanpardakhtCredentials {
        AsanpardakhtCredentials {
            merchant_id: 9001,
            username: "shop".to_string(),
            password: "secret".to_string(),
            aes_key: "KEY".to_string(),
            aes_iv: "IV".to_string(),
        }
    }

    /// Encryption service that hands every input back unchanged.
    fn echo_crypto() -> Arc<ScriptedTransport> {
        Arc::new(
            ScriptedTransport::new()
                .on("EncryptInAES", |args| {
                    Ok(json!({"EncryptInAESResult": args.get("toBeEncrypted").cloned()}))
                })
                .on("DecryptInAES", |args| {
                    Ok(json!({"DecryptInAESResult": args.get("toBeDecrypted").cloned()}))
                }),
        )
    }

    fn adapter(merchant: &Arc<ScriptedTransport>, crypto: &Arc<ScriptedTransport>) -> AsanpardakhtAdapter {
        AsanpardakhtAdapter::with_transports(credentials(), merchant.clone(), crypto.clone())
    }

    fn callback(plain: &str) -> AsanpardakhtCallback {
        AsanpardakhtCallback {
            returning_params: plain.to_string(),
        }
    }

    #[test]
    fn test_returning_params_require_eight_fields() {
        let params = ReturningParams::parse(RETURNING).unwrap();
        assert_eq!(params.gateway_transaction_id, "GW-555");
        assert_eq!(params.last_four_digits, "1234");
        assert!(params.is_approved());

        assert!(ReturningParams::parse("1,2,3").is_err());
        assert!(ReturningParams::parse(&format!("{RETURNING},extra")).is_err());
    }

    #[tokio::test]
    async fn test_request_encrypts_flat_payload() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_OPERATION, json!({"RequestOperationResult": "0,TOKEN-A"})),
        );
        let crypto = echo_crypto();
        let session = adapter(&merchant, &crypto)
            .request(Amount::new(5000).unwrap(), "https://shop.example/cb", Some(OrderId::new(77).unwrap()))
            .await
            .unwrap();
        assert_eq!(session.token, "TOKEN-A");
        assert_eq!(session.order_id.value(), 77);

        // With an echoing relay the merchant service sees the plain payload.
        let sent = merchant.calls()[0].args.get("encryptedRequest").cloned().unwrap();
        let plain = sent.as_str().unwrap();
        let parts: Vec<&str> = plain.split(',').collect();
        assert_eq!(parts.len(), 9);
        assert_eq!(&parts[..5], &["1", "shop", "secret", "77", "5000"]);
        assert_eq!(parts[5].len(), "YYYYMMDD HHMMSS".len());
        assert_eq!(parts[6], "");
        assert_eq!(parts[7], "https://shop.example/cb");
        assert_eq!(parts[8], "0");
        assert_eq!(
            merchant.calls()[0].args.get("merchantConfigurationID"),
            Some(&Value::from(9001))
        );
    }

    #[tokio::test]
    async fn test_request_rejected() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_OPERATION, json!({"RequestOperationResult": "305"})),
        );
        let err = adapter(&merchant, &echo_crypto())
            .request(Amount::new(5000).unwrap(), "https://shop.example/cb", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(305));
    }

    #[tokio::test]
    async fn test_request_status_is_numeric() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_OPERATION, json!({"RequestOperationResult": "00,TOKEN-B"})),
        );
        let session = adapter(&merchant, &echo_crypto())
            .request(Amount::new(5000).unwrap(), "https://shop.example/cb", None)
            .await
            .unwrap();
        assert_eq!(session.token, "TOKEN-B");
    }

    #[tokio::test]
    async fn test_request_aborts_on_empty_encryption() {
        let merchant = Arc::new(ScriptedTransport::new());
        let crypto = Arc::new(
            ScriptedTransport::new().respond("EncryptInAES", json!({"EncryptInAESResult": ""})),
        );
        let err = adapter(&merchant, &crypto)
            .request(Amount::new(5000).unwrap(), "https://shop.example/cb", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MalformedResponse { .. }));
        assert!(merchant.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_and_reconcile() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_VERIFICATION, json!({"RequestVerificationResult": "500"}))
                .respond(REQUEST_RECONCILIATION, json!({"RequestReconciliationResult": "600"})),
        );
        let result = adapter(&merchant, &echo_crypto())
            .verify(callback(RETURNING))
            .await
            .unwrap();

        assert_eq!(merchant.operations(), vec![REQUEST_VERIFICATION, REQUEST_RECONCILIATION]);
        assert_eq!(result.reference_id, "REF-9");
        assert_eq!(result.order_id.value(), 77);
        assert_eq!(result.card_number.as_deref(), Some("1234"));
        assert_eq!(result.gateway_transaction_id.as_deref(), Some("GW-555"));

        let args = &merchant.calls()[0].args;
        assert_eq!(args.get("payGateTranID"), Some(&json!("GW-555")));
        assert_eq!(args.get("encryptedCredentials"), Some(&json!("shop,secret")));
    }

    #[tokio::test]
    async fn test_verify_accepts_double_zero() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_VERIFICATION, json!({"RequestVerificationResult": 500}))
                .respond(REQUEST_RECONCILIATION, json!({"RequestReconciliationResult": 600})),
        );
        let plain = "5000,77,REF-9,00,approved,GW-555,RRN-1,1234";
        assert!(adapter(&merchant, &echo_crypto()).verify(callback(plain)).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_declined_result_code() {
        let merchant = Arc::new(ScriptedTransport::new());
        let plain = "5000,77,REF-9,51,insufficient,GW-555,RRN-1,1234";
        let err = adapter(&merchant, &echo_crypto())
            .verify(callback(plain))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(51));
        assert!(merchant.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verification_other_than_500_fails() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_VERIFICATION, json!({"RequestVerificationResult": "503"})),
        );
        let err = adapter(&merchant, &echo_crypto())
            .verify(callback(RETURNING))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(503));
        assert_eq!(merchant.operations(), vec![REQUEST_VERIFICATION]);
    }

    #[tokio::test]
    async fn test_reconciliation_other_than_600_fails() {
        let merchant = Arc::new(
            ScriptedTransport::new()
                .respond(REQUEST_VERIFICATION, json!({"RequestVerificationResult": "500"}))
                .respond(REQUEST_RECONCILIATION, json!({"RequestReconciliationResult": "601"})),
        );
        let err = adapter(&merchant, &echo_crypto())
            .verify(callback(RETURNING))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(601));
    }

    #[tokio::test]
    async fn test_verify_aborts_on_empty_decryption() {
        let merchant = Arc::new(ScriptedTransport::new());
        let crypto = Arc::new(ScriptedTransport::new().fail(
            "DecryptInAES",
            crate::error::TransportError::Decode("down".to_string()),
        ));
        let err = adapter(&merchant, &crypto)
            .verify(callback("opaque"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MalformedResponse { .. }));
        assert!(merchant.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_aborts_on_empty_credentials_encryption() {
        let merchant = Arc::new(ScriptedTransport::new());
        let crypto = Arc::new(
            ScriptedTransport::new()
                .on("DecryptInAES", |_| Ok(json!({"DecryptInAESResult": RETURNING})))
                .on("EncryptInAES", |_| Ok(json!({"EncryptInAESResult": ""}))),
        );
        let err = adapter(&merchant, &crypto)
            .verify(callback("opaque"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MalformedResponse { .. }));
        assert!(merchant.calls().is_empty());
    }
}
