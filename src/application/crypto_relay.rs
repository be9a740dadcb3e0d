use crate::application::text_field;
use crate::domain::ports::{CallArgs, TransportHandle};
use crate::infrastructure::lazy::LazyTransport;

pub const INTERNAL_SOAP_URL: &str =
    "https://services.asanpardakht.net/paygate/internalutils.asmx?WSDL";

const ENCRYPT: &str = "EncryptInAES";
const DECRYPT: &str = "DecryptInAES";

/// AES encryption performed by Asanpardakht's own utility service.
///
/// Nothing is encrypted locally: the plain text, key and vector are sent to the
/// provider, which answers with the result. Any failure (unreachable service,
/// fault, missing result field) yields an empty string, which callers must
/// treat as an unusable payload.
pub struct CryptoRelay {
    key: String,
    iv: String,
    transport: LazyTransport,
}

impl CryptoRelay {
    pub fn new(key: impl Into<String>, iv: impl Into<String>) -> Self {
        Self::with_slot(key, iv, LazyTransport::soap(INTERNAL_SOAP_URL))
    }

    pub fn with_transport(
        key: impl Into<String>,
        iv: impl Into<String>,
        transport: TransportHandle,
    ) -> Self {
        Self::with_slot(key, iv, LazyTransport::ready(transport))
    }

    pub fn with_slot(key: impl Into<String>, iv: impl Into<String>, transport: LazyTransport) -> Self {
        Self {
            key: key.into(),
            iv: iv.into(),
            transport,
        }
    }

    pub async fn encrypt(&self, plain: &str) -> String {
        self.relay(ENCRYPT, "toBeEncrypted", plain).await
    }

    pub async fn decrypt(&self, cipher: &str) -> String {
        self.relay(DECRYPT, "toBeDecrypted", cipher).await
    }

    async fn relay(&self, operation: &str, input_name: &'static str, input: &str) -> String {
        let transport = match self.transport.get() {
            Ok(transport) => transport,
            Err(err) => {
                tracing::warn!(operation, error = %err, "crypto relay unavailable");
                return String::new();
            }
        };
        let args = CallArgs::new()
            .arg("aesKey", self.key.as_str())
            .arg("aesVector", self.iv.as_str())
            .arg(input_name, input);

        match transport.call(operation, args).await {
            Ok(response) => text_field(&response, &format!("{operation}Result")).unwrap_or_default(),
            Err(err) => {
                tracing::warn!(operation, error = %err, "crypto relay call failed");
                String::new()
            }
        }
    }
}
