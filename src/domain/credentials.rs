use serde::Deserialize;
use std::fmt;

const REDACTED: &str = "***";

/// Terminal credentials issued by Mellat.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct MellatCredentials {
    pub terminal_id: i64,
    pub username: String,
    pub password: String,
}

/// Terminal credentials issued by Sadad.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct SadadCredentials {
    pub terminal_id: i64,
    pub merchant: String,
    pub transaction_key: String,
}

/// Merchant configuration issued by Asanpardakht.
///
/// The AES key and vector are never used locally: they are handed to the
/// provider's own encryption service.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct AsanpardakhtCredentials {
    pub merchant_id: i64,
    pub username: String,
    pub password: String,
    pub aes_key: String,
    pub aes_iv: String,
}

impl fmt::Debug for MellatCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MellatCredentials")
            .field("terminal_id", &self.terminal_id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for SadadCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SadadCredentials")
            .field("terminal_id", &self.terminal_id)
            .field("merchant", &self.merchant)
            .field("transaction_key", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for AsanpardakhtCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsanpardakhtCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("aes_key", &REDACTED)
            .field("aes_iv", &REDACTED)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = AsanpardakhtCredentials {
            merchant_id: 1,
            username: "user".to_string(),
            password: "hunter2".to_string(),
            aes_key: "key-material".to_string(),
            aes_iv: "iv-material".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key-material"));
        assert!(!debug.contains("iv-material"));
    }

    #[test]
    fn test_credentials_deserialize() {
        let creds: MellatCredentials = serde_json::from_str(
            r#"{"terminal_id": 123, "username": "u", "password": "p"}"#,
        )
        .unwrap();
        assert_eq!(creds.terminal_id, 123);
    }
}
