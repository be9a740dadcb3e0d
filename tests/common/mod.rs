#![allow(dead_code)]

use bankgate::domain::credentials::{
    AsanpardakhtCredentials, MellatCredentials, SadadCredentials,
};
use bankgate::domain::payment::{Amount, OrderId};
use bankgate::infrastructure::scripted::ScriptedTransport;
use serde_json::json;
use std::sync::Arc;

pub fn mellat_credentials() -> MellatCredentials {
    MellatCredentials {
        terminal_id: 1234567,
        username: "shop".to_string(),
        password: "secret".to_string(),
    }
}

pub fn sadad_credentials() -> SadadCredentials {
    SadadCredentials {
        terminal_id: 24000615,
        merchant: "000000140212149".to_string(),
        transaction_key: "tk".to_string(),
    }
}

pub fn asanpardakht_credentials() -> AsanpardakhtCredentials {
    AsanpardakhtCredentials {
        merchant_id: 9001,
        username: "shop".to_string(),
        password: "secret".to_string(),
        aes_key: "KEY".to_string(),
        aes_iv: "IV".to_string(),
    }
}

pub fn amount(value: u64) -> Amount {
    Amount::new(value).unwrap()
}

pub fn order(value: u64) -> Option<OrderId> {
    Some(OrderId::new(value).unwrap())
}

/// An encryption service that returns its input unchanged.
pub fn echo_crypto() -> Arc<ScriptedTransport> {
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
