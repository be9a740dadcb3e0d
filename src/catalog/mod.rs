//! Per-provider mapping from bank status codes to displayable messages.

pub mod asanpardakht;
pub mod mellat;
pub mod sadad;

use crate::domain::provider::Provider;

pub type CodeTable = &'static [(i64, &'static str)];

fn lookup(table: CodeTable, code: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// Message shown for codes a provider never documented.
pub fn fallback(code: i64) -> String {
    format!("خطای تعریف نشده! کد خطا: {code}")
}

/// Resolves a provider status to a message. Never fails: unknown codes get
/// [`fallback`], which embeds the raw code.
///
/// `status` is only consulted for Sadad, whose status check reports a textual
/// description next to the numeric code.
pub fn resolve(provider: Provider, code: i64, status: Option<&str>) -> String {
    let known = match provider {
        Provider::Mellat => lookup(mellat::MESSAGES, code),
        Provider::Asanpardakht => lookup(asanpardakht::MESSAGES, code),
        Provider::Sadad => lookup(sadad::MESSAGES, code)
            .or_else(|| status.and_then(sadad::status_message)),
    };
    known.map_or_else(|| fallback(code), str::to_string)
}
