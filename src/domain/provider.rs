use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The banking providers a merchant can settle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Mellat,
    Sadad,
    Asanpardakht,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Mellat, Provider::Sadad, Provider::Asanpardakht];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Mellat => "mellat",
            Provider::Sadad => "sadad",
            Provider::Asanpardakht => "asanpardakht",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown provider '{s}'"))
    }
}
