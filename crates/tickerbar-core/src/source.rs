use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream provider identifiers used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    DolarApi,
    Yahoo,
    CoinGecko,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DolarApi => "dolarapi",
            Self::Yahoo => "yahoo",
            Self::CoinGecko => "coingecko",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
