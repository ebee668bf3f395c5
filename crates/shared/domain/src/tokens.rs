use serde::{Deserialize, Serialize};
use std::fmt;

/// Name, symbol and decimal precision of an ERC20 token to deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub decimals: u8,
}

impl<'a> TokenDescriptor<'a> {
    #[must_use]
    pub const fn new(name: &'a str, symbol: &'a str, decimals: u8) -> Self {
        Self { name, symbol, decimals }
    }
}

/// Tokens deployed for every local development network, in deployment order.
pub const DEV_TOKENS: [TokenDescriptor<'static>; 4] = [
    TokenDescriptor::new("DAI", "DAI", 18),
    TokenDescriptor::new("wBTC", "wBTC", 8),
    TokenDescriptor::new("BAT", "BAT", 18),
    TokenDescriptor::new("MLTT", "MLTT", 18),
];

/// How ERC20 tokens should be deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    /// The fixed [`DEV_TOKENS`] batch.
    Dev,
    /// A single token described by the caller.
    New,
}

impl DeployMode {
    /// Resolves a mode from its command-line tag. Returns `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dev" => Some(Self::Dev),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::New => "new",
        }
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
