//! Domain primitives: TokenLabel, TokenLabels.

use serde::{Deserialize, Serialize};

/// Token symbol used for display only (e.g., "WMNT", "USDT").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenLabel(pub String);

impl TokenLabel {
    pub fn new(label: impl Into<String>) -> Self {
        TokenLabel(label.into())
    }
}

impl std::fmt::Display for TokenLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The collateral/loan token pair of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenLabels {
    pub collateral: TokenLabel,
    pub loan: TokenLabel,
}

impl TokenLabels {
    pub fn new(collateral: impl Into<String>, loan: impl Into<String>) -> Self {
        Self {
            collateral: TokenLabel::new(collateral),
            loan: TokenLabel::new(loan),
        }
    }

    /// Pair name such as "WMNT/USDT".
    pub fn pair(&self) -> String {
        format!("{}/{}", self.collateral, self.loan)
    }
}

impl Default for TokenLabels {
    fn default() -> Self {
        Self::new("WMNT", "USDT")
    }
}
