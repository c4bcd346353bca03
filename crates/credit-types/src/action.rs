use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Lending protocol action recorded for a transaction.
///
/// Matching is exact: `"Deposit"` is not a deposit and ends up in [`ActionType::Other`],
/// which still counts as a transaction but never as a recognized action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[strum(serialize = "deposit")]
    Deposit,
    #[strum(serialize = "borrow")]
    Borrow,
    #[strum(serialize = "repay")]
    Repay,
    #[strum(serialize = "redeemunderlying")]
    RedeemUnderlying,
    #[strum(serialize = "liquidationcall")]
    LiquidationCall,
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

impl ActionType {
    pub fn parse(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Other(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Deposit => "deposit",
            Self::Borrow => "borrow",
            Self::Repay => "repay",
            Self::RedeemUnderlying => "redeemunderlying",
            Self::LiquidationCall => "liquidationcall",
            Self::Other(raw) => raw,
        }
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}
