use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wallet::WalletFeatures;

pub const MIN_CREDIT_SCORE: f64 = 0.0;
pub const MAX_CREDIT_SCORE: f64 = 1000.0;
/// Score given to every wallet when the batch cannot be told apart.
pub const NEUTRAL_CREDIT_SCORE: f64 = 500.0;

/// One wallet's features next to its weighted raw score and final credit score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWallet {
    #[serde(flatten)]
    pub features: WalletFeatures,
    pub raw_score: f64,
    pub credit_score: f64,
}

impl ScoredWallet {
    pub fn wallet_address(&self) -> &str {
        &self.features.wallet_address
    }
}

/// Wallet address to credit score, ordered by address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<String, f64>);

impl ScoreTable {
    pub fn get(&self, wallet_address: &str) -> Option<f64> {
        self.0.get(wallet_address).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(address, score)| (address.as_str(), *score))
    }
}

impl<'a> FromIterator<&'a ScoredWallet> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = &'a ScoredWallet>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|w| (w.wallet_address().to_string(), w.credit_score))
                .collect(),
        )
    }
}

impl FromIterator<(String, f64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
