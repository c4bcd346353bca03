//! Credit scoring of lending protocol wallets.
//!
//! The pipeline is linear: raw records are normalized, folded into one feature
//! vector per wallet, then scored against the whole population. Scoring only
//! starts once every wallet has been aggregated.

pub mod aggregator;
pub mod error;
pub mod fields;
pub mod loader;
pub mod normalizer;
pub mod scaling;
pub mod scorer;
pub mod weights;

use serde_json::Value;

use credit_types::{ScoreTable, ScoredWallet, Transaction};

pub use aggregator::aggregate_wallets;
pub use error::{MalformedRecordError, SourceError};
pub use loader::load_records;
pub use normalizer::{NormalizedBatch, normalize_record, normalize_records};
pub use scorer::{score_table, score_wallets};
pub use weights::{FEATURE_WEIGHTS, FeatureWeight, Polarity};

#[derive(Debug, Clone, Default)]
pub struct ScoringRun {
    pub accepted_records: usize,
    pub skipped_records: Vec<MalformedRecordError>,
    /// Scored wallets ordered by address.
    pub wallets: Vec<ScoredWallet>,
}

impl ScoringRun {
    pub fn scores(&self) -> ScoreTable {
        self.wallets.iter().collect()
    }
}

/// Aggregate and score already normalized transactions.
pub fn score_transactions(transactions: &[Transaction]) -> Vec<ScoredWallet> {
    let features = aggregate_wallets(transactions);
    score_wallets(features)
}

/// Run the full pipeline over raw, parsed records.
pub fn score_records(records: &[Value]) -> ScoringRun {
    let NormalizedBatch {
        transactions,
        skipped,
    } = normalize_records(records);

    ScoringRun {
        accepted_records: transactions.len(),
        skipped_records: skipped,
        wallets: score_transactions(&transactions),
    }
}
