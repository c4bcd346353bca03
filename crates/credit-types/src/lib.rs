//! Types shared by the credit scoring pipeline and its binaries.

pub mod action;
pub mod score;
pub mod transaction;
pub mod wallet;

pub use action::ActionType;
pub use score::{
    MAX_CREDIT_SCORE, MIN_CREDIT_SCORE, NEUTRAL_CREDIT_SCORE, ScoreTable, ScoredWallet,
};
pub use transaction::{NewTransaction, Transaction, UNKNOWN_ASSET_SYMBOL};
pub use wallet::{Feature, WalletFeatures};
