use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Behavioral and monetary profile of one wallet, built from its full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletFeatures {
    pub wallet_address: String,
    /// Distinct transaction hashes, recognized action or not.
    pub total_transactions: u64,
    pub first_transaction_at: Option<DateTime<Utc>>,
    pub last_transaction_at: Option<DateTime<Utc>>,
    pub deposit_count: u64,
    pub borrow_count: u64,
    pub repay_count: u64,
    pub redeem_count: u64,
    pub liquidation_count: u64,
    pub total_deposit_usd: Decimal,
    pub total_borrow_usd: Decimal,
    pub total_repay_usd: Decimal,
    pub total_redeem_usd: Decimal,
    pub total_liquidation_usd: Decimal,
    /// Whole days between first and last activity, never below 1.
    pub activity_duration_days: i64,
    pub avg_daily_transactions: f64,
    pub net_flow_usd: Decimal,
    /// Capped at 10. Equals 1 when the wallet borrowed but never repaid.
    pub borrow_to_repay_ratio: Decimal,
    pub liquidation_flag: bool,
}

/// Features that take part in the credit score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    TotalDepositUsd,
    RepayCount,
    NetFlowUsd,
    ActivityDurationDays,
    AvgDailyTransactions,
    BorrowCount,
    BorrowToRepayRatio,
    LiquidationFlag,
}

impl WalletFeatures {
    /// Numeric value of a scored feature. The liquidation flag reads as 0 or 1.
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::TotalDepositUsd => decimal_to_f64(self.total_deposit_usd),
            Feature::RepayCount => self.repay_count as f64,
            Feature::NetFlowUsd => decimal_to_f64(self.net_flow_usd),
            Feature::ActivityDurationDays => self.activity_duration_days as f64,
            Feature::AvgDailyTransactions => self.avg_daily_transactions,
            Feature::BorrowCount => self.borrow_count as f64,
            Feature::BorrowToRepayRatio => decimal_to_f64(self.borrow_to_repay_ratio),
            Feature::LiquidationFlag => {
                if self.liquidation_flag {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
