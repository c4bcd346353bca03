use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use credit_types::{ActionType, Transaction, WalletFeatures};

/// Ratio above which borrowing behavior is no longer distinguished.
pub const MAX_BORROW_TO_REPAY_RATIO: Decimal = Decimal::TEN;
pub const MIN_ACTIVITY_DURATION_DAYS: i64 = 1;

/// Running totals for a single wallet while its transactions are folded in.
#[derive(Debug, Default)]
struct WalletAccumulator<'a> {
    tx_hashes: HashSet<&'a str>,
    first_seen: Option<DateTime<Utc>>,
    last_seen: Option<DateTime<Utc>>,
    deposit_count: u64,
    borrow_count: u64,
    repay_count: u64,
    redeem_count: u64,
    liquidation_count: u64,
    deposit_usd: Decimal,
    borrow_usd: Decimal,
    repay_usd: Decimal,
    redeem_usd: Decimal,
    liquidation_usd: Decimal,
}

impl<'a> WalletAccumulator<'a> {
    fn add(&mut self, tx: &'a Transaction) {
        if let Some(hash) = tx.tx_hash() {
            self.tx_hashes.insert(hash);
        }

        if let Some(ts) = tx.timestamp() {
            self.first_seen = Some(self.first_seen.map_or(ts, |first| first.min(ts)));
            self.last_seen = Some(self.last_seen.map_or(ts, |last| last.max(ts)));
        }

        let amount_usd = tx.amount_usd();
        match tx.action() {
            ActionType::Deposit => {
                self.deposit_count += 1;
                self.deposit_usd = self.deposit_usd.saturating_add(amount_usd);
            }
            ActionType::Borrow => {
                self.borrow_count += 1;
                self.borrow_usd = self.borrow_usd.saturating_add(amount_usd);
            }
            ActionType::Repay => {
                self.repay_count += 1;
                self.repay_usd = self.repay_usd.saturating_add(amount_usd);
            }
            ActionType::RedeemUnderlying => {
                self.redeem_count += 1;
                self.redeem_usd = self.redeem_usd.saturating_add(amount_usd);
            }
            ActionType::LiquidationCall => {
                self.liquidation_count += 1;
                self.liquidation_usd = self.liquidation_usd.saturating_add(amount_usd);
            }
            ActionType::Other(_) => {}
        }
    }

    fn finish(self, wallet_address: &str) -> WalletFeatures {
        let total_transactions = self.tx_hashes.len() as u64;
        let activity_duration_days = activity_duration_days(self.first_seen, self.last_seen);

        WalletFeatures {
            wallet_address: wallet_address.to_string(),
            total_transactions,
            first_transaction_at: self.first_seen,
            last_transaction_at: self.last_seen,
            deposit_count: self.deposit_count,
            borrow_count: self.borrow_count,
            repay_count: self.repay_count,
            redeem_count: self.redeem_count,
            liquidation_count: self.liquidation_count,
            total_deposit_usd: self.deposit_usd,
            total_borrow_usd: self.borrow_usd,
            total_repay_usd: self.repay_usd,
            total_redeem_usd: self.redeem_usd,
            total_liquidation_usd: self.liquidation_usd,
            activity_duration_days,
            avg_daily_transactions: total_transactions as f64 / activity_duration_days as f64,
            net_flow_usd: self.deposit_usd.saturating_sub(self.redeem_usd),
            borrow_to_repay_ratio: borrow_to_repay_ratio(self.borrow_usd, self.repay_usd),
            liquidation_flag: self.liquidation_count > 0,
        }
    }
}

/// Build one feature vector per distinct wallet, ordered by wallet address.
///
/// The result does not depend on the order of `transactions`.
pub fn aggregate_wallets(transactions: &[Transaction]) -> Vec<WalletFeatures> {
    let mut wallets: BTreeMap<&str, WalletAccumulator<'_>> = BTreeMap::new();

    for tx in transactions {
        wallets.entry(tx.wallet_address()).or_default().add(tx);
    }

    let features: Vec<WalletFeatures> = wallets
        .into_iter()
        .map(|(address, acc)| {
            let features = acc.finish(address);
            debug!(
                "[Aggregator] {address}: {} txs over {} days, ratio {}",
                features.total_transactions,
                features.activity_duration_days,
                features.borrow_to_repay_ratio
            );
            features
        })
        .collect();

    info!(
        "[Aggregator] 📊 Built features for {} wallets from {} transactions",
        features.len(),
        transactions.len()
    );

    features
}

/// Whole days between first and last activity, floored at one day.
///
/// Wallets without any known timestamp also get the one-day minimum.
pub fn activity_duration_days(
    first_seen: Option<DateTime<Utc>>,
    last_seen: Option<DateTime<Utc>>,
) -> i64 {
    match (first_seen, last_seen) {
        (Some(first), Some(last)) => (last - first)
            .num_days()
            .max(MIN_ACTIVITY_DURATION_DAYS),
        _ => MIN_ACTIVITY_DURATION_DAYS,
    }
}

/// Borrowed USD per repaid USD, capped at [`MAX_BORROW_TO_REPAY_RATIO`].
///
/// Borrowing without any repayment yields 1, no borrowing at all yields 0.
/// A division that overflows resolves to 0.
pub fn borrow_to_repay_ratio(borrow_usd: Decimal, repay_usd: Decimal) -> Decimal {
    let ratio = if repay_usd > Decimal::ZERO {
        borrow_usd.checked_div(repay_usd).unwrap_or(Decimal::ZERO)
    } else if borrow_usd > Decimal::ZERO {
        Decimal::ONE
    } else {
        Decimal::ZERO
    };

    ratio.min(MAX_BORROW_TO_REPAY_RATIO)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal::dec;

    use credit_types::NewTransaction;

    use super::*;

    fn tx(wallet: &str, hash: &str, action: ActionType, usd: Decimal, ts: i64) -> Transaction {
        let mut new_tx = NewTransaction::new(wallet, hash, action);
        new_tx.amount = usd;
        new_tx.asset_price_usd = Decimal::ONE;
        new_tx.timestamp = DateTime::from_timestamp(ts, 0);
        Transaction::new(new_tx)
    }

    const DAY: i64 = 24 * 60 * 60;

    #[test]
    fn test_aggregate_counts_and_totals() {
        let txs = vec![
            tx("0xa", "h1", ActionType::Deposit, dec!(1000), 0),
            tx("0xa", "h2", ActionType::Borrow, dec!(300), DAY),
            tx("0xa", "h3", ActionType::Repay, dec!(100), 2 * DAY),
            tx("0xa", "h4", ActionType::RedeemUnderlying, dec!(250), 3 * DAY),
            tx("0xa", "h5", ActionType::Other("flashloan".into()), dec!(9), 4 * DAY),
            tx("0xb", "h6", ActionType::LiquidationCall, dec!(50), 0),
        ];

        let features = aggregate_wallets(&txs);
        assert_eq!(features.len(), 2);

        let a = &features[0];
        assert_eq!(a.wallet_address, "0xa");
        assert_eq!(a.total_transactions, 5);
        assert_eq!(a.deposit_count, 1);
        assert_eq!(a.borrow_count, 1);
        assert_eq!(a.repay_count, 1);
        assert_eq!(a.redeem_count, 1);
        assert_eq!(a.liquidation_count, 0);
        assert_eq!(a.total_deposit_usd, dec!(1000));
        assert_eq!(a.total_redeem_usd, dec!(250));
        assert_eq!(a.net_flow_usd, dec!(750));
        assert_eq!(a.borrow_to_repay_ratio, dec!(3));
        assert_eq!(a.activity_duration_days, 4);
        assert_eq!(a.avg_daily_transactions, 1.25);
        assert!(!a.liquidation_flag);

        let b = &features[1];
        assert_eq!(b.liquidation_count, 1);
        assert_eq!(b.total_liquidation_usd, dec!(50));
        assert!(b.liquidation_flag);
    }

    #[test]
    fn test_duplicate_hashes_count_once() {
        let txs = vec![
            tx("0xa", "h1", ActionType::Deposit, dec!(10), 0),
            tx("0xa", "h1", ActionType::Deposit, dec!(10), 0),
        ];

        let a = &aggregate_wallets(&txs)[0];
        assert_eq!(a.total_transactions, 1);
        assert_eq!(a.deposit_count, 2);
        assert_eq!(a.total_deposit_usd, dec!(20));
    }

    #[test]
    fn test_hashless_transaction_keeps_its_amounts() {
        let mut hashless = NewTransaction::new("0xa", "", ActionType::Deposit);
        hashless.tx_hash = None;
        hashless.amount = dec!(5000);
        hashless.asset_price_usd = Decimal::ONE;
        let txs = vec![
            tx("0xa", "h1", ActionType::Deposit, dec!(10), 0),
            Transaction::new(hashless),
        ];

        let a = &aggregate_wallets(&txs)[0];
        assert_eq!(a.total_transactions, 1);
        assert_eq!(a.deposit_count, 2);
        assert_eq!(a.total_deposit_usd, dec!(5010));
    }

    #[test]
    fn test_single_transaction_wallet_has_one_day() {
        let txs = vec![tx("0xa", "h1", ActionType::Deposit, dec!(10), 1_629_178_166)];

        let a = &aggregate_wallets(&txs)[0];
        assert_eq!(a.first_transaction_at, a.last_transaction_at);
        assert_eq!(a.activity_duration_days, 1);
        assert_eq!(a.avg_daily_transactions, 1.0);
    }

    #[test]
    fn test_activity_duration_floors_partial_days() {
        let first = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(
            activity_duration_days(Some(first), Some(first + Duration::hours(71))),
            2
        );
        assert_eq!(
            activity_duration_days(Some(first), Some(first + Duration::hours(5))),
            1
        );
        assert_eq!(activity_duration_days(None, None), 1);
    }

    #[test]
    fn test_unknown_timestamps_are_ignored_for_span() {
        let mut undated = NewTransaction::new("0xa", "h2", ActionType::Deposit);
        undated.timestamp = None;
        let txs = vec![
            tx("0xa", "h1", ActionType::Deposit, dec!(10), 10 * DAY),
            Transaction::new(undated),
        ];

        let a = &aggregate_wallets(&txs)[0];
        assert_eq!(a.first_transaction_at, DateTime::from_timestamp(10 * DAY, 0));
        assert_eq!(a.activity_duration_days, 1);
        assert_eq!(a.total_transactions, 2);
    }

    #[test]
    fn test_borrow_to_repay_ratio() {
        assert_eq!(borrow_to_repay_ratio(dec!(500), Decimal::ZERO), Decimal::ONE);
        assert_eq!(borrow_to_repay_ratio(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(borrow_to_repay_ratio(Decimal::ZERO, dec!(100)), Decimal::ZERO);
        assert_eq!(borrow_to_repay_ratio(dec!(150), dec!(100)), dec!(1.5));
        assert_eq!(
            borrow_to_repay_ratio(dec!(5000), dec!(1)),
            MAX_BORROW_TO_REPAY_RATIO
        );
        assert_eq!(
            borrow_to_repay_ratio(Decimal::MAX, dec!(0.0000001)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let mut txs = vec![
            tx("0xa", "h1", ActionType::Deposit, dec!(1000), 0),
            tx("0xb", "h2", ActionType::Borrow, dec!(300), DAY),
            tx("0xa", "h3", ActionType::Repay, dec!(100), 5 * DAY),
            tx("0xb", "h4", ActionType::Repay, dec!(100), 9 * DAY),
        ];
        let forward = aggregate_wallets(&txs);
        txs.reverse();
        assert_eq!(aggregate_wallets(&txs), forward);
    }
}
