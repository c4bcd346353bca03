use tracing::{debug, info};

use credit_types::{Feature, ScoreTable, ScoredWallet, WalletFeatures};

use crate::scaling::{rescale_scores, scale_flag, scale_negative, scale_positive};
use crate::weights::{FEATURE_WEIGHTS, FeatureWeight, Polarity};

/// Scale one feature column according to its polarity.
///
/// The liquidation flag is binary and always maps to `1 - flag`, whatever the
/// distribution of liquidations in the batch.
pub fn scale_column(weight: &FeatureWeight, column: &[f64]) -> Vec<f64> {
    match (weight.feature, weight.polarity) {
        (Feature::LiquidationFlag, _) => scale_flag(column),
        (_, Polarity::Positive) => scale_positive(column),
        (_, Polarity::Negative) => scale_negative(column),
    }
}

/// Weighted sum of the scaled features for every wallet, in input order.
pub fn raw_scores(wallets: &[WalletFeatures]) -> Vec<f64> {
    let mut raw = vec![0.0; wallets.len()];

    for weight in &FEATURE_WEIGHTS {
        let column: Vec<f64> = wallets.iter().map(|w| w.value(weight.feature)).collect();
        let scaled = scale_column(weight, &column);

        for (total, value) in raw.iter_mut().zip(scaled) {
            *total += weight.weight * value;
        }
    }

    raw
}

/// Score the whole wallet population.
///
/// Scores are relative to the batch: the best raw score maps to 1000 and the
/// worst to 0, so adding or removing a wallet can move every other score.
pub fn score_wallets(wallets: Vec<WalletFeatures>) -> Vec<ScoredWallet> {
    let raw = raw_scores(&wallets);
    let credit_scores = rescale_scores(&raw);

    let scored: Vec<ScoredWallet> = wallets
        .into_iter()
        .zip(raw)
        .zip(credit_scores)
        .map(|((features, raw_score), credit_score)| {
            debug!(
                "[Scorer] {}: raw {raw_score:.4} -> {credit_score:.2}",
                features.wallet_address
            );
            ScoredWallet {
                features,
                raw_score,
                credit_score,
            }
        })
        .collect();

    info!("[Scorer] 🧮 Scored {} wallets", scored.len());

    scored
}

pub fn score_table(wallets: Vec<WalletFeatures>) -> ScoreTable {
    score_wallets(wallets).iter().collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::{Decimal, dec};

    use super::*;

    fn wallet(address: &str) -> WalletFeatures {
        WalletFeatures {
            wallet_address: address.to_string(),
            total_transactions: 1,
            first_transaction_at: None,
            last_transaction_at: None,
            deposit_count: 0,
            borrow_count: 0,
            repay_count: 0,
            redeem_count: 0,
            liquidation_count: 0,
            total_deposit_usd: Decimal::ZERO,
            total_borrow_usd: Decimal::ZERO,
            total_repay_usd: Decimal::ZERO,
            total_redeem_usd: Decimal::ZERO,
            total_liquidation_usd: Decimal::ZERO,
            activity_duration_days: 1,
            avg_daily_transactions: 1.0,
            net_flow_usd: Decimal::ZERO,
            borrow_to_repay_ratio: Decimal::ZERO,
            liquidation_flag: false,
        }
    }

    #[test]
    fn test_single_wallet_is_neutral() {
        let mut w = wallet("0xa");
        w.total_deposit_usd = dec!(1000);
        w.liquidation_flag = true;

        let scored = score_wallets(vec![w]);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].credit_score, 500.0);
    }

    #[test]
    fn test_identical_wallets_are_neutral() {
        let scored = score_wallets(vec![wallet("0xa"), wallet("0xb"), wallet("0xc")]);
        assert!(scored.iter().all(|s| s.credit_score == 500.0));
    }

    #[test]
    fn test_liquidation_flag_ignores_batch_distribution() {
        let mut liquidated = wallet("0xa");
        liquidated.liquidation_flag = true;
        liquidated.liquidation_count = 7;
        let mut also_liquidated = wallet("0xb");
        also_liquidated.liquidation_flag = true;
        also_liquidated.liquidation_count = 1;

        let flag = FEATURE_WEIGHTS
            .iter()
            .find(|w| w.feature == Feature::LiquidationFlag)
            .unwrap();
        let column: Vec<f64> = [&liquidated, &also_liquidated]
            .iter()
            .map(|w| w.value(Feature::LiquidationFlag))
            .collect();

        // Every wallet liquidated: the generic rule would give 1, the flag rule gives 0.
        assert_eq!(scale_column(flag, &column), vec![0.0, 0.0]);
    }

    #[test]
    fn test_raw_scores_for_clean_wallets() {
        // Nobody borrowed or got liquidated, so negative features contribute their full weight.
        let raw = raw_scores(&[wallet("0xa"), wallet("0xb")]);
        assert_eq!(raw.len(), 2);
        for r in raw {
            assert!((r - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_good_wallet_beats_risky_wallet() {
        let mut good = wallet("0xgood");
        good.total_deposit_usd = dec!(1000);
        good.net_flow_usd = dec!(1000);
        good.repay_count = 5;

        let mut risky = wallet("0xrisky");
        risky.total_deposit_usd = dec!(100);
        risky.net_flow_usd = dec!(100);
        risky.borrow_count = 3;
        risky.borrow_to_repay_ratio = Decimal::ONE;
        risky.liquidation_count = 1;
        risky.liquidation_flag = true;

        let table = score_table(vec![good, risky]);
        assert_eq!(table.get("0xgood"), Some(1000.0));
        assert_eq!(table.get("0xrisky"), Some(0.0));
    }

    #[test]
    fn test_higher_deposit_never_lowers_score() {
        let mut a = wallet("0xa");
        a.total_deposit_usd = dec!(50);
        let mut b = wallet("0xb");
        b.total_deposit_usd = dec!(200);
        b.borrow_count = 2;
        let mut c = wallet("0xc");
        c.total_deposit_usd = dec!(10);
        c.repay_count = 3;

        let before = score_table(vec![a.clone(), b.clone(), c.clone()]);
        a.total_deposit_usd = dec!(500);
        let after = score_table(vec![a, b, c]);

        assert!(after.get("0xa").unwrap() >= before.get("0xa").unwrap());
    }
}
