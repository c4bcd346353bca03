use std::io::{self, Write};

use credit_types::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE, ScoredWallet};

pub(crate) const HISTOGRAM_BUCKETS: usize = 10;
pub(crate) const BUCKET_WIDTH: f64 = MAX_CREDIT_SCORE / HISTOGRAM_BUCKETS as f64;

/// Wallets sorted best first, ties broken by address.
pub(crate) fn rank(wallets: &[ScoredWallet]) -> Vec<&ScoredWallet> {
    let mut ranked: Vec<&ScoredWallet> = wallets.iter().collect();
    ranked.sort_by(|a, b| {
        b.credit_score
            .total_cmp(&a.credit_score)
            .then_with(|| a.wallet_address().cmp(b.wallet_address()))
    });
    ranked
}

/// Width-100 buckets, each closed on the left and open on the right, except the
/// last one which is closed on both ends so a perfect 1000 is still counted.
pub(crate) fn histogram(wallets: &[ScoredWallet]) -> [usize; HISTOGRAM_BUCKETS] {
    let mut buckets = [0; HISTOGRAM_BUCKETS];
    for wallet in wallets {
        buckets[bucket_index(wallet.credit_score)] += 1;
    }
    buckets
}

fn bucket_index(score: f64) -> usize {
    ((score.max(MIN_CREDIT_SCORE) / BUCKET_WIDTH) as usize).min(HISTOGRAM_BUCKETS - 1)
}

fn bucket_label(index: usize) -> String {
    let low = index as f64 * BUCKET_WIDTH;
    let high = low + BUCKET_WIDTH;
    format!("{low:>4.0}-{high:<4.0}")
}

pub(crate) fn write_report(
    out: &mut impl Write,
    wallets: &[ScoredWallet],
    top: usize,
) -> io::Result<()> {
    let ranked = rank(wallets);

    writeln!(out, "--- Top {top} wallets by credit score ---")?;
    write_rows(out, ranked.iter().take(top).copied())?;

    writeln!(out)?;
    writeln!(out, "--- Bottom {top} wallets by credit score ---")?;
    write_rows(out, ranked.iter().rev().take(top).copied())?;

    writeln!(out)?;
    writeln!(out, "--- Score distribution ---")?;
    for (index, count) in histogram(wallets).iter().enumerate() {
        writeln!(out, "{} | {count}", bucket_label(index))?;
    }

    Ok(())
}

fn write_rows<'a>(
    out: &mut impl Write,
    rows: impl Iterator<Item = &'a ScoredWallet>,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<44} {:>8} {:>18} {:>6} {:>10} {:>7}",
        "wallet", "score", "deposits_usd", "repays", "liquidated", "b/r"
    )?;
    for wallet in rows {
        let f = &wallet.features;
        writeln!(
            out,
            "{:<44} {:>8.2} {:>18.2} {:>6} {:>10} {:>7.2}",
            f.wallet_address,
            wallet.credit_score,
            f.total_deposit_usd,
            f.repay_count,
            f.liquidation_flag,
            f.borrow_to_repay_ratio
        )?;
    }
    Ok(())
}
