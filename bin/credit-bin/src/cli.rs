use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ScoreCli {
    /// JSON file holding the array of lending transactions
    #[arg(
        short,
        long,
        env = "WALLET_TRANSACTIONS_PATH",
        default_value = "user-wallet-transactions.json"
    )]
    pub input: PathBuf,

    /// Where to write every scored wallet with its features (JSON)
    #[arg(short, long, env = "WALLET_SCORES_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of wallets listed at each end of the ranking
    #[arg(long, env = "REPORT_TOP_N", default_value = "10")]
    pub top: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
