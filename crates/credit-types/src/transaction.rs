use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::action::ActionType;

pub const UNKNOWN_ASSET_SYMBOL: &str = "UNKNOWN";

/// A normalized lending protocol event.
///
/// Built once from a [`NewTransaction`]; `amount_usd` is derived at construction
/// and the record exposes read-only accessors afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    record_id: Option<String>,
    wallet_address: String,
    tx_hash: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    action: ActionType,
    amount: Decimal,
    asset_symbol: String,
    asset_price_usd: Decimal,
    amount_usd: Decimal,
    network: Option<String>,
    protocol: Option<String>,
    block_number: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub record_id: Option<String>,
    pub wallet_address: String,
    pub tx_hash: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub action: ActionType,
    pub amount: Decimal,
    pub asset_symbol: String,
    pub asset_price_usd: Decimal,
    pub network: Option<String>,
    pub protocol: Option<String>,
    pub block_number: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Minimal record with every optional field left unknown and zero amounts.
    pub fn new(
        wallet_address: impl Into<String>,
        tx_hash: impl Into<String>,
        action: ActionType,
    ) -> Self {
        Self {
            record_id: None,
            wallet_address: wallet_address.into(),
            tx_hash: Some(tx_hash.into()),
            timestamp: None,
            action,
            amount: Decimal::ZERO,
            asset_symbol: UNKNOWN_ASSET_SYMBOL.to_string(),
            asset_price_usd: Decimal::ZERO,
            network: None,
            protocol: None,
            block_number: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Transaction {
    /// USD value is `amount * asset_price_usd`, saturating at the `Decimal` bounds.
    pub fn new(tx: NewTransaction) -> Self {
        let amount_usd = tx.amount.saturating_mul(tx.asset_price_usd);

        Self {
            record_id: tx.record_id,
            wallet_address: tx.wallet_address,
            tx_hash: tx.tx_hash,
            timestamp: tx.timestamp,
            action: tx.action,
            amount: tx.amount,
            asset_symbol: tx.asset_symbol,
            asset_price_usd: tx.asset_price_usd,
            amount_usd,
            network: tx.network,
            protocol: tx.protocol,
            block_number: tx.block_number,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    /// `None` when the source record carried no hash. Such a transaction still
    /// counts towards its action totals, only the distinct-hash count skips it.
    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub const fn action(&self) -> &ActionType {
        &self.action
    }

    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn asset_symbol(&self) -> &str {
        &self.asset_symbol
    }

    pub const fn asset_price_usd(&self) -> Decimal {
        self.asset_price_usd
    }

    pub const fn amount_usd(&self) -> Decimal {
        self.amount_usd
    }

    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub const fn block_number(&self) -> Option<i64> {
        self.block_number
    }

    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl From<NewTransaction> for Transaction {
    fn from(tx: NewTransaction) -> Self {
        Self::new(tx)
    }
}
