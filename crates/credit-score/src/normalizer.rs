use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use credit_types::{NewTransaction, Transaction};

use crate::error::MalformedRecordError;
use crate::fields::{
    parse_action, parse_decimal, parse_object_id, parse_optional_i64, parse_optional_string,
    parse_required_string, parse_symbol, parse_timestamp,
};

const ID_FIELD: &str = "_id";
const WALLET_FIELD: &str = "userWallet";
const TX_HASH_FIELD: &str = "txHash";
const TIMESTAMP_FIELD: &str = "timestamp";
const ACTION_FIELD: &str = "action";
const ACTION_DATA_FIELD: &str = "actionData";
const AMOUNT_FIELD: &str = "amount";
const ASSET_SYMBOL_FIELD: &str = "assetSymbol";
const ASSET_PRICE_FIELD: &str = "assetPriceUSD";
const NETWORK_FIELD: &str = "network";
const PROTOCOL_FIELD: &str = "protocol";
const BLOCK_NUMBER_FIELD: &str = "blockNumber";
const CREATED_AT_FIELD: &str = "createdAt";
const UPDATED_AT_FIELD: &str = "updatedAt";

/// Normalized transactions in input order, plus the records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<MalformedRecordError>,
}

impl NormalizedBatch {
    pub fn accepted_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Normalize a full batch of raw records.
///
/// Malformed records are skipped: each one is logged as a warning and kept in
/// [`NormalizedBatch::skipped`], while every other record still goes through.
pub fn normalize_records(records: &[Value]) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        transactions: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        match normalize_record(index, record) {
            Ok(tx) => batch.transactions.push(tx),
            Err(e) => {
                warn!("[Normalizer] ⚠️ Skipping malformed record: {e}");
                batch.skipped.push(e);
            }
        }
    }

    info!(
        "[Normalizer] 🧹 Normalized {} records ({} skipped)",
        batch.accepted_count(),
        batch.skipped_count()
    );

    batch
}

/// Normalize one raw record. `index` is its position in the source, used for error reports.
pub fn normalize_record(index: usize, record: &Value) -> Result<Transaction, MalformedRecordError> {
    let Value::Object(fields) = record else {
        return Err(MalformedRecordError::NotAnObject { index });
    };

    let record_id = parse_object_id(fields.get(ID_FIELD))
        .map_err(|issue| issue.into_record_error(index, ID_FIELD))?;
    let wallet_address = parse_required_string(fields.get(WALLET_FIELD))
        .map_err(|issue| issue.into_record_error(index, WALLET_FIELD))?;
    let tx_hash = parse_optional_string(fields.get(TX_HASH_FIELD));
    if tx_hash.is_none() {
        debug!("[Normalizer] Record #{index} ({wallet_address}) has no transaction hash");
    }

    let timestamp = parse_timestamp(fields.get(TIMESTAMP_FIELD));
    if timestamp.is_none() {
        debug!("[Normalizer] Record #{index} ({wallet_address}) has no usable timestamp");
    }

    let action_data = fields.get(ACTION_DATA_FIELD).and_then(Value::as_object);

    let tx = NewTransaction {
        record_id,
        wallet_address,
        tx_hash,
        timestamp,
        action: parse_action(fields.get(ACTION_FIELD)),
        amount: parse_decimal(detail(action_data, AMOUNT_FIELD)),
        asset_symbol: parse_symbol(detail(action_data, ASSET_SYMBOL_FIELD)),
        asset_price_usd: parse_decimal(detail(action_data, ASSET_PRICE_FIELD)),
        network: parse_optional_string(fields.get(NETWORK_FIELD)),
        protocol: parse_optional_string(fields.get(PROTOCOL_FIELD)),
        block_number: parse_optional_i64(fields.get(BLOCK_NUMBER_FIELD)),
        created_at: parse_timestamp(fields.get(CREATED_AT_FIELD)),
        updated_at: parse_timestamp(fields.get(UPDATED_AT_FIELD)),
    };

    Ok(Transaction::new(tx))
}

fn detail<'a>(action_data: Option<&'a Map<String, Value>>, name: &str) -> Option<&'a Value> {
    action_data.and_then(|data| data.get(name))
}
