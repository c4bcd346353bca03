//! Per-field readers for raw transaction records.
//!
//! Every reader documents its own default. Required fields return a
//! [`FieldIssue`] that the normalizer turns into a [`MalformedRecordError`];
//! optional fields never fail.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde_json::Value;

use credit_types::{ActionType, UNKNOWN_ASSET_SYMBOL};

use crate::error::MalformedRecordError;

pub const OID_WRAPPER: &str = "$oid";
pub const DATE_WRAPPER: &str = "$date";
const NUMBER_LONG_WRAPPER: &str = "$numberLong";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    Invalid(String),
    EmptyWrapper(&'static str),
}

impl FieldIssue {
    pub fn into_record_error(self, index: usize, field: &'static str) -> MalformedRecordError {
        match self {
            Self::Missing => MalformedRecordError::MissingField { index, field },
            Self::Invalid(reason) => MalformedRecordError::InvalidField {
                index,
                field,
                reason,
            },
            Self::EmptyWrapper(wrapper) => MalformedRecordError::EmptyWrapper {
                index,
                field,
                wrapper,
            },
        }
    }
}

/// Identifier stored either as a plain string or as `{"$oid": "..."}`.
///
/// Absent or `null` reads as `Ok(None)`; a wrapper without a string inside is an error.
pub fn parse_object_id(value: Option<&Value>) -> Result<Option<String>, FieldIssue> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(Value::Object(wrapper)) => match wrapper.get(OID_WRAPPER) {
            Some(Value::String(id)) => Ok(Some(id.clone())),
            _ => Err(FieldIssue::EmptyWrapper(OID_WRAPPER)),
        },
        Some(other) => Err(FieldIssue::Invalid(format!(
            "expected a string or an {OID_WRAPPER} wrapper, got {other}"
        ))),
    }
}

/// Non-empty string field. No default: the record is unusable without it.
pub fn parse_required_string(value: Option<&Value>) -> Result<String, FieldIssue> {
    match value {
        None | Some(Value::Null) => Err(FieldIssue::Missing),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(FieldIssue::Invalid("empty string".to_string()))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(FieldIssue::Invalid(format!("expected a string, got {other}"))),
    }
}

/// Point in time given as epoch seconds (number or numeric string), an RFC 3339
/// string, or a `{"$date": ...}` wrapper holding an RFC 3339 string or epoch
/// milliseconds.
///
/// Anything else is unknown (`None`), never "now".
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => n.as_f64().and_then(from_epoch_seconds),
        Value::String(s) => parse_time_string(s),
        Value::Object(wrapper) => match wrapper.get(DATE_WRAPPER)? {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
            Value::Object(long) => match long.get(NUMBER_LONG_WRAPPER)? {
                Value::String(millis) => millis
                    .parse::<i64>()
                    .ok()
                    .and_then(DateTime::<Utc>::from_timestamp_millis),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

fn parse_time_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(seconds) = s.parse::<f64>() {
        return from_epoch_seconds(seconds);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos)
}

/// Non-negative decimal given as a JSON number or a numeric string, including
/// scientific notation. Absent, non-numeric or negative values default to zero.
/// Finite values beyond the `Decimal` range saturate at [`Decimal::MAX`].
pub fn parse_decimal(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::String(s)) => decimal_from_str(s.trim()),
        Some(Value::Number(n)) => decimal_from_str(&n.to_string()),
        _ => None,
    };

    parsed
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
        .or_else(|| decimal_from_f64_saturating(s.parse::<f64>().ok()?))
}

fn decimal_from_f64_saturating(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).or(Some(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }))
}

/// Asset symbol, [`UNKNOWN_ASSET_SYMBOL`] when absent, blank or not a string.
pub fn parse_symbol(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => UNKNOWN_ASSET_SYMBOL.to_string(),
    }
}

/// Action name. A missing or non-string action is an unrecognized (empty) one.
pub fn parse_action(value: Option<&Value>) -> ActionType {
    match value {
        Some(Value::String(s)) => ActionType::parse(s),
        _ => ActionType::Other(String::new()),
    }
}

pub fn parse_optional_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Integer given as a JSON number or numeric string.
pub fn parse_optional_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
