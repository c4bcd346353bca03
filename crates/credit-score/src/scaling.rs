//! Population-wide min-max scaling.
//!
//! Every function takes the full column for the batch. Scaling a wallet on its
//! own is meaningless: its value only makes sense against the batch min and max.

use credit_types::{MAX_CREDIT_SCORE, NEUTRAL_CREDIT_SCORE};

/// Scaled value of a positive feature when the batch carries no signal for it.
pub const POSITIVE_FALLBACK: f64 = 0.0;
/// Scaled value of a negative feature when nobody in the batch shows the behavior.
pub const NEGATIVE_FALLBACK: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Min and max of a column, `None` when it is empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let range = rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |range, &v| Self {
                min: range.min.min(v),
                max: range.max.max(v),
            },
        );
        Some(range)
    }

    pub fn spread(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` within the range, in [0, 1].
    fn unit(&self, value: f64) -> f64 {
        ((value - self.min) / self.spread()).clamp(0.0, 1.0)
    }
}

/// Min-max scale a positive feature to [0, 1].
///
/// A column whose max is not above zero, or that has no spread, scales to 0 everywhere.
pub fn scale_positive(values: &[f64]) -> Vec<f64> {
    match ColumnRange::of(values) {
        Some(range) if range.max > 0.0 && range.spread() > 0.0 => {
            values.iter().map(|&v| range.unit(v)).collect()
        }
        _ => vec![POSITIVE_FALLBACK; values.len()],
    }
}

/// Min-max scale a negative feature and invert it, so the highest value maps to 0.
///
/// A column whose max is not above zero, or that has no spread, scales to 1 everywhere.
pub fn scale_negative(values: &[f64]) -> Vec<f64> {
    match ColumnRange::of(values) {
        Some(range) if range.max > 0.0 && range.spread() > 0.0 => {
            values.iter().map(|&v| 1.0 - range.unit(v)).collect()
        }
        _ => vec![NEGATIVE_FALLBACK; values.len()],
    }
}

/// Invert a binary flag column: 1 where the flag is unset, 0 where it is set.
pub fn scale_flag(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if v > 0.0 { 0.0 } else { 1.0 })
        .collect()
}

/// Rescale raw scores onto [0, 1000]. Without any spread every wallet gets 500.
pub fn rescale_scores(raw_scores: &[f64]) -> Vec<f64> {
    match ColumnRange::of(raw_scores) {
        Some(range) if range.spread() > 0.0 => raw_scores
            .iter()
            .map(|&raw| range.unit(raw) * MAX_CREDIT_SCORE)
            .collect(),
        _ => vec![NEUTRAL_CREDIT_SCORE; raw_scores.len()],
    }
}
