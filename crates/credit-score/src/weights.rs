use credit_types::Feature;

/// Direction in which a feature moves the credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Higher values raise the score.
    Positive,
    /// Higher values lower the score.
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeight {
    pub feature: Feature,
    pub polarity: Polarity,
    pub weight: f64,
}

impl FeatureWeight {
    const fn new(feature: Feature, polarity: Polarity, weight: f64) -> Self {
        Self {
            feature,
            polarity,
            weight,
        }
    }
}

pub const FEATURE_WEIGHTS: [FeatureWeight; 8] = [
    FeatureWeight::new(Feature::TotalDepositUsd, Polarity::Positive, 0.25),
    FeatureWeight::new(Feature::RepayCount, Polarity::Positive, 0.20),
    FeatureWeight::new(Feature::NetFlowUsd, Polarity::Positive, 0.15),
    FeatureWeight::new(Feature::ActivityDurationDays, Polarity::Positive, 0.10),
    FeatureWeight::new(Feature::AvgDailyTransactions, Polarity::Positive, 0.05),
    FeatureWeight::new(Feature::BorrowCount, Polarity::Negative, 0.05),
    FeatureWeight::new(Feature::BorrowToRepayRatio, Polarity::Negative, 0.10),
    FeatureWeight::new(Feature::LiquidationFlag, Polarity::Negative, 0.10),
];

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

const fn weights_sum_to_one(table: &[FeatureWeight]) -> bool {
    let mut sum = 0.0;
    let mut i = 0;
    while i < table.len() {
        if table[i].weight < 0.0 {
            return false;
        }
        sum += table[i].weight;
        i += 1;
    }
    let diff = sum - 1.0;
    diff < WEIGHT_SUM_TOLERANCE && diff > -WEIGHT_SUM_TOLERANCE
}

const fn features_are_unique(table: &[FeatureWeight]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if table[i].feature as usize == table[j].feature as usize {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    weights_sum_to_one(&FEATURE_WEIGHTS),
    "feature weights must be non-negative and sum to 1.0"
);
const _: () = assert!(
    features_are_unique(&FEATURE_WEIGHTS),
    "each feature may appear only once in the weight table"
);

pub fn weight_of(feature: Feature) -> Option<&'static FeatureWeight> {
    FEATURE_WEIGHTS.iter().find(|w| w.feature == feature)
}
