use core_types::PredictabilityLeaf;
use core_types::decode::optional_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The inputs of the predictability chain. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictabilitySignals {
    /// DCF implied growth over the current enterprise value.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub ev_growth: Option<Decimal>,
    /// Sell-side operations in the company's sector.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub nsellside: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub nsellside_p50: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub ceo_age: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub revenue: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub edamargin: Option<Decimal>,
    /// The sector's 75th percentile EBITDA margin.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub edamargin_p75: Option<Decimal>,
}

/// The outcome of the chain and the steps that led to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictabilityResult {
    pub leaf_value: PredictabilityLeaf,
    pub category: String,
    pub decision_path: Vec<String>,
}
