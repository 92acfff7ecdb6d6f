use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sector-benchmarked ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Long-term debt over shareholders' equity.
    Ltde,
    /// EBITDA over revenue.
    Edamargin,
    /// Cost of employees over operating revenue.
    Fx,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Ltde, Metric::Edamargin, Metric::Fx];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Ltde => "ltde",
            Metric::Edamargin => "edamargin",
            Metric::Fx => "fx",
        }
    }
}

/// Where a value sits within a sector's five percentile boundaries.
///
/// Variants are declared in ascending order, so `Ord` follows the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PercentilePosition {
    #[serde(rename = "Below P10")]
    BelowP10,
    #[serde(rename = "P10-P25")]
    P10ToP25,
    #[serde(rename = "P25-P50")]
    P25ToP50,
    #[serde(rename = "P50-P75")]
    P50ToP75,
    #[serde(rename = "P75-P90")]
    P75ToP90,
    #[serde(rename = "Above P90")]
    AboveP90,
}

impl PercentilePosition {
    pub fn label(&self) -> &'static str {
        match self {
            PercentilePosition::BelowP10 => "Below P10",
            PercentilePosition::P10ToP25 => "P10-P25",
            PercentilePosition::P25ToP50 => "P25-P50",
            PercentilePosition::P50ToP75 => "P50-P75",
            PercentilePosition::P75ToP90 => "P75-P90",
            PercentilePosition::AboveP90 => "Above P90",
        }
    }

    /// The qualitative rank shown next to the band.
    pub fn rank(&self) -> &'static str {
        match self {
            PercentilePosition::BelowP10 => "Exceptional (Bottom)",
            PercentilePosition::P10ToP25 => "Q1 (Very Low)",
            PercentilePosition::P25ToP50 => "Q2 (Below Median)",
            PercentilePosition::P50ToP75 => "Q3 (Above Median)",
            PercentilePosition::P75ToP90 => "Q4 (High)",
            PercentilePosition::AboveP90 => "Exceptional (Top)",
        }
    }
}

impl fmt::Display for PercentilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deal-quality label derived from the DCF implied growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthClass {
    #[serde(rename = "Bit Overvalued")]
    BitOvervalued,
    #[serde(rename = "Good Deal")]
    GoodDeal,
    #[serde(rename = "Top Pick")]
    TopPick,
}

impl GrowthClass {
    pub fn label(&self) -> &'static str {
        match self {
            GrowthClass::BitOvervalued => "Bit Overvalued",
            GrowthClass::GoodDeal => "Good Deal",
            GrowthClass::TopPick => "Top Pick",
        }
    }
}

impl fmt::Display for GrowthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GrowthClass {
    type Err = CoreError;

    /// Accepts the display label in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "bitovervalued" => Ok(GrowthClass::BitOvervalued),
            "gooddeal" => Ok(GrowthClass::GoodDeal),
            "toppick" => Ok(GrowthClass::TopPick),
            _ => Err(CoreError::InvalidInput("growth class".to_string(), s.to_string())),
        }
    }
}

/// Terminal leaves of the predictability decision chain.
///
/// The serialized form is the fixed leaf code used by downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictabilityLeaf {
    #[serde(rename = "0")]
    LowGrowth,
    #[serde(rename = "0,23")]
    LowSellSide,
    #[serde(rename = "0,43")]
    YoungManagement,
    #[serde(rename = "0,54")]
    SmallRevenue,
    #[serde(rename = "0,65")]
    WeakMargins,
    #[serde(rename = "0,8")]
    Optimal,
}

impl PredictabilityLeaf {
    pub fn code(&self) -> &'static str {
        match self {
            PredictabilityLeaf::LowGrowth => "0",
            PredictabilityLeaf::LowSellSide => "0,23",
            PredictabilityLeaf::YoungManagement => "0,43",
            PredictabilityLeaf::SmallRevenue => "0,54",
            PredictabilityLeaf::WeakMargins => "0,65",
            PredictabilityLeaf::Optimal => "0,8",
        }
    }

    /// The standard category description for this leaf.
    pub fn canonical_description(&self) -> &'static str {
        match self {
            PredictabilityLeaf::LowGrowth => "low growth",
            PredictabilityLeaf::LowSellSide => "good growth, low sell side operations",
            PredictabilityLeaf::YoungManagement => {
                "good financials and sector conditions, but Management too young"
            }
            PredictabilityLeaf::SmallRevenue => {
                "good company and sector conditions, but revenue is too small"
            }
            PredictabilityLeaf::WeakMargins => "optimal conditions, but margins are weak",
            PredictabilityLeaf::Optimal => "optimal conditions",
        }
    }
}

impl fmt::Display for PredictabilityLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_ordered_ascending() {
        assert!(PercentilePosition::BelowP10 < PercentilePosition::P10ToP25);
        assert!(PercentilePosition::P75ToP90 < PercentilePosition::AboveP90);
    }

    #[test]
    fn growth_class_parses_loose_labels() {
        assert_eq!("Top Pick".parse::<GrowthClass>().unwrap(), GrowthClass::TopPick);
        assert_eq!("good-deal".parse::<GrowthClass>().unwrap(), GrowthClass::GoodDeal);
        assert_eq!("BIT_OVERVALUED".parse::<GrowthClass>().unwrap(), GrowthClass::BitOvervalued);
        assert!("bargain".parse::<GrowthClass>().is_err());
    }

    #[test]
    fn leaf_codes_round_trip_through_serde() {
        let json = serde_json::to_string(&PredictabilityLeaf::YoungManagement).unwrap();
        assert_eq!(json, "\"0,43\"");
        let leaf: PredictabilityLeaf = serde_json::from_str("\"0,43\"").unwrap();
        assert_eq!(leaf, PredictabilityLeaf::YoungManagement);
        assert!(serde_json::from_str::<PredictabilityLeaf>("\"0,5\"").is_err());
    }
}
