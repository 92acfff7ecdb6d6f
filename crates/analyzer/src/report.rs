use analytics::{MetricsResult, PercentileRank, SectorPercentiles};
use core_types::{CategoryCode, CompanyRecord, FinancialStatement, GrowthClass, Metric, SectorParameters, SectorPercentileRow};
use core_types::decode::optional_decimal;
use predictability::PredictabilityResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use valuation::ValuationResult;

/// One company as supplied for a full analysis: the record itself plus the
/// figures that live outside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInput {
    #[serde(flatten)]
    pub record: CompanyRecord,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub ceo_age: Option<Decimal>,
    /// Yearly statements, used for `fx`.
    #[serde(default)]
    pub statements: Vec<FinancialStatement>,
}

/// The reference tables the frames look sectors up in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorTables {
    #[serde(default)]
    pub parameters: Vec<SectorParameters>,
    #[serde(default)]
    pub percentiles: Vec<SectorPercentileRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub company: Option<String>,
    pub category_code: Option<CategoryCode>,
    pub metrics: MetricsResult,
    /// `None` when the sector is not in the percentile table.
    pub sector_percentiles: Option<SectorPercentiles>,
    pub positions: BTreeMap<Metric, PercentileRank>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub company: Option<String>,
    pub valuation: ValuationResult,
    /// Absent when the implied growth could not be computed.
    pub classification: Option<GrowthClass>,
}

/// All three frames for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    pub metrics: MetricsReport,
    pub valuation: ValuationReport,
    pub predictability: PredictabilityResult,
}
