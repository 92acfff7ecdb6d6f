use crate::decode::{optional_category_code, optional_decimal, optional_text, optional_year};
use crate::lookup::CategoryKeyed;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical string form of a sector category code.
///
/// Sector tables and company records may type the code differently (text in one,
/// a number in the other), so both sides are coerced to this form before any
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCode(String);

impl CategoryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CategoryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for CategoryCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<Decimal> for CategoryCode {
    fn from(code: Decimal) -> Self {
        Self(code.normalize().to_string())
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot of one company's financials as supplied by the dataset.
///
/// Any field may be missing. Missing and zero are different things here: a
/// company with `sh_equity == Some(0)` reported zero equity, one with `None`
/// reported nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "optional_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub nace: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub ebit: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub employees: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub revenue: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub net_income: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub capex: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub d_and_a: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub changes_in_wc: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub lt_debt: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub st_debt: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub sh_equity: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub capital_equity: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub cash: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_category_code")]
    pub category_code: Option<CategoryCode>,
}

impl CompanyRecord {
    /// The company name for display and log lines.
    pub fn display_name(&self) -> &str {
        self.company.as_deref().unwrap_or("<unnamed>")
    }
}

/// Cost-of-capital parameters for one sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorParameters {
    #[serde(default, deserialize_with = "optional_category_code")]
    pub category_code: Option<CategoryCode>,
    /// Cost of equity.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub re: Option<Decimal>,
    /// Cost of debt.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub rd: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub wacc: Option<Decimal>,
    /// Perpetual growth rate.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub g: Option<Decimal>,
}

impl CategoryKeyed for SectorParameters {
    fn category_code(&self) -> Option<&CategoryCode> {
        self.category_code.as_ref()
    }
}

/// One sector's percentile distribution for the benchmarked ratios.
///
/// Field names on the wire follow the sector spreadsheet columns
/// (`ltde10th`, `edamarg50th`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorPercentileRow {
    #[serde(default, deserialize_with = "optional_category_code")]
    pub category_code: Option<CategoryCode>,

    #[serde(rename = "ltde10th", default, deserialize_with = "optional_decimal")]
    pub ltde_p10: Option<Decimal>,
    #[serde(rename = "ltde25th", default, deserialize_with = "optional_decimal")]
    pub ltde_p25: Option<Decimal>,
    #[serde(rename = "ltde50th", default, deserialize_with = "optional_decimal")]
    pub ltde_p50: Option<Decimal>,
    #[serde(rename = "ltde75th", default, deserialize_with = "optional_decimal")]
    pub ltde_p75: Option<Decimal>,
    #[serde(rename = "ltde90th", default, deserialize_with = "optional_decimal")]
    pub ltde_p90: Option<Decimal>,

    #[serde(rename = "edamarg10th", default, deserialize_with = "optional_decimal")]
    pub edamargin_p10: Option<Decimal>,
    #[serde(rename = "edamarg25th", default, deserialize_with = "optional_decimal")]
    pub edamargin_p25: Option<Decimal>,
    #[serde(rename = "edamarg50th", default, deserialize_with = "optional_decimal")]
    pub edamargin_p50: Option<Decimal>,
    #[serde(rename = "edamarg75th", default, deserialize_with = "optional_decimal")]
    pub edamargin_p75: Option<Decimal>,
    #[serde(rename = "edamarg90th", default, deserialize_with = "optional_decimal")]
    pub edamargin_p90: Option<Decimal>,

    #[serde(rename = "fx10th", default, deserialize_with = "optional_decimal")]
    pub fx_p10: Option<Decimal>,
    #[serde(rename = "fx25th", default, deserialize_with = "optional_decimal")]
    pub fx_p25: Option<Decimal>,
    #[serde(rename = "fx50th", default, deserialize_with = "optional_decimal")]
    pub fx_p50: Option<Decimal>,
    #[serde(rename = "fx75th", default, deserialize_with = "optional_decimal")]
    pub fx_p75: Option<Decimal>,
    #[serde(rename = "fx90th", default, deserialize_with = "optional_decimal")]
    pub fx_p90: Option<Decimal>,

    /// Number of sell-side operations observed in the sector.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub nsellside: Option<Decimal>,
    #[serde(rename = "nsellside50th", default, deserialize_with = "optional_decimal")]
    pub nsellside_p50: Option<Decimal>,
}

impl CategoryKeyed for SectorPercentileRow {
    fn category_code(&self) -> Option<&CategoryCode> {
        self.category_code.as_ref()
    }
}

/// One year of line items from a company's filed financial statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    #[serde(default, deserialize_with = "optional_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub long_term_debt: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub shareholders_funds: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub operating_revenue: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub cost_of_employees: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub ebitda: Option<Decimal>,
}
