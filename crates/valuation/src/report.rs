use core_types::{CategoryCode, SectorParameters};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The sector's cost-of-capital figures used for one valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountParameters {
    pub re: Option<Decimal>,
    pub rd: Option<Decimal>,
    pub wacc: Option<Decimal>,
    pub g: Option<Decimal>,
}

impl From<&SectorParameters> for DiscountParameters {
    fn from(row: &SectorParameters) -> Self {
        Self {
            re: row.re,
            rd: row.rd,
            wacc: row.wacc,
            g: row.g,
        }
    }
}

/// The full breakdown of one DCF valuation.
///
/// This struct is the output of the `DcfEngine`. It is rebuilt on every call and
/// keeps every intermediate series so a valuation can be audited line by line.
/// Serialized field names are the ones consumers of the valuation already rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// `sh_equity + lt_debt + st_debt - cash`.
    #[serde(rename = "EV_current")]
    pub ev_current: Option<Decimal>,
    #[serde(rename = "EV_DCF")]
    pub ev_dcf: Option<Decimal>,
    /// `EV_DCF / EV_current - 1`.
    pub growth_expected: Option<Decimal>,
    pub category_code: Option<CategoryCode>,
    pub params: DiscountParameters,

    // Cash-flow projection
    #[serde(rename = "FCF0")]
    pub fcf0: Option<Decimal>,
    #[serde(rename = "FCFs")]
    pub fcfs: Vec<Option<Decimal>>,
    #[serde(rename = "TV")]
    pub terminal_value: Option<Decimal>,

    // Discounting
    pub discount_factors: Vec<Option<Decimal>>,
    #[serde(rename = "discounted_FCFs")]
    pub discounted_fcfs: Vec<Option<Decimal>>,
    #[serde(rename = "discounted_TV")]
    pub discounted_terminal_value: Option<Decimal>,

    pub years: usize,
}
