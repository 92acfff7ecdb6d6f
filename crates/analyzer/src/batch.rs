use core_types::GrowthClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The valuation summary of one batch item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSummary {
    /// Position of the company in the submitted list.
    pub index: usize,
    pub company: Option<String>,
    #[serde(rename = "EV_DCF")]
    pub ev_dcf: Decimal,
    pub growth_expected: Decimal,
    pub classification: GrowthClass,
}

/// A batch item that could not be summarised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub company: Option<String>,
    pub reason: String,
}

/// The outcome of a batch run. Both lists keep the input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<DealSummary>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of companies submitted.
    pub fn total(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    /// The summaries carrying `class`, in input order.
    pub fn with_class(&self, class: GrowthClass) -> impl Iterator<Item = &DealSummary> {
        self.results.iter().filter(move |summary| summary.classification == class)
    }
}
