use core_types::{CompanyRecord, FinancialStatement, Metric};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The sector-benchmarked ratios for one company. `None` means the ratio could
/// not be derived from the supplied figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub ltde: Option<Decimal>,
    pub edamargin: Option<Decimal>,
    pub fx: Option<Decimal>,
}

impl MetricsResult {
    pub fn get(&self, metric: Metric) -> Option<Decimal> {
        match metric {
            Metric::Ltde => self.ltde,
            Metric::Edamargin => self.edamargin,
            Metric::Fx => self.fx,
        }
    }

    /// Returns a copy with `fx` replaced by a value sourced from the statements.
    pub fn with_fx(self, fx: Option<Decimal>) -> Self {
        Self { fx, ..self }
    }
}

/// A stateless calculator for the per-company ratios.
///
/// Each ratio is derived independently: a gap in the inputs for one of them
/// never prevents the others from being computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Derives `ltde` and `edamargin` from the company record.
    ///
    /// `fx` is always `None` here; it comes from the financial statements, see
    /// [`MetricsCalculator::fx_from_statements`].
    pub fn calculate(&self, company: &CompanyRecord) -> MetricsResult {
        MetricsResult {
            ltde: long_term_debt_to_equity(company.lt_debt, company.sh_equity),
            edamargin: ebitda_margin(company.ebit, company.d_and_a, company.revenue),
            fx: None,
        }
    }

    /// Cost of employees over operating revenue from the most recent statement
    /// year where both figures are present and revenue is non-zero.
    pub fn fx_from_statements(&self, statements: &[FinancialStatement]) -> Option<Decimal> {
        statements
            .iter()
            .filter_map(|statement| {
                let revenue = statement.operating_revenue.filter(|r| !r.is_zero())?;
                let fx = statement.cost_of_employees?.checked_div(revenue)?;
                Some((statement.year, fx))
            })
            .max_by_key(|(year, _)| *year)
            .map(|(_, fx)| fx)
    }
}

fn long_term_debt_to_equity(lt_debt: Option<Decimal>, sh_equity: Option<Decimal>) -> Option<Decimal> {
    let equity = sh_equity.filter(|e| !e.is_zero())?;
    lt_debt?.checked_div(equity)
}

fn ebitda_margin(
    ebit: Option<Decimal>,
    d_and_a: Option<Decimal>,
    revenue: Option<Decimal>,
) -> Option<Decimal> {
    let revenue = revenue.filter(|r| !r.is_zero())?;
    let ebitda = ebit?.checked_add(d_and_a?)?;
    ebitda.checked_div(revenue)
}
