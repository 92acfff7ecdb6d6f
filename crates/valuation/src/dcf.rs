use crate::error::ValuationError;
use crate::report::{DiscountParameters, ValuationResult};
use configuration::ValuationSettings;
use core_types::{CompanyRecord, SectorParameters, first_match};
use rust_decimal::Decimal;

/// A stateless discounted-cash-flow calculator.
///
/// The only setting is the number of explicitly projected years; everything
/// else comes from the company record and the sector parameter table passed to
/// [`DcfEngine::value`].
#[derive(Debug, Clone)]
pub struct DcfEngine {
    years: usize,
}

impl DcfEngine {
    pub const DEFAULT_YEARS: usize = 5;

    /// Creates an engine projecting `years` years before the terminal value.
    pub fn new(years: usize) -> Result<Self, ValuationError> {
        if years == 0 {
            return Err(ValuationError::InvalidHorizon(years));
        }
        Ok(Self { years })
    }

    pub fn from_settings(settings: &ValuationSettings) -> Result<Self, ValuationError> {
        Self::new(settings.projection_years)
    }

    /// Values `company` with the cost of capital of its sector.
    ///
    /// The steps, in order:
    /// 1. Current EV from the balance sheet.
    /// 2. `{re, rd, wacc, g}` from the first table row with the company's code.
    /// 3. Base free cash flow.
    /// 4. `FCF[n] = FCF0 * (1 + g)^n` for each projected year.
    /// 5. Terminal value on the last projected flow (zero when `wacc == g`).
    /// 6. Discounting at `(1 + wacc)^n`.
    /// 7. DCF enterprise value and the growth it implies over the current EV.
    ///
    /// A figure that cannot be computed is `None`, and so is everything that
    /// depends on it.
    pub fn value(&self, company: &CompanyRecord, sector_params: &[SectorParameters]) -> ValuationResult {
        let ev_current = current_enterprise_value(company);

        let params = match company
            .category_code
            .as_ref()
            .and_then(|code| first_match(sector_params, code))
        {
            Some(row) => DiscountParameters::from(row),
            None => {
                tracing::debug!(
                    company = company.display_name(),
                    category_code = ?company.category_code,
                    "No sector parameters found; DCF figures will be missing."
                );
                DiscountParameters::default()
            }
        };

        let fcf0 = base_free_cash_flow(company);
        let growth_factor = params.g.and_then(|g| Decimal::ONE.checked_add(g));
        let fcfs = compound(fcf0, growth_factor, self.years);

        let terminal_value = terminal_value(fcfs.last().copied().flatten(), params.wacc, params.g);

        let discount_rate = params.wacc.and_then(|wacc| Decimal::ONE.checked_add(wacc));
        let discount_factors = compound(Some(Decimal::ONE), discount_rate, self.years);

        let discounted_fcfs: Vec<Option<Decimal>> = fcfs
            .iter()
            .zip(&discount_factors)
            .map(|(flow, factor)| discount(*flow, *factor))
            .collect();
        let discounted_terminal_value =
            discount(terminal_value, discount_factors.last().copied().flatten());

        let ev_dcf = discounted_fcfs
            .iter()
            .try_fold(Decimal::ZERO, |sum, flow| sum.checked_add((*flow)?))
            .zip(discounted_terminal_value)
            .and_then(|(flows, terminal)| flows.checked_add(terminal));

        let growth_expected = implied_growth(ev_dcf, ev_current);

        ValuationResult {
            ev_current,
            ev_dcf,
            growth_expected,
            category_code: company.category_code.clone(),
            params,
            fcf0,
            fcfs,
            terminal_value,
            discount_factors,
            discounted_fcfs,
            discounted_terminal_value,
            years: self.years,
        }
    }
}

impl Default for DcfEngine {
    fn default() -> Self {
        Self {
            years: Self::DEFAULT_YEARS,
        }
    }
}

fn current_enterprise_value(company: &CompanyRecord) -> Option<Decimal> {
    company
        .sh_equity?
        .checked_add(company.lt_debt?)?
        .checked_add(company.st_debt?)?
        .checked_sub(company.cash?)
}

fn base_free_cash_flow(company: &CompanyRecord) -> Option<Decimal> {
    company
        .net_income?
        .checked_add(company.d_and_a?)?
        .checked_sub(company.capex?)?
        .checked_sub(company.changes_in_wc?)
}

/// `base * factor^n` for n = 1..=years.
fn compound(base: Option<Decimal>, factor: Option<Decimal>, years: usize) -> Vec<Option<Decimal>> {
    let mut current = base;
    (0..years)
        .map(|_| {
            current = current.zip(factor).and_then(|(value, factor)| value.checked_mul(factor));
            current
        })
        .collect()
}

fn terminal_value(last_flow: Option<Decimal>, wacc: Option<Decimal>, g: Option<Decimal>) -> Option<Decimal> {
    let spread = wacc?.checked_sub(g?)?;
    // wacc == g has no finite Gordon value; the model books it as zero.
    if spread.is_zero() {
        return Some(Decimal::ZERO);
    }
    last_flow?.checked_div(spread)
}

fn discount(value: Option<Decimal>, factor: Option<Decimal>) -> Option<Decimal> {
    value?.checked_div(factor?)
}

fn implied_growth(ev_dcf: Option<Decimal>, ev_current: Option<Decimal>) -> Option<Decimal> {
    let current = ev_current.filter(|ev| !ev.is_zero())?;
    ev_dcf?.checked_div(current)?.checked_sub(Decimal::ONE)
}
