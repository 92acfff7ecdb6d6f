use crate::signals::{PredictabilityResult, PredictabilitySignals};
use configuration::PredictabilityRules;
use core_types::PredictabilityLeaf;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Evaluates the predictability rules in a fixed order.
///
/// 1. EV growth below the floor: low growth.
/// 2. Sector sell-side activity below its median: low sell side.
/// 3. CEO younger than the ceiling: management too young.
/// 4. Revenue below the floor: too small.
/// 5. Margin below the sector's 75th percentile: weak margins.
/// 6. Otherwise: optimal.
///
/// Every evaluated rule adds a line to the decision path before its test runs.
#[derive(Debug, Clone, Default)]
pub struct PredictabilityClassifier {
    rules: PredictabilityRules,
}

impl PredictabilityClassifier {
    pub fn new(rules: PredictabilityRules) -> Self {
        Self { rules }
    }

    pub fn classify(&self, signals: &PredictabilitySignals) -> PredictabilityResult {
        let mut path = Vec::with_capacity(5);

        path.push(format!("EV Growth: {}", percent(signals.ev_growth)));
        if is_below(signals.ev_growth, Some(self.rules.ev_growth_floor)) {
            return self.conclude(PredictabilityLeaf::LowGrowth, path);
        }

        path.push(format!(
            "N Sell Side: {} vs P50: {}",
            plain(signals.nsellside),
            plain(signals.nsellside_p50)
        ));
        if is_below(signals.nsellside, signals.nsellside_p50) {
            return self.conclude(PredictabilityLeaf::LowSellSide, path);
        }

        path.push(format!("CEO Age: {}", plain(signals.ceo_age)));
        if is_below(signals.ceo_age, Some(self.rules.ceo_age_ceiling)) {
            return self.conclude(PredictabilityLeaf::YoungManagement, path);
        }

        path.push(format!("Revenue: €{}", grouped(signals.revenue)));
        if is_below(signals.revenue, Some(self.rules.revenue_floor)) {
            return self.conclude(PredictabilityLeaf::SmallRevenue, path);
        }

        path.push(format!(
            "EDAMARGIN: {} vs P75: {}",
            fixed4(signals.edamargin),
            fixed4(signals.edamargin_p75)
        ));
        if is_below(signals.edamargin, signals.edamargin_p75) {
            return self.conclude(PredictabilityLeaf::WeakMargins, path);
        }

        self.conclude(PredictabilityLeaf::Optimal, path)
    }

    fn conclude(&self, leaf: PredictabilityLeaf, decision_path: Vec<String>) -> PredictabilityResult {
        tracing::debug!(leaf = leaf.code(), steps = decision_path.len(), "Predictability classified.");
        PredictabilityResult {
            leaf_value: leaf,
            category: self.rules.labels.description(leaf).to_string(),
            decision_path,
        }
    }
}

/// Strict `value < bound`. A missing side makes the comparison false, which
/// skips the rule instead of matching it.
fn is_below(value: Option<Decimal>, bound: Option<Decimal>) -> bool {
    match (value, bound) {
        (Some(value), Some(bound)) => value < bound,
        _ => false,
    }
}

const MISSING: &str = "N/A";

// Display values round half to even.

fn percent(value: Option<Decimal>) -> String {
    value
        .and_then(|v| v.checked_mul(dec!(100)))
        .map(|v| format!("{:.2}%", v.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)))
        .unwrap_or_else(|| MISSING.to_string())
}

fn plain(value: Option<Decimal>) -> String {
    value
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn fixed4(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.4}", v.round_dp_with_strategy(4, RoundingStrategy::MidpointNearestEven)))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Whole units with thousands separators, e.g. `90,000,000`.
fn grouped(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return MISSING.to_string();
    };
    let rounded = value.round();
    let digits = rounded.abs().trunc().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PredictabilityClassifier {
        PredictabilityClassifier::default()
    }

    fn strong_company() -> PredictabilitySignals {
        PredictabilitySignals {
            ev_growth: Some(dec!(0.30)),
            nsellside: Some(dec!(8)),
            nsellside_p50: Some(dec!(5)),
            ceo_age: Some(dec!(65)),
            revenue: Some(dec!(100000000)),
            edamargin: Some(dec!(0.30)),
            edamargin_p75: Some(dec!(0.20)),
        }
    }

    #[test]
    fn low_growth_short_circuits_everything() {
        let signals = PredictabilitySignals {
            ev_growth: Some(dec!(0.10)),
            ..PredictabilitySignals::default()
        };
        let result = classifier().classify(&signals);
        assert_eq!(result.leaf_value, PredictabilityLeaf::LowGrowth);
        assert_eq!(result.category, "low growth");
        assert_eq!(result.decision_path, vec!["EV Growth: 10.00%".to_string()]);

        let with_signals = PredictabilitySignals {
            ev_growth: Some(dec!(0.10)),
            ..strong_company()
        };
        assert_eq!(classifier().classify(&with_signals).leaf_value, PredictabilityLeaf::LowGrowth);
    }

    #[test]
    fn missing_data_falls_through_to_optimal() {
        let signals = PredictabilitySignals {
            nsellside: None,
            nsellside_p50: None,
            ..strong_company()
        };
        let result = classifier().classify(&signals);

        assert_eq!(result.leaf_value, PredictabilityLeaf::Optimal);
        assert_eq!(result.category, "optimal conditions");
        assert_eq!(
            result.decision_path,
            vec![
                "EV Growth: 30.00%",
                "N Sell Side: N/A vs P50: N/A",
                "CEO Age: 65",
                "Revenue: €100,000,000",
                "EDAMARGIN: 0.3000 vs P75: 0.2000",
            ]
        );
    }

    #[test]
    fn each_rule_can_end_the_chain() {
        let cases = [
            (
                PredictabilitySignals { nsellside: Some(dec!(3)), ..strong_company() },
                PredictabilityLeaf::LowSellSide,
                2,
            ),
            (
                PredictabilitySignals { ceo_age: Some(dec!(45)), ..strong_company() },
                PredictabilityLeaf::YoungManagement,
                3,
            ),
            (
                PredictabilitySignals { revenue: Some(dec!(89999999)), ..strong_company() },
                PredictabilityLeaf::SmallRevenue,
                4,
            ),
            (
                PredictabilitySignals { edamargin: Some(dec!(0.19)), ..strong_company() },
                PredictabilityLeaf::WeakMargins,
                5,
            ),
            (strong_company(), PredictabilityLeaf::Optimal, 5),
        ];

        for (signals, leaf, steps) in cases {
            let result = classifier().classify(&signals);
            assert_eq!(result.leaf_value, leaf);
            assert_eq!(result.decision_path.len(), steps);
            assert_eq!(result.category, leaf.canonical_description());
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let at_floor = PredictabilitySignals { ev_growth: Some(dec!(0.15)), ..strong_company() };
        assert_ne!(classifier().classify(&at_floor).leaf_value, PredictabilityLeaf::LowGrowth);

        let sixty = PredictabilitySignals { ceo_age: Some(dec!(60)), ..strong_company() };
        assert_ne!(classifier().classify(&sixty).leaf_value, PredictabilityLeaf::YoungManagement);

        let ninety_million = PredictabilitySignals { revenue: Some(dec!(90000000)), ..strong_company() };
        assert_ne!(classifier().classify(&ninety_million).leaf_value, PredictabilityLeaf::SmallRevenue);

        let equal_sell_side = PredictabilitySignals { nsellside: Some(dec!(5)), ..strong_company() };
        assert_ne!(classifier().classify(&equal_sell_side).leaf_value, PredictabilityLeaf::LowSellSide);
    }

    #[test]
    fn one_sided_missing_pair_skips_the_rule() {
        let signals = PredictabilitySignals {
            nsellside: Some(dec!(1)),
            nsellside_p50: None,
            edamargin: Some(dec!(0.01)),
            edamargin_p75: None,
            ..strong_company()
        };
        assert_eq!(classifier().classify(&signals).leaf_value, PredictabilityLeaf::Optimal);
    }

    #[test]
    fn missing_growth_is_not_low_growth() {
        let signals = PredictabilitySignals { ev_growth: None, ..strong_company() };
        let result = classifier().classify(&signals);
        assert_eq!(result.leaf_value, PredictabilityLeaf::Optimal);
        assert_eq!(result.decision_path[0], "EV Growth: N/A");
    }

    #[test]
    fn configured_labels_and_thresholds_apply() {
        let mut rules = PredictabilityRules::default();
        rules.ceo_age_ceiling = dec!(70);
        rules.labels.young_management = "founder still in charge".to_string();

        let result = PredictabilityClassifier::new(rules).classify(&strong_company());
        assert_eq!(result.leaf_value, PredictabilityLeaf::YoungManagement);
        assert_eq!(result.category, "founder still in charge");
    }

    #[test]
    fn signals_decode_from_loose_json() {
        let signals: PredictabilitySignals = serde_json::from_str(
            r#"{"ev_growth": 0.3, "nsellside": null, "ceo_age": "65", "revenue": 100000000}"#,
        )
        .unwrap();
        assert_eq!(signals.ev_growth, Some(dec!(0.3)));
        assert_eq!(signals.nsellside, None);
        assert_eq!(signals.ceo_age, Some(dec!(65)));
        assert_eq!(signals.edamargin_p75, None);
    }

    #[test]
    fn display_rounding_is_half_to_even() {
        assert_eq!(fixed4(Some(dec!(0.12345))), "0.1234");
        assert_eq!(fixed4(Some(dec!(0.12355))), "0.1236");
        assert_eq!(percent(Some(dec!(0.00125))), "0.12%");
        assert_eq!(percent(Some(dec!(0.00135))), "0.14%");
        assert_eq!(percent(Some(dec!(-0.00125))), "-0.12%");
    }

    #[test]
    fn revenue_grouping() {
        assert_eq!(grouped(Some(dec!(999))), "999");
        assert_eq!(grouped(Some(dec!(1000))), "1,000");
        assert_eq!(grouped(Some(dec!(1234567.6))), "1,234,568");
        assert_eq!(grouped(Some(dec!(-45000))), "-45,000");
        assert_eq!(grouped(None), "N/A");
    }
}
