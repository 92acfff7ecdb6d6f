use crate::error::ConfigError;
use core_types::PredictabilityLeaf;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the engine and its host.
///
/// Built once at startup and handed to the calculators by reference; nothing
/// in the engine reads process-wide state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub valuation: ValuationSettings,
    pub growth: GrowthThresholds,
    pub predictability: PredictabilityRules,
    pub batch: BatchSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the DCF projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValuationSettings {
    /// Number of explicitly projected years before the terminal value.
    pub projection_years: usize,
}

/// Lower bounds of the deal-quality bands. Each bound is inclusive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrowthThresholds {
    /// Growth at or above this is at least a "Good Deal".
    pub good_deal_floor: Decimal,
    /// Growth at or above this is a "Top Pick".
    pub top_pick_floor: Decimal,
}

/// Thresholds for the predictability decision chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictabilityRules {
    /// EV growth below this ends the chain at the low-growth leaf.
    pub ev_growth_floor: Decimal,
    /// A CEO younger than this is considered too young.
    pub ceo_age_ceiling: Decimal,
    /// Revenue below this is considered too small.
    pub revenue_floor: Decimal,
    pub labels: CategoryLabels,
}

/// Human-readable description for each predictability leaf.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryLabels {
    pub low_growth: String,
    pub low_sell_side: String,
    pub young_management: String,
    pub small_revenue: String,
    pub weak_margins: String,
    pub optimal: String,
}

/// Batch execution options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Evaluate batch items one after another instead of on the rayon pool.
    pub sequential: bool,
}

/// Log output options for the host process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Config {
    /// Rejects settings that would make the calculators meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.valuation.projection_years == 0 {
            return Err(ConfigError::ValidationError(
                "valuation.projection_years must be at least 1".to_string(),
            ));
        }
        if self.growth.good_deal_floor > self.growth.top_pick_floor {
            return Err(ConfigError::ValidationError(format!(
                "growth.good_deal_floor ({}) must not exceed growth.top_pick_floor ({})",
                self.growth.good_deal_floor, self.growth.top_pick_floor
            )));
        }
        if self.predictability.revenue_floor.is_sign_negative() {
            return Err(ConfigError::ValidationError(
                "predictability.revenue_floor must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl CategoryLabels {
    pub fn description(&self, leaf: PredictabilityLeaf) -> &str {
        match leaf {
            PredictabilityLeaf::LowGrowth => &self.low_growth,
            PredictabilityLeaf::LowSellSide => &self.low_sell_side,
            PredictabilityLeaf::YoungManagement => &self.young_management,
            PredictabilityLeaf::SmallRevenue => &self.small_revenue,
            PredictabilityLeaf::WeakMargins => &self.weak_margins,
            PredictabilityLeaf::Optimal => &self.optimal,
        }
    }
}

// --- Default Implementations ---
// A missing config.toml, or a missing section in it, falls back to the
// standard thresholds below.

impl Default for ValuationSettings {
    fn default() -> Self {
        Self { projection_years: 5 }
    }
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self {
            good_deal_floor: Decimal::ZERO,
            top_pick_floor: dec!(0.20),
        }
    }
}

impl Default for PredictabilityRules {
    fn default() -> Self {
        Self {
            ev_growth_floor: dec!(0.15),
            ceo_age_ceiling: dec!(60),
            revenue_floor: dec!(90000000),
            labels: CategoryLabels::default(),
        }
    }
}

impl Default for CategoryLabels {
    fn default() -> Self {
        let text = |leaf: PredictabilityLeaf| leaf.canonical_description().to_string();
        Self {
            low_growth: text(PredictabilityLeaf::LowGrowth),
            low_sell_side: text(PredictabilityLeaf::LowSellSide),
            young_management: text(PredictabilityLeaf::YoungManagement),
            small_revenue: text(PredictabilityLeaf::SmallRevenue),
            weak_margins: text(PredictabilityLeaf::WeakMargins),
            optimal: text(PredictabilityLeaf::Optimal),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "incrolink.log".to_string(),
        }
    }
}
