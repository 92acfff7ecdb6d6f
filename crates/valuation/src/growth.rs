use crate::error::ValuationError;
use configuration::GrowthThresholds;
use core_types::GrowthClass;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maps DCF implied growth to a deal-quality label using half-open bands.
#[derive(Debug, Clone)]
pub struct GrowthClassifier {
    good_deal_floor: Decimal,
    top_pick_floor: Decimal,
}

impl GrowthClassifier {
    pub fn new(thresholds: &GrowthThresholds) -> Result<Self, ValuationError> {
        if thresholds.good_deal_floor > thresholds.top_pick_floor {
            return Err(ValuationError::InvertedGrowthBands {
                good_deal_floor: thresholds.good_deal_floor,
                top_pick_floor: thresholds.top_pick_floor,
            });
        }
        Ok(Self {
            good_deal_floor: thresholds.good_deal_floor,
            top_pick_floor: thresholds.top_pick_floor,
        })
    }

    /// `< 0` is overvalued, `[0, 0.20)` a good deal, `>= 0.20` a top pick
    /// (with the default thresholds). Lower bounds are inclusive.
    pub fn classify(&self, growth: Decimal) -> GrowthClass {
        if growth < self.good_deal_floor {
            GrowthClass::BitOvervalued
        } else if growth < self.top_pick_floor {
            GrowthClass::GoodDeal
        } else {
            GrowthClass::TopPick
        }
    }
}

impl Default for GrowthClassifier {
    fn default() -> Self {
        Self {
            good_deal_floor: Decimal::ZERO,
            top_pick_floor: dec!(0.20),
        }
    }
}
