use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValuationError {
    #[error("Projection horizon must be at least one year, got {0}.")]
    InvalidHorizon(usize),

    #[error("Growth bands are inverted: good deal from {good_deal_floor}, top pick from {top_pick_floor}.")]
    InvertedGrowthBands {
        good_deal_floor: Decimal,
        top_pick_floor: Decimal,
    },
}
