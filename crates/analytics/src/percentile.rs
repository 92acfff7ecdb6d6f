use core_types::{CategoryCode, Metric, PercentilePosition, SectorPercentileRow, first_match};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Five-point percentile boundaries of one metric within a sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileBands {
    pub p10: Option<Decimal>,
    pub p25: Option<Decimal>,
    pub p50: Option<Decimal>,
    pub p75: Option<Decimal>,
    pub p90: Option<Decimal>,
}

impl PercentileBands {
    /// Each upper boundary paired with the band that lies below it, ascending.
    fn upper_bounds(&self) -> [(Option<Decimal>, PercentilePosition); 5] {
        [
            (self.p10, PercentilePosition::BelowP10),
            (self.p25, PercentilePosition::P10ToP25),
            (self.p50, PercentilePosition::P25ToP50),
            (self.p75, PercentilePosition::P50ToP75),
            (self.p90, PercentilePosition::P75ToP90),
        ]
    }

    /// The boundaries as `"p10 | p25 | p50 | p75 | p90"` with four decimals.
    pub fn display_range(&self) -> String {
        [self.p10, self.p25, self.p50, self.p75, self.p90]
            .iter()
            .map(|bound| match bound {
                Some(value) => format!(
                    "{:.4}",
                    value.round_dp_with_strategy(4, RoundingStrategy::MidpointNearestEven)
                ),
                None => "N/A".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A sector's percentile bands for every benchmarked metric, plus the sector's
/// sell-side activity figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorPercentiles {
    pub ltde: PercentileBands,
    pub edamargin: PercentileBands,
    pub fx: PercentileBands,
    pub nsellside: Option<Decimal>,
    pub nsellside_p50: Option<Decimal>,
}

impl SectorPercentiles {
    pub fn bands(&self, metric: Metric) -> &PercentileBands {
        match metric {
            Metric::Ltde => &self.ltde,
            Metric::Edamargin => &self.edamargin,
            Metric::Fx => &self.fx,
        }
    }
}

impl From<&SectorPercentileRow> for SectorPercentiles {
    fn from(row: &SectorPercentileRow) -> Self {
        Self {
            ltde: PercentileBands {
                p10: row.ltde_p10,
                p25: row.ltde_p25,
                p50: row.ltde_p50,
                p75: row.ltde_p75,
                p90: row.ltde_p90,
            },
            edamargin: PercentileBands {
                p10: row.edamargin_p10,
                p25: row.edamargin_p25,
                p50: row.edamargin_p50,
                p75: row.edamargin_p75,
                p90: row.edamargin_p90,
            },
            fx: PercentileBands {
                p10: row.fx_p10,
                p25: row.fx_p25,
                p50: row.fx_p50,
                p75: row.fx_p75,
                p90: row.fx_p90,
            },
            nsellside: row.nsellside,
            nsellside_p50: row.nsellside_p50,
        }
    }
}

/// Finds a sector's row in the percentile table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorPercentileLookup;

impl SectorPercentileLookup {
    pub fn new() -> Self {
        Self
    }

    /// Returns the bands of the first row whose code equals `code`, or `None`
    /// when the sector is not in the table.
    pub fn lookup(&self, code: &CategoryCode, table: &[SectorPercentileRow]) -> Option<SectorPercentiles> {
        let found = first_match(table, code).map(SectorPercentiles::from);
        if found.is_none() {
            tracing::debug!(category_code = %code, "No percentile row for sector.");
        }
        found
    }
}

/// The placement of one metric value within its sector distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PercentileRank {
    Ranked {
        position: PercentilePosition,
        rank: String,
        range: String,
    },
    /// The metric value itself was missing.
    NotApplicable,
}

impl PercentileRank {
    pub fn position(&self) -> Option<PercentilePosition> {
        match self {
            PercentileRank::Ranked { position, .. } => Some(*position),
            PercentileRank::NotApplicable => None,
        }
    }
}

/// Places a value within percentile bands.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileRanker;

impl PercentileRanker {
    pub fn new() -> Self {
        Self
    }

    /// Walks the boundaries in ascending order and stops at the first one the
    /// value is strictly below. A value equal to a boundary therefore lands in
    /// the band above it.
    ///
    /// A missing boundary never matches, so the walk moves on to the next one;
    /// with every boundary missing the value ends up above P90.
    pub fn rank(&self, value: Option<Decimal>, bands: &PercentileBands) -> PercentileRank {
        let Some(value) = value else {
            return PercentileRank::NotApplicable;
        };

        let position = bands
            .upper_bounds()
            .into_iter()
            .find(|(bound, _)| bound.is_some_and(|bound| value < bound))
            .map(|(_, position)| position)
            .unwrap_or(PercentilePosition::AboveP90);

        PercentileRank::Ranked {
            position,
            rank: position.rank().to_string(),
            range: bands.display_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bands() -> PercentileBands {
        PercentileBands {
            p10: Some(dec!(1)),
            p25: Some(dec!(2)),
            p50: Some(dec!(3)),
            p75: Some(dec!(4)),
            p90: Some(dec!(5)),
        }
    }

    fn position_of(value: Decimal) -> PercentilePosition {
        PercentileRanker::new().rank(Some(value), &bands()).position().unwrap()
    }

    #[test]
    fn value_on_median_lands_in_upper_band() {
        let rank = PercentileRanker::new().rank(Some(dec!(3)), &bands());
        assert_eq!(
            rank,
            PercentileRank::Ranked {
                position: PercentilePosition::P50ToP75,
                rank: "Q3 (Above Median)".to_string(),
                range: "1.0000 | 2.0000 | 3.0000 | 4.0000 | 5.0000".to_string(),
            }
        );
    }

    #[test]
    fn every_band_is_reachable() {
        assert_eq!(position_of(dec!(0.5)), PercentilePosition::BelowP10);
        assert_eq!(position_of(dec!(1)), PercentilePosition::P10ToP25);
        assert_eq!(position_of(dec!(2.5)), PercentilePosition::P25ToP50);
        assert_eq!(position_of(dec!(3.999)), PercentilePosition::P50ToP75);
        assert_eq!(position_of(dec!(4)), PercentilePosition::P75ToP90);
        assert_eq!(position_of(dec!(5)), PercentilePosition::AboveP90);
        assert_eq!(position_of(dec!(500)), PercentilePosition::AboveP90);
    }

    #[test]
    fn missing_value_is_not_applicable() {
        assert_eq!(PercentileRanker::new().rank(None, &bands()), PercentileRank::NotApplicable);
    }

    #[test]
    fn missing_boundaries_are_skipped() {
        let partial = PercentileBands { p10: None, p25: None, ..bands() };
        let rank = PercentileRanker::new().rank(Some(dec!(0.5)), &partial);
        assert_eq!(rank.position(), Some(PercentilePosition::P25ToP50));

        let empty = PercentileRanker::new().rank(Some(dec!(0.5)), &PercentileBands::default());
        assert_eq!(empty.position(), Some(PercentilePosition::AboveP90));
    }

    #[test]
    fn range_marks_missing_boundaries() {
        let partial = PercentileBands { p90: None, ..bands() };
        assert_eq!(partial.display_range(), "1.0000 | 2.0000 | 3.0000 | 4.0000 | N/A");
    }

    #[test]
    fn range_rounds_half_to_even() {
        let tight = PercentileBands {
            p10: Some(dec!(0.00005)),
            p25: Some(dec!(0.00015)),
            p50: Some(dec!(0.123456)),
            ..bands()
        };
        assert_eq!(tight.display_range(), "0.0000 | 0.0002 | 0.1235 | 4.0000 | 5.0000");
    }

    #[test]
    fn rank_serializes_with_status_tag() {
        let rank = PercentileRanker::new().rank(Some(dec!(2.5)), &bands());
        let json = serde_json::to_value(&rank).unwrap();
        assert_eq!(json["status"], "ranked");
        assert_eq!(json["position"], "P25-P50");
        assert_eq!(json["rank"], "Q2 (Below Median)");

        let back: PercentileRank = serde_json::from_value(json).unwrap();
        assert_eq!(back, rank);

        let bands_json = serde_json::to_string(&bands()).unwrap();
        assert_eq!(serde_json::from_str::<PercentileBands>(&bands_json).unwrap(), bands());

        let missing = serde_json::to_value(PercentileRank::NotApplicable).unwrap();
        assert_eq!(missing["status"], "not_applicable");
    }

    fn row(code: &str) -> SectorPercentileRow {
        SectorPercentileRow {
            category_code: Some(CategoryCode::from(code)),
            edamargin_p75: Some(dec!(0.18)),
            nsellside: Some(dec!(4)),
            nsellside_p50: Some(dec!(6)),
            ..Default::default()
        }
    }

    #[test]
    fn lookup_extracts_matching_row() {
        let table = vec![row("B"), row("A")];
        let found = SectorPercentileLookup::new().lookup(&CategoryCode::from("A"), &table).unwrap();
        assert_eq!(found.bands(Metric::Edamargin).p75, Some(dec!(0.18)));
        assert_eq!(found.nsellside, Some(dec!(4)));
        assert_eq!(found.nsellside_p50, Some(dec!(6)));
        assert_eq!(found.ltde, PercentileBands::default());
    }

    #[test]
    fn lookup_misses_unknown_sector() {
        let table = vec![row("A")];
        assert!(SectorPercentileLookup::new().lookup(&CategoryCode::from("a"), &table).is_none());
    }
}
