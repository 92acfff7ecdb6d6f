//! # Incrolink Sector Analytics
//!
//! Sector-relative benchmarking of a single company: the financial ratios
//! (`ltde`, `edamargin`, `fx`), the sector's percentile bands for each ratio, and
//! the band a company's ratio falls into.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `MetricsCalculator`, `SectorPercentileLookup` and
//!   `PercentileRanker` hold no state. Sector tables are passed in by the caller.
//!
//! ## Public API
//!
//! - `MetricsCalculator` / `MetricsResult`: ratio derivation for one company.
//! - `SectorPercentileLookup` / `SectorPercentiles`: a sector's bands by category code.
//! - `PercentileRanker` / `PercentileRank`: band placement of one value.

// Declare the modules that constitute this crate.
pub mod metrics;
pub mod percentile;

// Re-export the key components to create a clean, public-facing API.
pub use metrics::{MetricsCalculator, MetricsResult};
pub use percentile::{
    PercentileBands, PercentileRank, PercentileRanker, SectorPercentileLookup, SectorPercentiles,
};
