//! # Incrolink Valuation
//!
//! Discounted-cash-flow valuation of a company against its sector's cost of
//! capital, and the deal-quality label derived from the implied growth.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure calculation over records handed in by the caller.
//!   The sector parameter table is an argument, never a connection.
//! - **Degrade, don't fail:** Missing figures or an unknown sector produce a
//!   `ValuationResult` whose affected fields are `None`. Errors are reserved for
//!   invalid engine construction.
//!
//! ## Public API
//!
//! - `DcfEngine`: the projection, terminal value and discounting.
//! - `ValuationResult`: every intermediate figure of one valuation.
//! - `GrowthClassifier`: maps implied growth to a `GrowthClass`.
//! - `ValuationError`: construction errors.

pub mod dcf;
pub mod error;
pub mod growth;
pub mod report;

pub use dcf::DcfEngine;
pub use error::ValuationError;
pub use growth::GrowthClassifier;
pub use report::{DiscountParameters, ValuationResult};
