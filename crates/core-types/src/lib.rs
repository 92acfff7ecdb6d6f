//! # Incrolink Core Types
//!
//! Layer 0 vocabulary shared by every calculator: the input records supplied by
//! the data collaborators, the canonical sector key, and the small enums that
//! appear in the result records.
//!
//! Every numeric input field is an `Option<Decimal>`. A field that is absent,
//! null or not a number decodes to `None`, which is how "missing" is spelled
//! throughout the workspace.

pub mod decode;
pub mod enums;
pub mod error;
pub mod lookup;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{GrowthClass, Metric, PercentilePosition, PredictabilityLeaf};
pub use error::CoreError;
pub use lookup::{CategoryKeyed, first_match};
pub use structs::{CategoryCode, CompanyRecord, FinancialStatement, SectorParameters, SectorPercentileRow};
