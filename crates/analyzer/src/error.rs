use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyzerError {
    #[error("Valuation setup error: {0}")]
    Valuation(#[from] valuation::ValuationError),

    /// A batch item that does not decode as a company record.
    #[error("Malformed company record: {0}")]
    Malformed(String),

    /// The DCF could not produce a figure the summary needs.
    #[error("'{company}' cannot be classified: {field} is undefined")]
    Undefined {
        company: String,
        field: &'static str,
    },
}
