//! Chart series models

/// One labelled value of the price chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// ISO-8601 date of the quote
    pub label: String,
    /// Mid price
    pub value: f64,
}
