//! Data models for the gold spot dashboard
//!
//! Canonical quotes, the chart series entries and the bounded buffer that holds them.

pub mod chart;
pub mod price_point;
pub mod rolling_window;

pub use chart::ChartEntry;
pub use price_point::{parse_instant, PerformanceClass, PricePoint};
pub use rolling_window::RollingWindow;
