pub mod chart_service;
pub mod dashboard_service;
pub mod normalize_service;
pub mod poll_service;
pub mod price_service;
pub mod window_service;
