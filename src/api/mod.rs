// ==========================================
// Vegetation Cut - API layer
// ==========================================
// Entry points used by the CLI (and any future front end)
// ==========================================

pub mod config_api;
pub mod dashboard_api;
pub mod error;

pub use config_api::ConfigApi;
pub use dashboard_api::{DashboardApi, HistoryView, PriorityView, LEGEND_STEP_DAYS};
pub use error::{ApiError, ApiResult};
