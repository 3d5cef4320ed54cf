// ==========================================
// Vegetation Cut - domain layer
// ==========================================
// Entities and value types only
// No persistence, no engine logic
// ==========================================

pub mod area;
pub mod cut;
pub mod types;

pub use area::{AreaConfig, ColorScale, DashboardConfig, SeasonCalendar};
pub use cut::{
    CutRecord, DerivedStatus, HistoryReport, HistoryRow, LegendEntry, PriorityReport,
    PriorityRow, UncutArea,
};
pub use types::{CutStatus, Machine, Period};
