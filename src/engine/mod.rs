// ==========================================
// Vegetation Cut - engine layer
// ==========================================
// Business rules only: no SQL, no file I/O, no clock reads
// ==========================================

pub mod priority;
pub mod report;
pub mod selection;
pub mod status;

pub use priority::PrioritySorter;
pub use report::ReportBuilder;
pub use selection::{all_cuts_per_area, latest_cut_per_area};
pub use status::StatusEngine;
