// ==========================================
// Vegetation Cut - export layer
// ==========================================
// CSV output: priority report, cut history, input template
// Headers follow the active locale
// ==========================================

pub mod error;
pub mod report_exporter;

pub use error::{ExportError, ExportResult};
pub use report_exporter::{
    history_headers, priority_headers, write_cut_template, write_history_csv, write_priority_csv,
    TEMPLATE_SAMPLE_DATE,
};
