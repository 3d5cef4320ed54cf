// ==========================================
// Vegetation Cut - CSV report exporter
// ==========================================
// Column order is fixed; only header text is localized
// ==========================================

use crate::domain::cut::{HistoryReport, PriorityReport};
use crate::export::error::ExportResult;
use crate::i18n::{machine_label, month_label, period_label, status_label, t};
use crate::importer::cut_importer::{AREA_COLUMN, CUT_DATE_COLUMN};
use csv::Writer;
use std::io::Write;
use tracing::debug;

/// Sample date written into every template row
pub const TEMPLATE_SAMPLE_DATE: &str = "2025-03-01";

/// History dates are written day-first
const HISTORY_DATE_FORMAT: &str = "%d/%m/%Y";

const PRIORITY_HEADER_KEYS: [&str; 7] = [
    "report.column.area_name",
    "report.column.machine",
    "report.column.days_since_cut",
    "report.column.rainy_interval",
    "report.column.dry_interval",
    "report.column.status",
    "report.column.cut_month",
];

const HISTORY_HEADER_KEYS: [&str; 6] = [
    "report.column.area_name",
    "report.column.cut_date",
    "report.column.machine",
    "report.column.days_since_cut",
    "report.column.status",
    "report.column.period",
];

pub fn priority_headers() -> Vec<String> {
    PRIORITY_HEADER_KEYS.iter().map(|k| t(k)).collect()
}

pub fn history_headers() -> Vec<String> {
    HISTORY_HEADER_KEYS.iter().map(|k| t(k)).collect()
}

/// Ranked priority rows, in report order
pub fn write_priority_csv<W: Write>(writer: W, report: &PriorityReport) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(priority_headers())?;

    for row in &report.rows {
        wtr.write_record([
            row.name.clone(),
            machine_label(row.machine),
            row.days_since_cut.to_string(),
            row.rainy_interval_days.to_string(),
            row.dry_interval_days.to_string(),
            status_label(row.status),
            month_label(row.cut_month()),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = report.rows.len(), "priority report exported");
    Ok(())
}

pub fn write_history_csv<W: Write>(writer: W, report: &HistoryReport) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(history_headers())?;

    for row in &report.rows {
        wtr.write_record([
            row.name.clone(),
            row.cut_date.format(HISTORY_DATE_FORMAT).to_string(),
            machine_label(row.machine),
            row.days_since_cut.to_string(),
            status_label(row.status),
            period_label(row.period),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = report.rows.len(), "cut history exported");
    Ok(())
}

/// Empty input file: one row per area with a sample date
pub fn write_cut_template<W: Write>(writer: W, area_count: u32) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([AREA_COLUMN, CUT_DATE_COLUMN])?;
    for area_id in 1..=area_count {
        wtr.write_record([area_id.to_string().as_str(), TEMPLATE_SAMPLE_DATE])?;
    }
    wtr.flush()?;
    Ok(())
}
