// ==========================================
// Vegetation Cut - cut date importer
// ==========================================
// Input: CSV / Excel with columns `area` and `data_corte`
// Output: validated CutRecords + rejected rows with reasons
// ==========================================
// Bad rows are dropped and counted, never coerced.
// The largest valid subset is always returned.
// ==========================================

use crate::domain::cut::CutRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, FileParser, ParsedSheet, UniversalFileParser};
use crate::importer::value_parser::{parse_area_id, parse_cut_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Required input columns
pub const AREA_COLUMN: &str = "area";
pub const CUT_DATE_COLUMN: &str = "data_corte";

// ==========================================
// Row rejection
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Missing, non-numeric or outside `1..=area_count`
    InvalidAreaId { value: String },
    /// Missing or not a recognizable date
    UnparseableDate { value: String },
    /// Cut date later than the import day
    FutureCutDate { date: NaiveDate },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InvalidAreaId { value } => write!(f, "invalid area id '{}'", value),
            RejectReason::UnparseableDate { value } => write!(f, "unparseable date '{}'", value),
            RejectReason::FutureCutDate { date } => write!(f, "cut date {} is in the future", date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize,
    pub reason: RejectReason,
}

// ==========================================
// Import report
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutImportReport {
    pub batch_id: String,
    pub total_rows: usize,
    pub records: Vec<CutRecord>,
    pub rejected: Vec<RowRejection>,
}

impl CutImportReport {
    pub fn accepted_count(&self) -> usize {
        self.records.len()
    }

    pub fn dropped_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn has_drops(&self) -> bool {
        !self.rejected.is_empty()
    }
}

// ==========================================
// CutImporter
// ==========================================
pub struct CutImporter {
    area_count: u32,
}

impl CutImporter {
    /// # Arguments
    /// - area_count: number of configured areas (valid ids are `1..=area_count`)
    pub fn new(area_count: u32) -> Self {
        Self { area_count }
    }

    /// Import a `.csv`, `.xlsx` or `.xls` file
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        today: NaiveDate,
    ) -> ImportResult<CutImportReport> {
        let sheet = UniversalFileParser.parse_file(file_path.as_ref())?;
        self.import_sheet(sheet, today)
    }

    /// Import CSV content from a reader (e.g. uploaded bytes)
    pub fn import_csv_reader<R: Read>(
        &self,
        reader: R,
        today: NaiveDate,
    ) -> ImportResult<CutImportReport> {
        let sheet = CsvParser.parse_reader(reader)?;
        self.import_sheet(sheet, today)
    }

    /// Validate an already parsed sheet
    pub fn import_sheet(&self, sheet: ParsedSheet, today: NaiveDate) -> ImportResult<CutImportReport> {
        for column in [AREA_COLUMN, CUT_DATE_COLUMN] {
            if !sheet.has_column(column) {
                return Err(ImportError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let total_rows = sheet.rows.len();
        let mut records = Vec::with_capacity(total_rows);
        let mut rejected = Vec::new();

        for (row_number, row) in &sheet.rows {
            let area_raw = row.get(AREA_COLUMN).map(String::as_str).unwrap_or("");
            let date_raw = row.get(CUT_DATE_COLUMN).map(String::as_str).unwrap_or("");

            match self.validate_row(area_raw, date_raw, today) {
                Ok((area_id, cut_date)) => {
                    records.push(CutRecord::new(area_id, cut_date, *row_number));
                }
                Err(reason) => rejected.push(RowRejection {
                    row_number: *row_number,
                    reason,
                }),
            }
        }

        let report = CutImportReport {
            batch_id: Uuid::new_v4().to_string(),
            total_rows,
            records,
            rejected,
        };

        if report.has_drops() {
            warn!(
                batch_id = %report.batch_id,
                dropped = report.dropped_count(),
                total = total_rows,
                "some rows were invalid and have been dropped"
            );
        }
        info!(
            batch_id = %report.batch_id,
            accepted = report.accepted_count(),
            "cut import finished"
        );

        Ok(report)
    }

    fn validate_row(
        &self,
        area_raw: &str,
        date_raw: &str,
        today: NaiveDate,
    ) -> Result<(u32, NaiveDate), RejectReason> {
        let area_id = parse_area_id(area_raw)
            .filter(|id| *id <= self.area_count)
            .ok_or_else(|| RejectReason::InvalidAreaId {
                value: area_raw.to_string(),
            })?;

        let cut_date = parse_cut_date(date_raw).ok_or_else(|| RejectReason::UnparseableDate {
            value: date_raw.to_string(),
        })?;

        if cut_date > today {
            return Err(RejectReason::FutureCutDate { date: cut_date });
        }

        Ok((area_id, cut_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_import_valid_rows() {
        let csv = "area,data_corte\n1,2025-03-01\n2,01/02/2025\n";
        let report = CutImporter::new(35)
            .import_csv_reader(csv.as_bytes(), today())
            .unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.accepted_count(), 2);
        assert!(!report.has_drops());
        assert_eq!(report.records[1].area_id, 2);
        assert_eq!(
            report.records[1].cut_date,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_import_drops_invalid_rows_and_reports_them() {
        let csv = "area,data_corte\n\
                   1,2025-03-01\n\
                   36,2025-03-01\n\
                   abc,2025-03-01\n\
                   3,not-a-date\n\
                   4,2025-03-20\n\
                   5,\n";
        let report = CutImporter::new(35)
            .import_csv_reader(csv.as_bytes(), today())
            .unwrap();

        assert_eq!(report.total_rows, 6);
        assert_eq!(report.accepted_count(), 1);
        assert_eq!(report.dropped_count(), 5);

        let reasons: Vec<&RejectReason> = report.rejected.iter().map(|r| &r.reason).collect();
        assert_eq!(
            reasons[0],
            &RejectReason::InvalidAreaId {
                value: "36".to_string()
            }
        );
        assert!(matches!(reasons[1], RejectReason::InvalidAreaId { .. }));
        assert!(matches!(reasons[2], RejectReason::UnparseableDate { .. }));
        assert!(matches!(reasons[3], RejectReason::FutureCutDate { .. }));
        assert!(matches!(reasons[4], RejectReason::UnparseableDate { .. }));
        assert_eq!(report.rejected[0].row_number, 2);
    }

    #[test]
    fn test_import_cut_today_is_accepted() {
        let csv = "area,data_corte\n7,2025-03-15\n";
        let report = CutImporter::new(35)
            .import_csv_reader(csv.as_bytes(), today())
            .unwrap();
        assert_eq!(report.accepted_count(), 1);
    }

    #[test]
    fn test_import_missing_column_is_fatal() {
        let csv = "area,date\n1,2025-03-01\n";
        let result = CutImporter::new(35).import_csv_reader(csv.as_bytes(), today());

        match result {
            Err(ImportError::MissingColumn { column }) => assert_eq!(column, "data_corte"),
            other => panic!("expected MissingColumn, got {:?}", other.map(|r| r.total_rows)),
        }
    }

    #[test]
    fn test_import_header_only() {
        let csv = "area,data_corte\n";
        let report = CutImporter::new(35)
            .import_csv_reader(csv.as_bytes(), today())
            .unwrap();
        assert_eq!(report.total_rows, 0);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_reject_reason_display() {
        let reason = RejectReason::InvalidAreaId {
            value: "99".to_string(),
        };
        assert_eq!(reason.to_string(), "invalid area id '99'");
    }
}
