// ==========================================
// Vegetation Cut - import layer
// ==========================================
// External cut dates → validated CutRecords
// Supports: CSV, Excel
// ==========================================

pub mod cut_importer;
pub mod error;
pub mod file_parser;
pub mod value_parser;

pub use cut_importer::{
    CutImportReport, CutImporter, RejectReason, RowRejection, AREA_COLUMN, CUT_DATE_COLUMN,
};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, ParsedSheet, UniversalFileParser};
