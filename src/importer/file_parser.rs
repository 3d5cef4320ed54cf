// ==========================================
// Vegetation Cut - file parsers
// ==========================================
// Stage 0: read a CSV / Excel file into header + raw rows
// Values are trimmed strings; typing happens in value_parser
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One data row: header → trimmed cell value
pub type RawRow = HashMap<String, String>;

/// Parsed sheet: headers plus (1-based data row number, row)
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, RawRow)>,
}

impl ParsedSheet {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// File parser interface
pub trait FileParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// Headers are compared lowercase; a UTF-8 BOM on the first one is dropped
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// Parse CSV content from any reader (uploaded bytes, files)
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<ParsedSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged rows
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptySheet);
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // skip fully blank rows
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push((row_idx + 1, row_map));
        }

        Ok(ParsedSheet { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel parser (first worksheet)
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.trim().to_string(),
            // serial number; value_parser converts it to a date
            Data::DateTime(dt) => dt.as_f64().to_string(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            other => other.to_string().trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        check_exists(file_path)?;

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or(ImportError::EmptySheet)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| normalize_header(&Self::cell_to_string(cell)))
            .collect();

        let mut rows = Vec::new();
        for (row_idx, data_row) in sheet_rows.enumerate() {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_to_string(cell));
                }
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push((row_idx + 1, row_map));
        }

        Ok(ParsedSheet { headers, rows })
    }
}

// ==========================================
// Universal parser (dispatch on extension)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_file(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_file(file_path),
            "xlsx" | "xls" => ExcelParser.parse_file(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = csv_file(&["area,data_corte", "1,2025-03-01", "2,2025-03-02"]);

        let sheet = CsvParser.parse_file(file.path()).unwrap();

        assert_eq!(sheet.headers, vec!["area", "data_corte"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].0, 1);
        assert_eq!(sheet.rows[0].1.get("area"), Some(&"1".to_string()));
        assert_eq!(sheet.rows[1].1.get("data_corte"), Some(&"2025-03-02".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_file(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skips_blank_rows_and_keeps_numbering() {
        let file = csv_file(&["area,data_corte", "1,2025-03-01", ",", "3,2025-03-03"]);

        let sheet = CsvParser.parse_file(file.path()).unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].0, 3);
    }

    #[test]
    fn test_csv_parser_normalizes_headers() {
        let content = "\u{feff} Area , DATA_CORTE\n1,2025-03-01\n";
        let sheet = CsvParser.parse_reader(content.as_bytes()).unwrap();
        assert!(sheet.has_column("area"));
        assert!(sheet.has_column("data_corte"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse_file(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
