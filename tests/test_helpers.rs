// ==========================================
// Test helpers
// ==========================================
// Temporary databases, cut files and dates
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};
use vegetation_cut::db::open_sqlite_connection;

/// Temporary database with the schema applied
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temp path is not UTF-8")?
        .to_string();

    // schema is created on open
    open_sqlite_connection(&db_path)?;

    Ok((temp_file, db_path))
}

pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// Write a raw config_kv entry, bypassing validation
pub fn insert_raw_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// CSV cut file with the standard header and the given `(area, data_corte)` rows
pub fn write_cut_csv(rows: &[(&str, &str)]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut lines = vec!["area,data_corte".to_string()];
    lines.extend(rows.iter().map(|(area, date)| format!("{},{}", area, date)));
    write_raw_file(&lines.join("\n"), ".csv")
}

/// Arbitrary file content with the given suffix
pub fn write_raw_file(content: &str, suffix: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Empty temp path for output files
pub fn output_path(suffix: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    Ok(Builder::new().suffix(suffix).tempfile()?)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
