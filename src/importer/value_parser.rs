// ==========================================
// Vegetation Cut - cell value parsing
// ==========================================
// area id: "3", "3.0" (spreadsheets export floats)
// cut date: ISO, Brazilian day-first, compact, Excel serial
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

// Excel serial dates: day 0 = 1899-12-30 (1900 leap-year bug included)
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0; // 9999-12-31

/// Parse a positive integer area id
pub fn parse_area_id(raw: &str) -> Option<u32> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(id) = value.parse::<u32>() {
        return (id > 0).then_some(id);
    }

    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float >= 1.0 && float <= f64::from(u32::MAX) {
        Some(float as u32)
    } else {
        None
    }
}

/// Parse a cut date; any time-of-day component is discarded
pub fn parse_cut_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    // YYYYMMDD
    if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
            return Some(date);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    parse_excel_serial(value)
}

fn parse_excel_serial(value: &str) -> Option<NaiveDate> {
    let serial = value.parse::<f64>().ok()?;
    if !serial.is_finite() || serial < 1.0 || serial > EXCEL_SERIAL_MAX {
        return None;
    }

    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_area_id() {
        assert_eq!(parse_area_id("1"), Some(1));
        assert_eq!(parse_area_id(" 35 "), Some(35));
        assert_eq!(parse_area_id("3.0"), Some(3));
        assert_eq!(parse_area_id("0"), None);
        assert_eq!(parse_area_id("-2"), None);
        assert_eq!(parse_area_id("2.5"), None);
        assert_eq!(parse_area_id("abc"), None);
        assert_eq!(parse_area_id(""), None);
    }

    #[test]
    fn test_parse_cut_date_formats() {
        let expected = date(2025, 3, 1);
        assert_eq!(parse_cut_date("2025-03-01"), Some(expected));
        assert_eq!(parse_cut_date("2025/03/01"), Some(expected));
        assert_eq!(parse_cut_date("01/03/2025"), Some(expected));
        assert_eq!(parse_cut_date("01-03-2025"), Some(expected));
        assert_eq!(parse_cut_date("20250301"), Some(expected));
        assert_eq!(parse_cut_date("2025-03-01 17:45:00"), Some(expected));
        assert_eq!(parse_cut_date("2025-03-01T08:00:00"), Some(expected));
    }

    #[test]
    fn test_parse_cut_date_excel_serial() {
        // 45717 = 2025-03-01
        assert_eq!(parse_cut_date("45717"), Some(date(2025, 3, 1)));
        assert_eq!(parse_cut_date("45717.75"), Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_parse_cut_date_invalid() {
        assert_eq!(parse_cut_date(""), None);
        assert_eq!(parse_cut_date("ontem"), None);
        assert_eq!(parse_cut_date("2025-02-30"), None);
        assert_eq!(parse_cut_date("31/31/2025"), None);
        assert_eq!(parse_cut_date("-4"), None);
    }
}
