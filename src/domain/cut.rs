// ==========================================
// Vegetation Cut - cut records and derived views
// ==========================================
// CutRecord: transient, one per imported row
// DerivedStatus: recomputed per request, never persisted
// PriorityRow / HistoryRow: what renderers and exporters consume
// ==========================================

use crate::domain::types::{CutStatus, Machine, Period};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// CutRecord
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutRecord {
    pub area_id: u32,
    pub cut_date: NaiveDate,
    pub row_number: usize, // 1-based data row in the source file
}

impl CutRecord {
    pub fn new(area_id: u32, cut_date: NaiveDate, row_number: usize) -> Self {
        Self {
            area_id,
            cut_date,
            row_number,
        }
    }
}

// ==========================================
// DerivedStatus
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStatus {
    pub days_since_cut: i64,
    pub period: Period,
    pub active_interval_days: u32,
    pub status: CutStatus,
    pub color: String,
}

// ==========================================
// PriorityRow - one area on the priority map / report
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRow {
    pub area_id: u32,
    pub name: String,
    pub machine: Machine,
    pub days_since_cut: i64,
    pub rainy_interval_days: u32,
    pub dry_interval_days: u32,
    pub status: CutStatus,
    pub color: String,
    pub cut_date: NaiveDate,
}

impl PriorityRow {
    /// Calendar month (1-12) of the last cut
    pub fn cut_month(&self) -> u32 {
        self.cut_date.month()
    }
}

/// Area that has no cut in the imported data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncutArea {
    pub area_id: u32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityReport {
    pub generated_on: NaiveDate,
    pub period: Period,
    pub min_days: i64,
    pub rows: Vec<PriorityRow>,
    pub areas_without_cut: Vec<UncutArea>,
}

impl PriorityReport {
    pub fn overdue_count(&self) -> usize {
        self.rows.iter().filter(|r| r.status.is_overdue()).count()
    }
}

// ==========================================
// HistoryRow - every recorded cut
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub area_id: u32,
    pub name: String,
    pub cut_date: NaiveDate,
    pub machine: Machine,
    pub days_since_cut: i64,
    pub status: CutStatus,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub generated_on: NaiveDate,
    pub rows: Vec<HistoryRow>,
}

/// Legend entry (days threshold → color)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub days: u32,
    pub color: String,
}
