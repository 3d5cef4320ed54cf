// ==========================================
// Vegetation Cut - status & color derivation engine
// ==========================================
// Input: area config + cut date + "now" + calendar + color scale
// Output: DerivedStatus (days since cut, period, status, color)
// ==========================================
// Pure functions only: no I/O, no clock reads, never mutates inputs.
// "now" is always a calendar date supplied by the caller.
// ==========================================

use crate::domain::area::{AreaConfig, ColorScale, SeasonCalendar};
use crate::domain::cut::{DerivedStatus, LegendEntry};
use crate::domain::types::{CutStatus, Period};
use chrono::{Datelike, NaiveDate};

// ==========================================
// StatusEngine
// ==========================================
pub struct StatusEngine;

impl StatusEngine {
    // ==========================================
    // Core operations
    // ==========================================

    /// Calendar-day difference `now - cut_date`
    ///
    /// Negative for future-dated cuts; callers treat that as "not due".
    pub fn compute_days_since_cut(cut_date: NaiveDate, now: NaiveDate) -> i64 {
        now.signed_duration_since(cut_date).num_days()
    }

    /// Rainy if `now_month` is in the calendar, otherwise dry
    pub fn classify_period(now_month: u32, calendar: &SeasonCalendar) -> Period {
        if calendar.is_rainy(now_month) {
            Period::Rainy
        } else {
            Period::Dry
        }
    }

    /// Interval that applies in `period`
    pub fn active_interval(rainy_interval_days: u32, dry_interval_days: u32, period: Period) -> u32 {
        match period {
            Period::Rainy => rainy_interval_days,
            Period::Dry => dry_interval_days,
        }
    }

    /// Overdue iff `days_since_cut > active interval` (the boundary is on schedule)
    pub fn compute_status(
        days_since_cut: i64,
        rainy_interval_days: u32,
        dry_interval_days: u32,
        period: Period,
    ) -> CutStatus {
        let active = Self::active_interval(rainy_interval_days, dry_interval_days, period);
        if days_since_cut > i64::from(active) {
            CutStatus::Overdue
        } else {
            CutStatus::OnSchedule
        }
    }

    /// Color of the smallest threshold ≥ `days_since_cut`
    ///
    /// Beyond every threshold: the color at `max_days`, else `default_color`.
    pub fn lookup_color(days_since_cut: i64, scale: &ColorScale) -> &str {
        scale
            .thresholds()
            .find(|(threshold, _)| days_since_cut <= i64::from(*threshold))
            .map(|(_, color)| color)
            .or_else(|| scale.color_at(scale.max_days))
            .unwrap_or(scale.default_color.as_str())
    }

    /// Color for an area with an optional cut; no cut → default color
    pub fn color_for(days_since_cut: Option<i64>, scale: &ColorScale) -> &str {
        match days_since_cut {
            Some(days) => Self::lookup_color(days, scale),
            None => scale.default_color.as_str(),
        }
    }

    /// Full derivation for one area
    pub fn derive(
        area: &AreaConfig,
        cut_date: NaiveDate,
        now: NaiveDate,
        calendar: &SeasonCalendar,
        scale: &ColorScale,
    ) -> DerivedStatus {
        let days_since_cut = Self::compute_days_since_cut(cut_date, now);
        let period = Self::classify_period(now.month(), calendar);
        let status = Self::compute_status(
            days_since_cut,
            area.rainy_season_interval_days,
            area.dry_season_interval_days,
            period,
        );

        DerivedStatus {
            days_since_cut,
            period,
            active_interval_days: Self::active_interval(
                area.rainy_season_interval_days,
                area.dry_season_interval_days,
                period,
            ),
            status,
            color: Self::lookup_color(days_since_cut, scale).to_string(),
        }
    }

    // ==========================================
    // Legend
    // ==========================================

    /// Legend entries every `step` days from 0 to `max_days`
    ///
    /// Thresholds without a bucket use the default color.
    pub fn legend(scale: &ColorScale, step: u32) -> Vec<LegendEntry> {
        let step = step.max(1) as usize;
        (0..=scale.max_days)
            .step_by(step)
            .map(|days| LegendEntry {
                days,
                color: scale
                    .color_at(days)
                    .unwrap_or(scale.default_color.as_str())
                    .to_string(),
            })
            .collect()
    }
}
