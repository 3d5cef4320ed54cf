// ==========================================
// Vegetation Cut - report builder
// ==========================================
// Combines selection + StatusEngine + PrioritySorter
// Input: DashboardConfig snapshot + validated cut records + now
// Output: PriorityReport / HistoryReport
// ==========================================

use crate::domain::area::DashboardConfig;
use crate::domain::cut::{
    CutRecord, HistoryReport, HistoryRow, PriorityReport, PriorityRow, UncutArea,
};
use crate::engine::priority::PrioritySorter;
use crate::engine::selection::{all_cuts_per_area, latest_cut_per_area};
use crate::engine::status::StatusEngine;
use chrono::{Datelike, NaiveDate};
use tracing::{instrument, warn};

pub struct ReportBuilder {
    sorter: PrioritySorter,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            sorter: PrioritySorter::new(),
        }
    }

    /// Priority view: latest cut per area, filtered by `min_days`, ranked
    #[instrument(skip(self, config, records), fields(records = records.len()))]
    pub fn build_priority_report(
        &self,
        config: &DashboardConfig,
        records: &[CutRecord],
        now: NaiveDate,
        min_days: i64,
    ) -> PriorityReport {
        let latest = latest_cut_per_area(records);

        let mut statuses = Vec::with_capacity(latest.len());
        let mut areas_without_cut = Vec::new();

        for area in &config.areas {
            match latest.get(&area.id) {
                Some(record) => {
                    let derived = StatusEngine::derive(
                        area,
                        record.cut_date,
                        now,
                        &config.calendar,
                        &config.scale,
                    );
                    statuses.push(((area, record.cut_date), derived));
                }
                None => areas_without_cut.push(UncutArea {
                    area_id: area.id,
                    name: area.name.clone(),
                    color: StatusEngine::color_for(None, &config.scale).to_string(),
                }),
            }
        }

        let unknown = latest.keys().filter(|id| config.area(**id).is_none()).count();
        if unknown > 0 {
            warn!(unknown, "cut records for unconfigured areas ignored");
        }

        let statuses = self.sorter.filter_min_days(statuses, min_days);
        let ranked = self.sorter.rank_by_priority(statuses);

        let rows = ranked
            .into_iter()
            .map(|((area, cut_date), derived)| PriorityRow {
                area_id: area.id,
                name: area.name.clone(),
                machine: area.machine,
                days_since_cut: derived.days_since_cut,
                rainy_interval_days: area.rainy_season_interval_days,
                dry_interval_days: area.dry_season_interval_days,
                status: derived.status,
                color: derived.color,
                cut_date,
            })
            .collect();

        PriorityReport {
            generated_on: now,
            period: StatusEngine::classify_period(now.month(), &config.calendar),
            min_days,
            rows,
            areas_without_cut,
        }
    }

    /// History view: every cut, grouped by area id, input order within an area
    #[instrument(skip(self, config, records), fields(records = records.len()))]
    pub fn build_history_report(
        &self,
        config: &DashboardConfig,
        records: &[CutRecord],
        now: NaiveDate,
    ) -> HistoryReport {
        let grouped = all_cuts_per_area(records);
        let mut rows = Vec::with_capacity(records.len());

        for (area_id, cuts) in grouped {
            let Some(area) = config.area(area_id) else {
                continue;
            };

            for record in cuts {
                let derived = StatusEngine::derive(
                    area,
                    record.cut_date,
                    now,
                    &config.calendar,
                    &config.scale,
                );
                rows.push(HistoryRow {
                    area_id,
                    name: area.name.clone(),
                    cut_date: record.cut_date,
                    machine: area.machine,
                    days_since_cut: derived.days_since_cut,
                    status: derived.status,
                    period: derived.period,
                });
            }
        }

        HistoryReport {
            generated_on: now,
            rows,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
