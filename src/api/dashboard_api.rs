// ==========================================
// Vegetation Cut - dashboard API
// ==========================================
// Import file → config snapshot → engine → view / CSV export
// "today" is always passed in by the caller
// ==========================================

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::area::DashboardConfig;
use crate::domain::cut::{HistoryReport, LegendEntry, PriorityReport};
use crate::engine::report::ReportBuilder;
use crate::engine::status::StatusEngine;
use crate::export::report_exporter::{write_cut_template, write_history_csv, write_priority_csv};
use crate::importer::cut_importer::{CutImportReport, CutImporter};

/// Legend spacing in days
pub const LEGEND_STEP_DAYS: u32 = 15;

// ==========================================
// Views
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityView {
    pub import: CutImportReport,
    pub report: PriorityReport,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    pub import: CutImportReport,
    pub report: HistoryReport,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    config_manager: Arc<ConfigManager>,
    report_builder: ReportBuilder,
}

impl DashboardApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self {
            config_manager,
            report_builder: ReportBuilder::new(),
        }
    }

    fn load_config(&self) -> ApiResult<DashboardConfig> {
        Ok(self.config_manager.load()?)
    }

    fn import(&self, config: &DashboardConfig, input: &Path, today: NaiveDate) -> ApiResult<CutImportReport> {
        let importer = CutImporter::new(config.area_count());
        Ok(importer.import_file(input, today)?)
    }

    /// `min_days` must be within `0..=max_days`
    fn check_min_days(config: &DashboardConfig, min_days: i64) -> ApiResult<()> {
        let max_days = i64::from(config.scale.max_days);
        if (0..=max_days).contains(&min_days) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(format!(
                "min_days must be within [0, {}], got {}",
                max_days, min_days
            )))
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// Priority map: latest cut per area ranked by days since cut
    ///
    /// # Arguments
    /// - input: cut file (.csv/.xlsx/.xls)
    /// - today: reference date
    /// - min_days: hide areas cut less than this many days ago
    #[instrument(skip(self, input), fields(input = %input.display()))]
    pub fn priority_view(&self, input: &Path, today: NaiveDate, min_days: i64) -> ApiResult<PriorityView> {
        let config = self.load_config()?;
        Self::check_min_days(&config, min_days)?;

        let import = self.import(&config, input, today)?;
        let report = self
            .report_builder
            .build_priority_report(&config, &import.records, today, min_days);

        Ok(PriorityView {
            legend: StatusEngine::legend(&config.scale, LEGEND_STEP_DAYS),
            import,
            report,
        })
    }

    /// Every recorded cut with its derived status
    #[instrument(skip(self, input), fields(input = %input.display()))]
    pub fn history_view(&self, input: &Path, today: NaiveDate) -> ApiResult<HistoryView> {
        let config = self.load_config()?;
        let import = self.import(&config, input, today)?;
        let report = self
            .report_builder
            .build_history_report(&config, &import.records, today);

        Ok(HistoryView { import, report })
    }

    pub fn legend(&self) -> ApiResult<Vec<LegendEntry>> {
        let config = self.load_config()?;
        Ok(StatusEngine::legend(&config.scale, LEGEND_STEP_DAYS))
    }

    // ==========================================
    // Exports
    // ==========================================

    pub fn export_priority_report(
        &self,
        input: &Path,
        output: &Path,
        today: NaiveDate,
        min_days: i64,
    ) -> ApiResult<PriorityView> {
        let view = self.priority_view(input, today, min_days)?;
        write_priority_csv(BufWriter::new(File::create(output)?), &view.report)?;

        info!(output = %output.display(), rows = view.report.rows.len(), "priority report written");
        Ok(view)
    }

    pub fn export_history_report(
        &self,
        input: &Path,
        output: &Path,
        today: NaiveDate,
    ) -> ApiResult<HistoryView> {
        let view = self.history_view(input, today)?;
        write_history_csv(BufWriter::new(File::create(output)?), &view.report)?;

        info!(output = %output.display(), rows = view.report.rows.len(), "cut history written");
        Ok(view)
    }

    /// Input template with one row per configured area
    ///
    /// # Returns
    /// Number of rows written
    pub fn write_template(&self, output: &Path) -> ApiResult<u32> {
        let area_count = self.load_config()?.area_count();
        write_cut_template(BufWriter::new(File::create(output)?), area_count)?;

        info!(output = %output.display(), area_count, "cut template written");
        Ok(area_count)
    }
}
