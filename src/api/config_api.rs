// ==========================================
// Vegetation Cut - configuration API
// ==========================================
// Per-field edits on top of ConfigManager
// Every edit is validated; invalid values are rejected, never clamped
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::area::{AreaConfig, DashboardConfig};
use crate::domain::types::Machine;

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// Current snapshot (defaults when nothing is stored)
    pub fn get_config(&self) -> ApiResult<DashboardConfig> {
        Ok(self.config_manager.load()?)
    }

    pub fn get_area(&self, area_id: u32) -> ApiResult<AreaConfig> {
        self.get_config()?
            .area(area_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("area {}", area_id)))
    }

    fn edit_area<F>(&self, area_id: u32, edit: F) -> ApiResult<AreaConfig>
    where
        F: FnOnce(&mut AreaConfig),
    {
        let mut area = self.get_area(area_id)?;
        edit(&mut area);
        self.config_manager.update_area(area.clone())?;
        Ok(area)
    }

    // ==========================================
    // Area edits
    // ==========================================

    pub fn rename_area(&self, area_id: u32, name: &str) -> ApiResult<AreaConfig> {
        let name = name.trim().to_string();
        let area = self.edit_area(area_id, |a| a.name = name)?;
        info!(area_id, name = %area.name, "area renamed");
        Ok(area)
    }

    pub fn set_machine(&self, area_id: u32, machine: Machine) -> ApiResult<AreaConfig> {
        let area = self.edit_area(area_id, |a| a.machine = machine)?;
        info!(area_id, machine = %machine, "area machine changed");
        Ok(area)
    }

    pub fn set_intervals(
        &self,
        area_id: u32,
        rainy_interval_days: u32,
        dry_interval_days: u32,
    ) -> ApiResult<AreaConfig> {
        let area = self.edit_area(area_id, |a| {
            a.rainy_season_interval_days = rainy_interval_days;
            a.dry_season_interval_days = dry_interval_days;
        })?;
        info!(area_id, rainy_interval_days, dry_interval_days, "area intervals changed");
        Ok(area)
    }

    // ==========================================
    // Global settings
    // ==========================================

    pub fn set_rainy_months(&self, months: &[u32]) -> ApiResult<DashboardConfig> {
        let config = self.config_manager.set_rainy_months(months.iter().copied())?;
        info!(months = ?config.calendar.rainy_months, "rainy months changed");
        Ok(config)
    }

    pub fn set_default_color(&self, color: &str) -> ApiResult<DashboardConfig> {
        Ok(self.config_manager.set_default_color(color.trim())?)
    }

    pub fn set_max_days(&self, max_days: u32) -> ApiResult<DashboardConfig> {
        Ok(self.config_manager.set_max_days(max_days)?)
    }

    pub fn set_area_count(&self, count: u32) -> ApiResult<DashboardConfig> {
        if count == 0 {
            return Err(ApiError::InvalidInput("area count must be at least 1".to_string()));
        }
        Ok(self.config_manager.resize_areas(count)?)
    }

    pub fn reset_to_defaults(&self) -> ApiResult<DashboardConfig> {
        let config = self.config_manager.reset_to_defaults()?;
        info!("configuration reset to defaults");
        Ok(config)
    }

    // ==========================================
    // Snapshots
    // ==========================================

    pub fn export_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }

    /// # Returns
    /// Number of areas restored
    pub fn import_snapshot(&self, snapshot_json: &str) -> ApiResult<usize> {
        let restored = self.config_manager.restore_config_from_snapshot(snapshot_json)?;
        info!(areas = restored, "configuration restored from snapshot");
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> ConfigApi {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        let manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn)));
        ConfigApi::new(Arc::new(manager))
    }

    #[test]
    fn test_area_edits_are_persisted() {
        let api = api();
        api.rename_area(4, "  Campo de futebol ").unwrap();
        api.set_machine(4, Machine::RotaryMower).unwrap();
        api.set_intervals(4, 20, 40).unwrap();

        let area = api.get_area(4).unwrap();
        assert_eq!(area.name, "Campo de futebol");
        assert_eq!(area.machine, Machine::RotaryMower);
        assert_eq!(area.rainy_season_interval_days, 20);
        assert_eq!(area.dry_season_interval_days, 40);
    }

    #[test]
    fn test_invalid_interval_is_rejected_not_clamped() {
        let api = api();
        let result = api.set_intervals(1, 200, 60);
        assert!(matches!(result, Err(ApiError::InvalidConfig(_))));
        assert_eq!(api.get_area(1).unwrap().rainy_season_interval_days, 30);
    }

    #[test]
    fn test_unknown_area() {
        assert!(matches!(api().rename_area(36, "x"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(api().rename_area(1, "   "), Err(ApiError::InvalidConfig(_))));
    }

    #[test]
    fn test_area_count_must_be_positive() {
        assert!(matches!(api().set_area_count(0), Err(ApiError::InvalidInput(_))));
    }
}
