// ==========================================
// Vegetation Cut - configuration manager
// ==========================================
// Load / edit / save the DashboardConfig snapshot
// Storage: config_kv (global settings) + area_config (per area)
// Color thresholds are stored as one JSON object in config_kv
// ==========================================
// Nothing persisted yet → documented defaults, not an error
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::validation::{
    validate_area, validate_color, validate_dashboard_config, validate_max_days, validate_month,
};
use crate::db::open_sqlite_connection;
use crate::domain::area::{
    AreaConfig, ColorScale, DashboardConfig, SeasonCalendar, DEFAULT_AREA_COUNT, DEFAULT_COLOR,
    DEFAULT_SCALE_MAX_DAYS, DEFAULT_SCALE_STEP_DAYS,
};
use crate::repository::area_config_repo::AreaConfigRepository;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
    areas: AreaConfigRepository,
}

impl ConfigManager {
    /// # Arguments
    /// - db_path: SQLite file path
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// Share an already opened (and schema-initialized) connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            areas: AreaConfigRepository::from_connection(conn.clone()),
            conn,
        }
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    // ==========================================
    // config_kv access
    // ==========================================

    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_config_value_with(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )
    }

    fn get_u32_or_default(&self, key: &str, default: u32) -> ConfigResult<u32> {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => Ok(raw.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!(config_key = key, raw_value = %raw, "malformed config value, using default");
                default
            })),
        }
    }

    // ==========================================
    // Loading
    // ==========================================

    /// Configured area count (used when no area rows are persisted)
    pub fn get_area_count(&self) -> ConfigResult<u32> {
        self.get_u32_or_default(config_keys::AREA_COUNT, DEFAULT_AREA_COUNT)
    }

    /// Rainy months; absent key → default set, empty value → no rainy months
    pub fn get_season_calendar(&self) -> ConfigResult<SeasonCalendar> {
        let raw = match self.get_config_value(config_keys::RAINY_MONTHS)? {
            Some(raw) => raw,
            None => return Ok(SeasonCalendar::default()),
        };

        let mut months = BTreeSet::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<u32>() {
                Ok(m) if (1..=12).contains(&m) => {
                    months.insert(m);
                }
                _ => warn!(
                    config_key = config_keys::RAINY_MONTHS,
                    entry = part,
                    "ignoring malformed rainy month"
                ),
            }
        }

        Ok(SeasonCalendar {
            rainy_months: months,
        })
    }

    /// Threshold → color map; absent or malformed → default palette
    fn get_color_buckets(&self) -> ConfigResult<Option<BTreeMap<u32, String>>> {
        let raw = match self.get_config_value(config_keys::COLOR_BUCKETS)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<BTreeMap<u32, String>>(&raw) {
            Ok(buckets) if !buckets.is_empty() && buckets.values().all(|c| validate_color(c).is_ok()) => {
                Ok(Some(buckets))
            }
            _ => {
                warn!(
                    config_key = config_keys::COLOR_BUCKETS,
                    "malformed color thresholds, using default palette"
                );
                Ok(None)
            }
        }
    }

    pub fn get_color_scale(&self) -> ConfigResult<ColorScale> {
        let max_days = self.get_u32_or_default(config_keys::MAX_DAYS, DEFAULT_SCALE_MAX_DAYS)?;
        let step = match self.get_u32_or_default(config_keys::SCALE_STEP, DEFAULT_SCALE_STEP_DAYS)? {
            0 => DEFAULT_SCALE_STEP_DAYS,
            step => step,
        };
        let default_color = self
            .get_config_value(config_keys::DEFAULT_COLOR)?
            .filter(|c| validate_color(c).is_ok())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        let mut scale = ColorScale::default()
            .with_max_days(max_days)
            .with_default_color(default_color);
        scale.step = step;
        if let Some(buckets) = self.get_color_buckets()? {
            scale.buckets = buckets;
        }
        Ok(scale)
    }

    /// Full snapshot; defaults wherever nothing is persisted
    pub fn load(&self) -> ConfigResult<DashboardConfig> {
        let stored = self.areas.list_all()?;
        let areas = if stored.is_empty() {
            let count = self.get_area_count()?;
            info!(count, "no persisted area configuration, using defaults");
            AreaConfig::defaults(count)
        } else {
            stored
        };

        Ok(DashboardConfig {
            areas,
            calendar: self.get_season_calendar()?,
            scale: self.get_color_scale()?,
        })
    }

    // ==========================================
    // Saving
    // ==========================================

    /// Validate and persist the whole snapshot in one transaction
    pub fn save(&self, config: &DashboardConfig) -> ConfigResult<()> {
        validate_dashboard_config(config)?;

        let rainy_months = config
            .calendar
            .rainy_months
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let buckets = serde_json::to_string(&config.scale.buckets)?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM area_config", [])?;
        for area in &config.areas {
            AreaConfigRepository::upsert_with(&tx, area)?;
        }

        Self::set_config_value_with(&tx, config_keys::RAINY_MONTHS, &rainy_months)?;
        Self::set_config_value_with(&tx, config_keys::DEFAULT_COLOR, &config.scale.default_color)?;
        Self::set_config_value_with(&tx, config_keys::MAX_DAYS, &config.scale.max_days.to_string())?;
        Self::set_config_value_with(&tx, config_keys::SCALE_STEP, &config.scale.step.to_string())?;
        Self::set_config_value_with(&tx, config_keys::COLOR_BUCKETS, &buckets)?;
        Self::set_config_value_with(&tx, config_keys::AREA_COUNT, &config.areas.len().to_string())?;

        tx.commit()?;

        info!(areas = config.areas.len(), "configuration saved");
        Ok(())
    }

    // ==========================================
    // Edits (load → change → validate → save)
    // ==========================================

    /// Replace one area's name / machine / intervals
    pub fn update_area(&self, area: AreaConfig) -> ConfigResult<DashboardConfig> {
        validate_area(&area)?;

        let mut config = self.load()?;
        let slot = config
            .areas
            .iter_mut()
            .find(|a| a.id == area.id)
            .ok_or(ConfigError::UnknownArea(area.id))?;
        *slot = area;

        self.save(&config)?;
        Ok(config)
    }

    pub fn set_rainy_months<I: IntoIterator<Item = u32>>(
        &self,
        months: I,
    ) -> ConfigResult<DashboardConfig> {
        let months: BTreeSet<u32> = months.into_iter().collect();
        for month in &months {
            validate_month(*month)?;
        }

        let mut config = self.load()?;
        config.calendar = SeasonCalendar {
            rainy_months: months,
        };

        self.save(&config)?;
        Ok(config)
    }

    pub fn set_default_color(&self, color: &str) -> ConfigResult<DashboardConfig> {
        validate_color(color)?;

        let mut config = self.load()?;
        config.scale.default_color = color.to_string();

        self.save(&config)?;
        Ok(config)
    }

    pub fn set_max_days(&self, max_days: u32) -> ConfigResult<DashboardConfig> {
        validate_max_days(max_days)?;

        let mut config = self.load()?;
        config.scale.max_days = max_days;

        self.save(&config)?;
        Ok(config)
    }

    /// Grow (with default areas) or shrink the area list
    pub fn resize_areas(&self, count: u32) -> ConfigResult<DashboardConfig> {
        if count == 0 {
            return Err(ConfigError::InvalidAreaId(0));
        }

        let mut config = self.load()?;
        config.areas.retain(|a| a.id <= count);
        for id in 1..=count {
            if config.area(id).is_none() {
                config.areas.push(AreaConfig::default_for(id));
            }
        }
        config.areas.sort_by_key(|a| a.id);

        self.save(&config)?;
        Ok(config)
    }

    pub fn reset_to_defaults(&self) -> ConfigResult<DashboardConfig> {
        let config = DashboardConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    // ==========================================
    // Snapshots
    // ==========================================

    /// Current configuration as pretty JSON
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }

    /// Restore a snapshot produced by `get_config_snapshot`
    ///
    /// # Returns
    /// Number of areas restored
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config: DashboardConfig = serde_json::from_str(snapshot_json)?;
        self.save(&config)?;
        Ok(config.areas.len())
    }
}

// ==========================================
// config_kv keys
// ==========================================
pub mod config_keys {
    pub const RAINY_MONTHS: &str = "rainy_months";
    pub const DEFAULT_COLOR: &str = "default_color";
    pub const MAX_DAYS: &str = "color_scale_max_days";
    pub const SCALE_STEP: &str = "color_scale_step";
    pub const COLOR_BUCKETS: &str = "color_buckets";
    pub const AREA_COUNT: &str = "area_count";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};
    use crate::domain::types::Machine;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_load_without_persisted_config_uses_defaults() {
        let config = manager().load().unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let manager = manager();
        let mut config = DashboardConfig::default();
        config.areas[0].name = "Pátio".to_string();
        config.calendar = SeasonCalendar::new([10, 11]);
        config.scale.max_days = 60;

        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn test_update_area_rejects_invalid_interval() {
        let manager = manager();
        let mut area = AreaConfig::default_for(3);
        area.dry_season_interval_days = 0;

        let result = manager.update_area(area);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidIntervalConfig { area_id: 3, value: 0, .. })
        ));
        // nothing was persisted
        assert_eq!(manager.areas.count().unwrap(), 0);
    }

    #[test]
    fn test_update_area() {
        let manager = manager();
        let area = AreaConfig {
            id: 2,
            name: "Subestação".to_string(),
            machine: Machine::Brushcutter,
            rainy_season_interval_days: 15,
            dry_season_interval_days: 45,
        };

        manager.update_area(area.clone()).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.area(2), Some(&area));
        assert_eq!(config.areas.len(), 35);
    }

    #[test]
    fn test_update_unknown_area() {
        let result = manager().update_area(AreaConfig::default_for(99));
        assert!(matches!(result, Err(ConfigError::UnknownArea(99))));
    }

    #[test]
    fn test_empty_rainy_months_is_persisted_as_empty() {
        let manager = manager();
        manager.set_rainy_months(Vec::new()).unwrap();
        assert!(manager.load().unwrap().calendar.rainy_months.is_empty());
    }

    #[test]
    fn test_set_rainy_months_rejects_invalid_month() {
        let result = manager().set_rainy_months([1, 13]);
        assert!(matches!(result, Err(ConfigError::InvalidMonth(13))));
    }

    #[test]
    fn test_scale_settings() {
        let manager = manager();
        manager.set_max_days(120).unwrap();
        manager.set_default_color("#C5F5C5").unwrap();

        let scale = manager.load().unwrap().scale;
        assert_eq!(scale.max_days, 120);
        assert_eq!(scale.default_color, "#C5F5C5");

        assert!(matches!(
            manager.set_max_days(10),
            Err(ConfigError::InvalidMaxDays { value: 10, .. })
        ));
        assert!(matches!(
            manager.set_default_color("green"),
            Err(ConfigError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_resize_areas() {
        let manager = manager();
        manager.resize_areas(3).unwrap();
        assert_eq!(manager.load().unwrap().areas.len(), 3);

        let config = manager.resize_areas(5).unwrap();
        let ids: Vec<u32> = config.areas.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let source = manager();
        source.set_rainy_months([11, 12, 1]).unwrap();
        let snapshot = source.get_config_snapshot().unwrap();

        let target = manager();
        assert_eq!(target.restore_config_from_snapshot(&snapshot).unwrap(), 35);
        assert_eq!(target.load().unwrap(), source.load().unwrap());
    }

    #[test]
    fn test_snapshot_keeps_custom_color_scale() {
        let source = manager();
        let mut config = DashboardConfig::default();
        config.scale.buckets.insert(45, "#000000".to_string());
        config.scale.step = 15;
        let snapshot = serde_json::to_string(&config).unwrap();

        source.restore_config_from_snapshot(&snapshot).unwrap();

        let scale = source.load().unwrap().scale;
        assert_eq!(scale.color_at(45), Some("#000000"));
        assert_eq!(scale.step, 15);
        assert_eq!(scale, config.scale);
    }

    #[test]
    fn test_restore_rejects_gapped_area_ids() {
        let manager = manager();
        let mut config = DashboardConfig::default();
        config.areas = AreaConfig::defaults(2);
        config.areas[1].id = 5;
        let snapshot = serde_json::to_string(&config).unwrap();

        let result = manager.restore_config_from_snapshot(&snapshot);
        assert!(matches!(
            result,
            Err(ConfigError::AreaIdOutOfRange { area_id: 5, count: 2 })
        ));
        assert_eq!(manager.load().unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let result = manager().restore_config_from_snapshot("{not json");
        assert!(matches!(result, Err(ConfigError::Snapshot(_))));
    }
}
