// ==========================================
// Vegetation Cut - area configuration entities
// ==========================================
// AreaConfig (one per physical area, persisted)
// SeasonCalendar / ColorScale (global, persisted)
// ==========================================

use crate::domain::types::Machine;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Interval bounds accepted for both seasonal periodicities (days)
pub const MIN_INTERVAL_DAYS: u32 = 1;
pub const MAX_INTERVAL_DAYS: u32 = 180;

/// Defaults used when no persisted configuration exists
pub const DEFAULT_AREA_COUNT: u32 = 35;
pub const DEFAULT_RAINY_INTERVAL_DAYS: u32 = 30;
pub const DEFAULT_DRY_INTERVAL_DAYS: u32 = 60;
pub const DEFAULT_RAINY_MONTHS: [u32; 4] = [1, 2, 3, 12];

/// Configurable range of the color scale upper bound
pub const MIN_SCALE_MAX_DAYS: u32 = 30;
pub const MAX_SCALE_MAX_DAYS: u32 = 120;
pub const DEFAULT_SCALE_MAX_DAYS: u32 = 90;
pub const DEFAULT_SCALE_STEP_DAYS: u32 = 5;
pub const DEFAULT_COLOR: &str = "#90EE90";

// 0 days light green → 90 days dark red, every 5 days
const DEFAULT_PALETTE: [(u32, &str); 19] = [
    (0, "#90EE90"),
    (5, "#A8E05F"),
    (10, "#C0D94B"),
    (15, "#D8C93A"),
    (20, "#E8B930"),
    (25, "#F0A830"),
    (30, "#F7982F"),
    (35, "#F87C2C"),
    (40, "#F95F2A"),
    (45, "#FA4327"),
    (50, "#FB2A26"),
    (55, "#FC1A24"),
    (60, "#FD0F23"),
    (65, "#E00D20"),
    (70, "#C10B1D"),
    (75, "#A3091A"),
    (80, "#850717"),
    (85, "#670514"),
    (90, "#490311"),
];

// ==========================================
// AreaConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    pub id: u32,                         // stable index, 1..=N
    pub name: String,                    // display label
    pub machine: Machine,                // equipment used
    pub rainy_season_interval_days: u32, // max interval in rainy months
    pub dry_season_interval_days: u32,   // max interval otherwise
}

impl AreaConfig {
    /// Default record for area `id` ("Área {id}", tractor, 30/60 days)
    pub fn default_for(id: u32) -> Self {
        Self {
            id,
            name: format!("Área {}", id),
            machine: Machine::default(),
            rainy_season_interval_days: DEFAULT_RAINY_INTERVAL_DAYS,
            dry_season_interval_days: DEFAULT_DRY_INTERVAL_DAYS,
        }
    }

    /// Default area list `1..=count`
    pub fn defaults(count: u32) -> Vec<Self> {
        (1..=count).map(Self::default_for).collect()
    }
}

// ==========================================
// SeasonCalendar
// ==========================================
// An empty set means every month is dry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    pub rainy_months: BTreeSet<u32>,
}

impl SeasonCalendar {
    pub fn new<I: IntoIterator<Item = u32>>(months: I) -> Self {
        Self {
            rainy_months: months.into_iter().collect(),
        }
    }

    pub fn is_rainy(&self, month: u32) -> bool {
        self.rainy_months.contains(&month)
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_RAINY_MONTHS)
    }
}

// ==========================================
// ColorScale
// ==========================================
// Thresholds are the keys of `buckets` (strictly increasing by construction).
// Only thresholds ≤ max_days take part in lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    pub buckets: BTreeMap<u32, String>,
    pub default_color: String,
    pub max_days: u32,
    pub step: u32,
}

impl ColorScale {
    /// Thresholds in ascending order, capped at `max_days`
    pub fn thresholds(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.buckets
            .range(..=self.max_days)
            .map(|(days, color)| (*days, color.as_str()))
    }

    /// Color mapped to an exact threshold
    pub fn color_at(&self, threshold: u32) -> Option<&str> {
        self.buckets.get(&threshold).map(String::as_str)
    }

    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_PALETTE
                .iter()
                .map(|(days, color)| (*days, color.to_string()))
                .collect(),
            default_color: DEFAULT_COLOR.to_string(),
            max_days: DEFAULT_SCALE_MAX_DAYS,
            step: DEFAULT_SCALE_STEP_DAYS,
        }
    }
}

// ==========================================
// DashboardConfig - immutable snapshot
// ==========================================
// Handed to every engine/report call; never mutated by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub areas: Vec<AreaConfig>,
    pub calendar: SeasonCalendar,
    pub scale: ColorScale,
}

impl DashboardConfig {
    pub fn area(&self, id: u32) -> Option<&AreaConfig> {
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn area_count(&self) -> u32 {
        self.areas.len() as u32
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            areas: AreaConfig::defaults(DEFAULT_AREA_COUNT),
            calendar: SeasonCalendar::default(),
            scale: ColorScale::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_areas() {
        let areas = AreaConfig::defaults(DEFAULT_AREA_COUNT);
        assert_eq!(areas.len(), 35);
        assert_eq!(areas[0].id, 1);
        assert_eq!(areas[0].name, "Área 1");
        assert_eq!(areas[34].id, 35);
        assert!(areas.iter().all(|a| a.machine == Machine::TractorMower));
        assert!(areas.iter().all(|a| a.rainy_season_interval_days == 30));
        assert!(areas.iter().all(|a| a.dry_season_interval_days == 60));
    }

    #[test]
    fn test_default_calendar() {
        let calendar = SeasonCalendar::default();
        assert!(calendar.is_rainy(1));
        assert!(calendar.is_rainy(12));
        assert!(!calendar.is_rainy(7));
    }

    #[test]
    fn test_scale_thresholds_capped_by_max_days() {
        let scale = ColorScale::default().with_max_days(30);
        let thresholds: Vec<u32> = scale.thresholds().map(|(d, _)| d).collect();
        assert_eq!(thresholds, vec![0, 5, 10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_dashboard_config_lookup() {
        let config = DashboardConfig::default();
        assert_eq!(config.area_count(), 35);
        assert_eq!(config.area(7).map(|a| a.name.as_str()), Some("Área 7"));
        assert!(config.area(36).is_none());
    }
}
