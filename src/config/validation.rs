// ==========================================
// Vegetation Cut - configuration validation
// ==========================================
// Applied on every edit and before every save
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::area::{
    AreaConfig, ColorScale, DashboardConfig, MAX_INTERVAL_DAYS, MAX_SCALE_MAX_DAYS, MIN_INTERVAL_DAYS,
    MIN_SCALE_MAX_DAYS,
};
use std::collections::HashSet;

pub fn validate_interval(area_id: u32, field: &str, value: u32) -> ConfigResult<()> {
    if (MIN_INTERVAL_DAYS..=MAX_INTERVAL_DAYS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIntervalConfig {
            area_id,
            field: field.to_string(),
            value,
            min: MIN_INTERVAL_DAYS,
            max: MAX_INTERVAL_DAYS,
        })
    }
}

pub fn validate_area(area: &AreaConfig) -> ConfigResult<()> {
    if area.id == 0 {
        return Err(ConfigError::InvalidAreaId(area.id));
    }
    if area.name.trim().is_empty() {
        return Err(ConfigError::EmptyAreaName { area_id: area.id });
    }
    validate_interval(area.id, "rainy_season_interval_days", area.rainy_season_interval_days)?;
    validate_interval(area.id, "dry_season_interval_days", area.dry_season_interval_days)?;
    Ok(())
}

/// Every area valid and the ids are exactly `1..=areas.len()`
pub fn validate_areas(areas: &[AreaConfig]) -> ConfigResult<()> {
    let count = areas.len() as u32;
    let mut seen = HashSet::with_capacity(areas.len());
    for area in areas {
        validate_area(area)?;
        if area.id > count {
            return Err(ConfigError::AreaIdOutOfRange {
                area_id: area.id,
                count,
            });
        }
        if !seen.insert(area.id) {
            return Err(ConfigError::DuplicateAreaId(area.id));
        }
    }
    Ok(())
}

pub fn validate_month(month: u32) -> ConfigResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMonth(month))
    }
}

pub fn validate_max_days(max_days: u32) -> ConfigResult<()> {
    if (MIN_SCALE_MAX_DAYS..=MAX_SCALE_MAX_DAYS).contains(&max_days) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMaxDays {
            value: max_days,
            min: MIN_SCALE_MAX_DAYS,
            max: MAX_SCALE_MAX_DAYS,
        })
    }
}

/// `#RRGGBB`
pub fn validate_color(color: &str) -> ConfigResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor(color.to_string()))
    }
}

pub fn validate_color_scale(scale: &ColorScale) -> ConfigResult<()> {
    validate_max_days(scale.max_days)?;
    validate_color(&scale.default_color)?;
    if scale.step == 0 {
        return Err(ConfigError::InvalidScaleStep(scale.step));
    }
    if scale.buckets.is_empty() {
        return Err(ConfigError::EmptyColorScale);
    }
    for color in scale.buckets.values() {
        validate_color(color)?;
    }
    Ok(())
}

pub fn validate_dashboard_config(config: &DashboardConfig) -> ConfigResult<()> {
    validate_areas(&config.areas)?;
    for month in &config.calendar.rainy_months {
        validate_month(*month)?;
    }
    validate_color_scale(&config.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bounds() {
        assert!(validate_interval(1, "rainy", 1).is_ok());
        assert!(validate_interval(1, "rainy", 180).is_ok());
        assert!(matches!(
            validate_interval(1, "rainy", 0),
            Err(ConfigError::InvalidIntervalConfig { value: 0, .. })
        ));
        assert!(matches!(
            validate_interval(4, "dry", 181),
            Err(ConfigError::InvalidIntervalConfig { area_id: 4, value: 181, .. })
        ));
    }

    #[test]
    fn test_validate_areas_rejects_duplicates_and_empty_names() {
        let mut areas = AreaConfig::defaults(3);
        assert!(validate_areas(&areas).is_ok());

        areas[2].id = 1;
        assert!(matches!(validate_areas(&areas), Err(ConfigError::DuplicateAreaId(1))));

        let mut area = AreaConfig::default_for(5);
        area.name = "   ".to_string();
        assert!(matches!(
            validate_area(&area),
            Err(ConfigError::EmptyAreaName { area_id: 5 })
        ));
    }

    #[test]
    fn test_validate_areas_rejects_gapped_ids() {
        let mut areas = AreaConfig::defaults(2);
        areas[1].id = 5;
        assert!(matches!(
            validate_areas(&areas),
            Err(ConfigError::AreaIdOutOfRange { area_id: 5, count: 2 })
        ));

        // order does not matter, only the id set
        let mut areas = AreaConfig::defaults(3);
        areas.reverse();
        assert!(validate_areas(&areas).is_ok());
    }

    #[test]
    fn test_validate_color_scale() {
        let mut scale = ColorScale::default();
        scale.buckets.insert(45, "#000000".to_string());
        scale.step = 15;
        assert!(validate_color_scale(&scale).is_ok());

        scale.step = 0;
        assert!(matches!(
            validate_color_scale(&scale),
            Err(ConfigError::InvalidScaleStep(0))
        ));

        scale.step = 5;
        scale.buckets.insert(50, "black".to_string());
        assert!(matches!(validate_color_scale(&scale), Err(ConfigError::InvalidColor(_))));

        scale.buckets.clear();
        assert!(matches!(validate_color_scale(&scale), Err(ConfigError::EmptyColorScale)));
    }

    #[test]
    fn test_validate_month_and_max_days() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());

        assert!(validate_max_days(30).is_ok());
        assert!(validate_max_days(120).is_ok());
        assert!(validate_max_days(29).is_err());
        assert!(validate_max_days(121).is_err());
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_color("#90EE90").is_ok());
        assert!(validate_color("#abcdef").is_ok());
        assert!(validate_color("90EE90").is_err());
        assert!(validate_color("#90EE9").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_default_dashboard_config_is_valid() {
        assert!(validate_dashboard_config(&DashboardConfig::default()).is_ok());
    }
}
