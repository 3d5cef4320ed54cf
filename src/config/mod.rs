// ==========================================
// Vegetation Cut - configuration layer
// ==========================================
// Areas, rainy-season calendar and color scale
// Storage: config_kv + area_config tables
// ==========================================

pub mod config_manager;
pub mod error;
pub mod validation;

pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use validation::{
    validate_area, validate_areas, validate_color, validate_color_scale, validate_dashboard_config, validate_interval,
    validate_max_days, validate_month,
};
