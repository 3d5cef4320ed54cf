// ==========================================
// Vegetation Cut - configuration error types
// ==========================================
// Raised at configuration-edit time; values are never clamped.
// A missing configuration is NOT an error (defaults apply).
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== validation =====
    #[error("area {area_id}: {field} must be within [{min}, {max}] days, got {value}")]
    InvalidIntervalConfig {
        area_id: u32,
        field: String,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("area {area_id}: name must not be empty")]
    EmptyAreaName { area_id: u32 },

    #[error("invalid area id: {0} (ids start at 1)")]
    InvalidAreaId(u32),

    #[error("duplicate area id: {0}")]
    DuplicateAreaId(u32),

    #[error("area id {area_id} out of range: ids must be exactly 1..={count}")]
    AreaIdOutOfRange { area_id: u32, count: u32 },

    #[error("area not found: {0}")]
    UnknownArea(u32),

    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("invalid color scale upper bound: {value} (expected {min}-{max})")]
    InvalidMaxDays { value: u32, min: u32, max: u32 },

    #[error("invalid color: '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("color scale has no thresholds")]
    EmptyColorScale,

    #[error("invalid color scale step: {0} (must be at least 1)")]
    InvalidScaleStep(u32),

    // ===== storage =====
    #[error("configuration storage failed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("database lock failed: {0}")]
    LockError(String),

    #[error("configuration snapshot is invalid: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ConfigError {
    fn from(err: rusqlite::Error) -> Self {
        ConfigError::Repository(RepositoryError::from(err))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Snapshot(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
