// ==========================================
// Vegetation Cut - application state
// ==========================================
// One shared SQLite connection behind every API
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, ConfigApi, DashboardApi};
use crate::config::config_manager::ConfigManager;
use crate::db::open_sqlite_connection;

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "VEGETATION_CUT_DB_PATH";

const DB_FILE_NAME: &str = "vegetation_cut.db";

pub struct AppState {
    pub db_path: String,
    pub config_manager: Arc<ConfigManager>,
    pub dashboard_api: Arc<DashboardApi>,
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// Open (or create) the database and build the APIs
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!(db_path = %db_path, "initializing application state");

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(ConfigManager::from_connection(conn));
        let dashboard_api = Arc::new(DashboardApi::new(config_manager.clone()));
        let config_api = Arc::new(ConfigApi::new(config_manager.clone()));

        Ok(Self {
            db_path,
            config_manager,
            dashboard_api,
            config_api,
        })
    }
}

/// Database path: `VEGETATION_CUT_DB_PATH`, else the user data directory,
/// else `./vegetation_cut.db`
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("vegetation-cut");
        // fall back to the working directory if the data dir is not writable
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_on_fresh_database() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert_eq!(state.config_api.get_config().unwrap().area_count(), 35);
    }
}
