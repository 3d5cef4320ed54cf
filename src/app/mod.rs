// ==========================================
// Vegetation Cut - application layer
// ==========================================
// Wires the database, configuration and APIs together
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
