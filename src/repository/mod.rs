// ==========================================
// Vegetation Cut - repository layer
// ==========================================
// Data access only, no business rules
// All queries are parameterized
// ==========================================

pub mod area_config_repo;
pub mod error;

pub use area_config_repo::AreaConfigRepository;
pub use error::{RepositoryError, RepositoryResult};
