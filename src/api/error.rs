// ==========================================
// Vegetation Cut - API error types
// ==========================================
// Turns layer errors into operator-facing messages
// ==========================================

use crate::config::error::ConfigError;
use crate::export::error::ExportError;
use crate::i18n::t_with_args;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // input / business rules
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ==========================================
    // files
    // ==========================================
    #[error("import failed: {0}")]
    ImportError(String),

    #[error("export failed: {0}")]
    ExportError(String),

    // ==========================================
    // storage
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("could not acquire lock: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => ApiError::DatabaseTransactionError(msg),
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => ApiError::InvalidConfig(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("stored field {} is invalid: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Repository(repo) => ApiError::from(repo),
            ConfigError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("could not acquire lock: {}", msg))
            }
            ConfigError::UnknownArea(id) => ApiError::NotFound(format!("area {}", id)),
            ConfigError::Snapshot(msg) => ApiError::InvalidInput(msg),
            ConfigError::Other(err) => ApiError::Other(err),
            validation => ApiError::InvalidConfig(validation.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => {
                ApiError::ImportError(t_with_args("import.file_not_found", &[("path", path.as_str())]))
            }
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Other(err) => ApiError::Other(err),
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation_maps_to_invalid_config() {
        let err: ApiError = ConfigError::InvalidMonth(13).into();
        assert!(matches!(err, ApiError::InvalidConfig(ref msg) if msg.contains("13")));

        let err: ApiError = ConfigError::UnknownArea(40).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_nested_repository_error_is_unwrapped() {
        let err: ApiError =
            ConfigError::Repository(RepositoryError::DatabaseQueryError("boom".to_string())).into();
        assert!(matches!(err, ApiError::DatabaseError(ref msg) if msg == "boom"));
    }

    #[test]
    fn test_import_error_keeps_message() {
        let err: ApiError = ImportError::MissingColumn {
            column: "data_corte".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ImportError(ref msg) if msg.contains("data_corte")));
    }
}
