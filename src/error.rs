use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Input rejected before anything was persisted
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// The slug is already used by another entity of the same type
    #[error("Duplicate slug for {kind}: {slug}")]
    DuplicateSlug { kind: &'static str, slug: String },

    /// The storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(StorageError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Catalog snapshot could not be read
    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl CatalogError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEntry { kind, slug } => CatalogError::DuplicateSlug { kind, slug },
            StorageError::NotFound { kind, key } => CatalogError::NotFound { kind, key },
            other => CatalogError::Storage(other),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SnapshotError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_duplicate_maps_to_duplicate_slug() {
        let err: CatalogError = StorageError::DuplicateEntry {
            kind: "recipe",
            slug: "pho".to_string(),
        }
        .into();
        assert!(matches!(err, CatalogError::DuplicateSlug { kind: "recipe", .. }));
    }

    #[test]
    fn test_storage_failure_is_wrapped() {
        let err: CatalogError = StorageError::CascadeFailed("lock poisoned".to_string()).into();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert!(err.to_string().contains("lock poisoned"));
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("region", "atlantis");
        assert_eq!(err.to_string(), "region not found: atlantis");
    }
}
