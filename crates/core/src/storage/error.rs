use thiserror::Error;

use crate::item::ItemType;

/// Errors raised by the storage gateway and passed through the service.
///
/// `NotFound` and `Conflict` carry the `(item_type, tenant, item_id)` triplet
/// and a fixed code/title pair. `Backend` carries the raw message of any
/// failure the store did not classify.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("Item of type {item_type} [{tenant}/{item_id}] not found.")]
    NotFound {
        item_type: ItemType,
        tenant: String,
        item_id: String,
    },
    #[error("Item of type {item_type} [{tenant}:{item_id}] already exists.")]
    Conflict {
        item_type: ItemType,
        tenant: String,
        item_id: String,
    },
    #[error("{0}")]
    Backend(String),
}

impl ItemError {
    pub fn not_found(item_type: ItemType, tenant: &str, item_id: &str) -> Self {
        Self::NotFound {
            item_type,
            tenant: tenant.to_string(),
            item_id: item_id.to_string(),
        }
    }

    pub fn conflict(item_type: ItemType, tenant: &str, item_id: &str) -> Self {
        Self::Conflict {
            item_type,
            tenant: tenant.to_string(),
            item_id: item_id.to_string(),
        }
    }

    /// Machine-readable error code used in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ItemError::NotFound { .. } => "ItemNotFound",
            ItemError::Conflict { .. } => "ItemConflict",
            ItemError::Backend(_) => "400",
        }
    }

    /// Human-readable title used in the error envelope.
    pub fn title(&self) -> &'static str {
        match self {
            ItemError::NotFound { .. } => "Item Not Found",
            ItemError::Conflict { .. } => "Item Conflict",
            ItemError::Backend(_) => "Unknown error",
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, ItemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = ItemError::not_found(ItemType::Item, "acme", "abc-123");
        assert_eq!(error.to_string(), "Item of type item [acme/abc-123] not found.");
    }

    #[test]
    fn test_conflict_display() {
        let error = ItemError::conflict(ItemType::Item, "acme", "abc-123");
        assert_eq!(
            error.to_string(),
            "Item of type item [acme:abc-123] already exists."
        );
    }

    #[test]
    fn test_backend_display_is_raw_message() {
        let error = ItemError::Backend("ProvisionedThroughputExceededException".to_string());
        assert_eq!(error.to_string(), "ProvisionedThroughputExceededException");
    }

    #[test]
    fn test_codes_and_titles() {
        let not_found = ItemError::not_found(ItemType::Item, "t", "i");
        let conflict = ItemError::conflict(ItemType::Item, "t", "i");
        let backend = ItemError::Backend("boom".to_string());

        assert_eq!(not_found.code(), "ItemNotFound");
        assert_eq!(not_found.title(), "Item Not Found");
        assert_eq!(conflict.code(), "ItemConflict");
        assert_eq!(conflict.title(), "Item Conflict");
        assert_eq!(backend.code(), "400");
        assert_eq!(backend.title(), "Unknown error");
    }
}
