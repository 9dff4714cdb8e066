//! Pure functions for mapping item errors to HTTP status codes.

use super::ItemError;

/// Maps an [`ItemError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 409 (Conflict)
/// - `Backend` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use itemstore_core::item::ItemType;
/// use itemstore_core::storage::{item_error_to_status_code, ItemError};
///
/// let error = ItemError::not_found(ItemType::Item, "acme", "abc-123");
/// assert_eq!(item_error_to_status_code(&error), 404);
/// ```
pub fn item_error_to_status_code(error: &ItemError) -> u16 {
    match error {
        ItemError::NotFound { .. } => 404,
        ItemError::Conflict { .. } => 409,
        ItemError::Backend(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = ItemError::not_found(ItemType::Item, "t", "i");
        assert_eq!(item_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let error = ItemError::conflict(ItemType::Item, "t", "i");
        assert_eq!(item_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_backend_maps_to_400() {
        let error = ItemError::Backend("throttled".to_string());
        assert_eq!(item_error_to_status_code(&error), 400);
    }
}
