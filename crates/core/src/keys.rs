//! Single-table key derivation.
//!
//! Every record lives in one table. Keys are overloaded strings joined by
//! [`KEY_DELIMITER`]:
//!
//! - primary: `<tenant_id>#<item_type>#<item_id>`
//! - collection: `<tenant_id>#<item_type>`

use crate::item::ItemType;

/// Delimiter separating the parts of an overloaded key.
pub const KEY_DELIMITER: &str = "#";

/// Keys used to address a single primary item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// Uniquely addresses one item.
    pub primary: String,
    /// Addresses every item of the same type for the same tenant.
    pub collection: String,
}

/// Whether `part` can be embedded in a key: non-empty and free of
/// [`KEY_DELIMITER`].
pub fn is_valid_key_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(KEY_DELIMITER)
}

/// Derives the key pair for an item.
///
/// `tenant_id` and `item_id` must satisfy [`is_valid_key_part`]. Parts
/// containing the delimiter can make two different `(tenant_id, item_id)`
/// pairs share a primary key; callers validate untrusted input first.
///
/// # Examples
///
/// ```
/// use itemstore_core::item::ItemType;
/// use itemstore_core::keys::derive_keys;
///
/// let keys = derive_keys(ItemType::Item, "acme", "42");
/// assert_eq!(keys.primary, "acme#item#42");
/// assert_eq!(keys.collection, "acme#item");
/// ```
pub fn derive_keys(item_type: ItemType, tenant_id: &str, item_id: &str) -> ItemKey {
    ItemKey {
        primary: primary_key(item_type, tenant_id, item_id),
        collection: collection_key(item_type, tenant_id),
    }
}

/// Generate the primary key for an item.
///
/// Pattern: `<tenant_id>#<item_type>#<item_id>`
pub fn primary_key(item_type: ItemType, tenant_id: &str, item_id: &str) -> String {
    format!(
        "{tenant_id}{KEY_DELIMITER}{}{KEY_DELIMITER}{item_id}",
        item_type.as_str()
    )
}

/// Generate the collection key for all items of a type owned by a tenant.
///
/// Pattern: `<tenant_id>#<item_type>`
pub fn collection_key(item_type: ItemType, tenant_id: &str) -> String {
    format!("{tenant_id}{KEY_DELIMITER}{}", item_type.as_str())
}
