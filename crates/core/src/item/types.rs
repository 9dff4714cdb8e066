use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque item payload: an arbitrary string-keyed JSON object.
pub type ItemData = serde_json::Map<String, serde_json::Value>;

/// Payload field holding the item identifier.
pub const ID_FIELD: &str = "id";
/// Payload field holding the [`ModificationInfo`] block.
pub const MODIFICATION_INFO_FIELD: &str = "modification_info";
pub const LAST_MODIFIED_AT_FIELD: &str = "last_modified_at";
pub const LAST_MODIFIED_BY_FIELD: &str = "last_modified_by";

/// Types of primary objects stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Item,
}

impl ItemType {
    /// Returns the value embedded in storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Item => "item",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorship and timestamps attached to every stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationInfo {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub last_modified_at: DateTime<Utc>,
    pub last_modified_by: String,
}

impl ModificationInfo {
    /// Metadata for an item created by `user_id` at `now`.
    ///
    /// Creation and last-modification fields are identical on first write.
    pub fn created(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let user_id = user_id.into();
        Self {
            created_at: now,
            created_by: user_id.clone(),
            last_modified_at: now,
            last_modified_by: user_id,
        }
    }
}

/// The subset of [`ModificationInfo`] an update is allowed to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastModified {
    pub last_modified_at: DateTime<Utc>,
    pub last_modified_by: String,
}

impl LastModified {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            last_modified_at: now,
            last_modified_by: user_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_type_as_str() {
        assert_eq!(ItemType::Item.as_str(), "item");
        assert_eq!(ItemType::Item.to_string(), "item");
    }

    #[test]
    fn test_item_type_serializes_lowercase() {
        let json = serde_json::to_string(&ItemType::Item).unwrap();
        assert_eq!(json, "\"item\"");
    }

    #[test]
    fn test_created_sets_equal_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let info = ModificationInfo::created("user-1", now);

        assert_eq!(info.created_at, info.last_modified_at);
        assert_eq!(info.created_by, "user-1");
        assert_eq!(info.last_modified_by, "user-1");
    }

    #[test]
    fn test_modification_info_field_names() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let value = serde_json::to_value(ModificationInfo::created("user-1", now)).unwrap();

        let object = value.as_object().unwrap();
        assert!(object.contains_key("created_at"));
        assert!(object.contains_key("created_by"));
        assert!(object.contains_key(LAST_MODIFIED_AT_FIELD));
        assert!(object.contains_key(LAST_MODIFIED_BY_FIELD));
    }
}
