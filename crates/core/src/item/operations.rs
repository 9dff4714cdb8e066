//! Pure payload transformations shared by the service and storage backends.

use serde_json::{json, Value};

use super::types::{ItemData, LastModified, ModificationInfo, ID_FIELD, MODIFICATION_INFO_FIELD};

/// Attaches the identifier and creation metadata to a new item payload.
pub fn with_identity(mut payload: ItemData, item_id: &str, info: &ModificationInfo) -> ItemData {
    payload.insert(
        MODIFICATION_INFO_FIELD.to_string(),
        json!({
            "created_at": info.created_at,
            "created_by": info.created_by,
            "last_modified_at": info.last_modified_at,
            "last_modified_by": info.last_modified_by,
        }),
    );
    payload.insert(ID_FIELD.to_string(), Value::String(item_id.to_string()));
    payload
}

/// Attaches a last-modified stamp to an update payload.
///
/// Only the `last_modified_*` fields are present, so merging the result into a
/// stored item leaves `created_at`/`created_by` untouched.
pub fn with_last_modified(mut payload: ItemData, stamp: &LastModified) -> ItemData {
    payload.insert(
        MODIFICATION_INFO_FIELD.to_string(),
        json!({
            "last_modified_at": stamp.last_modified_at,
            "last_modified_by": stamp.last_modified_by,
        }),
    );
    payload
}

/// Removes the fields owned by the service from a caller-supplied payload.
pub fn strip_managed_fields(mut payload: ItemData) -> ItemData {
    payload.remove(ID_FIELD);
    payload.remove(MODIFICATION_INFO_FIELD);
    payload
}

/// Merges update `changes` into a stored payload.
///
/// Top-level fields replace their stored values. The `modification_info` block
/// is merged key by key so that creation metadata survives.
pub fn merge_update(existing: &mut ItemData, changes: &ItemData) {
    for (field, value) in changes {
        if field == MODIFICATION_INFO_FIELD {
            if let (Some(Value::Object(stored)), Value::Object(incoming)) =
                (existing.get_mut(field), value)
            {
                for (key, inner) in incoming {
                    stored.insert(key.clone(), inner.clone());
                }
                continue;
            }
        }
        existing.insert(field.clone(), value.clone());
    }
}

/// Keeps only the requested top-level fields.
pub fn project_fields(data: &ItemData, fields: &[String]) -> ItemData {
    data.iter()
        .filter(|(field, _)| fields.iter().any(|wanted| wanted == *field))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}
