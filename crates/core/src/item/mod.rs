mod operations;
mod types;

pub use operations::{
    merge_update, project_fields, strip_managed_fields, with_identity, with_last_modified,
};
pub use types::{
    ItemData, ItemType, LastModified, ModificationInfo, ID_FIELD, LAST_MODIFIED_AT_FIELD,
    LAST_MODIFIED_BY_FIELD, MODIFICATION_INFO_FIELD,
};
