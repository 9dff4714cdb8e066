//! JSON:API-style error envelope.

use serde::{Deserialize, Serialize};

use crate::storage::{item_error_to_status_code, ItemError};

/// Media type sent in the `Content-Type` header of every response.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// A single entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub id: String,
    pub code: String,
    pub title: String,
    pub detail: String,
    pub status: String,
}

impl ErrorObject {
    pub fn new(
        request_id: impl Into<String>,
        status: u16,
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: request_id.into(),
            code: code.into(),
            title: title.into(),
            detail: detail.into(),
            status: status.to_string(),
        }
    }

    /// Builds the error object for a storage error raised while serving `request_id`.
    pub fn from_item_error(request_id: impl Into<String>, error: &ItemError) -> Self {
        Self::new(
            request_id,
            item_error_to_status_code(error),
            error.code(),
            error.title(),
            error.to_string(),
        )
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsBody {
    pub errors: Vec<ErrorObject>,
}

impl From<ErrorObject> for ErrorsBody {
    fn from(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    #[test]
    fn test_from_not_found() {
        let error = ItemError::not_found(ItemType::Item, "acme", "abc");
        let object = ErrorObject::from_item_error("req-1", &error);

        assert_eq!(object.id, "req-1");
        assert_eq!(object.code, "ItemNotFound");
        assert_eq!(object.title, "Item Not Found");
        assert_eq!(object.detail, "Item of type item [acme/abc] not found.");
        assert_eq!(object.status, "404");
    }

    #[test]
    fn test_envelope_shape() {
        let error = ItemError::conflict(ItemType::Item, "acme", "abc");
        let body = ErrorsBody::from(ErrorObject::from_item_error("req-2", &error));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["errors"][0]["code"], "ItemConflict");
        assert_eq!(json["errors"][0]["status"], "409");
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }
}
