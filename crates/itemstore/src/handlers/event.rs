//! API Gateway proxy event and response types.

use std::collections::{BTreeMap, HashMap};

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use itemstore_core::envelope::JSON_API_MEDIA_TYPE;
use itemstore_core::item::ItemData;
use itemstore_core::keys::is_valid_key_part;

/// Path parameter carrying the item identifier.
pub const ITEM_ID_PARAMETER: &str = "item_id";

/// Query string parameter selecting payload fields on reads.
pub const FIELDS_PARAMETER: &str = "fields";

/// Inbound proxy event, covering both REST (v1) and HTTP (v2) API payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    pub http_method: Option<String>,
    pub path: Option<String>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: RequestContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub authorizer: Option<Value>,
    pub http: Option<HttpContext>,
}

/// Method details of an HTTP API (v2) event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpContext {
    pub method: Option<String>,
}

/// Errors found while reading a request before it reaches the service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Request carries no tenant or user identity.")]
    MissingIdentity,

    #[error("Missing path parameter '{0}'.")]
    MissingPathParameter(String),

    #[error("Path parameter '{0}' must not contain '#'.")]
    InvalidPathParameter(String),

    #[error("Request body is required.")]
    MissingBody,

    #[error("Malformed JSON body: {0}")]
    InvalidBody(String),

    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("Method {0} is not allowed.")]
    MethodNotAllowed(String),
}

impl EventError {
    pub fn status_code(&self) -> u16 {
        match self {
            EventError::MissingIdentity => 401,
            EventError::MethodNotAllowed(_) => 405,
            _ => 400,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EventError::MissingIdentity => "Unauthorized",
            EventError::MethodNotAllowed(_) => "MethodNotAllowed",
            _ => "InvalidRequest",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EventError::MissingIdentity => "Unauthorized",
            EventError::MethodNotAllowed(_) => "Method Not Allowed",
            _ => "Invalid Request",
        }
    }
}

impl ApiGatewayRequest {
    /// Upper-cased HTTP method from either payload version.
    pub fn method(&self) -> Option<String> {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .http
                    .as_ref()
                    .and_then(|http| http.method.as_deref())
            })
            .map(str::to_ascii_uppercase)
    }

    /// Gateway request id, or a fresh UUID when the event has none.
    pub fn request_id(&self) -> String {
        self.request_context
            .request_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn path_parameter(&self, name: &str) -> Result<&str, EventError> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| EventError::MissingPathParameter(name.to_string()))
    }

    /// The `item_id` path parameter, rejected if it cannot be embedded in a key.
    pub fn item_id(&self) -> Result<&str, EventError> {
        let item_id = self.path_parameter(ITEM_ID_PARAMETER)?;
        if !is_valid_key_part(item_id) {
            return Err(EventError::InvalidPathParameter(
                ITEM_ID_PARAMETER.to_string(),
            ));
        }
        Ok(item_id)
    }

    /// Field names from a comma-separated `fields` query parameter.
    pub fn requested_fields(&self) -> Option<Vec<String>> {
        let raw = self
            .query_string_parameters
            .as_ref()
            .and_then(|params| params.get(FIELDS_PARAMETER))?;

        let fields: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(String::from)
            .collect();

        (!fields.is_empty()).then_some(fields)
    }

    /// Decodes the body into a JSON object payload.
    ///
    /// String bodies are parsed (after base64 decoding when flagged); an
    /// already-parsed object is accepted as is.
    pub fn json_body(&self) -> Result<ItemData, EventError> {
        let value = match &self.body {
            None | Some(Value::Null) => return Err(EventError::MissingBody),
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Err(EventError::MissingBody)
            }
            Some(Value::String(text)) => {
                let bytes = if self.is_base64_encoded {
                    base64::engine::general_purpose::STANDARD
                        .decode(text)
                        .map_err(|err| EventError::InvalidBody(err.to_string()))?
                } else {
                    text.as_bytes().to_vec()
                };
                serde_json::from_slice::<Value>(&bytes)
                    .map_err(|err| EventError::InvalidBody(err.to_string()))?
            }
            Some(other) => other.clone(),
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(EventError::NotAnObject),
        }
    }
}

/// Proxy integration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    /// A response carrying the JSON:API content type.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), JSON_API_MEDIA_TYPE.to_string());

        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }

    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> ApiGatewayRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_rest_event() {
        let event = request(json!({
            "httpMethod": "post",
            "path": "/items",
            "pathParameters": null,
            "headers": {"Content-Type": "application/json"},
            "body": "{\"text\": \"Hello\"}",
            "isBase64Encoded": false,
            "requestContext": {
                "requestId": "req-1",
                "authorizer": {"claims": {"sub": "user", "custom:tenant_id": "tenant"}}
            }
        }));

        assert_eq!(event.method().as_deref(), Some("POST"));
        assert_eq!(event.request_id(), "req-1");
        assert_eq!(event.json_body().unwrap()["text"], "Hello");
    }

    #[test]
    fn test_http_api_method() {
        let event = request(json!({"requestContext": {"http": {"method": "DELETE"}}}));
        assert_eq!(event.method().as_deref(), Some("DELETE"));
    }

    #[test]
    fn test_request_id_fallback_is_uuid() {
        let event = ApiGatewayRequest::default();
        Uuid::parse_str(&event.request_id()).expect("fallback id should be a UUID");
    }

    #[test]
    fn test_base64_body() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(r#"{"text":"Hi"}"#);
        let event = request(json!({"body": encoded, "isBase64Encoded": true}));

        assert_eq!(event.json_body().unwrap()["text"], "Hi");
    }

    #[test]
    fn test_object_body_is_accepted() {
        let event = request(json!({"body": {"text": "Hi"}}));
        assert_eq!(event.json_body().unwrap()["text"], "Hi");
    }

    #[test]
    fn test_body_errors() {
        assert_eq!(
            ApiGatewayRequest::default().json_body(),
            Err(EventError::MissingBody)
        );
        assert!(matches!(
            request(json!({"body": "{not json"})).json_body(),
            Err(EventError::InvalidBody(_))
        ));
        assert_eq!(
            request(json!({"body": "[1, 2]"})).json_body(),
            Err(EventError::NotAnObject)
        );
    }

    #[test]
    fn test_missing_item_id() {
        let event = request(json!({"pathParameters": {"other": "x"}}));
        assert_eq!(
            event.item_id(),
            Err(EventError::MissingPathParameter("item_id".to_string()))
        );
    }

    #[test]
    fn test_item_id_with_key_delimiter_is_rejected() {
        let event = request(json!({"pathParameters": {"item_id": "x#item#abc"}}));
        let err = event.item_id().unwrap_err();

        assert_eq!(err, EventError::InvalidPathParameter("item_id".to_string()));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), "InvalidRequest");
    }

    #[test]
    fn test_requested_fields() {
        let event = request(json!({"queryStringParameters": {"fields": "text, success,,"}}));
        assert_eq!(
            event.requested_fields(),
            Some(vec!["text".to_string(), "success".to_string()])
        );

        let event = request(json!({"queryStringParameters": {"fields": ""}}));
        assert_eq!(event.requested_fields(), None);
    }

    #[test]
    fn test_response_serializes_status_code() {
        let response = ApiGatewayResponse::new(204, "");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 204);
        assert_eq!(value["headers"]["Content-Type"], JSON_API_MEDIA_TYPE);
        assert_eq!(value["body"], "");
    }

    #[test]
    fn test_event_error_mapping() {
        assert_eq!(EventError::MissingIdentity.status_code(), 401);
        assert_eq!(EventError::MissingBody.code(), "InvalidRequest");
        assert_eq!(
            EventError::MethodNotAllowed("HEAD".into()).title(),
            "Method Not Allowed"
        );
    }
}
