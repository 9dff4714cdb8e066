//! Item CRUD handlers.
//!
//! Each handler turns one proxy event into one service call. Failures become a
//! JSON:API error envelope tagged with the request id.

use serde_json::Value;
use thiserror::Error;

use itemstore_core::envelope::{ErrorObject, ErrorsBody};
use itemstore_core::item::ItemData;
use itemstore_core::storage::ItemError;

use super::event::{ApiGatewayRequest, ApiGatewayResponse, EventError};
use super::identity::Identity;
use crate::state::AppState;

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl HandlerError {
    fn to_error_object(&self, request_id: &str) -> ErrorObject {
        match self {
            HandlerError::Event(err) => ErrorObject::new(
                request_id,
                err.status_code(),
                err.code(),
                err.title(),
                err.to_string(),
            ),
            HandlerError::Item(err) => ErrorObject::from_item_error(request_id, err),
        }
    }

    pub fn into_response(self, request_id: &str) -> ApiGatewayResponse {
        let error = self.to_error_object(request_id);
        let status = error.status.parse().unwrap_or(400);

        match &self {
            HandlerError::Item(ItemError::Backend(_)) => {
                tracing::error!(request_id, error = %self, "Request failed")
            }
            _ => tracing::warn!(request_id, error = %self, "Request rejected"),
        }

        match serde_json::to_string(&ErrorsBody::from(error)) {
            Ok(body) => ApiGatewayResponse::new(status, body),
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize error envelope");
                ApiGatewayResponse::new(500, "")
            }
        }
    }
}

fn item_response(status: u16, item: ItemData) -> ApiGatewayResponse {
    ApiGatewayResponse::new(status, Value::Object(item).to_string())
}

/// Dispatch one event by HTTP method.
pub async fn route(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    match request.method().as_deref() {
        Some("POST") => create_item(state, request).await,
        Some("GET") => get_item(state, request).await,
        Some("PUT") | Some("PATCH") => update_item(state, request).await,
        Some("DELETE") => delete_item(state, request).await,
        other => {
            let method = other.unwrap_or("UNKNOWN").to_string();
            HandlerError::from(EventError::MethodNotAllowed(method))
                .into_response(&request.request_id())
        }
    }
}

/// Create an item (POST). `200` with the created item.
pub async fn create_item(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    let request_id = request.request_id();
    match create_item_impl(state, request).await {
        Ok(item) => item_response(200, item),
        Err(err) => err.into_response(&request_id),
    }
}

async fn create_item_impl(
    state: &AppState,
    request: &ApiGatewayRequest,
) -> Result<ItemData, HandlerError> {
    let identity = Identity::from_request(request)?;
    let payload = request.json_body()?;

    let item = state.service_for(&identity).create_item(payload).await?;

    tracing::info!(
        tenant_id = %identity.tenant_id,
        item_id = ?item.get("id"),
        "Created item"
    );
    Ok(item)
}

/// Get an item (GET). `200` with the item, or only the fields named in `?fields=`.
pub async fn get_item(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    let request_id = request.request_id();
    match get_item_impl(state, request).await {
        Ok(item) => item_response(200, item),
        Err(err) => err.into_response(&request_id),
    }
}

async fn get_item_impl(
    state: &AppState,
    request: &ApiGatewayRequest,
) -> Result<ItemData, HandlerError> {
    let identity = Identity::from_request(request)?;
    let item_id = request.item_id()?;
    let service = state.service_for(&identity);

    let item = match request.requested_fields() {
        Some(fields) => service.get_item_fields(item_id, &fields).await?,
        None => service.get_item(item_id).await?,
    };

    tracing::debug!(tenant_id = %identity.tenant_id, item_id, "Fetched item");
    Ok(item)
}

/// Update an item (PUT/PATCH). `200` with the submitted changes and new stamp.
pub async fn update_item(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    let request_id = request.request_id();
    match update_item_impl(state, request).await {
        Ok(item) => item_response(200, item),
        Err(err) => err.into_response(&request_id),
    }
}

async fn update_item_impl(
    state: &AppState,
    request: &ApiGatewayRequest,
) -> Result<ItemData, HandlerError> {
    let identity = Identity::from_request(request)?;
    let item_id = request.item_id()?;
    let payload = request.json_body()?;

    let item = state
        .service_for(&identity)
        .update_item(item_id, payload)
        .await?;

    tracing::info!(tenant_id = %identity.tenant_id, item_id, "Updated item");
    Ok(item)
}

/// Delete an item (DELETE). `204` with an empty body.
pub async fn delete_item(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    let request_id = request.request_id();
    match delete_item_impl(state, request).await {
        Ok(()) => ApiGatewayResponse::new(204, ""),
        Err(err) => err.into_response(&request_id),
    }
}

async fn delete_item_impl(
    state: &AppState,
    request: &ApiGatewayRequest,
) -> Result<(), HandlerError> {
    let identity = Identity::from_request(request)?;
    let item_id = request.item_id()?;

    state.service_for(&identity).delete_item(item_id).await?;

    tracing::info!(tenant_id = %identity.tenant_id, item_id, "Deleted item");
    Ok(())
}
