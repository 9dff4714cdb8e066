//! Local HTTP front end.
//!
//! Translates plain HTTP requests into proxy events so the dev server runs the
//! exact handlers the Lambda entry point runs. Identity comes from the
//! `x-tenant-id` and `x-user-id` headers in place of an authorizer.

use std::{collections::HashMap, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, post},
    Router,
};
use base64::Engine;
use serde_json::{json, Value};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        event::{HttpContext, RequestContext, ITEM_ID_PARAMETER},
        identity::{TENANT_CLAIM, USER_CLAIM},
        route, ApiGatewayRequest, ApiGatewayResponse,
    },
    state::AppState,
};

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const USER_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/items", post(collection))
        .route("/items/{item_id}", any(member))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

/// POST /items
async fn collection(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> ApiGatewayResponse {
    let event = to_event(&method, None, None, &headers, &body);
    route(&state, &event).await
}

/// GET|PUT|PATCH|DELETE /items/{item_id}
async fn member(
    State(state): State<AppState>,
    method: Method,
    Path(item_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiGatewayResponse {
    let event = to_event(&method, Some(item_id), Some(query), &headers, &body);
    route(&state, &event).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn to_event(
    method: &Method,
    item_id: Option<String>,
    query: Option<HashMap<String, String>>,
    headers: &HeaderMap,
    body: &Bytes,
) -> ApiGatewayRequest {
    let authorizer = match (header(headers, TENANT_HEADER), header(headers, USER_HEADER)) {
        (Some(tenant_id), Some(user_id)) => Some(json!({
            "claims": { TENANT_CLAIM: tenant_id, USER_CLAIM: user_id }
        })),
        _ => None,
    };

    // Bytes that are not UTF-8 travel base64-encoded, as API Gateway sends
    // binary bodies, and fail JSON decoding in the handler.
    let (body, is_base64_encoded) = match std::str::from_utf8(body) {
        _ if body.is_empty() => (None, false),
        Ok(text) => (Some(Value::String(text.to_string())), false),
        Err(_) => (
            Some(Value::String(
                base64::engine::general_purpose::STANDARD.encode(body),
            )),
            true,
        ),
    };

    let header_map = headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();

    ApiGatewayRequest {
        http_method: Some(method.to_string()),
        path: None,
        path_parameters: item_id.map(|id| HashMap::from([(ITEM_ID_PARAMETER.to_string(), id)])),
        query_string_parameters: query.filter(|query| !query.is_empty()),
        headers: Some(header_map),
        body,
        is_base64_encoded,
        request_context: RequestContext {
            request_id: header(headers, REQUEST_ID_HEADER).map(String::from),
            authorizer,
            http: Some(HttpContext {
                method: Some(method.to_string()),
            }),
        },
    }
}

impl IntoResponse for ApiGatewayResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
}
