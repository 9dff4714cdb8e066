//! AWS Lambda entry point.
//!
//! Builds the DynamoDB gateway once per cold start and routes every proxy
//! event through the item handlers.

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};

use itemstore::{
    config::Config,
    handlers::{route, ApiGatewayRequest, ApiGatewayResponse},
    logging::{init_tracing, DEFAULT_LOG_FILTER},
    state::AppState,
    storage::DynamoDbRepository,
};

async fn handle_request(
    state: &AppState,
    event: LambdaEvent<ApiGatewayRequest>,
) -> Result<ApiGatewayResponse, Error> {
    let LambdaEvent { payload, context } = event;
    tracing::debug!(aws_request_id = %context.request_id, "Handling event");
    Ok(route(state, &payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(DEFAULT_LOG_FILTER);

    let config = Config::from_env();
    let repository = DynamoDbRepository::from_config(&config).await;
    tracing::info!(table = repository.table_name(), "Initialized DynamoDB storage");

    let state = AppState::new(Arc::new(repository));
    let state = &state;

    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(state, event).await
    }))
    .await
}
