//! DynamoDB error mapping.
//!
//! A failed condition expression becomes the matching domain error. Every
//! other SDK failure becomes `ItemError::Backend` carrying the SDK's message.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;

use itemstore_core::item::ItemType;
use itemstore_core::storage::ItemError;

/// Map a PutItem SDK error to ItemError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    item_type: ItemType,
    tenant_id: &str,
    item_id: &str,
) -> ItemError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => {
            ItemError::conflict(item_type, tenant_id, item_id)
        }
        err => backend_error(err),
    }
}

/// Map a GetItem SDK error to ItemError.
///
/// A missing record is not an error for GetItem; the repository detects it
/// from the empty response.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> ItemError {
    backend_error(err.into_service_error())
}

/// Map an UpdateItem SDK error to ItemError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    item_type: ItemType,
    tenant_id: &str,
    item_id: &str,
) -> ItemError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            ItemError::not_found(item_type, tenant_id, item_id)
        }
        err => backend_error(err),
    }
}

/// Map a DeleteItem SDK error to ItemError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    item_type: ItemType,
    tenant_id: &str,
    item_id: &str,
) -> ItemError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            ItemError::not_found(item_type, tenant_id, item_id)
        }
        err => backend_error(err),
    }
}

fn backend_error(err: impl std::error::Error) -> ItemError {
    let message = DisplayErrorContext(err).to_string();
    tracing::error!(error = %message, "DynamoDB request failed");
    ItemError::Backend(message)
}
