//! DynamoDB storage backend.
//!
//! Implements [`ItemRepository`](itemstore_core::storage::ItemRepository) on a
//! single table keyed by `pk` using `aws-sdk-dynamodb`. Existence and
//! uniqueness checks are DynamoDB condition expressions, so every operation
//! is one atomic request.

mod client;
mod conversions;
mod error;
mod expressions;
mod repository;

pub use client::{create_client, SharedClientFactory};
pub use repository::DynamoDbRepository;
