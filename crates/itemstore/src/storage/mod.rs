//! Storage backend implementations.
//!
//! Concrete implementations of [`ItemRepository`](itemstore_core::storage::ItemRepository).
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always available; the dev server and the tests
//! use it.
//!
//! Build without DynamoDB:
//! ```bash
//! cargo build -p itemstore --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
