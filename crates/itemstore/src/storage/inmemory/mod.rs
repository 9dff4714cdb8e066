//! In-memory storage backend.
//!
//! Stores every record in a `HashMap` keyed by its primary key, wrapped in
//! `Arc<RwLock<_>>`. Used by the local dev server and by the test suites in
//! place of DynamoDB. Data is lost when the repository is dropped.

mod repository;

pub use repository::InMemoryRepository;
