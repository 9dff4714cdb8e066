//! Shared application state.

use std::sync::Arc;

use itemstore_core::storage::ItemRepository;

use crate::{
    handlers::Identity,
    service::{random_ids, IdGenerator, ItemService},
    storage::InMemoryRepository,
};

/// Resources built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Storage gateway.
    pub repository: Arc<dyn ItemRepository>,
    /// Identifier source for new items.
    pub id_generator: IdGenerator,
}

impl AppState {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self {
            repository,
            id_generator: random_ids(),
        }
    }

    pub fn with_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Builds the request-scoped service for the calling tenant and user.
    pub fn service_for(&self, identity: &Identity) -> ItemService {
        ItemService::new(
            self.repository.clone(),
            identity.tenant_id.as_str(),
            identity.user_id.as_str(),
        )
        .with_id_generator(self.id_generator.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}
