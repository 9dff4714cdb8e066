//! Item business rules.
//!
//! An [`ItemService`] lives for one request and carries the caller's tenant and
//! user. It assigns identifiers, stamps authorship and timestamps, and passes
//! storage errors through unchanged.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use itemstore_core::item::{
    strip_managed_fields, with_identity, with_last_modified, ItemData, ItemType, LastModified,
    ModificationInfo, ID_FIELD,
};
use itemstore_core::storage::{ItemRepository, Result};

/// Produces identifiers for new items.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Random UUID v4 identifiers.
pub fn random_ids() -> IdGenerator {
    Arc::new(|| Uuid::new_v4().to_string())
}

/// Request-scoped item operations for one tenant and user.
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    tenant_id: String,
    user_id: String,
    ids: IdGenerator,
}

impl ItemService {
    pub fn new(
        repository: Arc<dyn ItemRepository>,
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            ids: random_ids(),
        }
    }

    /// Replaces the identifier source.
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Get an item, scoped to the service's tenant.
    #[tracing::instrument(name = "service_get_item", skip(self), fields(tenant_id = %self.tenant_id))]
    pub async fn get_item(&self, item_id: &str) -> Result<ItemData> {
        tracing::info!("Getting item");
        self.repository
            .get_item(ItemType::Item, &self.tenant_id, item_id, None)
            .await
    }

    /// Get only the named payload fields of an item.
    #[tracing::instrument(name = "service_get_item_fields", skip(self), fields(tenant_id = %self.tenant_id))]
    pub async fn get_item_fields(&self, item_id: &str, fields: &[String]) -> Result<ItemData> {
        tracing::info!("Getting item fields");
        self.repository
            .get_item(ItemType::Item, &self.tenant_id, item_id, Some(fields))
            .await
    }

    /// Create an item under a fresh identifier.
    ///
    /// A conflicting identifier is reported, never retried under a new one.
    #[tracing::instrument(name = "service_create_item", skip(self, payload), fields(tenant_id = %self.tenant_id))]
    pub async fn create_item(&self, payload: ItemData) -> Result<ItemData> {
        let item_id = (self.ids)();
        let info = ModificationInfo::created(self.user_id.as_str(), Utc::now());
        let item = with_identity(payload, &item_id, &info);

        tracing::info!(item_id = %item_id, "Creating item");
        self.repository
            .put_item(ItemType::Item, &self.tenant_id, &item_id, &item)
            .await?;

        Ok(item)
    }

    /// Update an existing item.
    ///
    /// Returns the payload as sent plus the new last-modified stamp; the stored
    /// record is not re-read.
    #[tracing::instrument(name = "service_update_item", skip(self, payload), fields(tenant_id = %self.tenant_id))]
    pub async fn update_item(&self, item_id: &str, payload: ItemData) -> Result<ItemData> {
        let stamp = LastModified::new(self.user_id.as_str(), Utc::now());
        let changes = with_last_modified(strip_managed_fields(payload), &stamp);

        tracing::info!("Updating item");
        self.repository
            .update_item(ItemType::Item, &self.tenant_id, item_id, &changes)
            .await?;

        let mut updated = changes;
        updated.insert(ID_FIELD.to_string(), item_id.into());
        Ok(updated)
    }

    /// Delete an item, returning what was removed.
    #[tracing::instrument(name = "service_delete_item", skip(self), fields(tenant_id = %self.tenant_id))]
    pub async fn delete_item(&self, item_id: &str) -> Result<ItemData> {
        tracing::info!("Deleting item");
        self.repository
            .delete_item(ItemType::Item, &self.tenant_id, item_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemstore_core::storage::ItemError;
    use serde_json::json;

    use crate::storage::inmemory::InMemoryRepository;

    const TENANT: &str = "00000000-0000-0000-0000-000000000000";
    const USER: &str = "f4db93cc-69d6-42f8-9ce7-895776f177f5";

    fn data(value: serde_json::Value) -> ItemData {
        value.as_object().cloned().unwrap()
    }

    fn service(repo: &InMemoryRepository) -> ItemService {
        ItemService::new(Arc::new(repo.clone()), TENANT, USER)
    }

    fn fixed_ids(id: &'static str) -> IdGenerator {
        Arc::new(move || id.to_string())
    }

    #[tokio::test]
    async fn test_create_item_enriches_payload() {
        let repo = InMemoryRepository::new();
        let item = service(&repo)
            .create_item(data(json!({"text": "Hello"})))
            .await
            .unwrap();

        assert_eq!(item["text"], "Hello");
        let id = item["id"].as_str().unwrap();
        Uuid::parse_str(id).expect("id should be a UUID");

        let info = &item["modification_info"];
        assert_eq!(info["created_at"], info["last_modified_at"]);
        assert_eq!(info["created_by"], USER);
        assert_eq!(info["last_modified_by"], USER);
    }

    #[tokio::test]
    async fn test_created_item_is_stored() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let item = service
            .create_item(data(json!({"text": "Hello"})))
            .await
            .unwrap();

        let stored = service
            .get_item(item["id"].as_str().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, item);
    }

    #[tokio::test]
    async fn test_create_item_overrides_caller_identity_fields() {
        let repo = InMemoryRepository::new();
        let item = service(&repo)
            .with_id_generator(fixed_ids("assigned"))
            .create_item(data(json!({
                "id": "forged",
                "modification_info": {"created_by": "someone-else"},
            })))
            .await
            .unwrap();

        assert_eq!(item["id"], "assigned");
        assert_eq!(item["modification_info"]["created_by"], USER);
    }

    #[tokio::test]
    async fn test_create_item_id_collision_conflicts() {
        let repo = InMemoryRepository::new();
        let service = service(&repo).with_id_generator(fixed_ids("same-id"));

        service
            .create_item(data(json!({"text": "first"})))
            .await
            .unwrap();
        let result = service.create_item(data(json!({"text": "second"}))).await;

        assert_eq!(
            result,
            Err(ItemError::conflict(ItemType::Item, TENANT, "same-id"))
        );
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_item_fields_projects_payload() {
        let repo = InMemoryRepository::new();
        let service = service(&repo).with_id_generator(fixed_ids("item-1"));
        service
            .create_item(data(json!({"text": "Hello", "success": true})))
            .await
            .unwrap();

        let projected = service
            .get_item_fields("item-1", &["text".to_string()])
            .await
            .unwrap();

        assert_eq!(projected, data(json!({"text": "Hello"})));
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let repo = InMemoryRepository::new();
        let result = service(&repo).get_item("does-not-exist").await;

        assert_eq!(
            result,
            Err(ItemError::not_found(ItemType::Item, TENANT, "does-not-exist"))
        );
    }

    #[tokio::test]
    async fn test_update_item_keeps_creation_metadata() {
        let repo = InMemoryRepository::new();
        let creator = service(&repo).with_id_generator(fixed_ids("item-1"));
        let created = creator
            .create_item(data(json!({"text": "Hello", "success": true})))
            .await
            .unwrap();

        let editor = ItemService::new(Arc::new(repo.clone()), TENANT, "editor");
        let updated = editor
            .update_item(
                "item-1",
                data(json!({"text": "Updated", "modification_info": {"created_by": "editor"}})),
            )
            .await
            .unwrap();

        assert_eq!(updated["id"], "item-1");
        assert_eq!(updated["text"], "Updated");
        assert_eq!(updated["modification_info"]["last_modified_by"], "editor");
        assert!(updated["modification_info"].get("created_by").is_none());

        let stored = editor.get_item("item-1").await.unwrap();
        assert_eq!(stored["text"], "Updated");
        assert_eq!(stored["success"], true);
        assert_eq!(
            stored["modification_info"]["created_at"],
            created["modification_info"]["created_at"]
        );
        assert_eq!(stored["modification_info"]["created_by"], USER);
        assert_eq!(stored["modification_info"]["last_modified_by"], "editor");
    }

    #[tokio::test]
    async fn test_update_item_not_found_creates_nothing() {
        let repo = InMemoryRepository::new();
        let result = service(&repo)
            .update_item("missing", data(json!({"text": "Bye"})))
            .await;

        assert!(matches!(result, Err(ItemError::NotFound { .. })));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_item_then_get_fails() {
        let repo = InMemoryRepository::new();
        let service = service(&repo).with_id_generator(fixed_ids("item-1"));
        let created = service
            .create_item(data(json!({"text": "Hello"})))
            .await
            .unwrap();

        let deleted = service.delete_item("item-1").await.unwrap();
        assert_eq!(deleted, created);

        let result = service.get_item("item-1").await;
        assert!(matches!(result, Err(ItemError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_item_not_found() {
        let repo = InMemoryRepository::new();
        let result = service(&repo).delete_item("missing").await;
        assert!(matches!(result, Err(ItemError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_other_tenant_cannot_read_item() {
        let repo = InMemoryRepository::new();
        let item = service(&repo)
            .create_item(data(json!({"text": "secret"})))
            .await
            .unwrap();

        let other = ItemService::new(Arc::new(repo.clone()), "other-tenant", USER);
        let result = other.get_item(item["id"].as_str().unwrap()).await;

        assert!(matches!(result, Err(ItemError::NotFound { .. })));
    }
}
