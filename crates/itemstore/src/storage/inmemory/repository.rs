//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use itemstore_core::item::{merge_update, project_fields, ItemData, ItemType};
use itemstore_core::keys::derive_keys;
use itemstore_core::storage::{ItemError, ItemRepository, Result};

/// In-memory single-table store.
///
/// Each conditional operation checks and writes under one write lock, so the
/// existence conditions hold exactly as they would with DynamoDB's
/// conditional expressions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<HashMap<String, ItemData>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all tenants.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn put_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()> {
        let keys = derive_keys(item_type, tenant_id, item_id);
        let mut records = self.records.write().await;
        if records.contains_key(&keys.primary) {
            return Err(ItemError::conflict(item_type, tenant_id, item_id));
        }
        records.insert(keys.primary, data.clone());
        Ok(())
    }

    async fn get_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        fields: Option<&[String]>,
    ) -> Result<ItemData> {
        let keys = derive_keys(item_type, tenant_id, item_id);
        let records = self.records.read().await;
        let data = records
            .get(&keys.primary)
            .ok_or_else(|| ItemError::not_found(item_type, tenant_id, item_id))?;

        Ok(match fields {
            Some(fields) if !fields.is_empty() => project_fields(data, fields),
            _ => data.clone(),
        })
    }

    async fn update_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()> {
        let keys = derive_keys(item_type, tenant_id, item_id);
        let mut records = self.records.write().await;
        let existing = records
            .get_mut(&keys.primary)
            .ok_or_else(|| ItemError::not_found(item_type, tenant_id, item_id))?;
        merge_update(existing, data);
        Ok(())
    }

    async fn delete_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
    ) -> Result<ItemData> {
        let keys = derive_keys(item_type, tenant_id, item_id);
        let mut records = self.records.write().await;
        records
            .remove(&keys.primary)
            .ok_or_else(|| ItemError::not_found(item_type, tenant_id, item_id))
    }
}
