use async_trait::async_trait;

use crate::item::{ItemData, ItemType};

use super::Result;

/// Storage gateway over a single-table conditional key-value store.
///
/// Every operation is scoped to `tenant_id` and addresses the record at
/// `derive_keys(item_type, tenant_id, item_id).primary`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Writes a new record. Fails with `Conflict` if the key already exists.
    async fn put_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()>;

    /// Reads a record's payload, optionally restricted to `fields`.
    /// Fails with `NotFound` if absent.
    async fn get_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        fields: Option<&[String]>,
    ) -> Result<ItemData>;

    /// Merges `data` into an existing record. Fails with `NotFound` if absent.
    async fn update_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()>;

    /// Removes a record and returns its payload. Fails with `NotFound` if absent.
    async fn delete_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
    ) -> Result<ItemData>;
}

/// Hands out store clients restricted to a single tenant's keys.
///
/// Enforcing the restriction (IAM session policies, leading-key conditions)
/// is the implementor's job; the gateway only asks for a client per call.
#[async_trait]
pub trait ScopedClientFactory: Send + Sync {
    type Client: Send + Sync;

    async fn open_scoped_client(&self, tenant_id: &str) -> Result<Self::Client>;
}
