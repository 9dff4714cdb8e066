//! DynamoDB repository implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use itemstore_core::item::{ItemData, ItemType};
use itemstore_core::keys::derive_keys;
use itemstore_core::storage::{ItemError, ItemRepository, Result, ScopedClientFactory};

use super::client::{create_client, SharedClientFactory};
use super::conversions::{item_to_data, record_to_item, PK_ATTRIBUTE};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_update_item_error,
};
use super::expressions::{projection_expression, update_expression};
use crate::config::Config;

const KEY_ABSENT: &str = "attribute_not_exists(pk)";
const KEY_PRESENT: &str = "attribute_exists(pk)";

/// DynamoDB-based storage gateway.
///
/// Asks `F` for a tenant-scoped client on every call and addresses records by
/// the derived primary key.
pub struct DynamoDbRepository<F = SharedClientFactory> {
    clients: F,
    table_name: String,
}

impl<F> DynamoDbRepository<F>
where
    F: ScopedClientFactory<Client = Client>,
{
    /// Creates a new repository with the given client factory and table name.
    pub fn new(clients: F, table_name: impl Into<String>) -> Self {
        Self {
            clients,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl DynamoDbRepository<SharedClientFactory> {
    /// Creates a repository sharing one client built from `config`.
    pub async fn from_config(config: &Config) -> Self {
        let client = create_client(config).await;
        Self::new(SharedClientFactory::new(client), config.table_name.clone())
    }
}

#[async_trait]
impl<F> ItemRepository for DynamoDbRepository<F>
where
    F: ScopedClientFactory<Client = Client>,
{
    #[tracing::instrument(name = "database_put_item", skip(self, data))]
    async fn put_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()> {
        tracing::info!("Putting item into DB");
        let keys = derive_keys(item_type, tenant_id, item_id);
        let client = self.clients.open_scoped_client(tenant_id).await?;

        client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(&keys, item_id, data)))
            .condition_expression(KEY_ABSENT)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, item_type, tenant_id, item_id))?;

        Ok(())
    }

    #[tracing::instrument(name = "database_get_item", skip(self))]
    async fn get_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        fields: Option<&[String]>,
    ) -> Result<ItemData> {
        tracing::info!("Fetching item from DB");
        let keys = derive_keys(item_type, tenant_id, item_id);
        let client = self.clients.open_scoped_client(tenant_id).await?;

        let mut request = client
            .get_item()
            .table_name(&self.table_name)
            .key(PK_ATTRIBUTE, AttributeValue::S(keys.primary));

        if let Some(fields) = fields.filter(|fields| !fields.is_empty()) {
            let projection = projection_expression(fields);
            request = request
                .projection_expression(projection.expression)
                .set_expression_attribute_names(Some(projection.names));
        }

        let result = request.send().await.map_err(map_get_item_error)?;

        match result.item {
            Some(item) => item_to_data(&item),
            None => Err(ItemError::not_found(item_type, tenant_id, item_id)),
        }
    }

    #[tracing::instrument(name = "database_update_item", skip(self, data))]
    async fn update_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
        data: &ItemData,
    ) -> Result<()> {
        tracing::info!("Updating item in DB");
        let keys = derive_keys(item_type, tenant_id, item_id);
        let client = self.clients.open_scoped_client(tenant_id).await?;
        let update = update_expression(item_id, data);

        client
            .update_item()
            .table_name(&self.table_name)
            .key(PK_ATTRIBUTE, AttributeValue::S(keys.primary))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .condition_expression(KEY_PRESENT)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, item_type, tenant_id, item_id))?;

        Ok(())
    }

    #[tracing::instrument(name = "database_delete_item", skip(self))]
    async fn delete_item(
        &self,
        item_type: ItemType,
        tenant_id: &str,
        item_id: &str,
    ) -> Result<ItemData> {
        tracing::info!("Deleting item from DB");
        let keys = derive_keys(item_type, tenant_id, item_id);
        let client = self.clients.open_scoped_client(tenant_id).await?;

        let result = client
            .delete_item()
            .table_name(&self.table_name)
            .key(PK_ATTRIBUTE, AttributeValue::S(keys.primary))
            .condition_expression(KEY_PRESENT)
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, item_type, tenant_id, item_id))?;

        match result.attributes {
            Some(attributes) => item_to_data(&attributes),
            None => Ok(ItemData::new()),
        }
    }
}
