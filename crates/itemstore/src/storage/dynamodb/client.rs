//! DynamoDB client construction and tenant scoping.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use itemstore_core::storage::{Result, ScopedClientFactory};

use crate::config::Config;

/// Creates a DynamoDB client from the application configuration.
///
/// Honors a custom endpoint (local DynamoDB) when one is configured.
pub async fn create_client(config: &Config) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

/// Hands every tenant the same process-wide client.
///
/// Tenant isolation then rests on the derived keys alone. Deployments that
/// need credential-level isolation plug in a factory that assumes a role with
/// a `dynamodb:LeadingKeys` session policy instead.
#[derive(Debug, Clone)]
pub struct SharedClientFactory {
    client: Client,
}

impl SharedClientFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScopedClientFactory for SharedClientFactory {
    type Client = Client;

    async fn open_scoped_client(&self, tenant_id: &str) -> Result<Client> {
        tracing::trace!(tenant_id, "Opening shared DynamoDB client");
        Ok(self.client.clone())
    }
}
