//! Client for the external document storage API
//!
//! The console persists its configuration through a generic CRUD proxy,
//! `POST/GET/PUT /api/storage/{container}`, backed by a document
//! database. Documents come back wrapped with `id`, `partitionKey` and
//! `container` fields; the proxy itself is an external collaborator.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::StorageError;
use crate::domain::{Agent, AgentRef, McpServer, ToolSchema, ToolSchemaRef};

/// Container holding agent documents
pub const AGENTS_CONTAINER: &str = "agents";
/// Container holding tool schema documents
pub const TOOL_SCHEMAS_CONTAINER: &str = "toolschemas";
/// Container holding MCP server documents
pub const SERVERS_CONTAINER: &str = "servers";

/// A domain object as stored: the object's fields flattened next to the
/// storage envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem<T> {
    /// Document id
    pub id: String,
    /// Partition key of the document
    #[serde(rename = "partitionKey")]
    pub partition_key: String,
    /// Container the document lives in
    pub container: String,
    /// The domain object itself
    #[serde(flatten)]
    pub item: T,
}

/// Port for loading and saving console configuration documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load_agents(&self) -> anyhow::Result<Vec<StoredItem<Agent>>>;
    async fn save_agent(&self, agent: &Agent) -> anyhow::Result<StoredItem<Agent>>;
    async fn update_agent(&self, item: &StoredItem<Agent>) -> anyhow::Result<StoredItem<Agent>>;
    async fn load_agent_by_ref(&self, agent_ref: &AgentRef) -> anyhow::Result<StoredItem<Agent>>;

    async fn load_tool_schemas(&self) -> anyhow::Result<Vec<StoredItem<ToolSchema>>>;
    async fn save_tool_schema(&self, schema: &ToolSchema) -> anyhow::Result<StoredItem<ToolSchema>>;
    async fn update_tool_schema(
        &self,
        item: &StoredItem<ToolSchema>,
    ) -> anyhow::Result<StoredItem<ToolSchema>>;
    async fn load_tool_schema_by_ref(
        &self,
        tool_ref: &ToolSchemaRef,
    ) -> anyhow::Result<StoredItem<ToolSchema>>;

    async fn load_servers(&self) -> anyhow::Result<Vec<StoredItem<McpServer>>>;
    async fn save_server(&self, server: &McpServer) -> anyhow::Result<StoredItem<McpServer>>;
}

/// HTTP client for the storage API
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    /// Create a client for `{base_url}/api/storage/{container}`
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn container_url(&self, container: &str) -> String {
        format!("{}/api/storage/{}", self.base_url, container)
    }

    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StorageError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// POST a new document into a container
    pub async fn save_item<T>(&self, container: &str, item: &T) -> Result<StoredItem<T>, StorageError>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .client
            .post(self.container_url(container))
            .json(item)
            .send()
            .await?;
        Self::check(response).await
    }

    /// GET all documents of a container
    pub async fn load_items<T>(&self, container: &str) -> Result<Vec<StoredItem<T>>, StorageError>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(self.container_url(container)).send().await?;
        Self::check(response).await
    }

    /// GET one document by id
    pub async fn load_item_by_id<T>(
        &self,
        container: &str,
        id: &str,
    ) -> Result<StoredItem<T>, StorageError>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{}?id={}",
            self.container_url(container),
            urlencoding::encode(id)
        );
        let response = self.client.get(url).send().await?;
        Self::check(response).await
    }

    /// PUT an updated document back into its container
    pub async fn update_item<T>(
        &self,
        container: &str,
        item: &StoredItem<T>,
    ) -> Result<StoredItem<T>, StorageError>
    where
        T: Serialize + DeserializeOwned,
    {
        let response = self
            .client
            .put(self.container_url(container))
            .json(item)
            .send()
            .await?;
        Self::check(response).await
    }
}

#[async_trait]
impl DocumentStore for StorageClient {
    async fn load_agents(&self) -> anyhow::Result<Vec<StoredItem<Agent>>> {
        Ok(self.load_items(AGENTS_CONTAINER).await?)
    }

    async fn save_agent(&self, agent: &Agent) -> anyhow::Result<StoredItem<Agent>> {
        let agent = agent.normalize();
        agent.validate().map_err(StorageError::Validation)?;
        Ok(self.save_item(AGENTS_CONTAINER, &agent).await?)
    }

    async fn update_agent(&self, item: &StoredItem<Agent>) -> anyhow::Result<StoredItem<Agent>> {
        item.item.validate().map_err(StorageError::Validation)?;
        Ok(self.update_item(AGENTS_CONTAINER, item).await?)
    }

    async fn load_agent_by_ref(&self, agent_ref: &AgentRef) -> anyhow::Result<StoredItem<Agent>> {
        Ok(self
            .load_item_by_id(&agent_ref.container, &agent_ref.agent_id)
            .await?)
    }

    async fn load_tool_schemas(&self) -> anyhow::Result<Vec<StoredItem<ToolSchema>>> {
        Ok(self.load_items(TOOL_SCHEMAS_CONTAINER).await?)
    }

    async fn save_tool_schema(&self, schema: &ToolSchema) -> anyhow::Result<StoredItem<ToolSchema>> {
        let schema = schema.normalize();
        schema.validate().map_err(StorageError::Validation)?;
        Ok(self.save_item(TOOL_SCHEMAS_CONTAINER, &schema).await?)
    }

    async fn update_tool_schema(
        &self,
        item: &StoredItem<ToolSchema>,
    ) -> anyhow::Result<StoredItem<ToolSchema>> {
        item.item.validate().map_err(StorageError::Validation)?;
        Ok(self.update_item(TOOL_SCHEMAS_CONTAINER, item).await?)
    }

    async fn load_tool_schema_by_ref(
        &self,
        tool_ref: &ToolSchemaRef,
    ) -> anyhow::Result<StoredItem<ToolSchema>> {
        Ok(self
            .load_item_by_id(&tool_ref.container, &tool_ref.tool_id)
            .await?)
    }

    async fn load_servers(&self) -> anyhow::Result<Vec<StoredItem<McpServer>>> {
        Ok(self.load_items(SERVERS_CONTAINER).await?)
    }

    async fn save_server(&self, server: &McpServer) -> anyhow::Result<StoredItem<McpServer>> {
        let server = server.normalize();
        server.validate().map_err(StorageError::Validation)?;
        Ok(self.save_item(SERVERS_CONTAINER, &server).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_item_flattens_domain_fields() {
        let json = serde_json::json!({
            "id": "s1",
            "partitionKey": "s1",
            "container": "servers",
            "name": "tools",
            "url": "http://127.0.0.1:3001"
        });
        let item: StoredItem<McpServer> = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(item.id, "s1");
        assert_eq!(item.item.name, "tools");

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_container_url_handles_trailing_slash() {
        let client = StorageClient::new(reqwest::Client::new(), "http://localhost:3000/");
        assert_eq!(
            client.container_url("agents"),
            "http://localhost:3000/api/storage/agents"
        );
    }
}
