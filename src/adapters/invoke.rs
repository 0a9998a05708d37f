//! Agent invocation over the streaming backend endpoint
//!
//! One POST per chat turn: the request bundles the message history, the
//! invoked agent's behaviour config, its adapted tool schemas and, for
//! orchestrators, the resolved sub-agent bundles. The response is
//! `application/x-ndjson`; the body stream is driven straight through a
//! [`StreamAssembler`].

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::error::InvokeError;
use super::storage::{DocumentStore, StoredItem};
use crate::chat::assembler::{StreamAssembler, TurnSinks};
use crate::chat::session::TurnInvoker;
use crate::domain::{Agent, ChatMessage, ToolArgDefault, ToolSchema};

/// Mirrors the backend `AgentBehaviourConfig`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfigDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub system_prompt: String,
    #[serde(default)]
    pub directanswer_validation_sysprompt: Option<String>,
    #[serde(default)]
    pub direct_answer_prompt: Option<String>,
    #[serde(default)]
    pub toolbased_answer_prompt: Option<String>,
    #[serde(default)]
    pub max_toolcalls: Option<u32>,
    #[serde(default)]
    pub only_one_model_call: bool,
}

impl AgentConfigDto {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            description: Some(agent.description.clone()),
            system_prompt: agent.system_prompt.clone(),
            directanswer_validation_sysprompt: Some(
                agent.direct_answer_validation_prompt.clone(),
            ),
            direct_answer_prompt: agent.direct_answer_prompt.clone(),
            toolbased_answer_prompt: agent.toolbased_answer_prompt.clone(),
            max_toolcalls: agent.max_toolcalls,
            only_one_model_call: agent.only_one_model_call.unwrap_or(false),
        }
    }
}

/// One tool argument on the wire; an explicit empty default is sent as
/// the literal string "EMPTY"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgDto {
    pub name_on_server: String,
    pub name_for_llm: String,
    pub description_for_llm: String,
    pub r#type: String,
    pub required: bool,
    pub default: Option<String>,
}

/// OpenAI-style args schema on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgsSchemaDto {
    pub r#type: String,
    pub properties: Vec<ToolArgDto>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

/// One adapted tool schema on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchemaDto {
    pub server_url: String,
    pub name_on_server: String,
    pub name_for_llm: String,
    pub description_for_llm: String,
    pub args_schema: ToolArgsSchemaDto,
}

impl ToolSchemaDto {
    pub fn from_schema(schema: &ToolSchema) -> Self {
        Self {
            server_url: schema.server_url.clone(),
            name_on_server: schema.name_on_server.clone(),
            name_for_llm: schema.name_for_llm.clone(),
            description_for_llm: schema.description_for_llm.clone(),
            args_schema: ToolArgsSchemaDto {
                r#type: "object".to_string(),
                additional_properties: false,
                properties: schema
                    .args_schema
                    .properties
                    .iter()
                    .map(|arg| ToolArgDto {
                        name_on_server: arg.name_on_server.clone(),
                        name_for_llm: arg.name_for_llm.clone(),
                        description_for_llm: arg.description_for_llm.clone(),
                        r#type: arg.r#type.clone().unwrap_or_else(|| "string".to_string()),
                        required: arg.required.unwrap_or(true),
                        default: arg.default.as_ref().map(|d| match d {
                            ToolArgDefault::Text(s) => s.clone(),
                            ToolArgDefault::Empty(_) => "EMPTY".to_string(),
                        }),
                    })
                    .collect(),
            },
        }
    }
}

/// A resolved agent plus everything the backend needs to run it
#[derive(Debug, Clone)]
pub struct AgentBundle {
    pub agent: Agent,
    pub tool_schemas: Vec<ToolSchema>,
    pub sub_agents: Vec<AgentBundle>,
}

/// Wire form of an agent bundle, nested for orchestrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentBundleDto {
    pub agent_config: AgentConfigDto,
    pub tool_schemas: Vec<ToolSchemaDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_agents: Option<Vec<AgentBundleDto>>,
}

impl AgentBundleDto {
    fn from_bundle(bundle: &AgentBundle) -> Self {
        Self {
            agent_config: AgentConfigDto::from_agent(&bundle.agent),
            tool_schemas: bundle
                .tool_schemas
                .iter()
                .map(ToolSchemaDto::from_schema)
                .collect(),
            sub_agents: if bundle.sub_agents.is_empty() {
                None
            } else {
                Some(bundle.sub_agents.iter().map(Self::from_bundle).collect())
            },
        }
    }
}

/// Request body of the invocation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamAgentRequest {
    pub messages: Vec<ChatMessage>,
    pub agent_config: AgentConfigDto,
    pub tool_schemas: Vec<ToolSchemaDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_agents: Option<Vec<AgentBundleDto>>,
}

impl StreamAgentRequest {
    pub fn new(messages: Vec<ChatMessage>, bundle: &AgentBundle) -> Self {
        let dto = AgentBundleDto::from_bundle(bundle);
        Self {
            messages,
            agent_config: dto.agent_config,
            tool_schemas: dto.tool_schemas,
            sub_agents: dto.sub_agents,
        }
    }
}

/// Resolve a stored agent into a full bundle by loading its tool schema
/// and sub-agent references from storage. Sub-agents resolve recursively.
pub async fn resolve_agent_bundle(
    store: &dyn DocumentStore,
    stored: &StoredItem<Agent>,
) -> anyhow::Result<AgentBundle> {
    resolve_inner(store, stored.item.clone()).await
}

fn resolve_inner<'a>(
    store: &'a dyn DocumentStore,
    agent: Agent,
) -> futures::future::BoxFuture<'a, anyhow::Result<AgentBundle>> {
    Box::pin(async move {
        let mut tool_schemas = Vec::with_capacity(agent.tool_schemas.len());
        for tool_ref in &agent.tool_schemas {
            tool_schemas.push(store.load_tool_schema_by_ref(tool_ref).await?.item);
        }

        let mut sub_agents = Vec::new();
        for agent_ref in agent.sub_agents.as_deref().unwrap_or_default() {
            let stored = store.load_agent_by_ref(agent_ref).await?;
            sub_agents.push(resolve_inner(store, stored.item).await?);
        }

        Ok(AgentBundle {
            agent,
            tool_schemas,
            sub_agents,
        })
    })
}

/// Streaming client for the agent invocation endpoint
pub struct AgentClient {
    client: reqwest::Client,
    endpoint: String,
    bundle: AgentBundle,
}

impl AgentClient {
    /// Create a client for one resolved agent against the given
    /// invocation endpoint URL
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, bundle: AgentBundle) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            bundle,
        }
    }

    /// Run one turn: POST the bundled request and pump the NDJSON body
    /// through an assembler into the sinks. A non-2xx status or a
    /// mid-stream transport failure is fatal for the turn; in the
    /// mid-stream case the assembler is dropped unfinished, so the
    /// partial outer answer is never flushed into the thread.
    pub async fn stream_turn(
        &self,
        messages: &[ChatMessage],
        sinks: &mut (dyn TurnSinks + Send),
    ) -> Result<(), InvokeError> {
        let payload = StreamAgentRequest::new(messages.to_vec(), &self.bundle);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InvokeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut stream = response.bytes_stream();
        let mut assembler = StreamAssembler::new(sinks);

        while let Some(chunk) = stream.next().await {
            assembler.feed(&chunk?);
        }

        assembler.finish();
        Ok(())
    }
}

#[async_trait]
impl TurnInvoker for AgentClient {
    async fn invoke_turn(
        &self,
        messages: &[ChatMessage],
        sinks: &mut (dyn TurnSinks + Send),
    ) -> anyhow::Result<()> {
        Ok(self.stream_turn(messages, sinks).await?)
    }
}
