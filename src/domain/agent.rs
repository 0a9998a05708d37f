//! Agent configuration

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::tool_schema::ToolSchemaRef;

/// Lightweight reference to a stored agent, as embedded in orchestrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRef {
    /// Document id of the stored agent
    pub agent_id: String,
    /// Storage container holding the agent
    pub container: String,
    /// Display name, for badges without a storage round trip
    pub name: String,
}

/// An LLM orchestration config as edited in the console
///
/// A plain agent answers directly with its assigned tools; an
/// orchestrator additionally delegates to the agents referenced in
/// `sub_agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    /// Prompt used to decide whether a direct answer is acceptable
    pub direct_answer_validation_prompt: String,
    /// Whether the agent may skip tools and answer directly
    #[serde(default)]
    pub direct_answers_allowed: Option<bool>,
    /// Prompt template for direct answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_answer_prompt: Option<String>,
    /// Prompt template for tool-based answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbased_answer_prompt: Option<String>,
    /// Upper bound on tool calls per turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_toolcalls: Option<u32>,
    /// Restrict the agent to a single model call
    #[serde(default)]
    pub only_one_model_call: Option<bool>,
    /// Tool schemas assigned to this agent
    #[serde(default)]
    pub tool_schemas: Vec<ToolSchemaRef>,
    /// Sub-agents, present only for orchestrators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_agents: Option<Vec<AgentRef>>,
}

impl Agent {
    /// Trim user-entered fields and pin optional flags to their defaults
    pub fn normalize(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            system_prompt: self.system_prompt.trim().to_string(),
            direct_answer_validation_prompt: self
                .direct_answer_validation_prompt
                .trim()
                .to_string(),
            direct_answers_allowed: Some(self.direct_answers_allowed.unwrap_or(false)),
            direct_answer_prompt: self.direct_answer_prompt.clone(),
            toolbased_answer_prompt: self.toolbased_answer_prompt.clone(),
            max_toolcalls: self.max_toolcalls,
            only_one_model_call: Some(self.only_one_model_call.unwrap_or(false)),
            tool_schemas: self.tool_schemas.clone(),
            sub_agents: self.sub_agents.clone(),
        }
    }

    /// Check that all required prompts are present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField("description"));
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ValidationError::EmptyField("system prompt"));
        }
        if self.direct_answer_validation_prompt.trim().is_empty() {
            return Err(ValidationError::EmptyField(
                "direct answer validation prompt",
            ));
        }
        Ok(())
    }

    /// Whether this agent delegates to sub-agents
    pub fn is_orchestrator(&self) -> bool {
        self.sub_agents.as_ref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent() -> Agent {
        Agent {
            name: " Helper ".to_string(),
            description: "General assistant".to_string(),
            system_prompt: "You are helpful. ".to_string(),
            direct_answer_validation_prompt: "Always usable.".to_string(),
            direct_answers_allowed: None,
            direct_answer_prompt: None,
            toolbased_answer_prompt: None,
            max_toolcalls: Some(3),
            only_one_model_call: None,
            tool_schemas: Vec::new(),
            sub_agents: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_defaults_flags() {
        let agent = sample_agent().normalize();
        assert_eq!(agent.name, "Helper");
        assert_eq!(agent.system_prompt, "You are helpful.");
        assert_eq!(agent.direct_answers_allowed, Some(false));
        assert_eq!(agent.only_one_model_call, Some(false));
    }

    #[test]
    fn test_validate_requires_prompts() {
        let mut agent = sample_agent();
        agent.direct_answer_validation_prompt = "   ".to_string();
        assert_eq!(
            agent.validate().unwrap_err(),
            ValidationError::EmptyField("direct answer validation prompt")
        );
    }

    #[test]
    fn test_orchestrator_detection() {
        let mut agent = sample_agent();
        assert!(!agent.is_orchestrator());
        agent.sub_agents = Some(vec![AgentRef {
            agent_id: "a1".to_string(),
            container: "agents".to_string(),
            name: "Worker".to_string(),
        }]);
        assert!(agent.is_orchestrator());
    }
}
