//! Tool definitions as reported by an MCP server
//!
//! These are the raw OpenAI-function-style descriptions a server hands
//! back from tool discovery, before they are adapted into a `ToolSchema`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ValidationError;

/// One property of a server tool's parameter schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerToolParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// Parameter schema of a server tool (keyed map, unlike `ToolArgsSchema`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerToolParameters {
    pub r#type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, ServerToolParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

/// The callable part of a server tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerToolFunction {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ServerToolParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// A tool as listed by an MCP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTool {
    /// Tool kind; only "function" is supported
    pub r#type: String,
    pub function: ServerToolFunction,
}

/// Flattened parameter row for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParam {
    pub name: String,
    pub title: Option<String>,
    pub r#type: Option<String>,
    pub required: bool,
}

/// Display-oriented view of a server tool, parameters sorted
/// required-first then by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDisplay {
    pub name: String,
    pub description: Option<String>,
    pub params: Vec<ToolParam>,
    pub required: Vec<String>,
    pub strict: Option<bool>,
}

impl ServerTool {
    /// Trim the names a server reported
    pub fn normalize(&self) -> Self {
        Self {
            r#type: "function".to_string(),
            function: ServerToolFunction {
                name: self.function.name.trim().to_string(),
                description: self.function.description.as_ref().map(|d| d.trim().to_string()),
                parameters: self.function.parameters.clone(),
                strict: self.function.strict,
            },
        }
    }

    /// Reject tools this console cannot adapt
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.r#type != "function" {
            return Err(ValidationError::UnsupportedToolType(self.r#type.clone()));
        }
        if self.function.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("function.name"));
        }
        if let Some(params) = &self.function.parameters {
            if params.r#type != "object" {
                return Err(ValidationError::InvalidArgsSchema(
                    "parameters.type must be 'object'".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Flatten into the display shape used by tool listings
    pub fn to_display(&self) -> ToolDisplay {
        let function = &self.function;
        let required: Vec<String> = function
            .parameters
            .as_ref()
            .and_then(|p| p.required.clone())
            .unwrap_or_default();

        let mut params: Vec<ToolParam> = function
            .parameters
            .as_ref()
            .map(|p| {
                p.properties
                    .iter()
                    .map(|(name, def)| ToolParam {
                        name: name.clone(),
                        title: def.title.clone(),
                        r#type: def.r#type.clone(),
                        required: required.iter().any(|r| r == name),
                    })
                    .collect()
            })
            .unwrap_or_default();

        params.sort_by(|a, b| {
            b.required
                .cmp(&a.required)
                .then_with(|| a.name.cmp(&b.name))
        });

        ToolDisplay {
            name: function.name.clone(),
            description: function.description.clone(),
            params,
            required,
            strict: function.strict,
        }
    }
}
