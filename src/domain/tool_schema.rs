//! Adapted tool definitions bound to agents
//!
//! A `ToolSchema` maps a tool as it exists on an MCP server onto the
//! name/description the LLM sees, in an OpenAI-style function schema.
//! Note that `args_schema.properties` is a list, not a map.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Marker tag for an explicitly-empty default value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyDefaultTag {
    EmptyDefault,
}

/// Stored form of the empty-default marker, `{"kind":"EmptyDefault"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyDefaultMarker {
    pub kind: EmptyDefaultTag,
}

/// Default value of a tool argument: a concrete string, or intentionally
/// empty but explicitly set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArgDefault {
    Empty(EmptyDefaultMarker),
    Text(String),
}

impl ToolArgDefault {
    /// The explicit empty-default marker
    pub fn empty() -> Self {
        ToolArgDefault::Empty(EmptyDefaultMarker {
            kind: EmptyDefaultTag::EmptyDefault,
        })
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self, ToolArgDefault::Empty(_))
    }

    /// Render for form editing; the marker shows as `EmptyDefault`
    pub fn to_display_string(&self) -> String {
        match self {
            ToolArgDefault::Text(s) => s.clone(),
            ToolArgDefault::Empty(_) => "EmptyDefault".to_string(),
        }
    }

    /// Parse a form input back into a default. Blank means no default;
    /// the literal marker spellings map to the empty marker; anything
    /// else is kept as a string.
    pub fn parse(raw: &str) -> Option<Self> {
        let v = raw.trim();
        if v.is_empty() {
            return None;
        }
        if v == "EmptyDefault" || v == r#"{"kind":"EmptyDefault"}"# {
            return Some(ToolArgDefault::empty());
        }
        Some(ToolArgDefault::Text(v.to_string()))
    }
}

/// How one argument of an MCP tool is presented to the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArg {
    /// Argument name as the server expects it
    pub name_on_server: String,
    /// Argument name shown to the LLM
    pub name_for_llm: String,
    /// Argument description shown to the LLM
    pub description_for_llm: String,
    /// JSON type, defaults to "string"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Whether the argument is required, defaults to true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Optional default value
    #[serde(default)]
    pub default: Option<ToolArgDefault>,
}

impl ToolArg {
    fn normalize(&self) -> Self {
        Self {
            name_on_server: self.name_on_server.trim().to_string(),
            name_for_llm: self.name_for_llm.trim().to_string(),
            description_for_llm: self.description_for_llm.trim().to_string(),
            r#type: Some(
                self.r#type
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or("string")
                    .to_string(),
            ),
            required: Some(self.required.unwrap_or(true)),
            default: self.default.clone(),
        }
    }
}

/// OpenAI-style parameter schema for a tool; always an object with a
/// closed property set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgsSchema {
    /// Always "object"
    pub r#type: String,
    /// Argument list (a list, not a keyed map)
    pub properties: Vec<ToolArg>,
    /// Always false
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

impl Default for ToolArgsSchema {
    fn default() -> Self {
        Self {
            r#type: "object".to_string(),
            properties: Vec::new(),
            additional_properties: false,
        }
    }
}

/// Client-side schema for one adapted MCP tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// URL of the MCP server providing the tool
    pub server_url: String,
    /// Tool name as registered on the server
    pub name_on_server: String,
    /// Tool name presented to the LLM
    pub name_for_llm: String,
    /// Tool description presented to the LLM
    pub description_for_llm: String,
    /// Argument schema
    pub args_schema: ToolArgsSchema,
}

/// Lightweight reference to a stored tool schema, as embedded in agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchemaRef {
    /// Document id of the stored schema
    pub tool_id: String,
    /// Storage container holding the schema
    pub container: String,
    /// LLM-facing name, for display without a storage round trip
    pub name_for_llm: String,
    /// Originating server URL
    pub server_url: String,
}

/// Sanitizes an LLM tool name: whitespace becomes '_', characters
/// outside `[A-Za-z0-9_.-]` are stripped, runs of '_' are collapsed.
pub fn sanitize_tool_name_for_llm(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_underscore = false;
    for ch in name.trim().chars() {
        let mapped = if ch.is_whitespace() { '_' } else { ch };
        let allowed = mapped.is_ascii_alphanumeric() || matches!(mapped, '_' | '-' | '.');
        if !allowed {
            continue;
        }
        if mapped == '_' {
            if last_was_underscore {
                continue;
            }
            last_was_underscore = true;
        } else {
            last_was_underscore = false;
        }
        out.push(mapped);
    }
    out
}

fn is_valid_llm_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl ToolSchema {
    /// Normalize into the backend-aligned shape: trimmed strings,
    /// sanitized LLM name, object schema with a closed property set,
    /// per-arg defaults applied.
    pub fn normalize(&self) -> Self {
        Self {
            server_url: self.server_url.trim().to_string(),
            name_on_server: self.name_on_server.trim().to_string(),
            name_for_llm: sanitize_tool_name_for_llm(&self.name_for_llm),
            description_for_llm: self.description_for_llm.trim().to_string(),
            args_schema: ToolArgsSchema {
                r#type: "object".to_string(),
                additional_properties: false,
                properties: self
                    .args_schema
                    .properties
                    .iter()
                    .map(ToolArg::normalize)
                    .collect(),
            },
        }
    }

    /// Validate a schema before it is stored or sent to the backend
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server_url.trim().is_empty() {
            return Err(ValidationError::EmptyField("server_url"));
        }
        if self.name_on_server.trim().is_empty() {
            return Err(ValidationError::EmptyField("name_on_server"));
        }
        let name_for_llm = self.name_for_llm.trim();
        if name_for_llm.is_empty() {
            return Err(ValidationError::EmptyField("name_for_llm"));
        }
        if sanitize_tool_name_for_llm(name_for_llm) != name_for_llm
            || !is_valid_llm_name(name_for_llm)
        {
            return Err(ValidationError::InvalidLlmName {
                field: "name_for_llm",
            });
        }
        if self.description_for_llm.trim().is_empty() {
            return Err(ValidationError::EmptyField("description_for_llm"));
        }

        if self.args_schema.r#type != "object" {
            return Err(ValidationError::InvalidArgsSchema(
                "type must be 'object'".to_string(),
            ));
        }
        if self.args_schema.additional_properties {
            return Err(ValidationError::InvalidArgsSchema(
                "additionalProperties must be false".to_string(),
            ));
        }

        for arg in &self.args_schema.properties {
            if arg.name_on_server.trim().is_empty() {
                return Err(ValidationError::EmptyField("arg name_on_server"));
            }
            let arg_name = arg.name_for_llm.trim();
            if arg_name.is_empty() {
                return Err(ValidationError::EmptyField("arg name_for_llm"));
            }
            if !is_valid_llm_name(arg_name) {
                return Err(ValidationError::InvalidLlmName {
                    field: "arg name_for_llm",
                });
            }
            if arg
                .r#type
                .as_deref()
                .unwrap_or("string")
                .trim()
                .is_empty()
            {
                return Err(ValidationError::EmptyField("arg type"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> ToolSchema {
        ToolSchema {
            server_url: "http://127.0.0.1:3001".to_string(),
            name_on_server: "search".to_string(),
            name_for_llm: "web_search".to_string(),
            description_for_llm: "Search the web".to_string(),
            args_schema: ToolArgsSchema {
                r#type: "object".to_string(),
                additional_properties: false,
                properties: vec![ToolArg {
                    name_on_server: "q".to_string(),
                    name_for_llm: "query".to_string(),
                    description_for_llm: "Search query".to_string(),
                    r#type: None,
                    required: None,
                    default: None,
                }],
            },
        }
    }

    #[test]
    fn test_sanitize_tool_name() {
        assert_eq!(sanitize_tool_name_for_llm("  web search  "), "web_search");
        assert_eq!(sanitize_tool_name_for_llm("a b  c"), "a_b_c");
        assert_eq!(sanitize_tool_name_for_llm("tool!@#name"), "toolname");
        assert_eq!(sanitize_tool_name_for_llm("ok_name-1.2"), "ok_name-1.2");
        assert_eq!(sanitize_tool_name_for_llm("a___b"), "a_b");
    }

    #[test]
    fn test_normalize_fills_arg_defaults() {
        let normalized = sample_schema().normalize();
        let arg = &normalized.args_schema.properties[0];
        assert_eq!(arg.r#type.as_deref(), Some("string"));
        assert_eq!(arg.required, Some(true));
        assert_eq!(arg.default, None);
    }

    #[test]
    fn test_validate_accepts_normalized_schema() {
        assert!(sample_schema().normalize().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsanitized_llm_name() {
        let mut schema = sample_schema();
        schema.name_for_llm = "web search".to_string();
        assert_eq!(
            schema.validate().unwrap_err(),
            ValidationError::InvalidLlmName {
                field: "name_for_llm"
            }
        );
    }

    #[test]
    fn test_validate_rejects_open_schema() {
        let mut schema = sample_schema();
        schema.args_schema.additional_properties = true;
        assert!(matches!(
            schema.validate().unwrap_err(),
            ValidationError::InvalidArgsSchema(_)
        ));
    }

    #[test]
    fn test_default_roundtrip_through_json() {
        let text: ToolArgDefault = serde_json::from_str(r#""fallback""#).unwrap();
        assert_eq!(text, ToolArgDefault::Text("fallback".to_string()));

        let marker: ToolArgDefault =
            serde_json::from_str(r#"{"kind":"EmptyDefault"}"#).unwrap();
        assert!(marker.is_empty_marker());
        assert_eq!(
            serde_json::to_string(&marker).unwrap(),
            r#"{"kind":"EmptyDefault"}"#
        );
    }

    #[test]
    fn test_default_parse_from_form_input() {
        assert_eq!(ToolArgDefault::parse("   "), None);
        assert_eq!(
            ToolArgDefault::parse("EmptyDefault"),
            Some(ToolArgDefault::empty())
        );
        assert_eq!(
            ToolArgDefault::parse("42"),
            Some(ToolArgDefault::Text("42".to_string()))
        );
    }
}
