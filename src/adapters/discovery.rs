//! Tool discovery against the backend
//!
//! Lists the tools the backend currently sees on its MCP servers.
//! Failures are reported in-band as display text rather than raised, so
//! a dead server shows up in the listing instead of breaking the page.

use serde_json::Value;

/// Outcome of a tool listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListToolsResult {
    pub ok: bool,
    /// Pretty-printed tool list on success, error text otherwise
    pub payload_text: String,
}

/// Client for the backend tool listing endpoint
#[derive(Clone)]
pub struct ToolDiscoveryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ToolDiscoveryClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// GET the backend's tool listing
    pub async fn list_tools(&self) -> ListToolsResult {
        let response = match self.client.get(&self.endpoint).send().await {
            Ok(response) => response,
            Err(err) => {
                return ListToolsResult {
                    ok: false,
                    payload_text: err.to_string(),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return ListToolsResult {
                ok: false,
                payload_text: format!("Backend error ({}): {}", status.as_u16(), text),
            };
        }

        match response.json::<Value>().await {
            Ok(data) => ListToolsResult {
                ok: true,
                payload_text: pretty(&data),
            },
            Err(err) => ListToolsResult {
                ok: false,
                payload_text: err.to_string(),
            },
        }
    }
}

fn pretty(value: &Value) -> String {
    if let Value::String(s) = value {
        return s.clone();
    }
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_passes_strings_through() {
        assert_eq!(pretty(&Value::String("plain".to_string())), "plain");
    }

    #[test]
    fn test_pretty_indents_objects() {
        let value = serde_json::json!({"tools": []});
        assert_eq!(pretty(&value), "{\n  \"tools\": []\n}");
    }
}
