//! MCP tool server registration

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::ValidationError;

/// A registered remote MCP tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    /// Display name of the server
    pub name: String,
    /// Base URL the server is reachable at
    pub url: String,
}

impl McpServer {
    /// Trim user-entered fields
    pub fn normalize(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
        }
    }

    /// Check that the server has a name and a parseable URL
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.url.is_empty() {
            return Err(ValidationError::EmptyField("url"));
        }
        Url::parse(&self.url).map_err(|_| ValidationError::InvalidUrl(self.url.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_fields() {
        let server = McpServer {
            name: "  tools  ".to_string(),
            url: " http://localhost:3001 ".to_string(),
        };
        let normalized = server.normalize();
        assert_eq!(normalized.name, "tools");
        assert_eq!(normalized.url, "http://localhost:3001");
    }

    #[test]
    fn test_validate_requires_name_and_url() {
        let server = McpServer {
            name: String::new(),
            url: "http://localhost:3001".to_string(),
        };
        assert_eq!(
            server.validate().unwrap_err(),
            ValidationError::EmptyField("name")
        );

        let server = McpServer {
            name: "tools".to_string(),
            url: String::new(),
        };
        assert_eq!(
            server.validate().unwrap_err(),
            ValidationError::EmptyField("url")
        );
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let server = McpServer {
            name: "tools".to_string(),
            url: "not a url".to_string(),
        };
        assert!(matches!(
            server.validate().unwrap_err(),
            ValidationError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_validate_accepts_good_server() {
        let server = McpServer {
            name: "tools".to_string(),
            url: "http://127.0.0.1:3001".to_string(),
        };
        assert!(server.validate().is_ok());
    }
}
