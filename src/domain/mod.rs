//! Domain types for the agent console
//!
//! Shapes mirror the documents kept in the external storage containers
//! (`agents`, `toolschemas`, `servers`) plus the chat transcript types.

pub mod agent;
pub mod error;
pub mod mcp_server;
pub mod message;
pub mod server_tool;
pub mod tool_schema;

pub use agent::{Agent, AgentRef};
pub use error::ValidationError;
pub use mcp_server::McpServer;
pub use message::{ChatMessage, ChatRole};
pub use server_tool::{ServerTool, ToolDisplay, ToolParam};
pub use tool_schema::{
    sanitize_tool_name_for_llm, ToolArg, ToolArgDefault, ToolArgsSchema, ToolSchema, ToolSchemaRef,
};
