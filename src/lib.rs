//! # Iris - Agent Console Core
//!
//! Iris is the core of a console for configuring and testing agents (LLM
//! orchestration configs), MCP tool servers and adapted tool schemas,
//! plus a chat that streams agent responses.
//!
//! ## Architecture
//!
//! - **Domain**: agent, tool schema and server shapes with their
//!   normalization/validation rules
//! - **Chat**: the streaming core - a pure chunk classifier and a
//!   per-turn NDJSON stream assembler feeding the transcript and the
//!   agent thread log
//! - **Adapters**: the streaming backend client and the document
//!   storage client
//! - **Config**: settings management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iris::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Endpoints for the backend and the storage API
//!     let settings = Settings::new()?;
//!     let _ = settings.invoke_url();
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod config;
pub mod domain;
