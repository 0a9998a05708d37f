//! Wire chunks of the agent invocation stream and their classification
//!
//! The backend streams NDJSON: one `StreamChunk` per line. Chunks carry
//! which level of the agent hierarchy produced them; only the outer
//! agent's final text is the authoritative chat answer, an inner agent's
//! final text is demoted to thread activity.

use serde::{Deserialize, Serialize};

/// Which agent in the orchestrator/sub-agent hierarchy produced a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLevel {
    /// The top-level orchestrator
    OuterAgent,
    /// A sub-agent invoked by the orchestrator
    InnerAgent,
}

impl std::fmt::Display for AgentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentLevel::OuterAgent => write!(f, "outer_agent"),
            AgentLevel::InnerAgent => write!(f, "inner_agent"),
        }
    }
}

/// Kind of content a chunk carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// An incremental token/phrase of intermediate reasoning
    TextStep,
    /// A completed answer
    TextFinal,
    /// A human-readable tool-result summary
    ToolResults,
}

/// One decoded NDJSON line of the invocation stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Originating agent level
    pub level: AgentLevel,
    /// Content kind
    pub r#type: ChunkType,
    /// Payload text
    pub data: String,
}

/// Where a chunk's text belongs in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Intermediate activity for the thread log, at any level
    Step { level: AgentLevel, text: String },
    /// A piece of the authoritative chat answer
    OuterFinal { text: String },
    /// A sub-agent's final answer, thread-only
    InnerFinal { text: String },
    /// Nothing to render
    Ignore,
}

/// Classify one well-formed chunk. Pure and total; tool results are
/// rendered identically to step text, and final text diverges by level.
pub fn classify(chunk: StreamChunk) -> Classification {
    match (chunk.r#type, chunk.level) {
        (ChunkType::TextStep, level) | (ChunkType::ToolResults, level) => Classification::Step {
            level,
            text: chunk.data,
        },
        (ChunkType::TextFinal, AgentLevel::OuterAgent) => {
            Classification::OuterFinal { text: chunk.data }
        }
        (ChunkType::TextFinal, AgentLevel::InnerAgent) => {
            Classification::InnerFinal { text: chunk.data }
        }
    }
}
