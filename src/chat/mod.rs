//! Streaming chat core
//!
//! - `chunk` - wire chunk types and the pure classifier
//! - `assembler` - per-turn NDJSON line reassembly and dispatch
//! - `session` - transcript/thread ownership and turn orchestration

pub mod assembler;
pub mod chunk;
pub mod session;

pub use assembler::{StreamAssembler, ThreadEntry, TurnSinks};
pub use chunk::{classify, AgentLevel, Classification, ChunkType, StreamChunk};
pub use session::{ChatSession, TurnInvoker};
