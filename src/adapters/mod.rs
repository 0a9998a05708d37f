//! External integrations: the streaming backend and the storage API

pub mod discovery;
pub mod error;
pub mod invoke;
pub mod storage;

pub use discovery::{ListToolsResult, ToolDiscoveryClient};
pub use error::{InvokeError, StorageError};
pub use invoke::{AgentBundle, AgentClient, StreamAgentRequest};
pub use storage::{DocumentStore, StorageClient, StoredItem};
