//! Configuration management

pub mod settings;

pub use settings::{BackendSettings, Settings, StorageSettings};
