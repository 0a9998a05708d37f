use clap::Parser;
use std::path::PathBuf;

/// Agent console - configure agents and chat with them over the streaming backend
#[derive(Parser, Debug, Clone)]
#[command(name = "iris", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "IRIS_CONFIG", default_value = "iris.toml")]
    pub config: PathBuf,

    /// Base URL of the streaming agent backend
    #[arg(long, env = "IRIS_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Base URL of the document storage API
    #[arg(long, env = "IRIS_STORAGE_URL")]
    pub storage_url: Option<String>,

    /// Name of the agent to chat with (defaults to the first stored agent)
    #[arg(long, env = "IRIS_AGENT")]
    pub agent: Option<String>,

    /// Send a single message and exit instead of starting a chat loop
    #[arg(long)]
    pub message: Option<String>,

    /// List stored agents and exit
    #[arg(long)]
    pub list_agents: bool,

    /// List the tools the backend sees on its MCP servers and exit
    #[arg(long)]
    pub list_tools: bool,
}
