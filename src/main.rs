use async_trait::async_trait;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tracing::info;

use iris::adapters::invoke::resolve_agent_bundle;
use iris::adapters::{AgentClient, DocumentStore, StorageClient, ToolDiscoveryClient};
use iris::chat::{ChatSession, ThreadEntry, TurnInvoker, TurnSinks};
use iris::cli::Cli;
use iris::config::Settings;
use iris::domain::ChatMessage;

/// Sinks decorator that echoes the stream to the terminal while
/// forwarding everything to the session's own sinks
struct EchoSinks<'a> {
    inner: &'a mut (dyn TurnSinks + Send),
}

impl TurnSinks for EchoSinks<'_> {
    fn append_final_text(&mut self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
        self.inner.append_final_text(text);
    }

    fn push_entry(&mut self, entry: ThreadEntry) {
        if let ThreadEntry::Step { level, text, .. } = &entry {
            eprintln!("  [{level}] {text}");
        }
        self.inner.push_entry(entry);
    }
}

/// Invoker decorator that renders each turn live
struct EchoInvoker {
    inner: AgentClient,
}

#[async_trait]
impl TurnInvoker for EchoInvoker {
    async fn invoke_turn(
        &self,
        messages: &[ChatMessage],
        sinks: &mut (dyn TurnSinks + Send),
    ) -> anyhow::Result<()> {
        let mut echo = EchoSinks { inner: sinks };
        self.inner.stream_turn(messages, &mut echo).await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(settings.backend.connect_timeout_secs))
        .build()?;

    if cli.list_tools {
        let discovery = ToolDiscoveryClient::new(client.clone(), settings.tools_url());
        let result = discovery.list_tools().await;
        println!("{}", result.payload_text);
        return if result.ok {
            Ok(())
        } else {
            Err(anyhow::anyhow!("tool listing failed"))
        };
    }

    let store = StorageClient::new(client.clone(), settings.storage.base_url.clone());
    let agents = store.load_agents().await?;

    if cli.list_agents {
        for agent in &agents {
            println!("{}  -  {}", agent.item.name, agent.item.description);
        }
        return Ok(());
    }

    let stored = match &cli.agent {
        Some(name) => agents
            .iter()
            .find(|a| a.item.name == *name)
            .ok_or_else(|| anyhow::anyhow!("agent not found: {name}"))?,
        None => agents
            .first()
            .ok_or_else(|| anyhow::anyhow!("no agents stored; create one first"))?,
    };
    info!(agent = %stored.item.name, "resolving agent bundle");

    let bundle = resolve_agent_bundle(&store, stored).await?;
    let invoker = EchoInvoker {
        inner: AgentClient::new(client, settings.invoke_url(), bundle),
    };

    let mut session = ChatSession::new();

    if let Some(message) = &cli.message {
        if let Err(err) = session.send(&invoker, message).await {
            eprintln!("{err}");
        }
        println!();
        return Ok(());
    }

    println!("Chatting with {} (empty line to quit)", stored.item.name);
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            break;
        }

        if let Err(err) = session.send(&invoker, message).await {
            eprintln!("{err}");
        }
        println!();
    }

    Ok(())
}
