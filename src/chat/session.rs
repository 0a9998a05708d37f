//! Chat turn orchestration
//!
//! A `ChatSession` owns the message transcript and the agent thread log
//! and runs one turn at a time against an invoker. Taking `&mut self`
//! for the whole turn makes the session the single writer of both logs,
//! which is what keeps thread ordering meaningful.

use async_trait::async_trait;
use tracing::error;

use super::assembler::{ThreadEntry, TurnSinks};
use crate::domain::{ChatMessage, ChatRole};

/// Port for running one agent turn against the backend. Implementations
/// stream output into the provided sinks and return only transport-level
/// failures.
#[async_trait]
pub trait TurnInvoker: Send + Sync {
    async fn invoke_turn(
        &self,
        messages: &[ChatMessage],
        sinks: &mut (dyn TurnSinks + Send),
    ) -> anyhow::Result<()>;
}

struct SessionSinks<'a> {
    messages: &'a mut Vec<ChatMessage>,
    thread: &'a mut Vec<ThreadEntry>,
    ai_index: usize,
}

impl TurnSinks for SessionSinks<'_> {
    fn append_final_text(&mut self, text: &str) {
        self.messages[self.ai_index].content.push_str(text);
    }

    fn push_entry(&mut self, entry: ThreadEntry) {
        self.thread.push(entry);
    }
}

/// One chat conversation: ordered transcript plus the append-only
/// side-log of agent activity
#[derive(Default)]
pub struct ChatSession {
    /// Chat transcript, alternating user and AI messages
    pub messages: Vec<ChatMessage>,
    /// Agent thread log, never reordered or mutated in place
    pub thread: Vec<ThreadEntry>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one user turn: append the user message and an AI placeholder,
    /// mark the thread with a separator, then stream the agent's output
    /// into both logs. On a transport failure the placeholder is replaced
    /// with the error text and the error is also returned; entries that
    /// already streamed stay.
    pub async fn send(&mut self, invoker: &dyn TurnInvoker, text: &str) -> anyhow::Result<()> {
        let user = ChatMessage::user(text);

        // history sent to the backend excludes the fresh AI placeholder
        let mut sent = self.messages.clone();
        sent.push(user.clone());

        self.messages.push(user);
        self.messages.push(ChatMessage::ai_placeholder());
        let ai_index = self.messages.len() - 1;

        self.thread.push(ThreadEntry::separator());

        let mut sinks = SessionSinks {
            messages: &mut self.messages,
            thread: &mut self.thread,
            ai_index,
        };

        if let Err(err) = invoker.invoke_turn(&sent, &mut sinks).await {
            error!(error = %err, "agent turn failed");
            self.messages[ai_index].content = format!("Error: {err}");
            return Err(err);
        }
        Ok(())
    }

    /// The last AI message of the transcript, if any
    pub fn last_answer(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == ChatRole::Ai)
    }
}
