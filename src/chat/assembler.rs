//! Per-turn assembly of the NDJSON invocation stream
//!
//! One `StreamAssembler` is created per user turn. It reassembles line
//! boundaries across network chunk boundaries, decodes each complete
//! line, classifies it and dispatches to the turn's sinks. Malformed
//! lines are discarded silently; stream continuity wins over strict
//! protocol conformance.

use tracing::debug;
use uuid::Uuid;

use super::chunk::{classify, AgentLevel, Classification, StreamChunk};

/// One entry of the append-only agent thread log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadEntry {
    /// Marks the start of a user turn
    Separator { id: String },
    /// One discrete piece of agent activity
    Step {
        id: String,
        level: AgentLevel,
        text: String,
    },
}

impl ThreadEntry {
    /// A separator with a fresh id
    pub fn separator() -> Self {
        ThreadEntry::Separator {
            id: Uuid::new_v4().to_string(),
        }
    }

    fn step(level: AgentLevel, text: String) -> Self {
        ThreadEntry::Step {
            id: Uuid::new_v4().to_string(),
            level,
            text,
        }
    }
}

/// Output sinks of one chat turn: the live chat answer and the ordered
/// thread log. Both are owned by the caller; entries are appended in
/// the order their lines were received.
pub trait TurnSinks {
    /// Append a piece of the authoritative chat answer
    fn append_final_text(&mut self, text: &str);
    /// Append one thread entry
    fn push_entry(&mut self, entry: ThreadEntry);
}

/// Stateful line reassembler and dispatcher for one response stream.
///
/// Buffering happens at the byte level and only complete lines are
/// decoded, so a multi-byte code point split across network chunks is
/// held intact until its line terminates. Dropping the assembler
/// without calling [`finish`](Self::finish) is cancellation: the
/// accumulated outer final is discarded, never flushed.
pub struct StreamAssembler<'a, S: TurnSinks + ?Sized> {
    sinks: &'a mut S,
    line_buffer: Vec<u8>,
    outer_final: String,
}

impl<'a, S: TurnSinks + ?Sized> StreamAssembler<'a, S> {
    pub fn new(sinks: &'a mut S) -> Self {
        Self {
            sinks,
            line_buffer: Vec::new(),
            outer_final: String::new(),
        }
    }

    /// Feed one network chunk. All complete lines contained in the
    /// buffer after this chunk are processed in order; a trailing
    /// partial line stays buffered.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.line_buffer.extend_from_slice(bytes);

        while let Some(pos) = self.line_buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.line_buffer.drain(..=pos).collect();
            self.process_line(&line[..line.len() - 1]);
        }
    }

    /// End of stream: flush the accumulated outer final answer as one
    /// consolidated thread entry. An unterminated trailing partial line
    /// is discarded, not parsed.
    pub fn finish(self) {
        if !self.outer_final.is_empty() {
            self.sinks
                .push_entry(ThreadEntry::step(AgentLevel::OuterAgent, self.outer_final));
        }
    }

    fn process_line(&mut self, raw: &[u8]) {
        let line = match std::str::from_utf8(raw) {
            Ok(s) => s.trim(),
            Err(_) => {
                debug!("discarding non-UTF-8 stream line");
                return;
            }
        };
        if line.is_empty() {
            return;
        }

        let chunk: StreamChunk = match serde_json::from_str(line) {
            Ok(chunk) => chunk,
            Err(err) => {
                debug!(error = %err, "discarding malformed stream line");
                return;
            }
        };

        match classify(chunk) {
            Classification::Step { level, text } => {
                self.sinks.push_entry(ThreadEntry::step(level, text));
            }
            Classification::OuterFinal { text } => {
                self.sinks.append_final_text(&text);
                self.outer_final.push_str(&text);
            }
            Classification::InnerFinal { text } => {
                self.sinks
                    .push_entry(ThreadEntry::step(AgentLevel::InnerAgent, text));
            }
            Classification::Ignore => {}
        }
    }
}
