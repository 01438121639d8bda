// SPDX-License-Identifier: MIT

//! The single mutable run record and its merge policy
//!
//! One `RunState` exists per run, owned by the executor. Nodes never
//! touch it directly: they return a `StateDelta` and the executor
//! commits exactly one delta per step via `apply`. Merge rules:
//! `messages` appends, `next` overwrites, everything else overwrites
//! only when present in the delta.

use serde::{Deserialize, Serialize};

/// Role classification of a message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Worker,
    Supervisor,
}

/// A single message in the run transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author name (worker name, or caller-chosen for history entries)
    pub name: String,
    pub content: String,
    pub role: Role,
}

impl Message {
    pub fn new(name: impl Into<String>, content: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            role,
        }
    }

    /// A user-authored message, as supplied in prior chat history
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content, Role::User)
    }

    /// A worker-authored result message
    pub fn worker(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, content, Role::Worker)
    }
}

/// The shared run record threaded through every node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Original request text
    pub input: String,
    /// Caller-supplied prior conversation, immutable during the run
    pub chat_history: Vec<Message>,
    /// Messages accumulated across the run, in completion order
    pub messages: Vec<Message>,
    /// Last routed symbol committed by the supervisor
    pub next: Option<String>,
    /// Opaque passthrough flag, never read by the core
    pub return_direct: bool,
}

impl RunState {
    pub fn new(input: impl Into<String>, chat_history: Vec<Message>) -> Self {
        Self {
            input: input.into(),
            chat_history,
            messages: Vec::new(),
            next: None,
            return_direct: false,
        }
    }

    /// Read-only view handed to nodes
    pub fn view(&self) -> StateView<'_> {
        StateView {
            input: &self.input,
            chat_history: &self.chat_history,
            messages: &self.messages,
        }
    }

    /// Commit one delta. Messages append in order; `next` overwrites;
    /// the remaining fields overwrite only when the delta carries them.
    pub fn apply(&mut self, delta: StateDelta) {
        self.messages.extend(delta.messages);
        if let Some(next) = delta.next {
            self.next = Some(next);
        }
        if let Some(input) = delta.input {
            self.input = input;
        }
        if let Some(history) = delta.chat_history {
            self.chat_history = history;
        }
        if let Some(flag) = delta.return_direct {
            self.return_direct = flag;
        }
    }
}

/// Borrowed read view of the fields a node may consult
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub input: &'a str,
    pub chat_history: &'a [Message],
    pub messages: &'a [Message],
}

/// One node's pending update, merged back exclusively by the executor
#[derive(Debug, Clone, Default)]
pub struct StateDelta {
    pub messages: Vec<Message>,
    pub next: Option<String>,
    pub input: Option<String>,
    pub chat_history: Option<Vec<Message>>,
    pub return_direct: Option<bool>,
}

impl StateDelta {
    /// Delta appending exactly one message (the worker-node contract)
    pub fn message(message: Message) -> Self {
        Self {
            messages: vec![message],
            ..Default::default()
        }
    }

    /// Delta overwriting the routed symbol (the supervisor contract)
    pub fn next(symbol: impl Into<String>) -> Self {
        Self {
            next: Some(symbol.into()),
            ..Default::default()
        }
    }
}
