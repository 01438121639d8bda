// SPDX-License-Identifier: MIT

//! Oracle traits - the injectable non-determinism seams
//!
//! Routing decisions and task content both come from opaque external
//! capabilities (in production, generative models). The engine only
//! depends on these two traits, so the orchestration logic stays
//! deterministic and unit-testable with scripted implementations.

pub mod scripted;

pub use scripted::{ScriptedGenerator, ScriptedRouter};

use crate::engine::state::StateView;
use crate::error::OrchestratorError;
use crate::tool::Tool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Decides which worker acts next.
///
/// Returns the raw routing payload; schema validation belongs to the
/// supervisor, not the oracle.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(
        &self,
        messages: &[crate::engine::state::Message],
        options: &[String],
    ) -> Result<Value, OrchestratorError>;
}

/// One tool call requested by a generation oracle
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub args: Value,
}

/// A completed call/output pair, fed back on the next generation turn
#[derive(Debug, Clone)]
pub struct ToolExchange {
    pub call: ToolCall,
    pub output: Value,
}

/// What a generation turn produced: either the final text for this
/// step, or tool calls whose outputs the worker feeds back in.
#[derive(Debug, Clone)]
pub enum Completion {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

/// Produces task content for a worker step.
#[async_trait]
pub trait GenerationOracle: Send + Sync {
    async fn generate(
        &self,
        instruction: &str,
        view: StateView<'_>,
        scratchpad: &[ToolExchange],
        tools: &[Arc<dyn Tool>],
    ) -> Result<Completion, OrchestratorError>;
}
