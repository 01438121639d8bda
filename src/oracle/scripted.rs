// SPDX-License-Identifier: MIT

//! Scripted oracle implementations
//!
//! Replay a fixed sequence of decisions or completions. Used by the
//! test suite and the CLI dry-run to drive the real engine
//! deterministically.

use super::{Completion, DecisionOracle, GenerationOracle, ToolExchange};
use crate::engine::state::{Message, StateView};
use crate::error::OrchestratorError;
use crate::tool::Tool;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Replays a fixed sequence of routing symbols as route payloads
pub struct ScriptedRouter {
    decisions: Vec<Value>,
    index: AtomicUsize,
}

impl ScriptedRouter {
    /// Script from plain symbols; each becomes `{"next": symbol}`
    pub fn from_symbols(symbols: &[&str]) -> Self {
        Self {
            decisions: symbols.iter().map(|s| json!({ "next": s })).collect(),
            index: AtomicUsize::new(0),
        }
    }

    /// Script from raw payloads, for exercising schema failures
    pub fn from_payloads(payloads: Vec<Value>) -> Self {
        Self {
            decisions: payloads,
            index: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DecisionOracle for ScriptedRouter {
    async fn decide(
        &self,
        _messages: &[Message],
        _options: &[String],
    ) -> Result<Value, OrchestratorError> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.decisions
            .get(i)
            .cloned()
            .ok_or_else(|| OrchestratorError::from("Scripted router exhausted"))
    }
}

/// Replays a fixed sequence of completions
pub struct ScriptedGenerator {
    completions: Vec<Completion>,
    index: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(completions: Vec<Completion>) -> Self {
        Self {
            completions,
            index: AtomicUsize::new(0),
        }
    }

    /// Generator that answers every step with a fixed text
    pub fn echo(text: &str) -> Self {
        Self::new(vec![Completion::Text(text.to_string())])
    }
}

#[async_trait]
impl GenerationOracle for ScriptedGenerator {
    async fn generate(
        &self,
        _instruction: &str,
        _view: StateView<'_>,
        _scratchpad: &[ToolExchange],
        _tools: &[Arc<dyn Tool>],
    ) -> Result<Completion, OrchestratorError> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // Echo-style generators repeat their last completion
        let i = i.min(self.completions.len().saturating_sub(1));
        self.completions
            .get(i)
            .cloned()
            .ok_or_else(|| OrchestratorError::from("Scripted generator exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_router_replays_in_order() {
        let router = ScriptedRouter::from_symbols(&["Searcher", "FINISH"]);
        let options = vec!["Searcher".to_string(), "FINISH".to_string()];

        let first = router.decide(&[], &options).await.unwrap();
        assert_eq!(first, json!({ "next": "Searcher" }));

        let second = router.decide(&[], &options).await.unwrap();
        assert_eq!(second, json!({ "next": "FINISH" }));

        assert!(router.decide(&[], &options).await.is_err());
    }

    #[tokio::test]
    async fn test_generator_repeats_last_completion() {
        let generator = ScriptedGenerator::echo("done");
        let state = crate::engine::state::RunState::new("q", vec![]);

        for _ in 0..3 {
            let completion = generator
                .generate("instr", state.view(), &[], &[])
                .await
                .unwrap();
            assert!(matches!(completion, Completion::Text(ref t) if t == "done"));
        }
    }
}
