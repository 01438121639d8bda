// SPDX-License-Identifier: MIT

//! Worker node - one task cycle ending in exactly one message
//!
//! A worker drives a bounded generate/tool loop: the generation oracle
//! either returns the step's final text or requests tool calls, whose
//! outputs are fed back on the next turn. Tool failures are fatal to
//! the step and propagate to the executor; there is no retry at this
//! layer.

use crate::engine::roster::{WorkerDescriptor, WorkerName};
use crate::engine::state::{Message, StateDelta, StateView};
use crate::error::OrchestratorError;
use crate::oracle::{Completion, GenerationOracle, ToolExchange};
use crate::tool::Tool;
use crate::tools::registry::ToolRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// Upper bound on generation turns within one worker step
const MAX_TURNS: u32 = 10;

pub struct WorkerNode {
    name: WorkerName,
    instruction: String,
    oracle: Arc<dyn GenerationOracle>,
    tools: Vec<Arc<dyn Tool>>,
    tool_map: HashMap<String, usize>,
}

impl WorkerNode {
    pub fn new(
        name: WorkerName,
        instruction: String,
        oracle: Arc<dyn GenerationOracle>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Self {
        let tool_map = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name().to_string(), i))
            .collect();
        Self {
            name,
            instruction,
            oracle,
            tools,
            tool_map,
        }
    }

    /// Build a node from its descriptor, resolving the declared
    /// capability names against the registry. The capability set is
    /// fixed here and never changes mid-run; a name the registry does
    /// not know is a configuration error.
    pub async fn from_descriptor(
        descriptor: &WorkerDescriptor,
        oracle: Arc<dyn GenerationOracle>,
        registry: &ToolRegistry,
    ) -> Result<Self, OrchestratorError> {
        let mut tools = Vec::with_capacity(descriptor.tools.len());
        for tool_name in &descriptor.tools {
            let tool = registry
                .get(tool_name)
                .await
                .ok_or_else(|| OrchestratorError::ToolNotFound {
                    name: tool_name.clone(),
                })?;
            tools.push(tool);
        }
        Ok(Self::new(
            descriptor.name,
            descriptor.instruction.clone(),
            oracle,
            tools,
        ))
    }

    pub fn name(&self) -> WorkerName {
        self.name
    }

    fn get_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tool_map.get(name).map(|&i| &self.tools[i])
    }

    /// Execute one task cycle over a read-only view of the run state.
    /// Returns a delta appending exactly one message attributed to
    /// this worker.
    pub async fn execute(&self, view: StateView<'_>) -> Result<StateDelta, OrchestratorError> {
        let mut scratchpad: Vec<ToolExchange> = Vec::new();

        for turn in 0..MAX_TURNS {
            log::info!("Worker {} turn {}/{}", self.name, turn + 1, MAX_TURNS);
            let completion = self
                .oracle
                .generate(&self.instruction, view, &scratchpad, &self.tools)
                .await?;

            let calls = match completion {
                Completion::Text(text) => {
                    log::info!(
                        "Worker {} produced message ({} chars)",
                        self.name,
                        text.len()
                    );
                    return Ok(StateDelta::message(Message::worker(
                        self.name.to_string(),
                        text,
                    )));
                }
                Completion::ToolCalls(calls) => calls,
            };

            if calls.is_empty() {
                return Err(OrchestratorError::from(format!(
                    "Worker {} returned an empty tool-call set",
                    self.name
                )));
            }

            for call in calls {
                let tool = self
                    .get_tool(&call.name)
                    .ok_or_else(|| OrchestratorError::ToolNotFound {
                        name: call.name.clone(),
                    })?;

                log::info!("Worker {} calling tool {}", self.name, call.name);
                let output = tool.execute(call.args.clone()).await?;
                scratchpad.push(ToolExchange { call, output });
            }
        }

        Err(OrchestratorError::from(format!(
            "Worker {} reached max turns without a text completion",
            self.name
        )))
    }
}
