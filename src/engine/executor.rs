// SPDX-License-Identifier: MIT

//! Graph executor - the Supervisor ⇄ Worker state machine
//!
//! Exactly one node executes per step and the executor is the sole
//! owner of the run state: nodes hand back deltas and the executor
//! commits them. A failed step (validation, schema, tool) aborts the
//! run with state as of the last committed step.

use crate::engine::roster::WorkerName;
use crate::engine::state::{Message, RunState, StateDelta};
use crate::engine::supervisor::{RoutingDecision, Supervisor};
use crate::engine::worker::WorkerNode;
use crate::error::OrchestratorError;
use std::collections::HashMap;
use uuid::Uuid;

/// Default cap on worker dispatches per run
pub const DEFAULT_MAX_STEPS: u32 = 25;

/// Position of the execution loop in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    Supervisor,
    Worker(WorkerName),
    Terminal,
}

impl GraphState {
    /// The transition out of a state. Workers always report back to
    /// the supervisor; the supervisor follows its routing decision;
    /// Terminal has no outgoing transitions.
    pub fn next(self, decision: Option<RoutingDecision>) -> GraphState {
        match self {
            GraphState::Worker(_) => GraphState::Supervisor,
            GraphState::Supervisor => match decision {
                Some(RoutingDecision::Next(name)) => GraphState::Worker(name),
                Some(RoutingDecision::Finish) | None => GraphState::Terminal,
            },
            GraphState::Terminal => GraphState::Terminal,
        }
    }
}

/// Result of a completed run: the transcript plus the final state
/// snapshot.
#[derive(Debug, Clone)]
pub struct FinalState {
    pub messages: Vec<Message>,
    pub state: RunState,
}

pub struct Orchestrator {
    supervisor: Supervisor,
    workers: HashMap<WorkerName, WorkerNode>,
    max_steps: u32,
}

impl Orchestrator {
    pub fn new(supervisor: Supervisor, workers: Vec<WorkerNode>) -> Self {
        let workers = workers.into_iter().map(|w| (w.name(), w)).collect();
        Self {
            supervisor,
            workers,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Override the worker-dispatch cap
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run to termination. The state is created here, mutated once per
    /// step, and returned as the final snapshot; nothing outlives the
    /// call.
    pub async fn run(
        &self,
        input: impl Into<String>,
        chat_history: Vec<Message>,
    ) -> Result<FinalState, OrchestratorError> {
        let run_id = Uuid::new_v4();
        let mut state = RunState::new(input, chat_history);
        let mut current = GraphState::Supervisor;
        let mut steps: u32 = 0;

        log::info!("Run {} started: {:?}", run_id, state.input);

        loop {
            match current {
                GraphState::Terminal => break,
                GraphState::Supervisor => {
                    let decision = self.supervisor.route(&state.messages).await?;
                    state.apply(StateDelta::next(decision.symbol()));
                    current = current.next(Some(decision));
                }
                GraphState::Worker(name) => {
                    if steps >= self.max_steps {
                        log::error!("Run {} exceeded {} worker steps", run_id, self.max_steps);
                        return Err(OrchestratorError::LoopLimitExceeded {
                            limit: self.max_steps,
                        });
                    }
                    steps += 1;

                    // Routing was validated against the registered set,
                    // so the node must exist
                    let node = self.workers.get(&name).ok_or_else(|| {
                        OrchestratorError::validation(
                            name.to_string(),
                            self.workers.keys().map(|w| w.to_string()).collect(),
                        )
                    })?;

                    log::info!("Run {} step {}: dispatching {}", run_id, steps, name);
                    let delta = node.execute(state.view()).await?;
                    state.apply(delta);
                    current = current.next(None);
                }
            }
        }

        log::info!(
            "Run {} finished after {} worker steps, {} messages",
            run_id,
            steps,
            state.messages.len()
        );

        Ok(FinalState {
            messages: state.messages.clone(),
            state,
        })
    }

    /// Synchronous entry point for callers without a runtime
    pub fn run_blocking(
        &self,
        input: impl Into<String>,
        chat_history: Vec<Message>,
    ) -> Result<FinalState, OrchestratorError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(input, chat_history))
    }
}
