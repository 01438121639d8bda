// SPDX-License-Identifier: MIT

//! Supervisor / router node
//!
//! Delegates the actual choice to an injected [`DecisionOracle`] and
//! owns only what the core is responsible for: schema validation of
//! the raw payload and rejection of out-of-set symbols.

use crate::engine::roster::{WorkerName, FINISH};
use crate::engine::state::Message;
use crate::error::OrchestratorError;
use crate::oracle::DecisionOracle;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

/// The route schema the oracle's payload must satisfy
pub static ROUTE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "name": "route",
        "description": "Select the next role.",
        "parameters": {
            "type": "object",
            "properties": {
                "next": { "type": "string" }
            },
            "required": ["next"]
        }
    })
});

/// A validated routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    Next(WorkerName),
    Finish,
}

impl RoutingDecision {
    /// The symbol as committed into `RunState.next`
    pub fn symbol(&self) -> &'static str {
        match self {
            RoutingDecision::Next(name) => name.as_str(),
            RoutingDecision::Finish => FINISH,
        }
    }
}

pub struct Supervisor {
    oracle: Arc<dyn DecisionOracle>,
    workers: Vec<WorkerName>,
    options: Vec<String>,
}

impl Supervisor {
    pub fn new(oracle: Arc<dyn DecisionOracle>, workers: Vec<WorkerName>) -> Self {
        let mut options = vec![FINISH.to_string()];
        options.extend(workers.iter().map(|w| w.to_string()));
        Self {
            oracle,
            workers,
            options,
        }
    }

    /// Registered worker names, in registration order
    pub fn workers(&self) -> &[WorkerName] {
        &self.workers
    }

    /// Evaluate one routing step over the accumulated messages.
    ///
    /// An empty roster finishes immediately without consulting the
    /// oracle. Any payload not matching `{"next": <string>}` is a
    /// schema error; a symbol outside the registered set (plus FINISH)
    /// is a validation error, never silently coerced.
    pub async fn route(&self, messages: &[Message]) -> Result<RoutingDecision, OrchestratorError> {
        if self.workers.is_empty() {
            log::info!("Supervisor: empty worker set, finishing");
            return Ok(RoutingDecision::Finish);
        }

        let payload = self.oracle.decide(messages, &self.options).await?;
        let decision = self.validate(&payload)?;
        log::info!("Supervisor routed to: {}", decision.symbol());
        Ok(decision)
    }

    /// Validate a raw route payload against the schema and symbol set
    pub fn validate(&self, payload: &Value) -> Result<RoutingDecision, OrchestratorError> {
        let symbol = payload
            .get("next")
            .ok_or_else(|| OrchestratorError::schema("route payload missing 'next' field"))?
            .as_str()
            .ok_or_else(|| OrchestratorError::schema("route field 'next' is not a string"))?;

        if symbol == FINISH {
            return Ok(RoutingDecision::Finish);
        }

        let name = WorkerName::from_str(symbol)
            .map_err(|_| OrchestratorError::validation(symbol, self.options.clone()))?;

        if !self.workers.contains(&name) {
            return Err(OrchestratorError::validation(symbol, self.options.clone()));
        }

        Ok(RoutingDecision::Next(name))
    }
}
