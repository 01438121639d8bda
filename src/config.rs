// SPDX-License-Identifier: MIT

//! Roster configuration
//!
//! The engine ships with a built-in roster; a YAML file may override
//! instruction text and tool lists per worker plus the step cap.

use crate::engine::executor::DEFAULT_MAX_STEPS;
use crate::engine::roster::{default_roster, WorkerDescriptor, WorkerName};
use crate::error::OrchestratorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub workers: Vec<WorkerOverride>,
    pub max_steps: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkerOverride {
    pub name: String,
    pub instruction: Option<String>,
    pub tools: Option<Vec<String>>,
}

impl RosterConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, OrchestratorError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config: RosterConfig = serde_yaml::from_str(&raw)?;
        config.check()?;
        Ok(config)
    }

    /// Reject overrides naming workers outside the registered set
    fn check(&self) -> Result<(), OrchestratorError> {
        for w in &self.workers {
            WorkerName::from_str(&w.name)
                .map_err(|_| OrchestratorError::config(format!("unknown worker '{}'", w.name)))?;
        }
        Ok(())
    }

    /// The default roster with this config's overrides applied
    pub fn roster(&self) -> Vec<WorkerDescriptor> {
        let mut roster = default_roster();
        for over in &self.workers {
            // check() validated the name already
            if let Ok(name) = WorkerName::from_str(&over.name) {
                if let Some(descriptor) = roster.iter_mut().find(|d| d.name == name) {
                    if let Some(instruction) = &over.instruction {
                        descriptor.instruction = instruction.clone();
                    }
                    if let Some(tools) = &over.tools {
                        descriptor.tools = tools.clone();
                    }
                }
            }
        }
        roster
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps.unwrap_or(DEFAULT_MAX_STEPS)
    }
}
