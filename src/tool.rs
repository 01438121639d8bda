// SPDX-License-Identifier: MIT

use crate::error::OrchestratorError;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for external capabilities a worker may invoke.
///
/// `name()` and `description()` return `&str` and `schema()` returns
/// `&Value` so implementations can hold these in struct fields (or a
/// `Lazy` static) instead of allocating on every access.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name (must be unique within a worker's capability set)
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's input parameters,
    /// including explicit defaults
    fn schema(&self) -> &Value;

    /// Execute the tool with the given input and return the result
    async fn execute(&self, input: Value) -> Result<Value, OrchestratorError>;
}
