// SPDX-License-Identifier: MIT

//! Typed error handling for careerflow-rs
//!
//! One enum covers the whole run lifecycle so callers can match on the
//! failure class that aborted a run.

use thiserror::Error;

/// Top-level error type for careerflow-rs
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Routing decision outside the allowed symbol set
    #[error("Invalid routing decision '{symbol}', expected one of {allowed:?}")]
    Validation { symbol: String, allowed: Vec<String> },

    /// Decision or tool output failed to parse against its required schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// An external capability call failed
    #[error("Tool '{tool}' failed: {message}")]
    ToolInvocation { tool: String, message: String },

    /// Tool not found in a worker's declared capability set
    #[error("Tool '{name}' not found")]
    ToolNotFound { name: String },

    /// Step cap reached before the supervisor decided to finish
    #[error("Loop limit exceeded: {limit} worker steps")]
    LoopLimitExceeded { limit: u32 },

    /// Configuration errors (missing env vars, invalid roster file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper for compatibility
    #[error("{0}")]
    Other(String),
}

impl OrchestratorError {
    /// Create a validation error for an out-of-set routing symbol
    pub fn validation(symbol: impl Into<String>, allowed: Vec<String>) -> Self {
        Self::Validation {
            symbol: symbol.into(),
            allowed,
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a tool invocation error
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolInvocation {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<&str> for OrchestratorError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for OrchestratorError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
