// SPDX-License-Identifier: MIT

//! careerflow-rs - supervisor-worker orchestration for a career
//! assistant (job search, candidate analysis, letter drafting)
//!
//! The engine sequences a fixed worker roster under a routing
//! supervisor over one shared run record until the supervisor decides
//! to finish. Non-deterministic decision and generation capabilities
//! sit behind injectable oracle traits; external capabilities sit
//! behind the tool contract.

pub mod config;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod tool;
pub mod tools;

pub use engine::{FinalState, Message, Orchestrator, Role, RunState, Supervisor, WorkerNode};
pub use error::OrchestratorError;
