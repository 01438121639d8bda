// SPDX-License-Identifier: MIT

//! The supervisor-worker orchestration engine
//!
//! - `state` - the shared run record and merge policy
//! - `roster` - the fixed worker identities and descriptors
//! - `supervisor` - routing with schema validation
//! - `worker` - the single-task-cycle node contract
//! - `executor` - the graph state machine driving a run to Terminal

pub mod executor;
pub mod roster;
pub mod state;
pub mod supervisor;
pub mod worker;

pub use executor::{FinalState, GraphState, Orchestrator, DEFAULT_MAX_STEPS};
pub use roster::{default_roster, WorkerDescriptor, WorkerName, FINISH};
pub use state::{Message, Role, RunState, StateDelta, StateView};
pub use supervisor::{RoutingDecision, Supervisor};
pub use worker::WorkerNode;
