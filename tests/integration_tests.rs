//! End-to-end tests for the orchestration engine
//!
//! All scenarios drive the real executor, supervisor and merge path
//! with scripted oracles and stub tools.

use async_trait::async_trait;
use careerflow_rs::engine::roster::{WorkerDescriptor, WorkerName, FINISH};
use careerflow_rs::engine::{Message, Orchestrator, Role, Supervisor, WorkerNode};
use careerflow_rs::error::OrchestratorError;
use careerflow_rs::oracle::{
    Completion, DecisionOracle, ScriptedGenerator, ScriptedRouter, ToolCall,
};
use careerflow_rs::tool::Tool;
use careerflow_rs::tools::jobs::{JobBoard, JobSearchTool, SearchJobsArgs, SearchJobsResult};
use careerflow_rs::tools::registry::ToolRegistry;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// ============================================================================
// Test fixtures
// ============================================================================

/// Counts supervisor evaluations while delegating to an inner router
struct CountingRouter {
    inner: ScriptedRouter,
    evaluations: Arc<AtomicU32>,
}

#[async_trait]
impl DecisionOracle for CountingRouter {
    async fn decide(
        &self,
        messages: &[Message],
        options: &[String],
    ) -> Result<Value, OrchestratorError> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.decide(messages, options).await
    }
}

/// Stub job board over fixed ids, with selectable failures
struct StubBoard {
    ids: Vec<u64>,
    failing: HashSet<u64>,
}

#[async_trait]
impl JobBoard for StubBoard {
    async fn resolve_ids(&self, _args: &SearchJobsArgs) -> Result<Vec<u64>, OrchestratorError> {
        Ok(self.ids.clone())
    }

    async fn fetch_detail(
        &self,
        id: u64,
    ) -> Result<careerflow_rs::tools::jobs::JobPosting, OrchestratorError> {
        if self.failing.contains(&id) {
            return Err(OrchestratorError::tool("search_jobs", "detail fetch failed"));
        }
        Ok(careerflow_rs::tools::jobs::JobPosting {
            title: format!("Job {}", id),
            organization_url: format!("https://example.com/org/{}", id),
            location: "Berlin".to_string(),
            description: format!("Description of job {}", id),
        })
    }
}

fn echo_worker(name: WorkerName) -> WorkerNode {
    WorkerNode::new(
        name,
        format!("{} instruction", name),
        Arc::new(ScriptedGenerator::echo(&format!("{} report", name))),
        vec![],
    )
}

fn full_roster_workers() -> Vec<WorkerNode> {
    WorkerName::ALL.into_iter().map(echo_worker).collect()
}

fn orchestrator_with_route(symbols: &[&str]) -> Orchestrator {
    let router = Arc::new(ScriptedRouter::from_symbols(symbols));
    let workers = full_roster_workers();
    let names = workers.iter().map(|w| w.name()).collect();
    Orchestrator::new(Supervisor::new(router, names), workers)
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_scenario_a_three_workers_in_order() {
    let evaluations = Arc::new(AtomicU32::new(0));
    let router = Arc::new(CountingRouter {
        inner: ScriptedRouter::from_symbols(&["Searcher", "Analyzer", "Generator", FINISH]),
        evaluations: evaluations.clone(),
    });

    let workers = full_roster_workers();
    let names = workers.iter().map(|w| w.name()).collect();
    let orchestrator = Orchestrator::new(Supervisor::new(router, names), workers);

    let result = orchestrator
        .run("Find me a backend role in Berlin", vec![])
        .await
        .unwrap();

    let authors: Vec<&str> = result.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(authors, vec!["Searcher", "Analyzer", "Generator"]);
    assert!(result.messages.iter().all(|m| m.role == Role::Worker));
    assert_eq!(evaluations.load(Ordering::SeqCst), 4);
    assert_eq!(result.state.next.as_deref(), Some(FINISH));
}

#[tokio::test]
async fn test_scenario_b_fan_out_excludes_failed_id() {
    let tool = Arc::new(JobSearchTool::new(Arc::new(StubBoard {
        ids: vec![1, 2, 3],
        failing: [2].into_iter().collect(),
    })));

    let registry = ToolRegistry::new();
    registry.register(tool.clone()).await;

    // Searcher calls the tool, then reports the aggregated count
    let oracle = Arc::new(ScriptedGenerator::new(vec![
        Completion::ToolCalls(vec![ToolCall {
            name: "search_jobs".to_string(),
            args: json!({ "keywords": "backend", "location": "Berlin" }),
        }]),
        Completion::Text("search done".to_string()),
    ]));
    let descriptor = WorkerDescriptor::new(WorkerName::Searcher, "search", vec!["search_jobs"]);
    let searcher = WorkerNode::from_descriptor(&descriptor, oracle, &registry)
        .await
        .unwrap();

    let router = Arc::new(ScriptedRouter::from_symbols(&["Searcher", FINISH]));
    let orchestrator = Orchestrator::new(
        Supervisor::new(router, vec![WorkerName::Searcher]),
        vec![searcher],
    );
    let result = orchestrator.run("backend in Berlin", vec![]).await.unwrap();
    assert_eq!(result.messages.len(), 1);

    // The tool result itself carries the partial ordered aggregation
    let value = tool
        .execute(json!({ "keywords": "backend", "location": "Berlin" }))
        .await
        .unwrap();
    let search: SearchJobsResult = serde_json::from_value(value).unwrap();
    assert_eq!(search.postings.len(), 2);
    assert_eq!(search.postings[0].title, "Job 1");
    assert_eq!(search.postings[1].title, "Job 3");
}

#[tokio::test]
async fn test_scenario_c_unknown_symbol_aborts_without_message() {
    let orchestrator = orchestrator_with_route(&["Searcher", "Unknown", FINISH]);

    let err = orchestrator.run("request", vec![]).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Validation { .. }));
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_message_count_matches_completed_steps() {
    for route in [
        vec![FINISH],
        vec!["Searcher", FINISH],
        vec!["Searcher", "Searcher", "Analyzer", FINISH],
    ] {
        let orchestrator = orchestrator_with_route(&route);
        let result = orchestrator.run("request", vec![]).await.unwrap();
        assert_eq!(result.messages.len(), route.len() - 1);
    }
}

#[tokio::test]
async fn test_deterministic_route_yields_exact_transcript() {
    let orchestrator = orchestrator_with_route(&["Generator", "Searcher", "Analyzer", FINISH]);
    let result = orchestrator.run("request", vec![]).await.unwrap();

    let expected = vec![
        Message::worker("Generator", "Generator report"),
        Message::worker("Searcher", "Searcher report"),
        Message::worker("Analyzer", "Analyzer report"),
    ];
    assert_eq!(result.messages, expected);
}

#[tokio::test]
async fn test_chat_history_passes_through_untouched() {
    let history = vec![Message::user("earlier question")];
    let orchestrator = orchestrator_with_route(&["Searcher", FINISH]);
    let result = orchestrator.run("request", history.clone()).await.unwrap();

    assert_eq!(result.state.chat_history, history);
    assert_eq!(result.state.input, "request");
}

#[tokio::test]
async fn test_empty_roster_finishes_immediately() {
    // Router is empty and would fail if consulted
    let router = Arc::new(ScriptedRouter::from_symbols(&[]));
    let orchestrator = Orchestrator::new(Supervisor::new(router, vec![]), vec![]);

    let result = orchestrator.run("request", vec![]).await.unwrap();
    assert!(result.messages.is_empty());
    assert_eq!(result.state.next.as_deref(), Some(FINISH));
}

#[tokio::test]
async fn test_loop_limit_exceeded() {
    let route: Vec<&str> = std::iter::repeat("Searcher").take(40).collect();
    let orchestrator = orchestrator_with_route(&route).with_max_steps(3);

    let err = orchestrator.run("request", vec![]).await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::LoopLimitExceeded { limit: 3 }
    ));
}

#[tokio::test]
async fn test_malformed_route_payload_is_schema_error() {
    let router = Arc::new(ScriptedRouter::from_payloads(vec![json!({ "route": "x" })]));
    let workers = full_roster_workers();
    let names = workers.iter().map(|w| w.name()).collect();
    let orchestrator = Orchestrator::new(Supervisor::new(router, names), workers);

    let err = orchestrator.run("request", vec![]).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Schema(_)));
}

#[tokio::test]
async fn test_tool_failure_aborts_worker_step() {
    struct FailingBoard;

    #[async_trait]
    impl JobBoard for FailingBoard {
        async fn resolve_ids(&self, _args: &SearchJobsArgs) -> Result<Vec<u64>, OrchestratorError> {
            Err(OrchestratorError::tool("search_jobs", "board unreachable"))
        }

        async fn fetch_detail(
            &self,
            _id: u64,
        ) -> Result<careerflow_rs::tools::jobs::JobPosting, OrchestratorError> {
            unreachable!("resolve fails first")
        }
    }

    let oracle = Arc::new(ScriptedGenerator::new(vec![Completion::ToolCalls(vec![
        ToolCall {
            name: "search_jobs".to_string(),
            args: json!({ "keywords": "backend", "location": "Berlin" }),
        },
    ])]));
    let searcher = WorkerNode::new(
        WorkerName::Searcher,
        "search".to_string(),
        oracle,
        vec![Arc::new(JobSearchTool::new(Arc::new(FailingBoard)))],
    );

    let router = Arc::new(ScriptedRouter::from_symbols(&["Searcher", FINISH]));
    let orchestrator = Orchestrator::new(
        Supervisor::new(router, vec![WorkerName::Searcher]),
        vec![searcher],
    );

    let err = orchestrator.run("request", vec![]).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::ToolInvocation { .. }));
}
