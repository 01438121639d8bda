// SPDX-License-Identifier: MIT

//! Job search tool - two-phase fan-out over a job board
//!
//! Phase 1 resolves the query into candidate job ids; phase 2 fetches
//! one detail record per id concurrently and aggregates the results in
//! phase-1 order. Partial-failure policy: a failed detail fetch is
//! logged and excluded, the remaining postings are returned with their
//! relative order preserved.

use crate::error::OrchestratorError;
use crate::tool::Tool;
use async_trait::async_trait;
use futures::future::join_all;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::sync::Arc;

// --- Static schema ---

static SEARCH_JOBS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "keywords": {
                "type": "string",
                "description": "Role keywords to search for"
            },
            "location": {
                "type": "string",
                "description": "Location name to search in"
            },
            "job_type": {
                "type": "string",
                "description": "Optional job type filter (full-time, contract, ...)"
            },
            "limit": {
                "type": "integer",
                "description": "Maximum number of postings to return",
                "default": 10
            },
            "companies": {
                "type": "string",
                "description": "Optional comma-separated company filter"
            },
            "industries": {
                "type": "string",
                "description": "Optional comma-separated industry filter"
            },
            "remote": {
                "type": "string",
                "description": "Optional remote filter (remote, hybrid, onsite)"
            }
        },
        "required": ["keywords", "location"]
    })
});

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchJobsArgs {
    pub keywords: String,
    pub location: String,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub companies: Option<String>,
    #[serde(default)]
    pub industries: Option<String>,
    #[serde(default)]
    pub remote: Option<String>,
}

/// One posting as produced by the board; opaque to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub organization_url: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchJobsResult {
    pub postings: Vec<JobPosting>,
    pub keywords: String,
    pub location: String,
}

/// The external board behind the tool: id resolution plus per-id
/// detail fetch. HTTP in production, stubbed in tests.
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn resolve_ids(&self, args: &SearchJobsArgs) -> Result<Vec<u64>, OrchestratorError>;

    async fn fetch_detail(&self, id: u64) -> Result<JobPosting, OrchestratorError>;
}

/// JSON job-board API client. Expects `JOBBOARD_API_URL` and
/// `JOBBOARD_API_KEY`; `GET /search` returns `{"ids": [...]}` and
/// `GET /jobs/{id}` returns a posting record.
pub struct HttpJobBoard {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpJobBoard {
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let base_url = env::var("JOBBOARD_API_URL")
            .map_err(|_| OrchestratorError::config("JOBBOARD_API_URL must be set"))?;
        let api_key = env::var("JOBBOARD_API_KEY")
            .map_err(|_| OrchestratorError::config("JOBBOARD_API_KEY must be set"))?;
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl JobBoard for HttpJobBoard {
    async fn resolve_ids(&self, args: &SearchJobsArgs) -> Result<Vec<u64>, OrchestratorError> {
        let mut url = reqwest::Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| OrchestratorError::config(format!("bad job board url: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("keywords", &args.keywords)
                .append_pair("location", &args.location)
                .append_pair("limit", &args.limit.to_string());
            if let Some(job_type) = &args.job_type {
                pairs.append_pair("job_type", job_type);
            }
            if let Some(companies) = &args.companies {
                pairs.append_pair("companies", companies);
            }
            if let Some(industries) = &args.industries {
                pairs.append_pair("industries", industries);
            }
            if let Some(remote) = &args.remote {
                pairs.append_pair("remote", remote);
            }
        }

        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(OrchestratorError::tool("search_jobs", text));
        }

        let body: Value = resp.json().await?;
        let ids = body
            .get("ids")
            .ok_or_else(|| OrchestratorError::schema("search response missing 'ids'"))?;
        Ok(serde_json::from_value(ids.clone())?)
    }

    async fn fetch_detail(&self, id: u64) -> Result<JobPosting, OrchestratorError> {
        let url = format!("{}/jobs/{}", self.base_url, id);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(OrchestratorError::tool("search_jobs", text));
        }

        Ok(resp.json().await?)
    }
}

pub struct JobSearchTool {
    board: Arc<dyn JobBoard>,
}

impl JobSearchTool {
    pub fn new(board: Arc<dyn JobBoard>) -> Self {
        Self { board }
    }

    pub fn from_env() -> Result<Self, OrchestratorError> {
        Ok(Self::new(Arc::new(HttpJobBoard::from_env()?)))
    }

    /// Phase 2: fetch all details concurrently, aggregate in id order,
    /// excluding ids whose fetch failed.
    async fn fetch_postings(&self, ids: &[u64]) -> Vec<JobPosting> {
        let fetches = ids.iter().map(|&id| async move {
            match self.board.fetch_detail(id).await {
                Ok(posting) => Some(posting),
                Err(e) => {
                    log::warn!("Excluding job {} from results: {}", id, e);
                    None
                }
            }
        });

        // join_all keeps phase-1 order
        join_all(fetches).await.into_iter().flatten().collect()
    }
}

#[async_trait]
impl Tool for JobSearchTool {
    fn name(&self) -> &str {
        "search_jobs"
    }

    fn description(&self) -> &str {
        "Searches a job board for postings matching role keywords, location \
         and optional filters. Returns posting title, company url, location \
         and full description."
    }

    fn schema(&self) -> &Value {
        &SEARCH_JOBS_SCHEMA
    }

    async fn execute(&self, input: Value) -> Result<Value, OrchestratorError> {
        let args: SearchJobsArgs = serde_json::from_value(input)
            .map_err(|e| OrchestratorError::schema(format!("search_jobs args: {}", e)))?;

        let ids = self.board.resolve_ids(&args).await?;
        log::info!("search_jobs resolved {} candidate ids", ids.len());

        let postings = self.fetch_postings(&ids).await;

        let result = SearchJobsResult {
            postings,
            keywords: args.keywords,
            location: args.location,
        };
        Ok(serde_json::to_value(result)?)
    }
}
