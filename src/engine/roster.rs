// SPDX-License-Identifier: MIT

//! The fixed worker roster
//!
//! Worker names are a closed set; routing symbols outside it (other
//! than FINISH) are rejected at validation time rather than coerced.

use crate::error::OrchestratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel routing symbol ending the run
pub const FINISH: &str = "FINISH";

/// The registered worker identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerName {
    Searcher,
    Analyzer,
    Generator,
}

impl WorkerName {
    pub const ALL: [WorkerName; 3] = [
        WorkerName::Searcher,
        WorkerName::Analyzer,
        WorkerName::Generator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerName::Searcher => "Searcher",
            WorkerName::Analyzer => "Analyzer",
            WorkerName::Generator => "Generator",
        }
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkerName {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Searcher" => Ok(WorkerName::Searcher),
            "Analyzer" => Ok(WorkerName::Analyzer),
            "Generator" => Ok(WorkerName::Generator),
            other => Err(OrchestratorError::validation(
                other,
                WorkerName::ALL.iter().map(|w| w.to_string()).collect(),
            )),
        }
    }
}

/// Static description of one worker: identity, instruction text, and
/// the tool capability names it may invoke. Fixed at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerDescriptor {
    pub name: WorkerName,
    pub instruction: String,
    pub tools: Vec<String>,
}

impl WorkerDescriptor {
    pub fn new(name: WorkerName, instruction: impl Into<String>, tools: Vec<&str>) -> Self {
        Self {
            name,
            instruction: instruction.into(),
            tools: tools.into_iter().map(String::from).collect(),
        }
    }
}

/// The default Searcher/Analyzer/Generator roster
pub fn default_roster() -> Vec<WorkerDescriptor> {
    vec![
        WorkerDescriptor::new(
            WorkerName::Searcher,
            "Given a user query for a role with location and optional filters, \
             find the most relevant job postings with title, company url, \
             location and full description.",
            vec!["search_jobs"],
        ),
        WorkerDescriptor::new(
            WorkerName::Analyzer,
            "You have access to the candidate document and the postings found \
             by the Searcher. Extract job-relevant skills and experience, then \
             reason which posting matches best.",
            vec!["extract_document_text"],
        ),
        WorkerDescriptor::new(
            WorkerName::Generator,
            "Given the extracted candidate profile and the best matching \
             posting from the Analyzer, draft a cover letter motivated by \
             that posting.",
            vec!["draft_document"],
        ),
    ]
}
