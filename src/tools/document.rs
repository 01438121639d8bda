// SPDX-License-Identifier: MIT

//! Document tools: candidate-document text extraction and letter drafting

use crate::engine::state::RunState;
use crate::error::OrchestratorError;
use crate::oracle::{Completion, GenerationOracle};
use crate::tool::Tool;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

// --- Static schemas ---

static EXTRACT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "source_path": {
                "type": "string",
                "description": "Path to the extracted candidate document text"
            }
        },
        "required": ["source_path"]
    })
});

static DRAFT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "context": {
                "type": "string",
                "description": "Relevant conversation context: candidate profile and matched posting",
                "default": ""
            }
        }
    })
});

#[derive(Debug, Deserialize)]
struct ExtractArgs {
    source_path: String,
}

#[derive(Debug, Deserialize)]
struct DraftArgs {
    #[serde(default)]
    context: String,
}

/// Reads the candidate document text from disk. Text extraction from
/// richer formats happens upstream; this tool consumes the result.
pub struct DocumentTextTool;

#[async_trait]
impl Tool for DocumentTextTool {
    fn name(&self) -> &str {
        "extract_document_text"
    }

    fn description(&self) -> &str {
        "Reads the candidate document and returns its text for analysis. \
         Only job-relevant content is of interest, not personal information."
    }

    fn schema(&self) -> &Value {
        &EXTRACT_SCHEMA
    }

    async fn execute(&self, input: Value) -> Result<Value, OrchestratorError> {
        let args: ExtractArgs = serde_json::from_value(input)
            .map_err(|e| OrchestratorError::schema(format!("extract_document_text args: {}", e)))?;

        let text = tokio::fs::read_to_string(&args.source_path)
            .await
            .map_err(|e| {
                OrchestratorError::tool(
                    "extract_document_text",
                    format!("cannot read '{}': {}", args.source_path, e),
                )
            })?;

        Ok(Value::String(text))
    }
}

/// Drafts a cover letter through a generation oracle. The original
/// capability takes no structured input and leans on conversation
/// context, so the caller forwards that context as one string.
pub struct DraftDocumentTool {
    oracle: Arc<dyn GenerationOracle>,
}

impl DraftDocumentTool {
    pub fn new(oracle: Arc<dyn GenerationOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl Tool for DraftDocumentTool {
    fn name(&self) -> &str {
        "draft_document"
    }

    fn description(&self) -> &str {
        "Writes a cover letter for the best matching job, grounded in the \
         candidate profile: contact info, addresser, career summary and \
         motivation for the role."
    }

    fn schema(&self) -> &Value {
        &DRAFT_SCHEMA
    }

    async fn execute(&self, input: Value) -> Result<Value, OrchestratorError> {
        let args: DraftArgs = serde_json::from_value(input)
            .map_err(|e| OrchestratorError::schema(format!("draft_document args: {}", e)))?;

        let state = RunState::new(args.context, vec![]);
        let completion = self
            .oracle
            .generate(self.description(), state.view(), &[], &[])
            .await?;

        match completion {
            Completion::Text(letter) => Ok(Value::String(letter)),
            Completion::ToolCalls(_) => Err(OrchestratorError::tool(
                "draft_document",
                "drafting oracle requested tool calls instead of text",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::ScriptedGenerator;

    #[tokio::test]
    async fn test_extract_reads_file() {
        let dir = std::env::temp_dir().join("careerflow-doc-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("cv.txt");
        tokio::fs::write(&path, "ten years of backend work")
            .await
            .unwrap();

        let tool = DocumentTextTool;
        let out = tool
            .execute(json!({ "source_path": path.to_str().unwrap() }))
            .await
            .unwrap();
        assert_eq!(out, Value::String("ten years of backend work".into()));
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let tool = DocumentTextTool;
        let err = tool
            .execute(json!({ "source_path": "/nonexistent/cv.txt" }))
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::ToolInvocation { .. }));
    }

    #[tokio::test]
    async fn test_extract_missing_arg_is_schema_error() {
        let tool = DocumentTextTool;
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Schema(_)));
    }

    #[tokio::test]
    async fn test_draft_delegates_to_oracle() {
        let tool = DraftDocumentTool::new(Arc::new(ScriptedGenerator::echo("Dear team,")));
        let out = tool.execute(json!({ "context": "profile" })).await.unwrap();
        assert_eq!(out, Value::String("Dear team,".into()));
    }

    #[tokio::test]
    async fn test_draft_context_defaults_empty() {
        let tool = DraftDocumentTool::new(Arc::new(ScriptedGenerator::echo("letter")));
        let out = tool.execute(json!({})).await.unwrap();
        assert_eq!(out, Value::String("letter".into()));
    }
}
