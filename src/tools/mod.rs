// SPDX-License-Identifier: MIT

//! External capabilities invoked by workers through the tool contract

pub mod document;
pub mod jobs;
pub mod registry;

pub use document::{DocumentTextTool, DraftDocumentTool};
pub use jobs::{HttpJobBoard, JobBoard, JobPosting, JobSearchTool};
pub use registry::ToolRegistry;
