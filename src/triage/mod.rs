// src/triage/mod.rs
use serde::{Deserialize, Serialize};

pub mod extract;
pub mod orchestrator;
pub mod page;
pub mod prompts;

pub use orchestrator::{Orchestrator, RunState};
pub use page::{
    ExtractRequest, ExtractResponse, HttpPageHost, Page, PageError, PageHost, StoredPageHost,
};

/// A candidate's resume as extracted from its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub text: String,
}
