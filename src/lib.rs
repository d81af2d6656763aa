pub mod cli;
pub mod config;
pub mod llm;
pub mod store;
pub mod triage;
pub mod web;

pub use config::ConfigManager;
pub use llm::{ChatModel, LlmClient, LlmError, LlmSettings};
pub use store::{Store, VacancyStatus};
pub use triage::{Orchestrator, Resume, RunState};
pub use web::start_web_server;
