// src/web/handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::types::{SaveResumeRequest, StatusResponse};
use crate::triage::Orchestrator;

pub async fn start_handler(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    info!("Start requested over the API.");
    Json(StatusResponse::new(orchestrator.start().await))
}

pub async fn stop_handler(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    info!("Stop requested over the API.");
    Json(StatusResponse::new(orchestrator.stop()))
}

pub async fn status_handler(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    Json(StatusResponse::new(orchestrator.status()))
}

pub async fn save_resume_handler(
    request: Json<SaveResumeRequest>,
    orchestrator: &State<Orchestrator>,
) -> Json<StatusResponse> {
    let resume = request.into_inner().into();
    Json(StatusResponse::new(orchestrator.save_resume(resume).await))
}

pub async fn health_handler() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}
