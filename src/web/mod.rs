// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

use crate::triage::Orchestrator;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/start")]
pub async fn start(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    handlers::start_handler(orchestrator).await
}

#[post("/stop")]
pub async fn stop(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    handlers::stop_handler(orchestrator).await
}

#[get("/status")]
pub async fn status(orchestrator: &State<Orchestrator>) -> Json<StatusResponse> {
    handlers::status_handler(orchestrator).await
}

#[post("/resume", data = "<request>")]
pub async fn save_resume(
    request: Json<SaveResumeRequest>,
    orchestrator: &State<Orchestrator>,
) -> Json<StatusResponse> {
    handlers::save_resume_handler(request, orchestrator).await
}

#[get("/health")]
pub async fn health() -> Json<StatusResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StatusResponse> {
    Json(StatusResponse::new("Error: Invalid request format."))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StatusResponse> {
    Json(StatusResponse::new("Error: Unknown endpoint."))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StatusResponse> {
    Json(StatusResponse::new("Error: Internal server error."))
}

/// Start the control server. Blocks until Rocket shuts down.
pub async fn start_web_server(orchestrator: Orchestrator, port: u16) -> Result<()> {
    info!("Starting vacancy triage API server on port {port}");

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(orchestrator)
        .register("/api", catchers![bad_request, not_found, internal_error])
        .mount(
            "/api",
            routes![start, stop, status, save_resume, health, options],
        )
        .launch()
        .await?;

    Ok(())
}
