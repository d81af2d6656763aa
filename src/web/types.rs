// src/web/types.rs

use rocket::serde::{Deserialize, Serialize};

use crate::triage::Resume;

/// Every control endpoint answers with the current status line.
#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveResumeRequest {
    pub resume: ResumePayload,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumePayload {
    pub id: String,
    pub title: String,
    pub text: String,
}

impl From<SaveResumeRequest> for Resume {
    fn from(request: SaveResumeRequest) -> Self {
        Resume {
            id: request.resume.id,
            title: request.resume.title,
            text: request.resume.text,
        }
    }
}
