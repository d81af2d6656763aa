// src/llm.rs
//! Chat-completion client for the configured inference endpoint.
//!
//! One POST per call, no retries: the orchestrator treats every failure as
//! data, so failing fast keeps a bad vacancy from stalling the whole run.

use crate::store::Store;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("All settings must be configured.")]
    Configuration,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected API response structure.")]
    Protocol,
}

/// Which request/response wire shape the endpoint speaks.
///
/// `OpenAi` is the vLLM-compatible chat completions shape; `DashScope`
/// wraps the messages under `input` and nests the reply one level deeper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiFlavor {
    #[default]
    OpenAi,
    DashScope,
}

impl ApiFlavor {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "dashscope" => Some(Self::DashScope),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::DashScope => "dashscope",
        }
    }

    fn reply_pointer(&self) -> &'static str {
        match self {
            Self::OpenAi => "/choices/0/message/content",
            Self::DashScope => "/output/choices/0/message/content",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LlmSettings {
    pub api_endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub model_name: Option<String>,
    /// Bearer token; when set it stands in for the username/password pair.
    pub api_key: Option<String>,
    pub flavor: ApiFlavor,
}

enum Auth<'a> {
    Basic { username: &'a str, password: &'a str },
    Bearer(&'a str),
}

struct Resolved<'a> {
    endpoint: &'a str,
    model: &'a str,
    auth: Auth<'a>,
}

impl LlmSettings {
    fn resolve(&self) -> Result<Resolved<'_>, LlmError> {
        let endpoint = non_empty(&self.api_endpoint).ok_or(LlmError::Configuration)?;
        let model = non_empty(&self.model_name).ok_or(LlmError::Configuration)?;

        let auth = if let Some(key) = non_empty(&self.api_key) {
            Auth::Bearer(key)
        } else {
            let username = non_empty(&self.username).ok_or(LlmError::Configuration)?;
            let password = non_empty(&self.password).ok_or(LlmError::Configuration)?;
            Auth::Basic { username, password }
        };

        Ok(Resolved {
            endpoint,
            model,
            auth,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
}

impl LlmClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(Self { http })
    }

    /// Send one chat-completion request and extract the assistant's reply.
    pub async fn call(&self, settings: &LlmSettings, prompt: &str) -> Result<String, LlmError> {
        let resolved = settings.resolve()?;
        let body = request_body(resolved.model, prompt, settings.flavor);

        let request = self.http.post(resolved.endpoint).json(&body);
        let request = match resolved.auth {
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
            Auth::Bearer(key) => request.bearer_auth(key),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("LLM API error {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await.map_err(|e| {
            error!("LLM response was not valid JSON: {e}");
            LlmError::Protocol
        })?;

        let reply = data
            .pointer(settings.flavor.reply_pointer())
            .and_then(Value::as_str)
            .ok_or(LlmError::Protocol)?;

        debug!("LLM reply received ({} chars)", reply.len());
        Ok(reply.to_string())
    }
}

fn request_body(model: &str, prompt: &str, flavor: ApiFlavor) -> Value {
    let messages = json!([
        { "role": "system", "content": SYSTEM_PROMPT },
        { "role": "user", "content": prompt }
    ]);

    match flavor {
        ApiFlavor::OpenAi => json!({
            "model": model,
            "messages": messages,
        }),
        ApiFlavor::DashScope => json!({
            "model": model,
            "input": { "messages": messages },
            "parameters": { "result_format": "message" },
        }),
    }
}

/// Seam between the orchestrator and the wire client, so runs can be
/// exercised without a live endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Production model: settings are re-read from the store on every call, so
/// configuration changes take effect without a restart.
pub struct StoredChatModel {
    client: LlmClient,
    store: Store,
}

impl StoredChatModel {
    pub fn new(client: LlmClient, store: Store) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl ChatModel for StoredChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let settings = self.store.llm_settings().await?;
        Ok(self.client.call(&settings, prompt).await?)
    }
}
