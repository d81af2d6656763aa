// src/triage/page.rs
//! Browsing-context abstraction: the orchestrator opens pages, sends them
//! extraction requests, and closes them. The production host fetches over
//! HTTP; tests substitute scripted hosts.

use super::{extract, Resume};
use crate::store::{keys, Store};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Failed to open {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to read the configured search page: {0}")]
    Settings(String),

    #[error("Timed out loading {url} after {seconds}s")]
    LoadTimeout { url: String, seconds: u64 },

    #[error("HTTP error {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("{0}")]
    Extraction(String),
}

/// Messages the orchestrator sends to a loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRequest {
    ResumeDetails,
    Vacancies,
    VacancyContent,
}

#[derive(Debug, Clone)]
pub enum ExtractResponse {
    ResumeDetails(Resume),
    Vacancies(Vec<String>),
    VacancyContent(String),
}

/// A loaded page. `close` must be called on every exit path; hosts may
/// track it to detect leaked contexts.
#[async_trait]
pub trait Page: Send + Sync {
    fn url(&self) -> &str;

    async fn extract(&self, request: ExtractRequest) -> Result<ExtractResponse, PageError>;

    async fn close(self: Box<Self>);
}

#[async_trait]
pub trait PageHost: Send + Sync {
    /// The page the operator pointed the run at, if one is configured.
    async fn active_page(&self) -> Result<Option<Box<dyn Page>>, PageError>;

    /// Open a background page and wait for it to finish loading.
    async fn open(&self, url: &str) -> Result<Box<dyn Page>, PageError>;
}

/// Production host: pages are plain HTTP fetches with a finite load timeout.
pub struct HttpPageHost {
    client: Client,
    search_url: Option<String>,
    load_timeout: Duration,
}

impl HttpPageHost {
    pub fn new(search_url: Option<String>, load_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/120.0.0.0 Safari/537.36",
            )
            .build()?;

        Ok(Self {
            client,
            search_url,
            load_timeout,
        })
    }

    async fn fetch(&self, url: &str) -> Result<String, PageError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PageError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| PageError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PageHost for HttpPageHost {
    async fn active_page(&self) -> Result<Option<Box<dyn Page>>, PageError> {
        match &self.search_url {
            Some(url) => {
                let url = url.clone();
                Ok(Some(self.open(&url).await?))
            }
            None => Ok(None),
        }
    }

    async fn open(&self, url: &str) -> Result<Box<dyn Page>, PageError> {
        info!("Opening page: {}", url);

        let html = tokio::time::timeout(self.load_timeout, self.fetch(url))
            .await
            .map_err(|_| PageError::LoadTimeout {
                url: url.to_string(),
                seconds: self.load_timeout.as_secs(),
            })??;

        Ok(Box::new(HttpPage {
            url: url.to_string(),
            html,
        }))
    }
}

/// Host for server mode: the search page URL lives in the settings store,
/// so the operator can point a running server at a new search without a
/// restart.
pub struct StoredPageHost {
    inner: HttpPageHost,
    store: Store,
}

impl StoredPageHost {
    pub fn new(inner: HttpPageHost, store: Store) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl PageHost for StoredPageHost {
    async fn active_page(&self) -> Result<Option<Box<dyn Page>>, PageError> {
        let url = self
            .store
            .get_setting(keys::SEARCH_URL)
            .await
            .map_err(|e| PageError::Settings(e.to_string()))?;

        match url.filter(|u| !u.is_empty()) {
            Some(url) => Ok(Some(self.inner.open(&url).await?)),
            None => Ok(None),
        }
    }

    async fn open(&self, url: &str) -> Result<Box<dyn Page>, PageError> {
        self.inner.open(url).await
    }
}

struct HttpPage {
    url: String,
    html: String,
}

#[async_trait]
impl Page for HttpPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn extract(&self, request: ExtractRequest) -> Result<ExtractResponse, PageError> {
        match request {
            ExtractRequest::ResumeDetails => {
                extract::resume_details(&self.html, &self.url).map(ExtractResponse::ResumeDetails)
            }
            ExtractRequest::Vacancies => {
                extract::vacancy_links(&self.html).map(ExtractResponse::Vacancies)
            }
            ExtractRequest::VacancyContent => {
                extract::vacancy_description(&self.html).map(ExtractResponse::VacancyContent)
            }
        }
    }

    async fn close(self: Box<Self>) {
        // Dropping the fetched document is all the cleanup an HTTP page needs.
        debug!("Closing page: {}", self.url);
    }
}
