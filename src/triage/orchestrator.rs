// src/triage/orchestrator.rs
//! The orchestration state machine: resolve the resume, enumerate vacancy
//! links from the active search page, then score each vacancy in turn.
//!
//! Vacancies are processed strictly sequentially. Opening contexts in
//! parallel would flood the target site, and the local inference endpoint
//! handles one completion at a time anyway.

use super::extract;
use super::page::{ExtractRequest, ExtractResponse, Page, PageHost};
use super::prompts;
use super::Resume;
use crate::llm::ChatModel;
use crate::store::{Store, VacancyStatus};
use anyhow::{anyhow, bail, Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use url::Url;

/// Scores at or above this draft a cover letter.
pub const SCORE_THRESHOLD: i64 = 4;

const RESUME_URL_BASE: &str = "https://hh.ru/resume/";
const SEARCH_URL_MARKER: &str = "hh.ru/search/vacancy";

/// Shared run state: the cancellation flag and the status line shown to
/// the control surface. All mutation happens on the orchestrator's task;
/// the control surface only reads, so the two fields need no joint lock.
#[derive(Debug)]
pub struct RunState {
    running: AtomicBool,
    status: Mutex<String>,
}

impl RunState {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            status: Mutex::new("Stopped".to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> String {
        self.status
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_status(&self, status: impl Into<String>) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status.into();
    }

    /// Flip to running; fails when a run is already active.
    fn try_begin(&self) -> bool {
        let begun = self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if begun {
            self.set_status("Running");
        }
        begun
    }

    /// Cooperative stop: the in-flight iteration still runs to completion.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.set_status("Stopped");
    }

    fn finish(&self, status: impl Into<String>) {
        self.set_status(status);
        self.running.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    state: Arc<RunState>,
    store: Store,
    model: Arc<dyn ChatModel>,
    host: Arc<dyn PageHost>,
}

impl Orchestrator {
    pub fn new(store: Store, model: Arc<dyn ChatModel>, host: Arc<dyn PageHost>) -> Self {
        Self {
            state: Arc::new(RunState::new()),
            store,
            model,
            host,
        }
    }

    pub fn state(&self) -> Arc<RunState> {
        Arc::clone(&self.state)
    }

    pub fn status(&self) -> String {
        self.state.status()
    }

    /// Idempotent; callable in any state.
    pub fn stop(&self) -> String {
        self.state.request_stop();
        info!("Stop requested.");
        self.state.status()
    }

    /// Begin a run in the background and report the status immediately.
    /// A second start while a run is active is rejected; the active run
    /// and its status are untouched.
    pub async fn start(&self) -> String {
        match self.begin().await {
            Ok(page) => {
                let this = self.clone();
                tokio::spawn(async move { this.run(page).await });
                self.state.status()
            }
            Err(response) => response,
        }
    }

    /// Begin a run and wait for it to finish. Used by the CLI.
    pub async fn run_to_completion(&self) -> String {
        match self.begin().await {
            Ok(page) => {
                self.run(page).await;
                self.state.status()
            }
            Err(response) => response,
        }
    }

    async fn begin(&self) -> Result<Box<dyn Page>, String> {
        if !self.state.try_begin() {
            warn!("Start rejected: a run is already in progress.");
            return Err("Error: A run is already in progress.".to_string());
        }

        info!("Starting the vacancy scoring run.");
        match self.host.active_page().await {
            Ok(Some(page)) => Ok(page),
            Ok(None) => {
                let status = "Error: No active search page.".to_string();
                self.state.finish(status.clone());
                Err(status)
            }
            Err(e) => {
                let status = format!("Error: {e}");
                self.state.finish(status.clone());
                Err(status)
            }
        }
    }

    async fn run(&self, page: Box<dyn Page>) {
        match self.drive(&*page).await {
            Ok(()) => {
                // A cleared flag means the run was stopped, not finished.
                if self.state.is_running() {
                    self.state.finish("Finished");
                    info!("Run finished.");
                } else {
                    info!("Run stopped before completion.");
                }
            }
            Err(e) => {
                error!("Run failed: {e:#}");
                self.state.finish(format!("Error: {e}"));
            }
        }
    }

    async fn drive(&self, page: &dyn Page) -> Result<()> {
        let resume_id = resume_id_from_query(page.url())?;
        let resume_text = self.resolve_resume(&resume_id).await?;

        let vacancies = self.enumerate_vacancies(page).await?;
        info!("Found {} vacancies.", vacancies.len());
        self.state
            .set_status(format!("Found {} vacancies. Processing...", vacancies.len()));

        for vacancy_url in &vacancies {
            if !self.state.is_running() {
                debug!("Cancellation observed; no further vacancies will be opened.");
                break;
            }

            if let Err(e) = self.process_vacancy(vacancy_url, &resume_text).await {
                warn!("Skipping vacancy {vacancy_url}: {e:#}");
                if let Some(id) = extract::vacancy_id(vacancy_url) {
                    if let Err(e) = self.store.mark_vacancy_error(&id).await {
                        warn!("Failed to record vacancy error for {id}: {e:#}");
                    }
                }
            }
        }

        Ok(())
    }

    /// Fetch the resume text, populating the cache on a miss. The
    /// temporary page is closed whether extraction succeeds or fails.
    async fn resolve_resume(&self, resume_id: &str) -> Result<String> {
        if let Some(entry) = self.store.get_resume(resume_id).await? {
            debug!("Resume {resume_id} found in the cache.");
            return Ok(entry.text);
        }

        info!("Resume {resume_id} not cached. Fetching...");
        self.state.set_status(format!("Fetching resume {resume_id}..."));

        let url = format!("{RESUME_URL_BASE}{resume_id}");
        let page = self.host.open(&url).await?;
        let outcome = page.extract(ExtractRequest::ResumeDetails).await;
        page.close().await;

        let details = match outcome? {
            ExtractResponse::ResumeDetails(details) => details,
            other => bail!("Unexpected extraction response: {other:?}"),
        };

        self.store.put_resume(&details).await?;
        info!("Resume {} fetched and cached.", details.id);
        Ok(details.text)
    }

    async fn enumerate_vacancies(&self, page: &dyn Page) -> Result<Vec<String>> {
        if !page.url().contains(SEARCH_URL_MARKER) {
            bail!("This is not a vacancy search page.");
        }

        match page.extract(ExtractRequest::Vacancies).await? {
            ExtractResponse::Vacancies(urls) => Ok(urls),
            other => bail!("Unexpected extraction response: {other:?}"),
        }
    }

    async fn process_vacancy(&self, vacancy_url: &str, resume_text: &str) -> Result<()> {
        let page = self.host.open(vacancy_url).await?;
        let outcome = page.extract(ExtractRequest::VacancyContent).await;
        page.close().await;

        let vacancy_text = match outcome? {
            ExtractResponse::VacancyContent(text) => text,
            other => bail!("Unexpected extraction response: {other:?}"),
        };

        if vacancy_text.trim().is_empty() {
            debug!("Vacancy {vacancy_url} has no description text; skipping.");
            return Ok(());
        }

        let reply = self
            .model
            .complete(&prompts::score_prompt(resume_text, &vacancy_text))
            .await?;
        let score = prompts::parse_score(&reply)?;
        info!("Vacancy {vacancy_url} scored {score}.");

        if let Some(id) = extract::vacancy_id(vacancy_url) {
            self.store
                .set_vacancy_score(&id, score, VacancyStatus::Analyzed)
                .await?;
        }

        if score >= SCORE_THRESHOLD {
            let letter = self
                .model
                .complete(&prompts::cover_letter_prompt(resume_text, &vacancy_text))
                .await?;
            info!("Generated cover letter for {vacancy_url}:\n{letter}");
            // TODO: submit the application with the generated letter.
        }

        Ok(())
    }

    /// Write a resume into the cache on the caller's behalf.
    pub async fn save_resume(&self, resume: Resume) -> String {
        self.state.set_status("Saving resume...");
        match self.persist_resume(resume).await {
            Ok(title) => self.state.set_status(format!("Resume \"{title}\" saved.")),
            Err(e) => {
                error!("Failed to save resume: {e:#}");
                self.state.set_status(format!("Error: {e}"));
            }
        }
        self.state.status()
    }

    async fn persist_resume(&self, resume: Resume) -> Result<String> {
        if resume.id.trim().is_empty() {
            bail!("Invalid resume data provided.");
        }
        self.store.put_resume(&resume).await?;
        info!("Resume {} saved.", resume.id);
        Ok(resume.title)
    }
}

/// The resume to score against is a required query parameter of the
/// active search page.
fn resume_id_from_query(page_url: &str) -> Result<String> {
    let url = Url::parse(page_url).with_context(|| format!("Invalid page URL: {page_url}"))?;
    url.query_pairs()
        .find(|(key, _)| key == "resume")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("No resume ID found in the URL (e.g., ?resume=RESUME_ID)."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatModel;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex as StdMutex;

    const SEARCH_URL: &str = "https://hh.ru/search/vacancy?text=rust&resume=abc123";
    const RESUME_URL: &str = "https://hh.ru/resume/abc123";

    #[derive(Clone)]
    enum Scripted {
        Resume(Resume),
        Vacancies(Vec<String>),
        Content(String),
        Fails(String),
    }

    #[derive(Default)]
    struct HostLog {
        opened: Vec<String>,
        closed: Vec<String>,
    }

    struct FakeHost {
        pages: HashMap<String, Scripted>,
        active: Option<String>,
        log: Arc<StdMutex<HostLog>>,
    }

    impl FakeHost {
        fn new(active: Option<&str>, pages: Vec<(&str, Scripted)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, script)| (url.to_string(), script))
                    .collect(),
                active: active.map(str::to_string),
                log: Arc::new(StdMutex::new(HostLog::default())),
            }
        }

        fn page(&self, url: &str, record_close: bool) -> Option<Box<dyn Page>> {
            self.pages.get(url).map(|script| {
                Box::new(FakePage {
                    url: url.to_string(),
                    script: script.clone(),
                    log: Arc::clone(&self.log),
                    record_close,
                }) as Box<dyn Page>
            })
        }

        fn opened(&self) -> Vec<String> {
            self.log.lock().unwrap().opened.clone()
        }

        fn closed(&self) -> Vec<String> {
            self.log.lock().unwrap().closed.clone()
        }
    }

    #[async_trait]
    impl PageHost for FakeHost {
        async fn active_page(&self) -> Result<Option<Box<dyn Page>>, super::super::PageError> {
            Ok(self.active.as_deref().and_then(|url| self.page(url, false)))
        }

        async fn open(&self, url: &str) -> Result<Box<dyn Page>, super::super::PageError> {
            self.log.lock().unwrap().opened.push(url.to_string());
            self.page(url, true).ok_or_else(|| {
                super::super::PageError::Navigation {
                    url: url.to_string(),
                    message: "no such page".to_string(),
                }
            })
        }
    }

    struct FakePage {
        url: String,
        script: Scripted,
        log: Arc<StdMutex<HostLog>>,
        record_close: bool,
    }

    #[async_trait]
    impl Page for FakePage {
        fn url(&self) -> &str {
            &self.url
        }

        async fn extract(
            &self,
            request: ExtractRequest,
        ) -> Result<ExtractResponse, super::super::PageError> {
            match (&self.script, request) {
                (Scripted::Fails(message), _) => {
                    Err(super::super::PageError::Extraction(message.clone()))
                }
                (Scripted::Resume(resume), ExtractRequest::ResumeDetails) => {
                    Ok(ExtractResponse::ResumeDetails(resume.clone()))
                }
                (Scripted::Vacancies(urls), ExtractRequest::Vacancies) => {
                    Ok(ExtractResponse::Vacancies(urls.clone()))
                }
                (Scripted::Content(text), ExtractRequest::VacancyContent) => {
                    Ok(ExtractResponse::VacancyContent(text.clone()))
                }
                _ => Err(super::super::PageError::Extraction(
                    "request not scripted for this page".to_string(),
                )),
            }
        }

        async fn close(self: Box<Self>) {
            if self.record_close {
                self.log.lock().unwrap().closed.push(self.url.clone());
            }
        }
    }

    #[derive(Default)]
    struct FakeModel {
        replies: StdMutex<VecDeque<String>>,
        prompts: StdMutex<Vec<String>>,
        stop_on_call: Option<Arc<RunState>>,
    }

    impl FakeModel {
        fn with_replies(replies: &[&str]) -> Self {
            Self {
                replies: StdMutex::new(replies.iter().map(|s| s.to_string()).collect()),
                ..Default::default()
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for FakeModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(state) = &self.stop_on_call {
                state.request_stop();
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow!("no scripted reply left"))
        }
    }

    fn test_resume() -> Resume {
        Resume {
            id: "abc123".to_string(),
            title: "Rust Engineer".to_string(),
            text: "### Навыки\nRust\n\n".to_string(),
        }
    }

    async fn cached_store() -> Store {
        let store = Store::open_in_memory().await.unwrap();
        store.put_resume(&test_resume()).await.unwrap();
        store
    }

    fn orchestrator(store: Store, model: FakeModel, host: FakeHost) -> (Orchestrator, Arc<FakeHost>) {
        let host = Arc::new(host);
        let orch = Orchestrator::new(store, Arc::new(model), Arc::clone(&host) as Arc<dyn PageHost>);
        (orch, host)
    }

    #[tokio::test]
    async fn start_without_active_page_reports_error_status() {
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(store, FakeModel::default(), FakeHost::new(None, vec![]));

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Error: No active search page.");
        assert!(!orch.state().is_running());
    }

    #[tokio::test]
    async fn missing_resume_query_parameter_is_fatal() {
        let url = "https://hh.ru/search/vacancy?text=rust";
        let host = FakeHost::new(Some(url), vec![(url, Scripted::Vacancies(vec![]))]);
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(store, FakeModel::default(), host);

        let status = orch.run_to_completion().await;
        assert_eq!(
            status,
            "Error: No resume ID found in the URL (e.g., ?resume=RESUME_ID)."
        );
    }

    #[tokio::test]
    async fn cache_miss_opens_one_resume_page_and_closes_it() {
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (SEARCH_URL, Scripted::Vacancies(vec![])),
                (RESUME_URL, Scripted::Resume(test_resume())),
            ],
        );
        let store = Store::open_in_memory().await.unwrap();
        let (orch, host) = orchestrator(store.clone(), FakeModel::default(), host);

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Finished");
        assert_eq!(host.opened(), vec![RESUME_URL.to_string()]);
        assert_eq!(host.closed(), vec![RESUME_URL.to_string()]);
        assert!(store.get_resume("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cached_resume_skips_the_fetch() {
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![(SEARCH_URL, Scripted::Vacancies(vec![]))],
        );
        let (orch, host) = orchestrator(cached_store().await, FakeModel::default(), host);

        assert_eq!(orch.run_to_completion().await, "Finished");
        assert!(host.opened().is_empty());
    }

    #[tokio::test]
    async fn resume_extraction_failure_is_fatal_and_still_closes_the_page() {
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (SEARCH_URL, Scripted::Vacancies(vec![])),
                (
                    RESUME_URL,
                    Scripted::Fails("Could not find resume text on the page.".to_string()),
                ),
            ],
        );
        let store = Store::open_in_memory().await.unwrap();
        let (orch, host) = orchestrator(store, FakeModel::default(), host);

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Error: Could not find resume text on the page.");
        assert_eq!(host.closed(), vec![RESUME_URL.to_string()]);
    }

    #[tokio::test]
    async fn non_search_page_is_fatal() {
        let url = "https://hh.ru/article/careers?resume=abc123";
        let host = FakeHost::new(Some(url), vec![(url, Scripted::Vacancies(vec![]))]);
        let (orch, _) = orchestrator(cached_store().await, FakeModel::default(), host);

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Error: This is not a vacancy search page.");
    }

    #[tokio::test]
    async fn per_vacancy_failure_skips_and_continues() {
        let v1 = "https://hh.ru/vacancy/111";
        let v2 = "https://hh.ru/vacancy/222";
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (
                    SEARCH_URL,
                    Scripted::Vacancies(vec![v1.to_string(), v2.to_string()]),
                ),
                (v1, Scripted::Fails("page structure changed".to_string())),
                (v2, Scripted::Content("Rust developer wanted".to_string())),
            ],
        );
        let store = cached_store().await;
        let (orch, host) = orchestrator(store.clone(), FakeModel::with_replies(&["3"]), host);

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Finished");
        assert_eq!(host.opened(), vec![v1.to_string(), v2.to_string()]);
        assert_eq!(host.closed(), vec![v1.to_string(), v2.to_string()]);

        let failed = store.get_vacancy_status("111").await.unwrap().unwrap();
        assert_eq!(failed.status, VacancyStatus::Error);
        assert_eq!(failed.score, None);

        let scored = store.get_vacancy_status("222").await.unwrap().unwrap();
        assert_eq!(scored.status, VacancyStatus::Analyzed);
        assert_eq!(scored.score, Some(3));
    }

    #[tokio::test]
    async fn empty_vacancy_text_skips_scoring() {
        let v1 = "https://hh.ru/vacancy/111";
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (SEARCH_URL, Scripted::Vacancies(vec![v1.to_string()])),
                (v1, Scripted::Content("   ".to_string())),
            ],
        );
        let store = cached_store().await;
        let model = FakeModel::with_replies(&["5"]);
        let orch = Orchestrator::new(
            store.clone(),
            Arc::new(model),
            Arc::new(host) as Arc<dyn PageHost>,
        );

        assert_eq!(orch.run_to_completion().await, "Finished");
        assert!(store.get_vacancy_status("111").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn high_score_drafts_a_cover_letter() {
        let v1 = "https://hh.ru/vacancy/111";
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (SEARCH_URL, Scripted::Vacancies(vec![v1.to_string()])),
                (v1, Scripted::Content("Rust developer wanted".to_string())),
            ],
        );
        let store = cached_store().await;
        let model = Arc::new(FakeModel::with_replies(&["5", "Dear hiring manager..."]));
        let orch = Orchestrator::new(
            store.clone(),
            Arc::clone(&model) as Arc<dyn ChatModel>,
            Arc::new(host) as Arc<dyn PageHost>,
        );

        assert_eq!(orch.run_to_completion().await, "Finished");

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("### Оценка:"));
        assert!(prompts[1].contains("### Сопроводительное письмо:"));
        assert_eq!(
            store.get_vacancy_status("111").await.unwrap().unwrap().score,
            Some(5)
        );
    }

    #[tokio::test]
    async fn low_score_skips_the_cover_letter() {
        let v1 = "https://hh.ru/vacancy/111";
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (SEARCH_URL, Scripted::Vacancies(vec![v1.to_string()])),
                (v1, Scripted::Content("COBOL maintainer wanted".to_string())),
            ],
        );
        let model = Arc::new(FakeModel::with_replies(&["2"]));
        let orch = Orchestrator::new(
            cached_store().await,
            Arc::clone(&model) as Arc<dyn ChatModel>,
            Arc::new(host) as Arc<dyn PageHost>,
        );

        assert_eq!(orch.run_to_completion().await, "Finished");
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn stop_between_iterations_prevents_further_contexts() {
        let v1 = "https://hh.ru/vacancy/111";
        let v2 = "https://hh.ru/vacancy/222";
        let v3 = "https://hh.ru/vacancy/333";
        let host = FakeHost::new(
            Some(SEARCH_URL),
            vec![
                (
                    SEARCH_URL,
                    Scripted::Vacancies(vec![v1.to_string(), v2.to_string(), v3.to_string()]),
                ),
                (v1, Scripted::Content("first".to_string())),
                (v2, Scripted::Content("second".to_string())),
                (v3, Scripted::Content("third".to_string())),
            ],
        );
        let store = cached_store().await;

        // The model requests a stop while scoring the first vacancy; the
        // loop must observe it before opening the second.
        let host = Arc::new(host);
        let mut orch = Orchestrator::new(
            store.clone(),
            Arc::new(FakeModel::default()),
            Arc::clone(&host) as Arc<dyn PageHost>,
        );
        orch.model = Arc::new(FakeModel {
            replies: StdMutex::new(VecDeque::from(["3".to_string()])),
            prompts: StdMutex::new(Vec::new()),
            stop_on_call: Some(orch.state()),
        });

        let status = orch.run_to_completion().await;
        assert_eq!(status, "Stopped");
        assert_eq!(host.opened(), vec![v1.to_string()]);
        assert_eq!(host.closed(), vec![v1.to_string()]);
    }

    #[tokio::test]
    async fn second_start_is_rejected_while_running() {
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(store, FakeModel::default(), FakeHost::new(None, vec![]));

        assert!(orch.state().try_begin());
        let response = orch.start().await;
        assert_eq!(response, "Error: A run is already in progress.");
        assert_eq!(orch.status(), "Running");
        assert!(orch.state().is_running());
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(store, FakeModel::default(), FakeHost::new(None, vec![]));

        assert_eq!(orch.stop(), "Stopped");
        assert_eq!(orch.stop(), "Stopped");
    }

    #[tokio::test]
    async fn save_resume_populates_the_cache() {
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(
            store.clone(),
            FakeModel::default(),
            FakeHost::new(None, vec![]),
        );

        let status = orch.save_resume(test_resume()).await;
        assert_eq!(status, "Resume \"Rust Engineer\" saved.");
        assert!(store.get_resume("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_resume_rejects_blank_id() {
        let store = Store::open_in_memory().await.unwrap();
        let (orch, _) = orchestrator(store, FakeModel::default(), FakeHost::new(None, vec![]));

        let status = orch
            .save_resume(Resume {
                id: "  ".to_string(),
                title: "x".to_string(),
                text: "y".to_string(),
            })
            .await;
        assert_eq!(status, "Error: Invalid resume data provided.");
    }

    #[test]
    fn resume_id_comes_from_the_query_string() {
        assert_eq!(
            resume_id_from_query("https://hh.ru/search/vacancy?text=rust&resume=abc").unwrap(),
            "abc"
        );
        assert!(resume_id_from_query("https://hh.ru/search/vacancy").is_err());
        assert!(resume_id_from_query("https://hh.ru/search/vacancy?resume=").is_err());
        assert!(resume_id_from_query("not a url").is_err());
    }
}
