// src/store.rs
use crate::llm::{ApiFlavor, LlmSettings};
use crate::triage::Resume;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;
use std::path::Path;

/// Flat configuration keys recognized by the store.
pub mod keys {
    pub const API_ENDPOINT: &str = "api_endpoint";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const MODEL_NAME: &str = "model_name";
    pub const API_KEY: &str = "api_key";
    pub const API_FLAVOR: &str = "api_flavor";
    pub const SEARCH_URL: &str = "search_url";

    pub const ALL: &[&str] = &[
        API_ENDPOINT,
        USERNAME,
        PASSWORD,
        MODEL_NAME,
        API_KEY,
        API_FLAVOR,
        SEARCH_URL,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacancyStatus {
    Analyzed,
    Applied,
    Error,
}

impl VacancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzed => "analyzed",
            Self::Applied => "applied",
            Self::Error => "error",
        }
    }
}

/// Verdict persisted for a processed vacancy, keyed `vacancy_<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    pub status: VacancyStatus,
    pub timestamp: DateTime<Utc>,
}

/// Cached resume text, keyed `resume_<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeEntry {
    pub title: String,
    pub text: String,
}

/// Key-value persistence backed by SQLite. Last write wins.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn open(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        info!("Store opened: {}", database_url);
        Ok(store)
    }

    /// In-memory store, used by tests. Capped at one connection because
    /// every SQLite `:memory:` connection gets its own database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to run store migrations")?;

        Ok(())
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<Value>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(raw,)| {
            serde_json::from_str(&raw).with_context(|| format!("Corrupt value under key {key}"))
        })
        .transpose()
    }

    pub async fn set_raw(&self, key: &str, value: &Value) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_raw(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // Settings

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .get_raw(key)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.set_raw(key, &Value::String(value.to_string())).await
    }

    /// Assemble the LLM configuration from the flat settings keys.
    pub async fn llm_settings(&self) -> Result<LlmSettings> {
        let flavor = self
            .get_setting(keys::API_FLAVOR)
            .await?
            .as_deref()
            .and_then(ApiFlavor::parse)
            .unwrap_or_default();

        Ok(LlmSettings {
            api_endpoint: self.get_setting(keys::API_ENDPOINT).await?,
            username: self.get_setting(keys::USERNAME).await?,
            password: self.get_setting(keys::PASSWORD).await?,
            model_name: self.get_setting(keys::MODEL_NAME).await?,
            api_key: self.get_setting(keys::API_KEY).await?,
            flavor,
        })
    }

    // Resume cache

    pub async fn get_resume(&self, resume_id: &str) -> Result<Option<ResumeEntry>> {
        self.get_raw(&format!("resume_{resume_id}"))
            .await?
            .map(|v| {
                serde_json::from_value(v)
                    .with_context(|| format!("Corrupt resume entry for {resume_id}"))
            })
            .transpose()
    }

    pub async fn put_resume(&self, resume: &Resume) -> Result<()> {
        let entry = ResumeEntry {
            title: resume.title.clone(),
            text: resume.text.clone(),
        };
        self.set_raw(
            &format!("resume_{}", resume.id),
            &serde_json::to_value(&entry)?,
        )
        .await
    }

    // Vacancy verdicts

    pub async fn set_vacancy_score(
        &self,
        vacancy_id: &str,
        score: i64,
        status: VacancyStatus,
    ) -> Result<()> {
        let record = VacancyRecord {
            score: Some(score),
            status,
            timestamp: Utc::now(),
        };
        self.write_vacancy(vacancy_id, &record).await
    }

    /// Record a vacancy whose processing failed; no score is stored.
    pub async fn mark_vacancy_error(&self, vacancy_id: &str) -> Result<()> {
        let record = VacancyRecord {
            score: None,
            status: VacancyStatus::Error,
            timestamp: Utc::now(),
        };
        self.write_vacancy(vacancy_id, &record).await
    }

    pub async fn get_vacancy_status(&self, vacancy_id: &str) -> Result<Option<VacancyRecord>> {
        self.get_raw(&format!("vacancy_{vacancy_id}"))
            .await?
            .map(|v| {
                serde_json::from_value(v)
                    .with_context(|| format!("Corrupt vacancy record for {vacancy_id}"))
            })
            .transpose()
    }

    async fn write_vacancy(&self, vacancy_id: &str, record: &VacancyRecord) -> Result<()> {
        self.set_raw(
            &format!("vacancy_{vacancy_id}"),
            &serde_json::to_value(record)?,
        )
        .await
    }
}
