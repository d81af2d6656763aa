// src/config.rs
//! Unified configuration management for the triage service.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Upper bound on waiting for a background page to finish loading.
    pub page_load_timeout_secs: u64,
    pub llm_timeout_secs: u64,
}

impl ConfigManager {
    /// Load all configurations from the environment.
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let service = Self::load_service()?;

        Ok(Self {
            environment,
            service,
        })
    }

    fn load_environment() -> Result<EnvironmentConfig> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Ok(EnvironmentConfig {
            database_path: base_dir.join("data").join("hh_triage.db"),
        })
    }

    fn load_service() -> Result<ServiceConfig> {
        let port = match std::env::var("HH_TRIAGE_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("HH_TRIAGE_PORT must be a valid port number")?,
            Err(_) => 8900,
        };

        Ok(ServiceConfig {
            port,
            page_load_timeout_secs: env_u64("PAGE_LOAD_TIMEOUT_SECS", 30)?,
            llm_timeout_secs: env_u64("LLM_TIMEOUT_SECS", 120)?,
        })
    }

    /// Ensure all required directories exist.
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(db_parent) = self.environment.database_path.parent() {
            tokio::fs::create_dir_all(db_parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", db_parent.display()))?;
        }
        Ok(())
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{name} must be a number of seconds")),
        Err(_) => Ok(default),
    }
}
