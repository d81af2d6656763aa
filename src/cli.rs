// src/cli.rs
use crate::config::ConfigManager;
use crate::llm::{LlmClient, StoredChatModel};
use crate::store::{keys, Store};
use crate::triage::{HttpPageHost, Orchestrator, PageHost, StoredPageHost};
use crate::web::start_web_server;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "hh-triage")]
#[command(about = "Score hh.ru vacancies against a resume and draft cover letters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the control API server
    Serve {
        /// Port to listen on; overrides HH_TRIAGE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one scoring pass and exit
    Run {
        /// Vacancy search URL carrying a ?resume=<id> query parameter
        #[arg(long)]
        search_url: String,
    },
    /// Read or write stored settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Show the stored verdict for a vacancy
    Vacancy { vacancy_id: String },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Store a setting value
    Set { key: String, value: String },
    /// Print a single setting
    Get { key: String },
    /// Remove a stored setting
    Unset { key: String },
    /// Print all settings, with secrets masked
    List,
}

pub async fn handle_command(cli: Cli, config: &ConfigManager) -> Result<()> {
    let store = Store::open(&config.environment.database_path).await?;

    match cli.command {
        Command::Serve { port } => {
            let orchestrator = build_orchestrator(&store, config, None)?;
            let port = port.unwrap_or(config.service.port);
            start_web_server(orchestrator, port).await
        }

        Command::Run { search_url } => {
            let orchestrator = build_orchestrator(&store, config, Some(search_url))?;
            let status = orchestrator.run_to_completion().await;
            info!("Final status: {status}");
            if let Some(message) = status.strip_prefix("Error: ") {
                bail!("{message}");
            }
            Ok(())
        }

        Command::Settings { command } => handle_settings_command(&store, command).await,

        Command::Vacancy { vacancy_id } => {
            match store.get_vacancy_status(&vacancy_id).await? {
                Some(record) => {
                    let score = record
                        .score
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "vacancy {vacancy_id}: score {score}, status {}, at {}",
                        record.status.as_str(),
                        record.timestamp.to_rfc3339(),
                    );
                }
                None => println!("No record for vacancy {vacancy_id}."),
            }
            Ok(())
        }
    }
}

async fn handle_settings_command(store: &Store, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Set { key, value } => {
            validate_key(&key)?;
            store.set_setting(&key, &value).await?;
            info!("Setting {key} updated.");
            Ok(())
        }

        SettingsCommand::Get { key } => {
            validate_key(&key)?;
            match store.get_setting(&key).await? {
                Some(value) => println!("{value}"),
                None => println!("(unset)"),
            }
            Ok(())
        }

        SettingsCommand::Unset { key } => {
            validate_key(&key)?;
            if store.delete_raw(&key).await? {
                info!("Setting {key} removed.");
            } else {
                info!("Setting {key} was not set.");
            }
            Ok(())
        }

        SettingsCommand::List => {
            for key in keys::ALL {
                let value = store.get_setting(key).await?;
                let shown = match value {
                    Some(_) if is_secret(key) => "********".to_string(),
                    Some(value) => value,
                    None => "(unset)".to_string(),
                };
                println!("{key} = {shown}");
            }
            Ok(())
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if !keys::ALL.contains(&key) {
        bail!("Unknown setting {key:?}. Known settings: {}", keys::ALL.join(", "));
    }
    Ok(())
}

fn is_secret(key: &str) -> bool {
    key == keys::PASSWORD || key == keys::API_KEY
}

fn build_orchestrator(
    store: &Store,
    config: &ConfigManager,
    search_url: Option<String>,
) -> Result<Orchestrator> {
    let llm = LlmClient::new(Duration::from_secs(config.service.llm_timeout_secs))?;
    let model = Arc::new(StoredChatModel::new(llm, store.clone()));

    let load_timeout = Duration::from_secs(config.service.page_load_timeout_secs);
    let host: Arc<dyn PageHost> = match search_url {
        Some(url) => Arc::new(HttpPageHost::new(Some(url), load_timeout)?),
        None => Arc::new(StoredPageHost::new(
            HttpPageHost::new(None, load_timeout)?,
            store.clone(),
        )),
    };

    Ok(Orchestrator::new(store.clone(), model, host))
}
