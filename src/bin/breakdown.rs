//! Generates subtask breakdowns from the command line.
//!
//! Usage:
//!
//! ```text
//! breakdown text <title> [description]
//! breakdown task <task-id>
//! breakdown verify
//! ```
//!
//! `text` prints the generated candidates without storing anything. `task`
//! loads a stored task from `DATABASE_URL`, generates a breakdown for it,
//! appends the result as subtasks, and prints the persisted subtasks.
//! `verify` sends a short prompt to confirm the provider credential.
//!
//! Provider settings are read from `GEMINI_API_KEY`, `GEMINI_MODEL`,
//! `GEMINI_API_BASE`, and `GEMINI_TIMEOUT_SECS`. Log verbosity follows
//! `RUST_LOG`.

use mockable::DefaultClock;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use taskbreak::breakdown::{
    adapters::GeminiProvider,
    domain::{BreakdownError, BreakdownRequest},
    ports::ProviderError,
    services::BreakdownService,
};
use taskbreak::config::{AppConfig, ConfigError};
use taskbreak::task::{
    adapters::postgres::{PostgresTaskRepository, build_pool},
    domain::TaskId,
    ports::TaskRepositoryError,
    services::{TaskService, TaskServiceError},
};
use taskbreak::telemetry::init_tracing;
use thiserror::Error;
use tokio::runtime::Builder;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provider setup failed: {0}")]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Breakdown(#[from] BreakdownError),
    #[error(transparent)]
    Task(#[from] TaskServiceError),
    #[error("database setup failed: {0}")]
    Database(#[from] TaskRepositoryError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Text {
        title: String,
        description: String,
    },
    Task(TaskId),
    Verify,
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, CliError> {
        let _program = args.next();
        let operation = args
            .next()
            .ok_or_else(|| CliError::InvalidArgs("missing command argument".into()))?;
        let command = match operation.as_str() {
            "text" => {
                let title = args
                    .next()
                    .ok_or_else(|| CliError::InvalidArgs("missing title argument".into()))?;
                let description = args.next().unwrap_or_default();
                Self::Text { title, description }
            }
            "task" => {
                let raw = args
                    .next()
                    .ok_or_else(|| CliError::InvalidArgs("missing task id argument".into()))?;
                let uuid = Uuid::parse_str(&raw)
                    .map_err(|err| CliError::InvalidArgs(format!("invalid task id '{raw}': {err}")))?;
                Self::Task(TaskId::from_uuid(uuid))
            }
            "verify" => Self::Verify,
            other => {
                return Err(CliError::InvalidArgs(format!(
                    "unknown command '{other}'; expected text, task, or verify"
                )));
            }
        };
        if let Some(extra) = args.next() {
            return Err(CliError::InvalidArgs(format!(
                "unexpected extra argument: {extra}"
            )));
        }
        Ok(command)
    }
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let command = Command::parse(env::args())?;
    let config = AppConfig::from_env()?;
    run(command, &config).map_err(Into::into)
}

fn run(command: Command, config: &AppConfig) -> Result<(), CliError> {
    let provider = GeminiProvider::new(config.provider())?;
    let generator = BreakdownService::new(Arc::new(provider));
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;

    runtime.block_on(async {
        match command {
            Command::Text { title, description } => {
                let request = BreakdownRequest::new(title, description)?;
                let candidates = generator.generate(&request).await?;
                print_json(&candidates)
            }
            Command::Task(task_id) => {
                let database = config.require_database()?;
                let pool = build_pool(database.url(), database.pool_size())?;
                let service = TaskService::new(
                    Arc::new(PostgresTaskRepository::new(pool)),
                    Arc::new(DefaultClock),
                );
                let subtasks = service.generate_breakdown(task_id, &generator).await?;
                print_json(&subtasks)
            }
            Command::Verify => {
                generator.verify_provider().await?;
                writeln!(io::stdout().lock(), "provider ok").map_err(CliError::Output)
            }
        }
    })
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(value)?;
    writeln!(io::stdout().lock(), "{encoded}").map_err(CliError::Output)
}
