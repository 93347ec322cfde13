use anyhow::{Context, Result};
use clap::Parser;
use jobwatch_app::build_from_config;
use jobwatch_common::InvocationContext;
use jobwatch_common::observability::{LogConfig, LogFormat, init_logging};
use jobwatch_config::JobwatchConfigLoader;
use serde_json::Value;
use std::path::PathBuf;

/// Check the watched career pages once and send the daily notification.
#[derive(Debug, Parser)]
#[command(name = "jobwatch", version, about)]
struct Cli {
    /// Optional YAML config file. Environment variables take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON event handed to the invocation (defaults to `{}`).
    #[arg(long)]
    event: Option<PathBuf>,

    /// Log the notification instead of publishing it.
    #[arg(long)]
    local: bool,

    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Also write logs to a daily rolling file in this directory.
    #[arg(long, env = "JOBWATCH_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        app_name: "jobwatch",
        log_dir: cli.log_dir.clone(),
        format: cli.log_format,
        ..LogConfig::default()
    })?;

    // Load config (env wins over the file)
    let mut loader = JobwatchConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut cfg = loader.load().context("failed to load configuration")?;
    if cli.local {
        cfg.local_env = true;
    }

    let event: Value = match &cli.event {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read event {}", path.display()))?;
            serde_json::from_str(&raw).context("event is not valid JSON")?
        }
        None => Value::Object(Default::default()),
    };

    let watcher = build_from_config(&cfg).await?;
    let response = watcher.handle(&event, &InvocationContext::new()).await?;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
