//! Wiring for the jobwatch job: builds the production clients from a loaded
//! [`JobwatchConfig`] and exposes the [`Watcher`] that runs one invocation.
pub mod message;
pub mod watcher;

use jobwatch_common::{JobwatchError, Result};
use jobwatch_config::JobwatchConfig;
use jobwatch_llm::build_client;
use jobwatch_notify::{Notifier, SnsPublisher};
use jobwatch_web::HttpPageFetcher;
use std::sync::Arc;

pub use watcher::{InvocationResponse, Watcher};

/// Build a [`Watcher`] backed by real HTTP, OpenAI and SNS clients.
pub async fn build_from_config(cfg: &JobwatchConfig) -> Result<Watcher> {
    let fetcher = HttpPageFetcher::new(cfg.http_timeout)
        .map_err(|e| JobwatchError::Fetch(format!("page fetcher init failed: {e}")))?;
    let llm = build_client(&cfg.openai, cfg.http_timeout)?;
    let publisher = SnsPublisher::from_env(cfg.sns_topic_arn.clone()).await;

    tracing::info!(
        sites = cfg.sites.len(),
        topic_arn = %cfg.sns_topic_arn,
        local = cfg.local_env,
        "watcher.ready"
    );

    Ok(Watcher::new(
        cfg,
        Arc::new(fetcher),
        llm,
        Notifier::new(Arc::new(publisher), cfg.local_env),
    ))
}
