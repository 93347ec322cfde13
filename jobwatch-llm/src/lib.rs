//! Provider-agnostic LLM integration for jobwatch.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, an OpenAI
//! chat-completions implementation and the quote-of-the-day prompt used in
//! "no update" notifications. [`build_client`] turns the loaded
//! [`OpenAiSettings`] into a ready client.
//!
//! # Examples
//! ```no_run
//! use jobwatch_config::JobwatchConfigLoader;
//! use jobwatch_llm::{build_client, quote::quote_of_the_day};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let cfg = JobwatchConfigLoader::new().load()?;
//! let client = build_client(&cfg.openai, cfg.http_timeout)?;
//! let quote = quote_of_the_day(client.as_ref(), &cfg.search_terms).await?;
//! println!("{quote}");
//! # Ok(())
//! # }
//! ```
pub mod openai;
pub mod quote;
pub mod traits;

use jobwatch_config::OpenAiSettings;
use openai::OpenAiClient;
use std::sync::Arc;
use std::time::Duration;
use traits::LlmClient;

pub use jobwatch_config::DEFAULT_OPENAI_MODEL;

/// Build the generation client described by `settings`.
pub fn build_client(
    settings: &OpenAiSettings,
    timeout: Option<Duration>,
) -> jobwatch_common::Result<Arc<dyn LlmClient + Send + Sync + 'static>> {
    let client = OpenAiClient::with_base_url(
        settings.api_key.clone(),
        settings.model.clone(),
        &settings.base_url,
    )?
    .with_timeout(timeout);
    tracing::debug!(model = %settings.model, base_url = %settings.base_url, "llm.client.ready");
    Ok(Arc::new(client))
}
