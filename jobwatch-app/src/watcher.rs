use crate::message;
use jobwatch_common::{InvocationContext, Result};
use jobwatch_config::{JobwatchConfig, SiteTarget};
use jobwatch_llm::quote::quote_of_the_day;
use jobwatch_llm::traits::LlmClient;
use jobwatch_notify::Notifier;
use jobwatch_web::{MatchCriteria, PageFetcher, SiteCheck, check_site};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

/// What the scheduler gets back from one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON-encoded summary string.
    pub body: String,
}

impl InvocationResponse {
    pub fn completed(updates: usize) -> Self {
        let summary = format!("Scraping completed. Found {updates} updates!");
        Self {
            status_code: 200,
            body: Value::String(summary).to_string(),
        }
    }
}

pub struct Watcher {
    sites: Vec<SiteTarget>,
    criteria: MatchCriteria,
    fetcher: Arc<dyn PageFetcher>,
    llm: Arc<dyn LlmClient + Send + Sync>,
    notifier: Notifier,
}

impl Watcher {
    pub fn new(
        config: &JobwatchConfig,
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn LlmClient + Send + Sync>,
        notifier: Notifier,
    ) -> Self {
        Self {
            sites: config.sites.clone(),
            criteria: MatchCriteria::new(
                config.main_search_term.clone(),
                config.search_terms.clone(),
            ),
            fetcher,
            llm,
            notifier,
        }
    }

    /// Run one check of every site and send the resulting notification.
    ///
    /// Site failures only count as "no match". Quote generation and publish
    /// failures abort the run; since the quote is generated first, nothing is
    /// sent in that case.
    pub async fn handle(&self, event: &Value, ctx: &InvocationContext) -> Result<InvocationResponse> {
        let span = tracing::info_span!("invocation", request_id = %ctx.request_id);
        async move {
            tracing::debug!(%event, started_at = %ctx.started_at, "invocation.start");

            let checks = self.check_all().await;
            let matches: Vec<&SiteCheck> = checks.iter().filter(|c| c.matched()).collect();

            let notification = if matches.is_empty() {
                let quote = quote_of_the_day(self.llm.as_ref(), &self.criteria.search_terms).await?;
                message::no_updates(&self.criteria, &quote)
            } else {
                message::updates_found(&self.criteria, &matches)
            };

            self.notifier.send(&notification).await?;

            tracing::info!(
                sites = checks.len(),
                updates = matches.len(),
                local = self.notifier.is_local(),
                "invocation.done"
            );
            Ok(InvocationResponse::completed(matches.len()))
        }
        .instrument(span)
        .await
    }

    async fn check_all(&self) -> Vec<SiteCheck> {
        let mut checks = Vec::with_capacity(self.sites.len());
        for site in &self.sites {
            checks.push(check_site(self.fetcher.as_ref(), site, &self.criteria).await);
        }
        checks
    }
}
