use crate::extract::extract_text;
use crate::fetch::PageFetcher;
use crate::matcher::MatchCriteria;
use jobwatch_config::SiteTarget;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Matched,
    NoMatch,
    /// The site answered with something other than 200.
    HttpStatus(u16),
    /// Transport or extraction failure.
    Failed(String),
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Matched => write!(f, "matched"),
            CheckOutcome::NoMatch => write!(f, "no match"),
            CheckOutcome::HttpStatus(code) => write!(f, "http status {code}"),
            CheckOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of checking one site during an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCheck {
    pub site: String,
    pub url: Url,
    pub outcome: CheckOutcome,
}

impl SiteCheck {
    pub fn matched(&self) -> bool {
        self.outcome == CheckOutcome::Matched
    }
}

/// Fetch `site`, extract its text and test it against `criteria`.
///
/// Never fails: error statuses, transport errors and extraction errors are
/// logged and reported as a non-matching outcome so the remaining sites are
/// still checked.
pub async fn check_site(
    fetcher: &dyn PageFetcher,
    site: &SiteTarget,
    criteria: &MatchCriteria,
) -> SiteCheck {
    let outcome = match fetcher.fetch(&site.url).await {
        Ok(page) if !page.is_ok() => {
            tracing::warn!(
                site = %site.name,
                status = page.status,
                "Failed to fetch {} (Status Code: {})",
                site.name,
                page.status
            );
            CheckOutcome::HttpStatus(page.status)
        }
        Ok(page) => match extract_text(&page.body, &site.extract) {
            Ok(text) if criteria.matches(&text) => CheckOutcome::Matched,
            Ok(_) => CheckOutcome::NoMatch,
            Err(err) => {
                tracing::warn!(site = %site.name, error = %err, "Error scraping {}: {err}", site.name);
                CheckOutcome::Failed(err.to_string())
            }
        },
        Err(err) => {
            tracing::warn!(site = %site.name, error = %err, "Error scraping {}: {err}", site.name);
            CheckOutcome::Failed(err.to_string())
        }
    };

    tracing::info!(site = %site.name, url = %site.url, %outcome, "site.checked");

    SiteCheck {
        site: site.name.clone(),
        url: site.url.clone(),
        outcome,
    }
}
