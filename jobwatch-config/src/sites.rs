//! Site targets watched by the job.
use serde::Deserialize;
use url::Url;

/// Tags whose text is collected for sites that only look at headlines and
/// paragraphs.
pub const HEADLINE_TAGS: [&str; 4] = ["p", "h1", "h2", "h3"];

/// How visible text is pulled out of a fetched page.
///
/// In YAML this is either `full_text` or `{ tags: [p, h1] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPolicy {
    /// Every text node of the document, in document order.
    #[default]
    FullText,
    /// Text of the elements with one of these tag names, joined by a space.
    Tags(Vec<String>),
}

impl ExtractionPolicy {
    pub fn headlines() -> Self {
        Self::Tags(HEADLINE_TAGS.iter().map(|t| t.to_string()).collect())
    }
}

/// One page to check on every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteTarget {
    /// Display name used in logs and notification text.
    pub name: String,
    pub url: Url,
    #[serde(default)]
    pub extract: ExtractionPolicy,
}

impl SiteTarget {
    pub fn new(name: impl Into<String>, url: Url, extract: ExtractionPolicy) -> Self {
        Self {
            name: name.into(),
            url,
            extract,
        }
    }
}

const DEFAULT_SITES: [(&str, &str); 3] = [
    (
        "Reuters AI News",
        "https://www.reuters.com/technology/artificial-intelligence/",
    ),
    ("PR Newswire", "https://www.prnewswire.com/news-releases/"),
    (
        "LinkedIn Jobs",
        "https://www.linkedin.com/company/openai/jobs/",
    ),
];

/// The built-in watch list, in the order the sites are checked.
///
/// Reuters is read through its headlines and paragraphs only; the other two
/// pages are matched against their full text.
pub fn default_sites() -> Vec<SiteTarget> {
    DEFAULT_SITES
        .iter()
        .filter_map(|(name, raw)| {
            let url = Url::parse(raw).ok()?;
            let extract = if *name == "Reuters AI News" {
                ExtractionPolicy::headlines()
            } else {
                ExtractionPolicy::FullText
            };
            Some(SiteTarget::new(*name, url, extract))
        })
        .collect()
}
