use async_trait::async_trait;
use jobwatch_http::{HttpClient, HttpError, RequestOpts};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use std::time::Duration;
use url::Url;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

/// Header set sent with every page request so the sites serve the same
/// markup a desktop browser would get.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// Raw result of a page GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`. Error statuses come back as a page; only transport
    /// failures are errors.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, HttpError>;
}

#[derive(Clone)]
pub struct HttpPageFetcher {
    http: HttpClient,
    headers: HeaderMap,
}

impl HttpPageFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        Ok(Self {
            http: HttpClient::detached()?.with_timeout(timeout),
            headers: browser_headers(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, HttpError> {
        let resp = self
            .http
            .get_text(
                url.as_str(),
                RequestOpts {
                    headers: Some(self.headers.clone()),
                    ..Default::default()
                },
            )
            .await?;

        Ok(FetchedPage {
            status: resp.status.as_u16(),
            body: resp.body,
        })
    }
}
