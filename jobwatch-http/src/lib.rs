//! Minimal HTTP client with safe logging and bearer auth.
//!
//! - Request options: headers, `Auth`, timeout
//! - Text GET that hands back status and body without judging the status
//! - JSON POST that maps non-success statuses to [`HttpError::Api`]
//! - Never logs secret values
//!
//! There is deliberately no retry loop: every call is attempted exactly once
//! and failures are surfaced to the caller.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), jobwatch_http::HttpError> {
//! let client = jobwatch_http::HttpClient::detached()?;
//! let page = client
//!     .get_text("https://example.com/", jobwatch_http::RequestOpts::default())
//!     .await?;
//! assert!(page.status.is_success());
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated) and final errors. Logs only
//! ever include the auth kind (bearer/none), not the secret.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

const SNIPPET_MAX: usize = 500;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use jobwatch_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    None,
}

impl Auth<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Auth::Bearer(_) => "bearer",
            Auth::None => "none",
        }
    }
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use jobwatch_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
}

/// Result of a text GET. Non-success statuses are returned, not raised.
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub status: StatusCode,
    pub body: String,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Option<Url>,
    inner: Client,
    /// Applied when a request does not carry its own timeout. `None` leaves
    /// reqwest's default (no timeout) in place.
    pub default_timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// A trailing slash is added to the base so relative paths extend it
    /// instead of replacing its last segment.
    ///
    /// ```no_run
    /// use jobwatch_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://api.example.com/v1")?;
    /// assert_eq!(client.base_url().unwrap().as_str(), "https://api.example.com/v1/");
    /// assert!(client.default_timeout.is_none());
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|e| HttpError::Url(e.to_string()))?;
        Ok(Self {
            base: Some(base),
            inner: build_inner()?,
            default_timeout: None,
        })
    }

    /// Construct a client without a base; every path must be an absolute URL.
    pub fn detached() -> Result<Self, HttpError> {
        Ok(Self {
            base: None,
            inner: build_inner()?,
            default_timeout: None,
        })
    }

    /// Set a default per-request timeout.
    ///
    /// ```no_run
    /// use jobwatch_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::detached()?.with_timeout(Some(Duration::from_secs(2)));
    /// assert_eq!(client.default_timeout, Some(Duration::from_secs(2)));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Option<Duration>) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// GET a resource as text. The status is reported back to the caller
    /// whatever it is; only transport failures become errors.
    pub async fn get_text(
        &self,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<TextResponse, HttpError> {
        let url = self.resolve(path)?;
        let (req_id, resp) = self.send(Method::GET, url, None, &opts).await?;
        let status = resp.status();

        let body = resp.text().await.map_err(|err| {
            tracing::warn!(req_id=%req_id, message=%err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;

        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snip_body(body.as_bytes()),
            "http.response.body_snippet"
        );

        Ok(TextResponse { status, body })
    }

    /// POST JSON using optional Bearer auth.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let opts = RequestOpts {
            auth: bearer.map(Auth::Bearer),
            ..Default::default()
        };
        self.post_json_opts(path, body, opts).await
    }

    /// POST JSON with per-request options (headers/auth/timeout).
    pub async fn post_json_opts<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;
        let payload = serde_json::to_vec(body).map_err(|e| HttpError::Build(e.to_string()))?;
        let (req_id, resp) = self.send(Method::POST, url, Some(payload), &opts).await?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            tracing::warn!(req_id=%req_id, message=%err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;
        let snippet = snip_body(&bytes);

        if status.is_success() {
            return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                tracing::warn!(
                    req_id=%req_id,
                    serde_line=%e.line(),
                    serde_col=%e.column(),
                    serde_err=%e,
                    body_snippet=%snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        let message = extract_error_message(&bytes);
        let request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%request_id,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id,
        })
    }

    // ==============================
    // Core request implementation
    // ==============================

    fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        match &self.base {
            Some(base) if Url::parse(path).is_err() => {
                base.join(path).map_err(|e| HttpError::Url(e.to_string()))
            }
            _ => Url::parse(path).map_err(|e| HttpError::Url(e.to_string())),
        }
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        opts: &RequestOpts<'_>,
    ) -> Result<(String, reqwest::Response), HttpError> {
        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = opts.timeout.or(self.default_timeout);
        if let Some(timeout) = timeout {
            rb = rb.timeout(timeout);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        let has_body = body.is_some();
        if let Some(bytes) = body {
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        if let Some(auth) = &opts.auth {
            match auth {
                Auth::Bearer(tok) => {
                    let tok = sanitize_api_key(tok)?;
                    rb = rb.bearer_auth(tok);
                }
                Auth::None => {}
            }
        }

        let req_id = format!("r{}", Uuid::new_v4().simple());
        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms=?timeout.map(|t| t.as_millis() as u64),
            auth_kind=opts.auth.as_ref().map(Auth::kind).unwrap_or("none"),
            headers=?opts.headers.as_ref().map(redact_headers),
            has_body,
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            tracing::warn!(req_id=%req_id, message=%err, "http.network_error.send");
            HttpError::Network(err.to_string())
        })?;

        tracing::debug!(
            req_id=%req_id,
            status=%resp.status(),
            duration_ms=t0.elapsed().as_millis() as u64,
            content_length=?resp.content_length(),
            "http.response.headers"
        );

        Ok((req_id, resp))
    }
}

fn build_inner() -> Result<Client, HttpError> {
    Client::builder()
        .build()
        .map_err(|e| HttpError::Build(e.to_string()))
}

// ==============================
// Helpers
// ==============================

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") {
                val = "Bearer <redacted>".into();
            }
            (key, val)
        })
        .collect()
}

fn extract_error_message(body: &[u8]) -> String {
    // OpenAI style: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct OpenAiEnv {
        error: OpenAiDetail,
    }
    #[derive(Deserialize)]
    struct OpenAiDetail {
        message: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<OpenAiEnv>(body) {
        return env.error.message;
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    // 1) Trim outer spaces/quotes
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    // 2) Remove *all* ASCII whitespace (spaces, tabs, newlines, carriage returns)
    s.retain(|ch| !ch.is_ascii_whitespace());

    // 3) Ensure ASCII and no control chars
    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // 4) Validate header value upfront for clear errors
    HeaderValue::from_str(&format!("Bearer {s}"))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_quoted_keys_with_whitespace() {
        assert_eq!(sanitize_api_key(" 'sk-abc\n123' ").unwrap(), "sk-abc123");
        assert!(sanitize_api_key("sk-ü").is_err());
    }

    #[test]
    fn error_message_prefers_openai_envelope() {
        let body = br#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body), "Incorrect API key provided");
        assert_eq!(extract_error_message(br#"{"detail":"nope"}"#), "nope");
        assert_eq!(extract_error_message(b"plain text"), "plain text");
    }

    #[test]
    fn snippets_are_truncated_on_char_boundaries() {
        let body = "é".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_MAX + 3);
    }

    #[test]
    fn authorization_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer sk-secret"));
        headers.insert("accept", HeaderValue::from_static("text/html"));
        let redacted = redact_headers(&headers);
        assert!(redacted.iter().all(|(_, v)| !v.contains("sk-secret")));
        assert!(redacted.contains(&("accept".to_string(), "text/html".to_string())));
    }

    #[test]
    fn relative_paths_extend_the_base() {
        let client = HttpClient::new("https://api.openai.com/v1").unwrap();
        let url = client.resolve("chat/completions").unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/chat/completions");

        let absolute = client.resolve("https://example.com/x").unwrap();
        assert_eq!(absolute.as_str(), "https://example.com/x");

        let detached = HttpClient::detached().unwrap();
        assert!(matches!(detached.resolve("not a url"), Err(HttpError::Url(_))));
    }
}
