use async_trait::async_trait;
use jobwatch_app::{InvocationResponse, Watcher};
use jobwatch_common::{InvocationContext, JobwatchError, Result};
use jobwatch_config::{ExtractionPolicy, JobwatchConfig, OpenAiSettings, SiteTarget};
use jobwatch_llm::traits::{LlmClient, LlmResponse};
use jobwatch_notify::{Notification, Notifier, Publisher};
use jobwatch_web::HttpPageFetcher;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUOTE: &str = "Opportunities don't happen. You create them.";

struct StubLlm {
    calls: AtomicUsize,
    fail: bool,
}

impl StubLlm {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }
}

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate(
        &self,
        _prompt: &str,
        _system_prompt: Option<&str>,
        _max_tokens: Option<u32>,
        _temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(JobwatchError::Llm("API error: quota exceeded".into()));
        }
        Ok(LlmResponse {
            text: QUOTE.into(),
            model: Some("stub".into()),
            tokens_used: None,
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

#[derive(Default)]
struct RecordingPublisher {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, notification: &Notification) -> Result<Option<String>> {
        if self.fail {
            return Err(JobwatchError::Notify("AuthorizationError".into()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(Some("00000000-0000-0000-0000-000000000001".into()))
    }
}

struct Harness {
    server: MockServer,
    llm: Arc<StubLlm>,
    publisher: Arc<RecordingPublisher>,
    local: bool,
    sites: Vec<SiteTarget>,
}

impl Harness {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let sites = vec![
            site(&server, "Reuters AI News", "/reuters", ExtractionPolicy::headlines()),
            site(&server, "PR Newswire", "/prnewswire", ExtractionPolicy::FullText),
            site(&server, "LinkedIn Jobs", "/linkedin", ExtractionPolicy::FullText),
        ];
        Self {
            server,
            llm: StubLlm::new(false),
            publisher: Arc::new(RecordingPublisher::default()),
            local: false,
            sites,
        }
    }

    async fn serve(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_raw(body.to_string(), "text/html; charset=utf-8"),
            )
            .mount(&self.server)
            .await;
    }

    fn config(&self) -> JobwatchConfig {
        JobwatchConfig {
            sns_topic_arn: "arn:aws:sns:eu-central-1:123456789012:jobs".into(),
            local_env: self.local,
            search_terms: vec!["Munich".into()],
            main_search_term: Some("OpenAI".into()),
            openai: OpenAiSettings {
                api_key: "sk-test".into(),
                model: "gpt-4o-mini".into(),
                base_url: "http://127.0.0.1:1/v1/".into(),
            },
            http_timeout: None,
            sites: self.sites.clone(),
        }
    }

    fn watcher(&self) -> Watcher {
        let cfg = self.config();
        Watcher::new(
            &cfg,
            Arc::new(HttpPageFetcher::new(None).unwrap()),
            self.llm.clone(),
            Notifier::new(self.publisher.clone(), cfg.local_env),
        )
    }

    async fn run(&self) -> Result<InvocationResponse> {
        self.watcher()
            .handle(&json!({}), &InvocationContext::new())
            .await
    }

    fn sent(&self) -> Vec<Notification> {
        self.publisher.sent.lock().unwrap().clone()
    }

    fn llm_calls(&self) -> usize {
        self.llm.calls.load(Ordering::SeqCst)
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.server.uri())
    }
}

fn site(server: &MockServer, name: &str, route: &str, extract: ExtractionPolicy) -> SiteTarget {
    let url = Url::parse(&format!("{}{route}", server.uri())).unwrap();
    SiteTarget::new(name, url, extract)
}

const QUIET: &str = "<html><body><h1>Markets</h1><p>Nothing new today.</p></body></html>";
const HIRING: &str = "<html><body><p>OpenAI is hiring in Munich now</p></body></html>";

#[tokio::test]
async fn no_match_sends_quote() {
    let h = Harness::new().await;
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, QUIET).await;
    h.serve("/linkedin", 200, QUIET).await;

    let resp = h.run().await.unwrap();

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "\"Scraping completed. Found 0 updates!\"");
    assert_eq!(h.llm_calls(), 1);

    let sent = h.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "😢 No updates on OpenAI Careers for location(s): OpenAI, Munich!"
    );
    assert!(sent[0].body.starts_with("No updates found for OpenAI, Munich in OpenAI location(s)."));
    assert!(sent[0].body.ends_with(&format!("here your daily quote: {QUOTE}")));
}

#[tokio::test]
async fn single_match_is_reported() {
    let h = Harness::new().await;
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, HIRING).await;
    h.serve("/linkedin", 200, QUIET).await;

    let resp = h.run().await.unwrap();

    assert_eq!(resp.body, "\"Scraping completed. Found 1 updates!\"");
    assert_eq!(h.llm_calls(), 0);

    let sent = h.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.starts_with('🚀'));
    assert!(sent[0].subject.contains("OpenAI"));
    assert_eq!(
        sent[0].body,
        format!(
            "✅ PR Newswire has new content mentioning OpenAI, Munich!\n🔗 {}",
            h.url("/prnewswire")
        )
    );
}

#[tokio::test]
async fn matches_are_listed_in_site_order() {
    let h = Harness::new().await;
    h.serve("/reuters", 200, HIRING).await;
    h.serve("/prnewswire", 200, QUIET).await;
    h.serve("/linkedin", 200, HIRING).await;

    let resp = h.run().await.unwrap();
    assert_eq!(resp.body, "\"Scraping completed. Found 2 updates!\"");

    let body = &h.sent()[0].body;
    let parts: Vec<&str> = body.split("\n\n").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].starts_with("✅ Reuters AI News"));
    assert!(parts[1].starts_with("✅ LinkedIn Jobs"));
}

#[tokio::test]
async fn headline_site_ignores_text_outside_headlines() {
    let h = Harness::new().await;
    h.serve(
        "/reuters",
        200,
        "<html><body><span>OpenAI is hiring in Munich now</span></body></html>",
    )
    .await;
    h.serve("/prnewswire", 200, QUIET).await;
    h.serve("/linkedin", 200, QUIET).await;

    let resp = h.run().await.unwrap();
    assert_eq!(resp.body, "\"Scraping completed. Found 0 updates!\"");
    assert_eq!(h.llm_calls(), 1);
}

#[tokio::test]
async fn local_mode_never_publishes() {
    let mut h = Harness::new().await;
    h.local = true;
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, HIRING).await;
    h.serve("/linkedin", 200, QUIET).await;

    let resp = h.run().await.unwrap();
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "\"Scraping completed. Found 1 updates!\"");
    assert!(h.sent().is_empty());
}

#[tokio::test]
async fn local_mode_without_match_still_generates_quote() {
    let mut h = Harness::new().await;
    h.local = true;
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, QUIET).await;
    h.serve("/linkedin", 200, QUIET).await;

    h.run().await.unwrap();
    assert_eq!(h.llm_calls(), 1);
    assert!(h.sent().is_empty());
}

#[tokio::test]
async fn failing_sites_count_as_no_match() {
    let mut h = Harness::new().await;
    h.sites[2] = SiteTarget::new(
        "LinkedIn Jobs",
        Url::parse("http://127.0.0.1:1/jobs").unwrap(),
        ExtractionPolicy::FullText,
    );
    h.serve("/reuters", 503, HIRING).await;
    h.serve("/prnewswire", 200, HIRING).await;

    let resp = h.run().await.unwrap();

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "\"Scraping completed. Found 1 updates!\"");
    let sent = h.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.starts_with("✅ PR Newswire"));
}

#[tokio::test]
async fn missing_main_term_matches_nothing() {
    let h = Harness::new().await;
    h.serve("/reuters", 200, HIRING).await;
    h.serve("/prnewswire", 200, HIRING).await;
    h.serve("/linkedin", 200, HIRING).await;

    let mut cfg = h.config();
    cfg.main_search_term = None;
    let watcher = Watcher::new(
        &cfg,
        Arc::new(HttpPageFetcher::new(None).unwrap()),
        h.llm.clone(),
        Notifier::new(h.publisher.clone(), false),
    );

    let resp = watcher
        .handle(&json!({"source": "aws.events"}), &InvocationContext::new())
        .await
        .unwrap();
    assert_eq!(resp.body, "\"Scraping completed. Found 0 updates!\"");
    assert_eq!(
        h.sent()[0].subject,
        "😢 No updates on  Careers for location(s): Munich!"
    );
}

#[tokio::test]
async fn quote_failure_aborts_before_publishing() {
    let mut h = Harness::new().await;
    h.llm = StubLlm::new(true);
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, QUIET).await;
    h.serve("/linkedin", 200, QUIET).await;

    let err = h.run().await.unwrap_err();

    assert!(matches!(err, JobwatchError::Llm(_)));
    assert!(h.sent().is_empty());
}

#[tokio::test]
async fn publish_failure_propagates() {
    let mut h = Harness::new().await;
    h.publisher = Arc::new(RecordingPublisher {
        fail: true,
        ..Default::default()
    });
    h.serve("/reuters", 200, QUIET).await;
    h.serve("/prnewswire", 200, HIRING).await;
    h.serve("/linkedin", 200, QUIET).await;

    let err = h.run().await.unwrap_err();
    assert!(matches!(err, JobwatchError::Notify(_)));
}
