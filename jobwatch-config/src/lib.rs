//! Loader for the job configuration with environment + optional YAML file.
//!
//! The job is configured through a handful of environment variables
//! (`SNS_TOPIC_ARN`, `LOCAL_ENV`, `SEARCH_TERMS`, `MAIN_SEARCH_TERM`,
//! `OPENAI_API_KEY`, plus a few optional knobs). A YAML file may provide the
//! same keys in lowercase and a custom `sites` list; environment variables
//! always win over the file. String values may reference `${VAR}`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

mod sites;

pub use sites::{default_sites, ExtractionPolicy, SiteTarget, HEADLINE_TAGS};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

pub const DEFAULT_TOPIC_ARN: &str = "test";
pub const DEFAULT_SEARCH_TERMS: &str = "Germany, Munich";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";

/// Environment variables the loader looks at. Everything else in the
/// process environment is ignored.
pub const ENV_KEYS: [&str; 8] = [
    "SNS_TOPIC_ARN",
    "LOCAL_ENV",
    "SEARCH_TERMS",
    "MAIN_SEARCH_TERM",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "OPENAI_BASE_URL",
    "HTTP_TIMEOUT_SECS",
];

/// Fully resolved configuration, built once per invocation.
#[derive(Debug, Clone)]
pub struct JobwatchConfig {
    /// Destination notification topic.
    pub sns_topic_arn: String,
    /// Suppress publishing; the notification is only logged.
    pub local_env: bool,
    /// Alternative keywords; one of them must appear next to the main term.
    pub search_terms: Vec<String>,
    /// Keyword that must appear for a page to match. `None` when unset.
    pub main_search_term: Option<String>,
    pub openai: OpenAiSettings,
    /// Per-request timeout for page fetches and generation. `None` means no
    /// timeout beyond the HTTP library defaults.
    pub http_timeout: Option<Duration>,
    pub sites: Vec<SiteTarget>,
}

#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Shape of the merged sources before validation.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    sns_topic_arn: Option<String>,
    #[serde(default)]
    local_env: Option<Flag>,
    #[serde(default)]
    search_terms: Option<Terms>,
    #[serde(default)]
    main_search_term: Option<String>,
    #[serde(default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    openai_model: Option<String>,
    #[serde(default)]
    openai_base_url: Option<String>,
    #[serde(default)]
    http_timeout_secs: Option<Seconds>,
    #[serde(default)]
    sites: Option<Vec<SiteTarget>>,
}

/// `LOCAL_ENV` is truthy when set to any non-empty string; YAML may also use
/// a boolean or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0,
            Flag::Text(s) => !s.is_empty(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Terms {
    List(Vec<String>),
    Csv(String),
}

impl Terms {
    fn into_list(self) -> Vec<String> {
        let raw = match self {
            Terms::List(list) => list,
            Terms::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        raw.iter().map(|t| t.trim().to_string()).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Int(u64),
    Text(String),
}

impl Seconds {
    fn to_duration(&self) -> Result<Duration, ConfigError> {
        let secs = match self {
            Seconds::Int(n) => *n,
            Seconds::Text(s) => s.trim().parse().map_err(|_| {
                ConfigError::Message(format!("HTTP_TIMEOUT_SECS must be an integer, got `{s}`"))
            })?,
        };
        Ok(Duration::from_secs(secs))
    }
}

/// Parse a comma-separated term list the way `SEARCH_TERMS` is read.
///
/// Entries are trimmed but never dropped, so an empty entry stays in the
/// list (and, being a substring of any text, satisfies the search-term check).
///
/// ```
/// assert_eq!(
///     jobwatch_config::parse_terms(" Germany, Munich ,,Berlin"),
///     vec!["Germany", "Munich", "", "Berlin"]
/// );
/// ```
pub fn parse_terms(csv: &str) -> Vec<String> {
    Terms::Csv(csv.to_string()).into_list()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawConfig {
    fn resolve(self) -> Result<JobwatchConfig, ConfigError> {
        let api_key = non_empty(self.openai_api_key)
            .ok_or_else(|| ConfigError::Message("OPENAI_API_KEY is required".to_string()))?;

        let search_terms = self
            .search_terms
            .map(Terms::into_list)
            .unwrap_or_else(|| parse_terms(DEFAULT_SEARCH_TERMS));
        if search_terms.is_empty() {
            tracing::warn!("SEARCH_TERMS is empty; no page can match");
        } else if search_terms.iter().any(String::is_empty) {
            tracing::warn!("SEARCH_TERMS has an empty entry; any page with the main term matches");
        }

        if self.main_search_term.is_none() {
            tracing::warn!("MAIN_SEARCH_TERM is not set; no page can match");
        }

        let http_timeout = self
            .http_timeout_secs
            .as_ref()
            .map(Seconds::to_duration)
            .transpose()?;

        let sites = match self.sites {
            Some(sites) if !sites.is_empty() => sites,
            Some(_) => {
                return Err(ConfigError::Message(
                    "`sites` must list at least one site".to_string(),
                ));
            }
            None => default_sites(),
        };

        Ok(JobwatchConfig {
            sns_topic_arn: non_empty(self.sns_topic_arn)
                .unwrap_or_else(|| DEFAULT_TOPIC_ARN.to_string()),
            local_env: self.local_env.as_ref().is_some_and(Flag::is_set),
            search_terms,
            main_search_term: self.main_search_term,
            openai: OpenAiSettings {
                api_key,
                model: non_empty(self.openai_model)
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
                base_url: non_empty(self.openai_base_url)
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            },
            http_timeout,
            sites,
        })
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct JobwatchConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env: Option<config::Map<String, String>>,
}

impl Default for JobwatchConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl JobwatchConfigLoader {
    /// Start with no file sources; the process environment is read at
    /// [`load`](Self::load) time.
    ///
    /// ```
    /// use jobwatch_config::JobwatchConfigLoader;
    ///
    /// let cfg = JobwatchConfigLoader::new()
    ///     .with_env([("OPENAI_API_KEY".to_string(), "sk-test".to_string())])
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.search_terms, vec!["Germany", "Munich"]);
    /// assert_eq!(cfg.sns_topic_arn, "test");
    /// assert!(!cfg.local_env);
    /// assert_eq!(cfg.sites.len(), 3);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env: None,
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use jobwatch_config::{ExtractionPolicy, JobwatchConfigLoader};
    ///
    /// let cfg = JobwatchConfigLoader::new()
    ///     .with_env([("OPENAI_API_KEY".to_string(), "sk-test".to_string())])
    ///     .with_yaml_str(
    ///         r#"
    /// main_search_term: "OpenAI"
    /// search_terms: ["Zurich"]
    /// sites:
    ///   - name: "Careers"
    ///     url: "https://example.com/careers"
    ///     extract:
    ///       tags: ["li"]
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.main_search_term.as_deref(), Some("OpenAI"));
    /// assert_eq!(cfg.search_terms, vec!["Zurich"]);
    /// assert_eq!(cfg.sites[0].extract, ExtractionPolicy::Tags(vec!["li".into()]));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Use this snapshot instead of the process environment. Keys are the
    /// upper-case variable names from [`ENV_KEYS`].
    pub fn with_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.env = Some(vars.into_iter().collect());
        self
    }

    /// Consume the builder and produce a validated [`JobwatchConfig`].
    ///
    /// `${VAR}` placeholders in file sources are expanded first; environment
    /// variables are then layered on top verbatim. A missing
    /// `OPENAI_API_KEY` is an error.
    pub fn load(self) -> Result<JobwatchConfig, ConfigError> {
        let env = self.env.unwrap_or_else(process_env);

        let mut file_values: Value = self.builder.build()?.try_deserialize()?;
        expand_env_in_value(&mut file_values);

        let cfg = Config::builder()
            .add_source(Config::try_from(&file_values)?)
            .add_source(Environment::default().source(Some(env)))
            .build()?;
        let v: Value = cfg.try_deserialize()?;

        let raw: RawConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        raw.resolve()
    }
}

fn process_env() -> config::Map<String, String> {
    ENV_KEYS
        .iter()
        .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
        .collect()
}
