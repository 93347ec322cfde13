use jobwatch_config::{ExtractionPolicy, JobwatchConfigLoader};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    // A file that sets most fields; a subset is overridden via env.
    let file_yaml = r#"
sns_topic_arn: "arn:aws:sns:eu-central-1:123456789012:careers"
main_search_term: "OpenAI"
search_terms: "Zurich, Berlin"
openai_api_key: "${JOBWATCH_TEST_OPENAI_KEY}"
http_timeout_secs: 10
sites:
  - name: "Reuters AI News"
    url: "https://www.reuters.com/technology/artificial-intelligence/"
    extract:
      tags: ["p", "h1", "h2", "h3"]
  - name: "Careers"
    url: "https://openai.com/careers/search/"
  "#;
    let p = write_yaml(&tmp, "jobwatch.yaml", file_yaml);

    let config = temp_env::with_var("JOBWATCH_TEST_OPENAI_KEY", Some("sk-from-env"), || {
        JobwatchConfigLoader::new()
            .with_file(&p)
            .with_env(env(&[("SEARCH_TERMS", "Munich"), ("LOCAL_ENV", "1")]))
            .load()
            .expect("load job config")
    });

    assert_eq!(config.openai.api_key, "sk-from-env");
    assert_eq!(config.search_terms, vec!["Munich"]);
    assert_eq!(config.main_search_term.as_deref(), Some("OpenAI"));
    assert!(config.local_env);
    assert_eq!(
        config.sns_topic_arn,
        "arn:aws:sns:eu-central-1:123456789012:careers"
    );
    assert_eq!(config.http_timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.sites.len(), 2);
    assert_eq!(config.sites[0].extract, ExtractionPolicy::headlines());
    assert_eq!(config.sites[1].extract, ExtractionPolicy::FullText);
}

#[test]
fn missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = JobwatchConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .with_env(env(&[("OPENAI_API_KEY", "sk-test")]))
        .load();
    assert!(err.is_err());
}
