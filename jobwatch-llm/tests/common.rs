use std::sync::OnceLock;

use jobwatch_common::observability::{LogConfig, LogFormat};

static INIT: OnceLock<()> = OnceLock::new();

#[allow(dead_code)]
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        let config = LogConfig {
            app_name: "jobwatch-tests",
            emit_stderr: true,
            format: if std::env::var("JOBWATCH_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug",
            ..LogConfig::default()
        };

        let _ = jobwatch_common::observability::init_logging(config);
    });
}
