use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

static URL_SECRET_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([?&](?:key|api_key|apikey|access_token)=)[^&#\s]*")
        .expect("static regex is valid")
});

/// Install the global subscriber; `RUST_LOG` overrides the configured level
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);
}

/// Replace secret query parameter values in a URL or URI with `[REDACTED]`
pub fn redact_url_secrets(url: &str) -> String {
    URL_SECRET_PARAM
        .replace_all(url, "${1}[REDACTED]")
        .into_owned()
}
