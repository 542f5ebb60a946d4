//! Structured logging initialization

use crate::config::TelemetryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. With `log_format = "json"` each
/// event is one flattened JSON object per line.
pub fn init(config: &TelemetryConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_core=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        // Keep `message` at the top level instead of nested under `fields`
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true);
        registry.with(fmt_layer).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
