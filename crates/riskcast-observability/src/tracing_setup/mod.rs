//! Tracing initialization.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use riskcast_core::config::ObservabilityConfig;

/// Environment variable holding per-target filter directives, e.g.
/// `RISKCAST_LOG=riskcast_simulation=debug,riskcast_propagation=warn`.
pub const LOG_ENV_VAR: &str = "RISKCAST_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RISKCAST_LOG` wins over `config.log_level`. Only the first call has any
/// effect, and an already-installed global subscriber is left in place.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config);
        let json = config.json.then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
        });
        let text = (!config.json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(text)
            .try_init();
    });
}

/// Filter from `RISKCAST_LOG`, falling back to the configured level and then
/// to `info` when the configured level does not parse.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
