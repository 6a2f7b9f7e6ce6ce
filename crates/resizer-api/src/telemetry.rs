//! Tracing subscriber setup.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "resizer=debug,tower_http=debug";

/// Install the global subscriber. Production emits one JSON object per event;
/// everything else gets the compact console format.
pub fn init_telemetry(json: bool) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?;
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        registry.with(console_fmt).try_init()?;
    }

    tracing::info!(json, "Tracing initialized");
    Ok(())
}
