//! Subscriber setup: `EnvFilter` + OpenTelemetry layer over the file exporter.

use super::exporter::file_tracer_provider;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// Spans go to `/data/journalscout-otlp.json` in the plugin sandbox, filtered
/// by `trace_level` (default `info`). Tracing is optional: if the data
/// directory cannot be created nothing is installed, and a second call is a
/// no-op.
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Journalscout"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(paths::trace_file(), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer("Journalscout"));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(config.trace_level.as_deref().unwrap_or("info")))
        .with(layer)
        .try_init();
}
