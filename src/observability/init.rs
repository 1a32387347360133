//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and tracer name attached to every exported span.
const SERVICE_NAME: &str = "dexplorer";

/// Trace file name inside the data directory.
const TRACE_FILE: &str = "dexplorer-otlp.json";

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// The filter comes from `config.trace_level` and defaults to `"info"`.
/// Spans are written to `dexplorer-otlp.json` in the plugin data directory
/// (see [`crate::infrastructure::get_data_dir`]).
///
/// Tracing is optional: when the data directory cannot be created the
/// function returns without installing anything. Calling it again after a
/// subscriber is installed has no effect.
///
/// # Example
///
/// ```rust,no_run
/// use dexplorer::observability::init_tracing;
/// use dexplorer::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
