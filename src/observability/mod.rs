//! Tracing setup with optional OpenTelemetry file export.
//!
//! Everything in the crate logs through `tracing`. [`init_tracing`] installs
//! the process-wide subscriber:
//!
//! ```text
//! tracing macros → EnvFilter → OpenTelemetryLayer → FileSpanExporter → JSON lines
//! ```
//!
//! Span export is only enabled when [`Config::trace_file`](crate::Config::trace_file)
//! is set. The file rolls over at `trace_max_bytes` and keeps
//! [`BACKUP_COUNT`] timestamped backups.
//!
//! # Usage
//!
//! ```rust
//! use bookfinder::observability::init_tracing;
//! use bookfinder::Config;
//!
//! let config = Config {
//!     trace_level: Some("debug".to_string()),
//!     ..Default::default()
//! };
//! init_tracing(&config);
//!
//! tracing::debug!("tracing is now active");
//! ```

mod exporter;
mod rotation;

pub use rotation::BACKUP_COUNT;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Bookfinder";

/// Installs the global tracing subscriber for `config`.
///
/// The filter comes from `config.trace_level`, defaulting to `"info"`. When
/// `config.trace_file` is set, spans are also exported to that file; if its
/// directory cannot be created, export is skipped and filtering still applies.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let otel_layer = config.trace_file.as_ref().and_then(|path| {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if std::fs::create_dir_all(dir).is_err() {
                return None;
            }
        }

        let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
        let provider = exporter::create_tracer_provider(path.clone(), config.trace_max_bytes, resource);
        Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
    });

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
