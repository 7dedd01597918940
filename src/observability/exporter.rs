//! OpenTelemetry span exporter writing JSON lines.
//!
//! Each exported batch becomes one line:
//!
//! ```json
//! {"resource":{"service.name":"Bookfinder"},"spans":[{"name":"search_worker.job", ...}]}
//! ```

use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

struct FileSpanExporter {
    file: RotatingFile,
    resource: JsonValue,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn new(path: PathBuf, max_bytes: u64, resource: &Resource) -> Self {
        let resource = resource
            .iter()
            .map(|(key, value)| (key.to_string(), attribute_json(value)))
            .collect::<Map<_, _>>();

        Self {
            file: RotatingFile::new(path, max_bytes),
            resource: JsonValue::Object(resource),
            is_shutdown: false,
        }
    }

    fn batch_line(&self, batch: &[SpanData]) -> String {
        json!({
            "resource": self.resource,
            "spans": batch.iter().map(span_json).collect::<Vec<_>>(),
        })
        .to_string()
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("span exporter is shut down"))
        } else {
            self.file
                .append_line(&self.batch_line(&batch))
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a tracer provider that exports every finished span to `path`.
pub fn create_tracer_provider(path: PathBuf, max_bytes: u64, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(path, max_bytes, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn span_json(span: &SpanData) -> JsonValue {
    let parent = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
    let duration_micros = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| d.as_micros());

    json!({
        "name": span.name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "startUnixNano": unix_nanos(span.start_time).to_string(),
        "durationMicros": duration_micros.to_string(),
        "attributes": attributes_json(&span.attributes),
        "events": span
            .events
            .iter()
            .map(|event| json!({
                "name": event.name,
                "timeUnixNano": unix_nanos(event.timestamp).to_string(),
                "attributes": attributes_json(&event.attributes),
            }))
            .collect::<Vec<_>>(),
        "status": status_json(&span.status),
    })
}

fn attributes_json(attributes: &[KeyValue]) -> JsonValue {
    JsonValue::Object(
        attributes
            .iter()
            .map(|kv| (kv.key.to_string(), attribute_json(&kv.value)))
            .collect(),
    )
}

fn attribute_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn status_json(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description }),
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use tempfile::TempDir;

    #[test]
    fn attribute_values_map_to_json_scalars() {
        assert_eq!(attribute_json(&Value::Bool(true)), json!(true));
        assert_eq!(attribute_json(&Value::I64(9)), json!(9));
        assert_eq!(attribute_json(&Value::from("dune")), json!("dune"));
    }

    #[test]
    fn error_status_carries_description() {
        let status = Status::error("API error: 500");
        assert_eq!(status_json(&status), json!({ "error": "API error: 500" }));
        assert_eq!(status_json(&Status::Unset), json!("unset"));
    }

    #[test]
    fn finished_spans_are_written_as_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Bookfinder")]);
        let provider = create_tracer_provider(path.clone(), 1024 * 1024, resource);

        provider.tracer("test").in_span("search", |_cx| {});

        let text = std::fs::read_to_string(&path).unwrap();
        let line: JsonValue = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(line["resource"]["service.name"], "Bookfinder");
        assert_eq!(line["spans"][0]["name"], "search");
        assert!(line["spans"][0]["parentSpanId"].is_null());
    }
}
