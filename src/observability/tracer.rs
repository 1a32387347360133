//! File-backed OpenTelemetry span export.
//!
//! Spans never leave the machine: every exported batch is encoded as one
//! OTLP JSON document and appended as a line to a rotating trace file.

use super::file_writer::RotatingFile;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Span exporter writing OTLP JSON lines to a rotating file.
#[derive(Debug)]
struct FileSpanExporter {
    writer: RotatingFile,
    formatter: SpanFormatter,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        Self {
            writer: RotatingFile::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: false,
        }
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }

        let document = self.formatter.format_batch(batch);
        let line = serde_json::to_string(&document).map_err(|e| TraceError::from(e.to_string()))?;

        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes the batch synchronously; the returned future is already resolved.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter.set_resource(resource);
    }
}

/// Creates a tracer provider exporting every finished span to `file_path`.
///
/// Spans are exported one at a time through the simple processor, since the
/// plugin runs single-threaded with no background runtime for batching.
///
/// # Example
///
/// ```rust,no_run
/// use dexplorer::observability::create_tracer_provider;
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
/// use std::path::PathBuf;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "dexplorer")]);
/// let provider = create_tracer_provider(PathBuf::from("/tmp/dexplorer-otlp.json"), resource);
/// ```
#[must_use]
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use opentelemetry::KeyValue;

    fn resource() -> Resource {
        Resource::new(vec![KeyValue::new("service.name", "dexplorer")])
    }

    #[test]
    fn export_appends_one_document_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut exporter = FileSpanExporter::new(path.clone(), &resource());

        exporter.export(Vec::new()).now_or_never().unwrap().unwrap();
        exporter.export(Vec::new()).now_or_never().unwrap().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let document: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(document["resourceSpans"].is_array());
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut exporter = FileSpanExporter::new(path.clone(), &resource());

        exporter.shutdown();

        assert!(exporter.export(Vec::new()).now_or_never().unwrap().is_err());
        assert!(!path.exists());
    }
}
