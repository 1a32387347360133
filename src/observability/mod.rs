//! OpenTelemetry tracing with file-based export.
//!
//! Plugins run sandboxed without a collector to talk to, so spans are
//! encoded as OTLP JSON and appended to a local file instead:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → dexplorer-otlp.json
//! ```
//!
//! - Traces land in `~/.local/share/zellij/dexplorer/dexplorer-otlp.json`
//! - The file rotates at 10 MiB, keeping 3 numbered backups
//! - Each line is one complete OTLP/JSON `resourceSpans` document
//!
//! The filter level comes from the `trace_level` plugin option and defaults
//! to `"info"`. It accepts any `EnvFilter` directive, e.g.
//! `"dexplorer=debug"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and the file span exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
pub use tracer::create_tracer_provider;
