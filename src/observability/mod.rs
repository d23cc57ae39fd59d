//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → OtlpFileExporter → rotating file
//! ```
//!
//! The plugin sandbox has no collector to talk to, so finished spans are
//! encoded as OTLP-JSON (one batch per line) into `/data/journalscout-otlp.json`,
//! rotated at 10 MB with three numbered backups.
//!
//! - [`init`]: subscriber installation
//! - `exporter`: the `SpanExporter` and provider builder
//! - `otlp`: span to OTLP-JSON encoding
//! - `sink`: rotating line writer

mod exporter;
pub mod init;
mod otlp;
mod sink;

pub use init::init_tracing;
