//! OTLP JSON encoding of finished spans.
//!
//! Each exported batch becomes one JSON document following the OTLP/JSON
//! trace layout (`resourceSpans` → `scopeSpans` → `spans`), so the trace file
//! can be fed to any OTLP-aware viewer line by line.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written into every batch.
const SCOPE_NAME: &str = "dexplorer";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpDocument {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: ResourceAttributes,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
struct ResourceAttributes {
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent>,
    links: Vec<OtlpLink>,
    status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpLink {
    trace_id: String,
    span_id: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct OtlpStatus {
    code: u8,
    message: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP attribute value. 64-bit integers are strings in OTLP/JSON.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(value.to_string()),
        }
    }
}

/// Encodes span batches for one resource.
pub struct SpanFormatter {
    /// Resource attribute snapshot, encoded into every batch.
    resource_attributes: Vec<(String, Value)>,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(resource: &Resource) -> Self {
        Self {
            resource_attributes: snapshot(resource),
        }
    }

    pub fn set_resource(&mut self, resource: &Resource) {
        self.resource_attributes = snapshot(resource);
    }

    /// Builds the OTLP document for one batch.
    #[must_use]
    pub fn format_batch(&self, batch: &[SpanData]) -> OtlpDocument {
        let attributes = self
            .resource_attributes
            .iter()
            .map(|(key, value)| Attribute {
                key: key.clone(),
                value: value.into(),
            })
            .collect();

        OtlpDocument {
            resource_spans: vec![ResourceSpans {
                resource: ResourceAttributes { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(encode_span).collect(),
                }],
            }],
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("resource_attributes", &self.resource_attributes.len())
            .finish()
    }
}

fn snapshot(resource: &Resource) -> Vec<(String, Value)> {
    resource
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn encode_span(span: &SpanData) -> OtlpSpan {
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id: if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: encode_attributes(&span.attributes),
        events: span
            .events
            .iter()
            .map(|event| OtlpEvent {
                time_unix_nano: unix_nanos(event.timestamp),
                name: event.name.to_string(),
                attributes: encode_attributes(&event.attributes),
            })
            .collect(),
        links: span
            .links
            .iter()
            .map(|link| OtlpLink {
                trace_id: format!("{:032x}", link.span_context.trace_id()),
                span_id: format!("{:016x}", link.span_context.span_id()),
                attributes: encode_attributes(&link.attributes),
            })
            .collect(),
        status: OtlpStatus { code, message },
    }
}

fn encode_attributes(attributes: &[KeyValue]) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: (&kv.value).into(),
        })
        .collect()
}

/// OTLP span kind codes.
const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn values_use_otlp_json_tags() {
        let encoded = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(encoded, serde_json::json!({ "intValue": "42" }));

        let encoded = serde_json::to_value(AnyValue::from(&Value::from("pikachu"))).unwrap();
        assert_eq!(encoded, serde_json::json!({ "stringValue": "pikachu" }));
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "dexplorer")]);
        let formatter = SpanFormatter::new(&resource);

        let json = serde_json::to_value(formatter.format_batch(&[])).unwrap();
        let resource_spans = &json["resourceSpans"][0];
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "dexplorer");
        assert!(resource_spans["resource"]["attributes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|attr| attr["key"] == "service.name"
                && attr["value"]["stringValue"] == "dexplorer"));
    }

    #[test]
    fn timestamps_before_epoch_are_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_nanos(7)), "7");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }
}
