//! Response payload types for the backend REST API.

use serde::Deserialize;
use serde_json::Value;

/// One result row: column name to scalar value.
///
/// Result sets are schema-less; rows in the same set need not share a key
/// set, and key order is the order the server emitted (`serde_json` is
/// built with `preserve_order`).
pub type Record = serde_json::Map<String, Value>;

/// Acknowledgment from fire-and-confirm operations (import, clear).
///
/// The backend answers `{ok: true}` on success and
/// `{error, status?, details?}` on failure, possibly with a 2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub ok: bool,
    pub error: Option<String>,
    pub status: Option<Value>,
    pub details: Option<String>,
}

impl AckResponse {
    /// Human-readable failure reason: the `error` field, falling back to
    /// `status`, falling back to a generic message.
    pub fn message(&self) -> String {
        if let Some(err) = &self.error {
            return err.clone();
        }
        match &self.status {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        }
    }
}

/// Result of a preset or raw query execution.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Preset name echoed back by `/api/queries/run`.
    pub name: Option<String>,
    /// Result rows; absent means an empty result set.
    pub rows: Option<Vec<Record>>,
    /// The normalized query text the server actually executed
    /// (`/api/queries/run-raw` echoes it back).
    pub query: Option<String>,
}

/// Result of natural-language to SPARQL translation.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub query: String,
}

/// Verbatim JSON payload of one pipeline run.
///
/// Replaced wholesale on each run; success or failure is judged by the
/// payload's own `ok`/`error` fields, never by HTTP status alone (the
/// backend returns structured errors with 200 as well as non-2xx).
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineRunResult(Value);

impl PipelineRunResult {
    pub fn new(payload: Value) -> Self {
        PipelineRunResult(payload)
    }

    /// Whether the run succeeded according to the payload.
    pub fn is_ok(&self) -> bool {
        self.0.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The payload's `error` field, if any.
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Server-relative reference to the produced Turtle output, when the
    /// run published one (`files.output_ttl`).
    pub fn output_ttl(&self) -> Option<&str> {
        self.0.pointer("/files/output_ttl").and_then(Value::as_str)
    }

    /// All produced-file references, in payload order.
    pub fn files(&self) -> Vec<(String, String)> {
        self.0
            .get("files")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The untouched payload, for verbatim display.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
