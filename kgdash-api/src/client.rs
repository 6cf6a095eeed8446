//! HTTP client for the pipeline backend.
//!
//! One client instance per configured backend origin. Each method maps to
//! one documented endpoint; bodies are JSON except the multipart upload.
//! Timeouts are left to the transport defaults; the panel layer performs
//! logical cancellation by discarding superseded completions instead.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{AckResponse, PipelineRunResult, QueryResponse, TranslateResponse};

/// Client for the kgdash backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// `base_url` is the backend origin (e.g., `http://127.0.0.1:5000`).
    /// Trailing slashes are stripped.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured backend origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a non-2xx response to an `ApiError`.
    ///
    /// The payload's `error`/`details` fields are used when the body is
    /// JSON; otherwise the raw body (or a generic message) is kept.
    async fn map_error(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => {
                let message = payload
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed with status {status}"));
                let details = payload
                    .get("details")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                ApiError::backend(status, message, details)
            }
            Err(_) if body.is_empty() => {
                ApiError::backend(status, format!("request failed with status {status}"), None)
            }
            Err(_) => ApiError::backend(status, body, None),
        }
    }

    /// Parse a response body as JSON regardless of HTTP status.
    ///
    /// Used for endpoints whose failure payloads are as meaningful as their
    /// success payloads (pipeline run, import, clear). Falls back to the
    /// error mapping when the body is not JSON.
    async fn json_any_status(resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        let body = resp.text().await.map_err(ApiError::from)?;
        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => Ok(payload),
            Err(e) if status.is_success() => Err(ApiError::InvalidResponse(e.to_string())),
            Err(_) if body.is_empty() => Err(ApiError::backend(
                status.as_u16(),
                format!("request failed with status {status}"),
                None,
            )),
            Err(_) => Err(ApiError::backend(status.as_u16(), body, None)),
        }
    }

    /// Check backend reachability via `GET /health`.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if resp.status().is_success() {
            let body: Value = resp.json().await?;
            Ok(body.get("ok").and_then(Value::as_bool).unwrap_or(false))
        } else {
            Err(Self::map_error(resp).await)
        }
    }

    /// Submit the selected JSON artifact to the RDF build pipeline.
    ///
    /// The response payload is returned verbatim whether the run succeeded
    /// or not; callers judge the outcome by the payload's own fields.
    pub async fn process_upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<PipelineRunResult> {
        let url = format!("{}/api/process-upload", self.base_url);
        debug!(file_name, size = bytes.len(), "submitting pipeline upload");

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/json")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self.http.post(&url).multipart(form).send().await?;
        Ok(PipelineRunResult::new(Self::json_any_status(resp).await?))
    }

    /// Import the produced Turtle output into the graph repository.
    pub async fn import_to_graph(&self) -> Result<AckResponse> {
        self.ack_post("/api/graphdb/import").await
    }

    /// Delete all triples in the repository. Destructive; callers must
    /// obtain explicit user confirmation before invoking this.
    pub async fn clear_repository(&self) -> Result<AckResponse> {
        self.ack_post("/api/graphdb/clear").await
    }

    async fn ack_post(&self, path: &str) -> Result<AckResponse> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.post(&url).send().await?;
        let payload = Self::json_any_status(resp).await?;
        serde_json::from_value(payload).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetch the preset query catalog: an ordered list of names.
    pub async fn list_queries(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/queries/list", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if resp.status().is_success() {
            let body: Value = resp.json().await?;
            // A non-array body is treated as an empty catalog, which is a
            // valid, displayable state.
            Ok(body
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default())
        } else {
            Err(Self::map_error(resp).await)
        }
    }

    /// Execute a preset query by name.
    pub async fn run_query(&self, name: &str) -> Result<QueryResponse> {
        let url = format!("{}/api/queries/run", self.base_url);
        debug!(name, "running preset query");
        let resp = self.http.get(&url).query(&[("name", name)]).send().await?;
        if resp.status().is_success() {
            resp.json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))
        } else {
            Err(Self::map_error(resp).await)
        }
    }

    /// Translate a natural-language question into a SPARQL query.
    pub async fn translate(&self, question: &str) -> Result<TranslateResponse> {
        let url = format!("{}/api/nl2sparql/translate", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await?;
        if resp.status().is_success() {
            resp.json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))
        } else {
            Err(Self::map_error(resp).await)
        }
    }

    /// Execute a raw SPARQL query, verbatim.
    pub async fn run_raw(&self, query: &str) -> Result<QueryResponse> {
        let url = format!("{}/api/queries/run-raw", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        if resp.status().is_success() {
            resp.json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))
        } else {
            Err(Self::map_error(resp).await)
        }
    }

    /// Download a produced file by its server-relative reference
    /// (e.g., `/files/output.ttl`). Absolute URLs pass through unchanged.
    pub async fn download_file(&self, reference: &str) -> Result<Vec<u8>> {
        let url = if reference.starts_with("http") {
            reference.to_string()
        } else {
            format!("{}{reference}", self.base_url)
        };
        let resp = self.http.get(&url).send().await?;
        if resp.status().is_success() {
            Ok(resp.bytes().await?.to_vec())
        } else {
            Err(Self::map_error(resp).await)
        }
    }
}
