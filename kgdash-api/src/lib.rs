//! HTTP client for the kgdash pipeline backend
//!
//! The backend drives a multi-stage data pipeline (JSON upload, RDF build,
//! GraphDB import) and executes SPARQL queries, including natural-language
//! translation. This crate covers the wire contract only: request shapes,
//! response payloads, and the error taxonomy. All state handling lives in
//! `kgdash-panel`.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use types::{AckResponse, PipelineRunResult, QueryResponse, Record, TranslateResponse};
