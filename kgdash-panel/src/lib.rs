//! Orchestration layer for the kgdash control panel.
//!
//! Three independent controllers (pipeline, preset queries, NL->SPARQL)
//! own their state exclusively and expose an explicit mutation API. Each
//! in-flight network operation is tracked by a [`lifecycle::RequestLifecycle`]
//! whose generation token discards out-of-order completions, so a slow
//! response can never overwrite the result of a request started after it.
//! Rendering is a pure projection from controller state to view models
//! ([`table::TableView`] and the per-controller `*View` structs); no
//! rendering environment is needed to test any of it.

pub mod lifecycle;
pub mod nl2sparql;
pub mod pipeline;
pub mod queries;
pub mod table;

pub use kgdash_api::{ApiClient, Record};
pub use lifecycle::{Generation, Phase, RequestLifecycle};
pub use nl2sparql::{Nl2SparqlController, Nl2SparqlView};
pub use pipeline::{Notification, PipelineController, PipelineView, UploadedArtifact};
pub use queries::{PresetQueryController, QueryPanelView};
pub use table::{project_table, Cell, TableView};
