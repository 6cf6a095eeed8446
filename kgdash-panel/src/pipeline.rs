//! Pipeline controller: upload artifact, run the RDF build, import, clear.

use kgdash_api::{ApiClient, PipelineRunResult};
use parking_lot::Mutex;
use tracing::info;

use crate::lifecycle::{Phase, RequestLifecycle};

/// A file chosen by the user. Held client-side until submitted and
/// replaced wholesale on each new selection, never partially mutated.
#[derive(Debug, Clone)]
pub struct UploadedArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Transient outcome of a fire-and-acknowledge operation (import, clear).
/// Reported to the user once and not kept in controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Default)]
struct PipelineState {
    artifact: Option<UploadedArtifact>,
    run: RequestLifecycle<PipelineRunResult>,
}

/// Owns the "build RDF / import / clear" operation group.
pub struct PipelineController {
    client: ApiClient,
    state: Mutex<PipelineState>,
}

impl PipelineController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(PipelineState::default()),
        }
    }

    /// Replace the selected artifact. The previous run result stays
    /// visible so the user can inspect it while picking a new file.
    pub fn select_file(&self, artifact: UploadedArtifact) {
        self.state.lock().artifact = Some(artifact);
    }

    /// Submit the selected artifact to the build pipeline.
    ///
    /// Without a selected artifact this fails locally, issuing no request.
    /// The response payload is stored verbatim; its own `ok`/`error` fields
    /// decide whether the run counts as succeeded.
    pub async fn run(&self) {
        let (artifact, token) = {
            let mut state = self.state.lock();
            let Some(artifact) = state.artifact.clone() else {
                state.run.fail_now("no file chosen; select a JSON file first");
                return;
            };
            (artifact, state.run.start())
        };

        match self
            .client
            .process_upload(&artifact.file_name, artifact.bytes)
            .await
        {
            Ok(result) => {
                self.state.lock().run.succeed(token, result);
            }
            Err(e) => {
                self.state.lock().run.fail(token, e.to_string());
            }
        }
    }

    /// Import the produced output into the graph repository.
    ///
    /// No dependency on a prior successful `run()` is enforced here; the
    /// backend reports its own precondition failures.
    pub async fn import_to_graph(&self) -> Notification {
        match self.client.import_to_graph().await {
            Ok(ack) if ack.ok => {
                info!("import acknowledged");
                Notification {
                    ok: true,
                    message: "Imported to GraphDB".to_string(),
                }
            }
            Ok(ack) => Notification {
                ok: false,
                message: format!("import failed: {}", ack.message()),
            },
            Err(e) => Notification {
                ok: false,
                message: format!("import failed: {e}"),
            },
        }
    }

    /// Delete all triples in the repository.
    ///
    /// Destructive: the caller must have collected explicit user
    /// confirmation before invoking this.
    pub async fn clear_repository(&self) -> Notification {
        match self.client.clear_repository().await {
            Ok(ack) if ack.ok => {
                info!("repository cleared");
                Notification {
                    ok: true,
                    message: "Repository cleared".to_string(),
                }
            }
            Ok(ack) => Notification {
                ok: false,
                message: format!("clear failed: {}", ack.message()),
            },
            Err(e) => Notification {
                ok: false,
                message: format!("clear failed: {e}"),
            },
        }
    }

    /// Renderable snapshot of the pipeline panel.
    pub fn view(&self) -> PipelineView {
        let state = self.state.lock();
        let result = state.run.value().cloned();
        let output_ttl = result
            .as_ref()
            .filter(|r| r.is_ok())
            .and_then(|r| r.output_ttl().map(str::to_string));
        PipelineView {
            selected_file: state.artifact.as_ref().map(|a| a.file_name.clone()),
            phase: state.run.phase(),
            error: state.run.error().map(str::to_string),
            result,
            output_ttl,
        }
    }
}

/// Pure view model of the pipeline panel; side-effect free to build.
#[derive(Debug, Clone)]
pub struct PipelineView {
    pub selected_file: Option<String>,
    pub phase: Phase,
    /// Transport-level failure of the last run, if any. Application-level
    /// failures live inside `result` (payload `ok`/`error`).
    pub error: Option<String>,
    /// Verbatim payload of the last completed run.
    pub result: Option<PipelineRunResult>,
    /// Downloadable output reference, present only for succeeded runs that
    /// published one.
    pub output_ttl: Option<String>,
}

impl PipelineView {
    /// Whether the last run failed, either in transport or per its payload.
    pub fn failed(&self) -> bool {
        match (&self.error, &self.result) {
            (Some(_), _) => true,
            (None, Some(result)) => !result.is_ok(),
            (None, None) => false,
        }
    }

    /// The failure message to display, when `failed()`.
    pub fn failure_message(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        let result = self.result.as_ref()?;
        if result.is_ok() {
            None
        } else {
            Some(
                result
                    .error()
                    .unwrap_or("pipeline run reported failure")
                    .to_string(),
            )
        }
    }
}
