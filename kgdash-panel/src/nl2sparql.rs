//! NL->SPARQL controller: translate a question, let the user inspect and
//! edit the generated query, then run it.

use kgdash_api::{ApiClient, Record};
use parking_lot::Mutex;

use crate::lifecycle::RequestLifecycle;
use crate::table::{project_table, TableView};

/// Upper bound on the diagnostic excerpt appended to execution errors.
const DETAIL_LIMIT: usize = 500;

#[derive(Debug, Default)]
struct SessionState {
    question: String,
    /// Editable query buffer. Filled by a successful translation and freely
    /// editable afterwards; decoupled from the question once produced.
    query_text: String,
    show_query: bool,
    /// Rows of the last executed query. Translating again does not clear
    /// them; only a new execution does.
    rows: Vec<Record>,
    /// Shared phase/error slot for both operations. The session has a
    /// single loading flag, so whichever operation starts later supersedes
    /// the earlier one's completion.
    op: RequestLifecycle<()>,
}

/// Owns the two-step translate / run-generated workflow.
pub struct Nl2SparqlController {
    client: ApiClient,
    state: Mutex<SessionState>,
}

impl Nl2SparqlController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn set_question(&self, text: &str) {
        self.state.lock().question = text.to_string();
    }

    /// Manual edit of the generated-query buffer. Edits are preserved;
    /// nothing invalidates them retroactively.
    pub fn set_query_text(&self, text: &str) {
        self.state.lock().query_text = text.to_string();
    }

    pub fn set_show_query(&self, on: bool) {
        self.state.lock().show_query = on;
    }

    /// Translate the question into SPARQL.
    ///
    /// Blank questions fail locally without a request. On success the
    /// buffer is replaced and the generated query is forced visible so the
    /// user sees what would run. The query is never auto-run, and any
    /// previously executed rows stay in place.
    pub async fn translate(&self) {
        let (question, token) = {
            let mut state = self.state.lock();
            let question = state.question.trim().to_string();
            if question.is_empty() {
                state.op.fail_now("type a question first");
                return;
            }
            (question, state.op.start())
        };

        match self.client.translate(&question).await {
            Ok(resp) => {
                let mut state = self.state.lock();
                if state.op.succeed(token, ()) {
                    state.query_text = resp.query;
                    state.show_query = true;
                }
            }
            Err(e) => {
                self.state.lock().op.fail(token, e.to_string());
            }
        }
    }

    /// Execute the buffer verbatim, hand edits included.
    ///
    /// Blank buffers fail locally without a request. Execution failures are
    /// augmented with a diagnostic excerpt (at most 500 characters) when
    /// the backend supplied one.
    pub async fn run_generated(&self) {
        let (query, token) = {
            let mut state = self.state.lock();
            if state.query_text.trim().is_empty() {
                state.op.fail_now("no query to run; translate a question or paste one");
                return;
            }
            state.rows.clear();
            (state.query_text.clone(), state.op.start())
        };

        match self.client.run_raw(&query).await {
            Ok(resp) => {
                let mut state = self.state.lock();
                if state.op.succeed(token, ()) {
                    state.rows = resp.rows.unwrap_or_default();
                    // The server echoes the normalized text it executed
                    // (code fences stripped, prefixes added); adopt it so
                    // the buffer shows what actually ran.
                    if let Some(executed) = resp.query {
                        state.query_text = executed;
                    }
                }
            }
            Err(e) => {
                let message = match e.details() {
                    Some(details) => {
                        let excerpt: String = details.chars().take(DETAIL_LIMIT).collect();
                        format!("{e}: {excerpt}")
                    }
                    None => e.to_string(),
                };
                self.state.lock().op.fail(token, message);
            }
        }
    }

    /// Renderable snapshot of the session.
    pub fn view(&self) -> Nl2SparqlView {
        let state = self.state.lock();
        Nl2SparqlView {
            question: state.question.clone(),
            query_text: state.query_text.clone(),
            show_query: state.show_query,
            is_loading: state.op.is_running(),
            error: state.op.error().map(str::to_string),
            table: project_table(&state.rows),
            rows: state.rows.clone(),
        }
    }
}

/// Pure view model of the NL->SPARQL session.
#[derive(Debug, Clone)]
pub struct Nl2SparqlView {
    pub question: String,
    pub query_text: String,
    pub show_query: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub rows: Vec<Record>,
    pub table: TableView,
}
