//! Preset query controller: named-query catalog and the single active
//! execution slot.

use kgdash_api::{ApiClient, Record};
use parking_lot::Mutex;

use crate::lifecycle::RequestLifecycle;
use crate::table::{project_table, TableView};

#[derive(Debug, Default)]
struct QueriesState {
    /// `None` until the catalog load completes; an empty catalog is a
    /// valid, displayable state.
    catalog: Option<Vec<String>>,
    /// Catalog-level load failure, distinct from any per-query error.
    catalog_error: Option<String>,
    active_query: Option<String>,
    exec: RequestLifecycle<Vec<Record>>,
}

/// Owns the preset-query catalog and at most one active execution.
pub struct PresetQueryController {
    client: ApiClient,
    state: Mutex<QueriesState>,
}

impl PresetQueryController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(QueriesState::default()),
        }
    }

    /// Fetch the catalog. Loaded once; the list is immutable for the
    /// session and repeat calls after a successful load are no-ops.
    pub async fn load_catalog(&self) {
        if self.state.lock().catalog.is_some() {
            return;
        }
        match self.client.list_queries().await {
            Ok(names) => {
                let mut state = self.state.lock();
                state.catalog = Some(names);
                state.catalog_error = None;
            }
            Err(e) => {
                self.state.lock().catalog_error = Some(e.to_string());
            }
        }
    }

    /// Execute a preset by name, superseding any in-flight execution.
    ///
    /// Rows and error are cleared before the request is issued; a stale
    /// response from a previously active query is discarded, so switching
    /// queries mid-flight can neither flash old rows nor let the old
    /// query's late response overwrite the new one's.
    pub async fn run_query(&self, name: &str) {
        let token = {
            let mut state = self.state.lock();
            state.active_query = Some(name.to_string());
            state.exec.start()
        };

        match self.client.run_query(name).await {
            Ok(resp) => {
                let rows = resp.rows.unwrap_or_default();
                self.state.lock().exec.succeed(token, rows);
            }
            Err(e) => {
                self.state.lock().exec.fail(token, e.to_string());
            }
        }
    }

    /// Renderable snapshot of the query panel.
    pub fn view(&self) -> QueryPanelView {
        let state = self.state.lock();
        let rows = state.exec.value().cloned().unwrap_or_default();
        QueryPanelView {
            catalog: state.catalog.clone(),
            catalog_error: state.catalog_error.clone(),
            active_query: state.active_query.clone(),
            is_loading: state.exec.is_running(),
            error: state.exec.error().map(str::to_string),
            table: project_table(&rows),
            rows,
        }
    }
}

/// Pure view model of the preset-query panel.
#[derive(Debug, Clone)]
pub struct QueryPanelView {
    /// Catalog names in server order, `None` while not yet loaded.
    pub catalog: Option<Vec<String>>,
    pub catalog_error: Option<String>,
    pub active_query: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Raw rows of the last succeeded execution.
    pub rows: Vec<Record>,
    /// The same rows, projected for rendering.
    pub table: TableView,
}
