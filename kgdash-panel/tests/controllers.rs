//! Controller behavior against a stubbed backend, including the
//! out-of-order completion guarantee.

use std::time::Duration;

use kgdash_panel::table::Cell;
use kgdash_panel::{
    ApiClient, Nl2SparqlController, Phase, PipelineController, PresetQueryController,
    UploadedArtifact,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn artifact(name: &str) -> UploadedArtifact {
    UploadedArtifact {
        file_name: name.to_string(),
        bytes: b"{\"scores\": []}".to_vec(),
    }
}

#[tokio::test]
async fn catalog_and_preset_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["bachelor2025", "health2024"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .and(query_param("name", "bachelor2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "bachelor2025",
            "rows": [{"db": "X", "score": 0.9}],
        })))
        .mount(&server)
        .await;

    let controller = PresetQueryController::new(ApiClient::new(&server.uri()));
    controller.load_catalog().await;

    let view = controller.view();
    assert_eq!(
        view.catalog.as_deref(),
        Some(["bachelor2025".to_string(), "health2024".to_string()].as_slice())
    );
    assert!(view.catalog_error.is_none());

    controller.run_query("bachelor2025").await;
    let view = controller.view();
    assert_eq!(view.active_query.as_deref(), Some("bachelor2025"));
    assert!(view.error.is_none());
    assert_eq!(view.table.columns, vec!["db", "score"]);
    assert_eq!(
        view.table.rows,
        vec![vec![Cell::Text("X".into()), Cell::Text("0.9".into())]]
    );
}

#[tokio::test]
async fn empty_catalog_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let controller = PresetQueryController::new(ApiClient::new(&server.uri()));
    controller.load_catalog().await;

    let view = controller.view();
    let names = view.catalog.expect("catalog should be loaded");
    assert!(names.is_empty());
    assert!(view.catalog_error.is_none());
}

#[tokio::test]
async fn late_response_of_superseded_query_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .and(query_param("name", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"rows": [{"who": "slow"}]}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .and(query_param("name", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": [{"who": "fast"}]})))
        .mount(&server)
        .await;

    let controller = PresetQueryController::new(ApiClient::new(&server.uri()));

    // Start "slow", then supersede it with "fast" while it is in flight.
    // "fast" resolves first; "slow" arrives later and must be discarded.
    tokio::join!(controller.run_query("slow"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.run_query("fast").await;
    });

    let view = controller.view();
    assert_eq!(view.active_query.as_deref(), Some("fast"));
    assert!(view.error.is_none());
    assert_eq!(
        view.table.rows,
        vec![vec![Cell::Text("fast".into())]],
        "stale rows overwrote the newer query's result"
    );
}

#[tokio::test]
async fn late_failure_of_superseded_query_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .and(query_param("name", "failing"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(json!({"error": "GraphDB error"}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .and(query_param("name", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": [{"who": "fast"}]})))
        .mount(&server)
        .await;

    let controller = PresetQueryController::new(ApiClient::new(&server.uri()));
    tokio::join!(controller.run_query("failing"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.run_query("fast").await;
    });

    let view = controller.view();
    assert!(view.error.is_none(), "stale failure leaked into the view");
    assert_eq!(view.table.rows, vec![vec![Cell::Text("fast".into())]]);
}

#[tokio::test]
async fn query_error_does_not_touch_catalog_error_slot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queries/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["ok-query"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries/run"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Unknown query name: nope"})))
        .mount(&server)
        .await;

    let controller = PresetQueryController::new(ApiClient::new(&server.uri()));
    controller.load_catalog().await;
    controller.run_query("nope").await;

    let view = controller.view();
    assert!(view.catalog_error.is_none());
    assert_eq!(view.error.as_deref(), Some("Unknown query name: nope"));
    assert!(view.table.is_empty());
}

#[tokio::test]
async fn run_without_artifact_issues_no_request() {
    let server = MockServer::start().await;

    let controller = PipelineController::new(ApiClient::new(&server.uri()));
    controller.run().await;

    let view = controller.view();
    assert_eq!(view.phase, Phase::Failed);
    assert!(view.error.as_deref().unwrap_or("").contains("no file chosen"));
    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "local validation must not reach the network"
    );
}

#[tokio::test]
async fn pipeline_success_exposes_output_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "files": {"output_ttl": "/files/output.ttl"},
        })))
        .mount(&server)
        .await;

    let controller = PipelineController::new(ApiClient::new(&server.uri()));
    controller.select_file(artifact("scores.json"));
    controller.run().await;

    let view = controller.view();
    assert_eq!(view.phase, Phase::Succeeded);
    assert!(!view.failed());
    assert_eq!(view.output_ttl.as_deref(), Some("/files/output.ttl"));
}

#[tokio::test]
async fn pipeline_ok_false_with_http_200_is_a_failed_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "rmlmapper failed"})),
        )
        .mount(&server)
        .await;

    let controller = PipelineController::new(ApiClient::new(&server.uri()));
    controller.select_file(artifact("scores.json"));
    controller.run().await;

    let view = controller.view();
    assert!(view.failed());
    assert_eq!(view.failure_message().as_deref(), Some("rmlmapper failed"));
    // The verbatim payload stays inspectable.
    assert_eq!(
        view.result.unwrap().as_value()["error"],
        json!("rmlmapper failed")
    );
    assert!(view.output_ttl.is_none());
}

#[tokio::test]
async fn selecting_a_new_file_keeps_the_old_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let controller = PipelineController::new(ApiClient::new(&server.uri()));
    controller.select_file(artifact("first.json"));
    controller.run().await;
    controller.select_file(artifact("second.json"));

    let view = controller.view();
    assert_eq!(view.selected_file.as_deref(), Some("second.json"));
    assert!(view.result.is_some(), "prior run result must stay visible");
}

#[tokio::test]
async fn blank_question_and_blank_buffer_issue_no_requests() {
    let server = MockServer::start().await;

    let controller = Nl2SparqlController::new(ApiClient::new(&server.uri()));

    controller.set_question("   ");
    controller.translate().await;
    let view = controller.view();
    assert_eq!(view.error.as_deref(), Some("type a question first"));

    controller.run_generated().await;
    let view = controller.view();
    assert!(view.error.as_deref().unwrap_or("").contains("no query to run"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn translate_fills_buffer_and_forces_visibility() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/nl2sparql/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query": "SELECT ?db WHERE { }"})),
        )
        .mount(&server)
        .await;

    let controller = Nl2SparqlController::new(ApiClient::new(&server.uri()));
    controller.set_show_query(false);
    controller.set_question("which database has the highest average score?");
    controller.translate().await;

    let view = controller.view();
    assert!(view.error.is_none());
    assert_eq!(view.query_text, "SELECT ?db WHERE { }");
    assert!(view.show_query, "generated query must be forced visible");
}

#[tokio::test]
async fn translate_failure_preserves_hand_edited_buffer_and_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/queries/run-raw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [{"db": "X"}],
            "query": "SELECT ?db WHERE { }",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/nl2sparql/translate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Translate failed"})))
        .mount(&server)
        .await;

    let controller = Nl2SparqlController::new(ApiClient::new(&server.uri()));
    controller.set_query_text("SELECT ?db WHERE { }");
    controller.run_generated().await;
    assert_eq!(controller.view().table.rows, vec![vec![Cell::Text("X".into())]]);

    // A failed re-translate surfaces its error but leaves both the edited
    // buffer and the previously-run rows alone.
    controller.set_query_text("SELECT ?db ?score WHERE { }");
    controller.set_question("now with scores");
    controller.translate().await;

    let view = controller.view();
    assert_eq!(view.error.as_deref(), Some("Translate failed"));
    assert_eq!(view.query_text, "SELECT ?db ?score WHERE { }");
    assert_eq!(view.table.rows, vec![vec![Cell::Text("X".into())]]);
}

#[tokio::test]
async fn run_generated_truncates_diagnostic_details() {
    let long_details = "y".repeat(600);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/queries/run-raw"))
        .and(body_json(json!({"query": "SELEKT ?x"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "bad syntax",
            "details": long_details,
        })))
        .mount(&server)
        .await;

    let controller = Nl2SparqlController::new(ApiClient::new(&server.uri()));
    controller.set_query_text("SELEKT ?x");
    controller.run_generated().await;

    let view = controller.view();
    let error = view.error.expect("execution error expected");
    assert!(error.contains("bad syntax"));
    let excerpt_len = error.matches('y').count();
    assert!(
        excerpt_len <= 500,
        "details excerpt must be truncated to 500 chars, got {excerpt_len}"
    );
    assert!(excerpt_len >= 499, "excerpt unexpectedly short: {excerpt_len}");
}
