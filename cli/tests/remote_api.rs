//! End-to-end runs of `cloudlab-cli` against an in-process fake of the
//! experiment API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Default)]
struct FakeApi {
    experiments: Vec<Value>,
    requests: usize,
    last_scores: Option<Value>,
}

type Shared = Arc<Mutex<FakeApi>>;
type Params = Query<HashMap<String, String>>;

fn envelope(document: &Value) -> Json<Value> {
    Json(json!({ "body": document.to_string() }))
}

async fn create(State(api): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut api = api.lock().unwrap();
    api.requests += 1;
    let id = format!("e-{}", api.experiments.len() + 1);
    let rows = body["populationSize"].as_u64().unwrap_or(0);
    let width = body["variables"].as_array().map_or(0, Vec::len);
    body["experimentId"] = json!(id);
    body["population"] = json!(vec![vec![0.5; width]; usize::try_from(rows).unwrap()]);
    api.experiments.push(body);
    (StatusCode::CREATED, Json(json!({ "experimentId": id }))).into_response()
}

async fn read(State(api): State<Shared>, Query(params): Params) -> Response {
    let mut api = api.lock().unwrap();
    api.requests += 1;
    if let Some(user_id) = params.get("userId") {
        let owned: Vec<Value> = api
            .experiments
            .iter()
            .filter(|experiment| experiment["userId"] == json!(user_id))
            .cloned()
            .collect();
        return envelope(&json!({ "experiments": owned })).into_response();
    }
    let id = params.get("experimentId").cloned().unwrap_or_default();
    match api.experiments.iter().find(|experiment| experiment["experimentId"] == json!(id)) {
        Some(experiment) => envelope(&json!({ "experiment": experiment })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(api): State<Shared>, Query(params): Params) -> StatusCode {
    let mut api = api.lock().unwrap();
    api.requests += 1;
    let id = json!(params.get("experimentId").cloned().unwrap_or_default());
    let before = api.experiments.len();
    api.experiments.retain(|experiment| experiment["experimentId"] != id);
    if api.experiments.len() < before { StatusCode::OK } else { StatusCode::NOT_FOUND }
}

async fn advance(State(api): State<Shared>, Query(params): Params, Json(body): Json<Value>) -> Response {
    let mut api = api.lock().unwrap();
    api.requests += 1;
    api.last_scores = Some(body["fitnessScores"].clone());
    let id = json!(params.get("experimentId").cloned().unwrap_or_default());
    let current = body["population"].as_array().unwrap();
    // An empty generation is reseeded.
    let next: Vec<Vec<f64>> = if current.is_empty() {
        vec![vec![0.25]; 2]
    } else {
        current
            .iter()
            .map(|row| row.as_array().unwrap().iter().map(|v| v.as_f64().unwrap() + 1.0).collect())
            .collect()
    };
    if let Some(experiment) = api.experiments.iter_mut().find(|experiment| experiment["experimentId"] == id) {
        experiment["population"] = json!(next);
    }
    envelope(&json!({ "population": next })).into_response()
}

async fn spawn_fake() -> (String, Shared) {
    let api = Shared::default();
    let app = Router::new()
        .route("/experiments", post(create).get(read).delete(remove))
        .route("/experiments/ongoing", post(advance))
        .with_state(api.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), api)
}

struct Run {
    success: bool,
    stdout: String,
    stderr: String,
}

impl Run {
    fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

async fn cli(base_url: &str, user_id: Option<&str>, args: &[&str]) -> Run {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_cloudlab-cli"));
    command.env_remove("CLOUDLAB_USER_ID").env_remove("RUST_LOG").arg("--api-url").arg(base_url);
    if let Some(user_id) = user_id {
        command.arg("--user-id").arg(user_id);
    }
    let output = command.args(args).output().await.unwrap();
    Run {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

const CREATE_E1: &[&str] = &["create", "--name", "E1", "--goal", "minimize", "--population-size", "2", "--var", "x:continuous:0:10"];

#[tokio::test]
async fn created_experiment_appears_in_list() {
    let (url, _api) = spawn_fake().await;

    let created = cli(&url, Some("u-1"), CREATE_E1).await;
    assert!(created.success, "{}", created.stderr);
    assert_eq!(created.json()["experimentId"], "e-1");
    assert!(created.stderr.contains("Experiment saved successfully."));

    let listed = cli(&url, Some("u-1"), &["list"]).await;
    assert!(listed.success, "{}", listed.stderr);
    let items = listed.json();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["experimentName"], "E1");
    assert_eq!(items[0]["populationSize"], 2);
    assert_eq!(items[0]["goal"], "minimize");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_api() {
    let (url, api) = spawn_fake().await;

    let run = cli(&url, Some("u-1"), &["create", "--name", "E1", "--population-size", "0", "--var", "x:continuous:10:0"]).await;

    assert!(!run.success);
    assert!(run.stderr.contains("experiment rejected"), "{}", run.stderr);
    assert_eq!(api.lock().unwrap().requests, 0);
}

#[tokio::test]
async fn list_without_user_id_fails_before_any_request() {
    let (url, api) = spawn_fake().await;

    let run = cli(&url, None, &["list"]).await;

    assert!(!run.success);
    assert!(run.stderr.contains("Could not identify user"), "{}", run.stderr);
    assert_eq!(api.lock().unwrap().requests, 0);
}

#[tokio::test]
async fn empty_list_reports_no_experiments() {
    let (url, _api) = spawn_fake().await;

    let run = cli(&url, Some("nobody"), &["list"]).await;

    assert!(run.success, "{}", run.stderr);
    assert_eq!(run.json(), json!([]));
    assert!(run.stderr.contains("No experiments found."));
}

#[tokio::test]
async fn advance_sends_scores_and_prints_next_generation() {
    let (url, api) = spawn_fake().await;
    assert!(cli(&url, Some("u-1"), CREATE_E1).await.success);

    let shown = cli(&url, None, &["show", "e-1"]).await;
    assert!(shown.success, "{}", shown.stderr);
    assert_eq!(shown.json()["population"], json!([[0.5], [0.5]]));

    let run = cli(&url, None, &["advance", "e-1", "--scores", "3.5,-2.1"]).await;

    assert!(run.success, "{}", run.stderr);
    assert_eq!(run.json()["population"], json!([[1.5], [1.5]]));
    assert_eq!(api.lock().unwrap().last_scores, Some(json!([3.5, -2.1])));
}

#[tokio::test]
async fn empty_population_advances_without_scores() {
    let (url, api) = spawn_fake().await;
    api.lock().unwrap().experiments.push(json!({
        "experimentId": "e-empty",
        "userId": "u-1",
        "experimentName": "Fresh",
        "goal": "maximize",
        "populationSize": 2,
        "variables": [{ "name": "x", "type": "continuous", "min": "0", "max": "1" }],
        "population": []
    }));

    let shown = cli(&url, None, &["show", "e-empty"]).await;
    assert!(shown.success, "{}", shown.stderr);
    assert!(shown.stderr.contains("No population"), "{}", shown.stderr);

    let run = cli(&url, None, &["advance", "e-empty"]).await;

    assert!(run.success, "{}", run.stderr);
    assert_eq!(run.json()["population"], json!([[0.25], [0.25]]));
    assert_eq!(api.lock().unwrap().last_scores, Some(json!([])));
}

#[tokio::test]
async fn missing_scores_for_a_populated_generation_are_counted() {
    let (url, api) = spawn_fake().await;
    assert!(cli(&url, Some("u-1"), CREATE_E1).await.success);

    let run = cli(&url, None, &["advance", "e-1"]).await;

    assert!(!run.success);
    assert!(run.stderr.contains("expected 2 fitness score(s)"), "{}", run.stderr);
    assert!(api.lock().unwrap().last_scores.is_none());
}

#[tokio::test]
async fn unset_score_blocks_advance_without_request() {
    let (url, api) = spawn_fake().await;
    assert!(cli(&url, Some("u-1"), CREATE_E1).await.success);
    let before = api.lock().unwrap().requests;

    let run = cli(&url, None, &["advance", "e-1", "--scores", "3.5,abc"]).await;

    assert!(!run.success);
    assert!(run.stderr.contains("fitness"), "{}", run.stderr);
    // Only the fetch of the current generation reached the API.
    assert_eq!(api.lock().unwrap().requests, before + 1);
    assert!(api.lock().unwrap().last_scores.is_none());
}

#[tokio::test]
async fn delete_removes_exactly_the_named_experiment() {
    let (url, api) = spawn_fake().await;
    assert!(cli(&url, Some("u-1"), CREATE_E1).await.success);
    assert!(cli(&url, Some("u-1"), CREATE_E1).await.success);

    let run = cli(&url, None, &["delete", "e-1", "--yes"]).await;

    assert!(run.success, "{}", run.stderr);
    let remaining: Vec<Value> = api.lock().unwrap().experiments.iter().map(|e| e["experimentId"].clone()).collect();
    assert_eq!(remaining, vec![json!("e-2")]);
}

#[tokio::test]
async fn missing_experiment_reports_load_failure() {
    let (url, _api) = spawn_fake().await;

    let run = cli(&url, None, &["show", "e-404"]).await;

    assert!(!run.success);
    assert!(run.stderr.contains("could not load experiment"), "{}", run.stderr);
}
