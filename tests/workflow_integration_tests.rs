//! Integration Tests for the Onboarding Workflow
//!
//! Runs the HTTP client and workflow against an in-process fake of the
//! remote API and checks the requests it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use space_onboard::{HttpFoyerClient, SpaceOnboarding, SyncError, WorkflowSettings};

const API_KEY: &str = "test-key";

// == Fake API ==

#[derive(Default)]
struct FakeState {
    users: Vec<Value>,
    spaces: Vec<Value>,
    created_clients: Vec<Value>,
    uploads: Vec<(String, String, usize)>,
    group_lookups: usize,
    fail_user_search: bool,
    fail_space_create: bool,
    fail_upload: bool,
    garble_group_lookup: bool,
}

type Shared = Arc<Mutex<FakeState>>;

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", API_KEY);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn search_users(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let state = state.lock().unwrap();
    if state.fail_user_search {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let query = params.get("query").cloned().unwrap_or_default();
    let results: Vec<Value> = state
        .users
        .iter()
        .filter(|u| u["email"] == query.as_str())
        .cloned()
        .collect();
    Ok(Json(json!({ "count": results.len(), "results": results })))
}

async fn create_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut state = state.lock().unwrap();
    let user = json!({
        "id": format!("u-{}", state.users.len() + 1),
        "first_name": body["first_name"],
        "last_name": body["last_name"],
        "email": body["email"],
    });
    state.created_clients.push(body);
    state.users.push(user.clone());
    Ok(Json(user))
}

async fn all_staff_group(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(status) = authorized(&headers) {
        return status.into_response();
    }
    let mut state = state.lock().unwrap();
    state.group_lookups += 1;
    if state.garble_group_lookup {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    Json(json!({ "id": "g-staff", "name": "All Staff" })).into_response()
}

async fn search_spaces(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let user_id = body["member_filters"][0]["user_id"].clone();
    let state = state.lock().unwrap();
    let results: Vec<Value> = state
        .spaces
        .iter()
        .filter(|s| {
            s["members"]["users"]
                .as_array()
                .map_or(false, |users| users.contains(&user_id))
        })
        .map(|s| json!({ "id": s["id"], "name": s["name"] }))
        .collect();
    Ok(Json(json!({ "count": results.len(), "results": results })))
}

async fn create_space(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let mut state = state.lock().unwrap();
    if state.fail_space_create {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let id = format!("s-{}", state.spaces.len() + 1);
    let mut stored = body.clone();
    stored["id"] = json!(id);
    state.spaces.push(stored);
    Ok(Json(json!({ "id": id, "name": body["name"] })))
}

async fn upload_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(space_id): UrlPath<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let name = params.get("name").cloned().unwrap_or_default();
    let mut state = state.lock().unwrap();
    if state.fail_upload {
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }
    state.uploads.push((space_id, name.clone(), body.len()));
    Ok(Json(json!({
        "id": format!("f-{}", state.uploads.len()),
        "name": name,
        "size": body.len(),
        "created_at": "2024-03-01T12:00:00Z",
    })))
}

// == Helper Functions ==

async fn spawn_fake_api(state: Shared) -> String {
    let app = Router::new()
        .route("/api/users", get(search_users))
        .route("/api/users/clients", post(create_client))
        .route("/api/groups/all-staff", get(all_staff_group))
        .route("/api/spaces/search", post(search_spaces))
        .route("/api/spaces", post(create_space))
        .route("/api/spaces/:id/files", post(upload_file))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn create_workflow(state: Shared, key: &str) -> SpaceOnboarding<HttpFoyerClient> {
    let url = spawn_fake_api(state).await;
    let client = HttpFoyerClient::new(url, key, Duration::from_secs(5)).unwrap();
    SpaceOnboarding::new(client, WorkflowSettings::default())
}

fn sample_file() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"))
}

// == End-to-end Tests ==

#[tokio::test]
async fn test_new_client_gets_space_and_file() {
    let state = Shared::default();
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let file = workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await
        .unwrap();

    let file_len = std::fs::metadata(sample_file()).unwrap().len();
    assert_eq!(file.name, "TestFile.json");
    assert_eq!(file.size, Some(file_len));
    assert!(file.created_at.is_some());

    let state = state.lock().unwrap();
    assert_eq!(state.created_clients.len(), 1);
    assert_eq!(
        state.created_clients[0],
        json!({
            "first_name": "First",
            "last_name": "Last",
            "email": "test@example.com",
            "make_default_space": false,
            "send_registration_email": false,
        })
    );

    assert_eq!(state.spaces.len(), 1);
    assert_eq!(state.spaces[0]["name"], "Quarterly Report");
    assert_eq!(state.spaces[0]["members"]["users"], json!(["u-1"]));
    assert_eq!(state.spaces[0]["members"]["groups"], json!(["g-staff"]));

    assert_eq!(
        state.uploads,
        vec![("s-1".to_string(), "TestFile.json".to_string(), file_len as usize)]
    );
}

#[tokio::test]
async fn test_existing_client_is_not_recreated() {
    let state = Shared::default();
    state.lock().unwrap().users.push(json!({
        "id": "u-42",
        "first_name": "Existing",
        "last_name": "Client",
        "email": "test@example.com",
    }));
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let user = workflow
        .add_or_get_client("First", "Last", "test@example.com")
        .await
        .unwrap();

    assert_eq!(user.id, "u-42");
    assert_eq!(user.first_name, "Existing");
    assert!(state.lock().unwrap().created_clients.is_empty());
}

#[tokio::test]
async fn test_existing_space_is_reused() {
    let state = Shared::default();
    let workflow = create_workflow(state.clone(), API_KEY).await;

    workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await
        .unwrap();
    workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await
        .unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.users.len(), 1);
    assert_eq!(state.spaces.len(), 1);
    assert_eq!(state.group_lookups, 1);
    assert_eq!(state.uploads.len(), 2);
    assert!(state.uploads.iter().all(|(space, _, _)| space == "s-1"));
}

#[tokio::test]
async fn test_all_staff_group_fetched_once_per_workflow() {
    let state = Shared::default();
    let workflow = create_workflow(state.clone(), API_KEY).await;

    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        let user = workflow.add_or_get_client("A", "B", email).await.unwrap();
        workflow.add_or_get_space_for_user(&user.id).await.unwrap();
    }

    assert_eq!(state.lock().unwrap().spaces.len(), 3);
    assert_eq!(state.lock().unwrap().group_lookups, 1);
    let stats = workflow.all_staff_group_stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
}

#[tokio::test]
async fn test_separate_workflows_do_not_share_cache() {
    let state = Shared::default();
    let first = create_workflow(state.clone(), API_KEY).await;
    let second = create_workflow(state.clone(), API_KEY).await;

    first.create_space_for_user("u-1").await.unwrap();
    second.create_space_for_user("u-2").await.unwrap();

    assert_eq!(state.lock().unwrap().group_lookups, 2);
}

// == Failure Tests ==

#[tokio::test]
async fn test_bad_key_is_lookup_error() {
    let state = Shared::default();
    let workflow = create_workflow(state.clone(), "wrong-key").await;

    let result = workflow.find_user("test@example.com").await;
    match result {
        Err(SyncError::Lookup(message)) => assert!(message.contains("401")),
        other => panic!("expected lookup error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_failure_aborts_workflow() {
    let state = Shared::default();
    state.lock().unwrap().fail_user_search = true;
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let result = workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await;

    assert!(matches!(result, Err(SyncError::Lookup(_))));
    let state = state.lock().unwrap();
    assert!(state.created_clients.is_empty());
    assert!(state.uploads.is_empty());
}

#[tokio::test]
async fn test_space_creation_failure_leaves_user() {
    let state = Shared::default();
    state.lock().unwrap().fail_space_create = true;
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let result = workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await;

    match result {
        Err(SyncError::Creation(message)) => assert!(message.contains("422")),
        other => panic!("expected creation error, got {:?}", other),
    }
    let state = state.lock().unwrap();
    assert_eq!(state.users.len(), 1);
    assert!(state.spaces.is_empty());
    assert!(state.uploads.is_empty());
}

#[tokio::test]
async fn test_rejected_upload_is_upload_error() {
    let state = Shared::default();
    state.lock().unwrap().fail_upload = true;
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let result = workflow
        .add_file_to_client_space("First", "Last", "test@example.com", sample_file())
        .await;

    match result {
        Err(SyncError::Upload(message)) => assert!(message.contains("413")),
        other => panic!("expected upload error, got {:?}", other),
    }
    let state = state.lock().unwrap();
    assert_eq!(state.users.len(), 1);
    assert_eq!(state.spaces.len(), 1);
    assert!(state.uploads.is_empty());
}

#[tokio::test]
async fn test_undecodable_body_is_json_error() {
    let state = Shared::default();
    state.lock().unwrap().garble_group_lookup = true;
    let workflow = create_workflow(state.clone(), API_KEY).await;

    let result = workflow.create_space_for_user("u-1").await;

    assert!(matches!(result, Err(SyncError::Json(_))));
    assert!(state.lock().unwrap().spaces.is_empty());
    assert!(!workflow.all_staff_group_stats().await.initialized);
}

#[tokio::test]
async fn test_unreachable_api_is_http_error() {
    // Bind then drop a listener to get a port nobody is serving.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        HttpFoyerClient::new(format!("http://{}", addr), API_KEY, Duration::from_secs(2)).unwrap();
    let workflow = SpaceOnboarding::new(client, WorkflowSettings::default());

    let result = workflow.find_space_for_user("u-1").await;
    assert!(matches!(result, Err(SyncError::Http(_))));
}
