#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use scrumboard_api::config::{ServerConfig, StoreBackend};
use scrumboard_api::router::build_app_router;
use scrumboard_api::state::AppState;
use scrumboard_core::parent::ParentKind;
use scrumboard_core::validation::ItemFields;
use scrumboard_db::models::issue::{Issue, Todo};
use scrumboard_db::models::parent::ParentDoc;
use scrumboard_db::repositories::ParentRepo;
use scrumboard_db::store::{DocumentStore, MemoryStore};
use scrumboard_db::ObjectId;

/// A well-formed id that no fixture uses.
pub const UNKNOWN_ID: &str = "111111111111111111111111";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        mongodb_uri: String::new(),
        mongodb_database: String::new(),
    }
}

/// Build the full application router (same middleware stack as production)
/// on top of the given store.
pub fn build_test_app(store: scrumboard_db::Store) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

fn described(description: &str) -> ItemFields {
    ItemFields {
        description: Some(description.to_string()),
        ..ItemFields::default()
    }
}

/// Fresh, isolated data for one test.
///
/// - project one: backlog one (holds issue two), sprint one (holds issue one
///   with one todo), sprint two (empty)
/// - project two: backlog two (empty)
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub project_one: ObjectId,
    pub project_two: ObjectId,
    pub backlog_one: ObjectId,
    pub backlog_two: ObjectId,
    pub sprint_one: ObjectId,
    pub sprint_two: ObjectId,
    pub issue_one: Issue,
    pub issue_two: Issue,
    pub todo_one: Todo,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let project_one = ObjectId::new();
        let project_two = ObjectId::new();

        let todo_one = Todo {
            status: Some("open".to_string()),
            priority: Some("high".to_string()),
            ..Todo::new(described("First todo"))
        };
        let mut issue_one = Issue::new(described("First issue"));
        issue_one.todo.push(todo_one.clone());
        let issue_two = Issue::new(described("Second issue"));

        let mut backlog_one = ParentDoc::new(project_one, None);
        backlog_one.push_issue(issue_two.clone());
        let backlog_two = ParentDoc::new(project_two, None);

        let mut sprint_one = ParentDoc::new(project_one, Some("Sprint 1".to_string()));
        sprint_one.push_issue(issue_one.clone());
        let sprint_two = ParentDoc::new(project_one, Some("Sprint 2".to_string()));

        for (kind, doc) in [
            (ParentKind::Backlog, &backlog_one),
            (ParentKind::Backlog, &backlog_two),
            (ParentKind::Sprint, &sprint_one),
            (ParentKind::Sprint, &sprint_two),
        ] {
            store.insert(kind, doc).await.unwrap();
        }

        Self {
            store,
            project_one,
            project_two,
            backlog_one: backlog_one.id,
            backlog_two: backlog_two.id,
            sprint_one: sprint_one.id,
            sprint_two: sprint_two.id,
            issue_one,
            issue_two,
            todo_one,
        }
    }

    pub fn app(&self) -> Router {
        let store: scrumboard_db::Store = self.store.clone();
        build_test_app(store)
    }

    pub async fn doc(&self, kind: ParentKind, id: ObjectId) -> ParentDoc {
        ParentRepo::find_by_id(self.store.as_ref(), kind, id)
            .await
            .unwrap()
            .expect("fixture document exists")
    }

    pub async fn sprint(&self, id: ObjectId) -> ParentDoc {
        self.doc(ParentKind::Sprint, id).await
    }

    pub async fn backlog(&self, id: ObjectId) -> ParentDoc {
        self.doc(ParentKind::Backlog, id).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
