/// Common test utilities for integration tests
///
/// The context builds the full router over the in-memory store, so the suite
/// exercises routing, validation, error mapping, and the membership rule
/// without a database.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::sync::Arc;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig};
use taskdeck_shared::models::{CreateProject, CreateTask, CreateUser, Project, Task, User};
use taskdeck_shared::store::{MemStore, Store};
use tower::Service as _;

/// Test context containing the app and a handle on its store
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemStore>,
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(MemStore::new());

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://unused-in-tests/taskdeck".to_string(),
                max_connections: 1,
            },
        };

        let state = AppState::new(store.clone() as Arc<dyn Store>, config);
        let app = build_router(state);

        TestContext { app, store }
    }

    /// Seeds a user directly through the store
    pub async fn seed_user(&self, name: &str, email: &str, password: &str) -> User {
        self.store
            .create_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
    }

    /// Seeds a project directly through the store
    pub async fn seed_project(&self, title: &str) -> Project {
        self.store
            .create_project(CreateProject {
                title: title.to_string(),
                description: None,
                order: 0,
            })
            .await
            .unwrap()
    }

    /// Seeds a task directly through the store
    pub async fn seed_task(&self, project_id: i64, title: &str, order: i32) -> Task {
        self.store
            .create_task(CreateTask {
                title: title.to_string(),
                description: None,
                order,
                project_id,
            })
            .await
            .unwrap()
    }

    /// Sends a request and returns the raw response
    pub async fn send(&self, request: Request<Body>) -> Response<axum::body::Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// GET helper returning status and parsed JSON body
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        parse_response(self.send(request).await).await
    }

    /// JSON-body helper for POST/PATCH/DELETE
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        parse_response(self.send(request).await).await
    }
}

/// Reads a response into (status, parsed JSON body)
pub async fn parse_response(
    response: Response<axum::body::Body>,
) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
