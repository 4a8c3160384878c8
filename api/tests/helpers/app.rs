use api::auth::generate_jwt;
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
};
use db::models::admin::Model as AdminModel;
use db::models::subject::Model as SubjectModel;
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::LifecycleSettings;
use services::remote_repository::InMemoryRepository;
use services::test_utils::{RecordingNotifier, memory_repository};
use std::sync::Arc;
use tower::ServiceExt;
use util::config::AppConfig;

pub const TEST_JWT_SECRET: &str = "test-secret";

/// A router over an in-memory database, repository and notifier, with handles kept
/// for inspection.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub repo: Arc<InMemoryRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn make_test_app() -> TestApp {
    make_test_app_with(RecordingNotifier::new()).await
}

pub async fn make_test_app_with(notifier: RecordingNotifier) -> TestApp {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);

    let db = setup_test_db().await;
    let repo = Arc::new(memory_repository());
    let notifier = Arc::new(notifier);
    let state = AppState::new(
        db,
        repo.clone(),
        notifier.clone(),
        LifecycleSettings::default(),
    );

    TestApp {
        app: Router::new().nest("/api", routes(state.clone())),
        state,
        repo,
        notifier,
    }
}

impl TestApp {
    /// Registers an admin directly and returns a bearer token for it.
    pub async fn admin_token(&self) -> String {
        let admin = AdminModel::create(self.state.db(), "admin@portal.test", "password123")
            .await
            .unwrap();
        generate_jwt(admin.id, true).unwrap().0
    }

    pub async fn subject(&self, name: &str, semester: &str) -> SubjectModel {
        SubjectModel::create(self.state.db(), name, None, semester)
            .await
            .unwrap()
    }

    /// Sends one request and returns the status with the decoded JSON body.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
