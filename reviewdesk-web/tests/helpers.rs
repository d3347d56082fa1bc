//! Integration test helpers
//!
//! Builds the full application router in-process and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reviewdesk_core::{AuthConfig, Identity, ReviewdeskConfig, Role};
use reviewdesk_web::{create_app, AppState};
use std::sync::LazyLock;
use tower::ServiceExt;

// Make sure tracing is only initialized once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application instance
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Seed users: manager `m1`, support `s1`, standard `c1`, banned manager `b1`
pub fn seed_users() -> Vec<Identity> {
    vec![
        Identity::new("m1", Role::Manager).with_email("manager@example.com"),
        Identity::new("s1", Role::Support).with_display_name("Support Sam"),
        Identity::new("c1", Role::Standard),
        Identity::new("b1", Role::Manager).banned(true),
    ]
}

pub fn test_config() -> ReviewdeskConfig {
    ReviewdeskConfig {
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            ..Default::default()
        },
        users: seed_users(),
        ..Default::default()
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: ReviewdeskConfig) -> TestApp {
    LazyLock::force(&TRACING);

    let state = AppState::new(config);
    TestApp {
        router: create_app(state.clone()),
        state,
    }
}

impl TestApp {
    /// Signed access token for `user_id`
    pub fn token_for(&self, user_id: &str) -> String {
        self.state
            .jwt
            .issue_access_token(user_id)
            .expect("Failed to issue token")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .expect("Failed to execute request.");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, authorization).await
    }

    pub async fn post(&self, uri: &str, authorization: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, authorization).await
    }

    /// GET as `user_id`, with a freshly issued bearer token
    pub async fn get_as(&self, uri: &str, user_id: &str) -> TestResponse {
        let header = format!("Bearer {}", self.token_for(user_id));
        self.get(uri, Some(&header)).await
    }

    /// POST as `user_id`, with a freshly issued bearer token
    pub async fn post_as(&self, uri: &str, user_id: &str) -> TestResponse {
        let header = format!("Bearer {}", self.token_for(user_id));
        self.post(uri, Some(&header)).await
    }
}
