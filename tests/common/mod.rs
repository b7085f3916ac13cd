#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use tower::ServiceExt;

use comptrack::api::UserInput;
use comptrack::config::AppConfig;
use comptrack::database::{Backend, InMemoryStore};
use comptrack::{app, AppState};

pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const ALICE_PASSWORD: &str = "alice-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub admin_id: i64,
    pub alice_id: i64,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// App over a fresh in-memory store with `admin` and `alice` seeded
    pub async fn spawn() -> TestApp {
        let mut app = TestApp::empty();

        app.admin_id = app.seed_user("admin", "admin@example.com", ADMIN_PASSWORD).await;
        app.alice_id = app.seed_user("alice", "alice@example.com", ALICE_PASSWORD).await;
        app
    }

    /// App over a fresh in-memory store with no users at all
    pub fn empty() -> TestApp {
        let config = AppConfig::development();
        let state = AppState::new(Backend::Memory(InMemoryStore::new()), config.security.realm.clone());
        let router = app(state.clone(), &config.security);

        TestApp {
            router,
            state,
            admin_id: 0,
            alice_id: 0,
        }
    }

    pub async fn seed_user(&self, username: &str, email: &str, password: &str) -> i64 {
        let user = self
            .state
            .users
            .create(UserInput {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .expect("seed user");
        user.id
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        credentials: Option<(&str, &str)>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some((username, password)) = credentials {
            let mut auth = HeaderMap::new();
            auth.typed_insert(Authorization::basic(username, password));
            for (name, value) in auth.iter() {
                builder = builder.header(name, value);
            }
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, headers, body }
    }

    pub async fn get_as(&self, uri: &str, user: (&str, &str)) -> TestResponse {
        self.request(Method::GET, uri, Some(user), None).await
    }

    pub async fn post_as(&self, uri: &str, user: (&str, &str), body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn put_as(&self, uri: &str, user: (&str, &str), body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(user), Some(body)).await
    }

    pub async fn delete_as(&self, uri: &str, user: (&str, &str)) -> TestResponse {
        self.request(Method::DELETE, uri, Some(user), None).await
    }
}

pub fn admin() -> (&'static str, &'static str) {
    ("admin", ADMIN_PASSWORD)
}

pub fn alice() -> (&'static str, &'static str) {
    ("alice", ALICE_PASSWORD)
}
