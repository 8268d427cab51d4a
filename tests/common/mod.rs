#![allow(dead_code)]

use association_backend::app::app::App;
use association_backend::config::{AdminUserConfig, Settings};
use association_backend::repository::Repositories;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

pub const ADMIN_EMAIL: &str = "bureau@asso.org";
pub const ADMIN_PASSWORD: &str = "changeme123";

pub struct TestApp {
    pub router: Router,
    pub repos: Repositories,
}

/// Full application on in-memory repositories, with the bootstrap Président seeded.
pub async fn spawn_app() -> TestApp {
    let settings = Settings {
        admin: Some(AdminUserConfig {
            name: "Présidente".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        ..Default::default()
    };
    let repos = Repositories::in_memory();
    let app = App::with_repositories(&settings, repos.clone());
    app.create_first_admin_user(settings.admin.as_ref()).await;
    TestApp {
        router: app.router(),
        repos,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(req).await
    }

    pub async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Registers a user, lets the Président grant `role` and signs in again.
    pub async fn token_for_role(&self, email: &str, role: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "name": "Test", "email": email, "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        let user_id = body["user"]["_id"].as_str().unwrap().to_string();

        if role != "Membre" {
            let admin = self.admin_token().await;
            let (status, body) = self
                .put(&format!("/api/users/{}/role", user_id), &admin, json!({ "role": role }))
                .await;
            assert_eq!(status, StatusCode::OK, "role update failed: {}", body);
        }

        let (status, body) = self.login(email, "secret1").await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a member as the Président and returns its id.
    pub async fn create_member(&self, token: &str, email: &str) -> String {
        let (status, body) = self.post("/api/membres", token, member_payload(email)).await;
        assert_eq!(status, StatusCode::CREATED, "member creation failed: {}", body);
        body["_id"].as_str().unwrap().to_string()
    }
}

pub fn member_payload(email: &str) -> Value {
    json!({
        "nom": "Dupont",
        "prenom": "Jean",
        "email": email,
        "adresse": "1 rue de la Paix",
        "telephone": "0600000000"
    })
}
