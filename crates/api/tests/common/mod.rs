#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use jobly_api::auth::jwt::{generate_access_token, JwtConfig};
use jobly_api::config::ServerConfig;
use jobly_api::router::build_app_router;
use jobly_api::state::AppState;
use jobly_db::models::job::{CreateJob, Job};
use jobly_db::repositories::JobRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Token for `u2`, an admin.
pub fn admin_token() -> String {
    generate_access_token("u2", true, &test_config().jwt).unwrap()
}

/// Token for `u1`, a regular user.
pub fn user_token() -> String {
    generate_access_token("u1", false, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert companies `c1`..`c3` and the four reference jobs.
///
/// Returns the jobs in insertion order (`j1`..`j4`).
pub async fn seed(pool: &PgPool) -> Vec<Job> {
    for (handle, name, employees) in [("c1", "C1", 1), ("c2", "C2", 2), ("c3", "C3", 3)] {
        sqlx::query(
            "INSERT INTO companies (handle, name, num_employees, description, logo_url)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(handle)
        .bind(name)
        .bind(employees)
        .bind(format!("Desc{employees}"))
        .bind(format!("http://{handle}.img"))
        .execute(pool)
        .await
        .unwrap();
    }

    let mut jobs = Vec::new();
    for (title, salary, equity, company_handle) in [
        ("j1", 100_000, "0", "c1"),
        ("j2", 50_000, "0.5", "c1"),
        ("j3", 1_000_000, "0", "c2"),
        ("j4", 200_000, "0", "c3"),
    ] {
        let input = CreateJob {
            title: title.to_string(),
            salary: Some(salary),
            equity: Some(Decimal::from_str(equity).unwrap()),
            company_handle: company_handle.to_string(),
        };
        jobs.push(JobRepo::create(pool, &input).await.unwrap());
    }
    jobs
}

/// Titles from a `{ "jobs": [...] }` body, sorted.
pub fn titles(json: &serde_json::Value) -> Vec<String> {
    let mut titles: Vec<String> = json["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort_unstable();
    titles
}
