#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use merchant_api::config::AppConfig;
use merchant_api::database::Repositories;
use merchant_api::{app, AppState};

pub const PASSWORD: &str = "s3cret-pass";

/// Router over fresh in-memory repositories, driven in-process.
pub struct TestApp {
    pub router: Router,
    pub repos: Repositories,
    pub config: Arc<AppConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.storage.upload_dir = std::env::temp_dir()
            .join(format!("merchant-api-test-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();

        let config = Arc::new(config);
        let repos = Repositories::memory();
        let router = app(AppState::new(repos.clone(), config.clone()));
        Self { router, repos, config }
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.upload_dir)
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
        };
        Ok((status, body))
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.call(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.call(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.call(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.call(Method::DELETE, uri, Some(token), None).await
    }

    /// Register through the public endpoint, then log in. Returns (user id, token).
    pub async fn signup(&self, email: &str) -> Result<(Uuid, String)> {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "first_name": "Test",
                    "last_name": "Owner",
                    "email": email,
                    "password": PASSWORD,
                    "phone_number": "081234567",
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        let user_id = id_field(&body, "user_id")?;

        let (status, body) = self
            .call(
                Method::POST,
                "/api/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
        let token = body["data"]["access_token"]
            .as_str()
            .context("missing access_token")?
            .to_string();
        Ok((user_id, token))
    }

    pub async fn create_merchant(&self, token: &str, name: &str) -> Result<Uuid> {
        let (status, body) = self
            .post(
                "/api/merchants",
                token,
                json!({ "name": name, "institution_name": format!("{} Holdings", name), "phone_number": "0215550100" }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "merchant create failed: {} {}", status, body);
        id_field(&body, "merchant_id")
    }

    pub async fn create_outlet(&self, token: &str, merchant_id: Uuid, name: &str) -> Result<Uuid> {
        let (status, body) = self
            .post(
                "/api/outlets",
                token,
                json!({ "merchant_id": merchant_id, "name": name, "location": "Jakarta", "phone_number": "0215550101" }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "outlet create failed: {} {}", status, body);
        id_field(&body, "outlet_id")
    }

    pub async fn create_product(&self, token: &str, outlet_id: Uuid, name: &str, stock: i64) -> Result<Uuid> {
        let (status, body) = self
            .post(
                "/api/products",
                token,
                json!({ "outlet_id": outlet_id, "name": name, "description": "house blend", "stock": stock, "price": 15000.0 }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "product create failed: {} {}", status, body);
        id_field(&body, "product_id")
    }

    /// One user owning one merchant, one outlet and nothing else yet.
    pub async fn owner_with_outlet(&self, email: &str) -> Result<(String, Uuid, Uuid)> {
        let (_, token) = self.signup(email).await?;
        let merchant_id = self.create_merchant(&token, "Kopi Nusantara").await?;
        let outlet_id = self.create_outlet(&token, merchant_id, "Central").await?;
        Ok((token, merchant_id, outlet_id))
    }
}

pub fn id_field(body: &Value, field: &str) -> Result<Uuid> {
    let raw = body["data"][field]
        .as_str()
        .with_context(|| format!("missing data.{} in {}", field, body))?;
    Ok(Uuid::parse_str(raw)?)
}

pub fn assert_failed(body: &Value, message: &str) {
    assert_eq!(body["status"], "failed", "body: {}", body);
    assert_eq!(body["message"], message, "body: {}", body);
}
