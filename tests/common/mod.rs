#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

use staff_portal::auth::{Claims, TokenIssuer};
use staff_portal::config::{AppConfig, UploadConfig};
use staff_portal::database::DatabaseManager;
use staff_portal::notify::{DisabledNotifier, Notifier, NotifyError, WelcomeMessage};
use staff_portal::AppState;

pub const PASSWORD: &str = "password123";
pub const JWT_SECRET: &str = "integration-test-secret";

/// Keeps every welcome message instead of delivering it
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<WelcomeMessage>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError> {
        self.sent.lock().expect("notifier lock").push(message.clone());
        Ok(())
    }
}

/// One in-process server over a private in-memory database and upload dir.
/// Each `#[tokio::test]` has its own runtime, so each test gets its own server.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub uploads: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}, Arc::new(DisabledNotifier)).await
    }

    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig), notifier: Arc<dyn Notifier>) -> Result<Self> {
        let uploads = tempfile::tempdir().context("failed to create upload dir")?;

        let mut config = AppConfig::development();
        config.database.url = "sqlite::memory:".to_string();
        config.security.jwt_secret = JWT_SECRET.to_string();
        config.security.bcrypt_cost = 4;
        config.api.enable_request_logging = false;
        config.uploads = UploadConfig {
            dir: uploads.path().to_path_buf(),
            ..UploadConfig::default()
        };
        configure(&mut config);

        let db = DatabaseManager::in_memory().await.context("failed to open in-memory database")?;
        let state = AppState::new(config, db, notifier).context("failed to build app state")?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;

        let app = staff_portal::app(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
            uploads,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: Value) -> Result<reqwest::Response> {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn put_json(&self, path: &str, token: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self.client.put(self.url(path)).bearer_auth(token).json(&body).send().await?)
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    pub async fn delete_json(&self, path: &str, token: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).json(&body).send().await?)
    }

    /// Self-register a staff account and log it in; returns the token
    pub async fn staff_token(&self, email: &str) -> Result<String> {
        let res = self
            .post_json(
                "/api/staff/signup",
                None,
                json!({ "name": "Test Staff", "email": email, "password": PASSWORD }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "staff signup failed: {}", res.status());
        self.login("/api/staff/login", email, PASSWORD).await
    }

    /// Self-register an admin account; the signup response carries the token
    pub async fn admin_token(&self, email: &str) -> Result<String> {
        let res = self
            .post_json(
                "/api/admin/signup",
                None,
                json!({ "name": "Test Admin", "email": email, "password": PASSWORD, "role": "admin" }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "admin signup failed: {}", res.status());
        let body: Value = res.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("admin signup returned no token")
    }

    pub async fn login(&self, path: &str, email: &str, password: &str) -> Result<String> {
        let res = self
            .post_json(path, None, json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login returned no token")
    }
}

/// Verify a token with the secret the test servers sign with
pub fn token_claims(token: &str) -> Result<Claims> {
    let issuer = TokenIssuer::new(JWT_SECRET, None)?;
    Ok(issuer.verify(token)?)
}
