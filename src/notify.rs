use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::NotifyConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("No notification sink configured")]
    NotConfigured,

    #[error("Notification transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notification sink rejected message with status {0}")]
    Rejected(u16),
}

/// Onboarding message for a newly created account
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeMessage {
    pub to: String,
    pub name: String,
    pub password: String,
    pub school_name: String,
}

impl WelcomeMessage {
    pub fn subject(&self) -> String {
        format!("Welcome to {}", self.school_name)
    }

    pub fn body(&self) -> String {
        format!(
            "Welcome to {}, {}\n\nYour portal credentials:\nEmail: {}\nPassword: {}\n\nPlease change your password after signing in.\n",
            self.school_name, self.name, self.to, self.password
        )
    }
}

/// Outbound delivery of account notifications. Delivery is best-effort: callers
/// treat any error as "not delivered" and never undo their own work because of it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError>;
}

/// Used when no sink is configured; every send reports `NotConfigured`
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_welcome(&self, _message: &WelcomeMessage) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured)
    }
}

/// Posts messages as JSON to a mail-relay webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    from: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, from: Option<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            url: url.into(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError> {
        let payload = json!({
            "from": self.from,
            "to": message.to,
            "subject": message.subject(),
            "text": message.body(),
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status().as_u16()));
        }

        tracing::info!("Welcome notification delivered to {}", message.to);
        Ok(())
    }
}

/// Pick the sink described by configuration
pub fn from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match &config.webhook_url {
        Some(url) => match WebhookNotifier::new(url.clone(), config.from.clone()) {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                tracing::warn!("Notification webhook unavailable, notifications disabled: {}", e);
                Arc::new(DisabledNotifier)
            }
        },
        None => Arc::new(DisabledNotifier),
    }
}
