use std::sync::Arc;

use crate::auth::{AuthError, TokenIssuer};
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::notify::Notifier;
use crate::services::{AccountService, ChannelService, LeaveService, StatsService, SubmissionService};
use crate::uploads::UploadStore;

/// Everything a request handler can reach. Built once at startup and cloned
/// into every request by axum.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseManager,
    pub tokens: Arc<TokenIssuer>,
    pub accounts: AccountService,
    pub leave: LeaveService,
    pub submissions: SubmissionService,
    pub channel: ChannelService,
    pub stats: StatsService,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseManager, notifier: Arc<dyn Notifier>) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::from_config(&config.security)?;
        let pool = db.pool().clone();

        Ok(Self {
            accounts: AccountService::new(pool.clone(), config.security.bcrypt_cost),
            leave: LeaveService::new(pool.clone()),
            submissions: SubmissionService::new(pool.clone(), UploadStore::new(&config.uploads)),
            channel: ChannelService::new(pool.clone()),
            stats: StatsService::new(pool),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
            db,
            notifier,
        })
    }
}
