use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::auth::Role;
use crate::config::AppConfig;
use crate::database::models::NewAccount;
use crate::database::DatabaseManager;
use crate::services::AccountService;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "staff-portal")]
#[command(about = "Staff Portal - school staff administration API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Create the database file and schema, then exit")]
    InitDb,

    #[command(about = "Create an admin account")]
    CreateAdmin {
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Login email")]
        email: String,
        #[arg(long, help = "Initial password")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::InitDb => init_db(config, output_format).await,
        Commands::CreateAdmin { name, email, password } => {
            create_admin(config, NewAccount { name, email, password, role: Role::Admin }, output_format).await
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Staff Portal in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    db.init_schema().await.context("failed to create schema")?;

    let notifier = crate::notify::from_config(&config.notify);
    let port = config.api.port;
    let state = AppState::new(config, db.clone(), notifier).context("invalid security configuration")?;
    let app = crate::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Staff Portal listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    tracing::info!("Staff Portal stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn init_db(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    db.init_schema().await.context("failed to create schema")?;
    db.close().await;

    output_success(
        output_format,
        &format!("Database ready at {}", config.database.url),
        json!({ "database_url": config.database.url }),
    )
}

async fn create_admin(config: AppConfig, account: NewAccount, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    db.init_schema().await.context("failed to create schema")?;

    let accounts = AccountService::new(db.pool().clone(), config.security.bcrypt_cost);
    let email = account.email.trim().to_string();
    let result = accounts.register(account).await;
    db.close().await;

    let id = result.with_context(|| format!("could not create admin {}", email))?;

    output_success(
        output_format,
        &format!("Admin {} created with id {}", email, id),
        json!({ "id": id, "email": email, "role": Role::Admin }),
    )
}

/// Print a success message in the selected format
fn output_success(output_format: OutputFormat, message: &str, data: serde_json::Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "message": message,
                "data": data,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => println!("✓ {}", message),
    }
    Ok(())
}
