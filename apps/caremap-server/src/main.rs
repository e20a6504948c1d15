mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{Json, Router, routing::get};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use secrecy::ExposeSecret;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use caremap_auth::TokenService;
use health_records::api::rest::ApiDoc;
use health_records::{Migrator, build_router};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// CareMap - healthcare records service
#[derive(Parser)]
#[command(name = "caremap-server")]
#[command(about = "CareMap - healthcare records service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.logging.filter, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn init_logging(filter: &str, verbose: u8) {
    let directives = match verbose {
        0 => filter.to_owned(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directives))
        .init();
}

fn check_config(config: &AppConfig) -> Result<()> {
    if config.auth.jwt_secret.expose_secret() == "dev-secret-change-me" {
        tracing::warn!("auth.jwt_secret is the development default");
    }
    tracing::info!("configuration OK");
    println!("{config:#?}");
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db = connect(&config).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("database migrated");

    let tokens = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        chrono::Duration::minutes(config.auth.access_ttl_minutes),
        chrono::Duration::days(config.auth.refresh_ttl_days),
    ));

    let app: Router = build_router(&db, &tokens)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "caremap server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database.url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options).await?;
    Ok(db)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
