pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use cli::{Cli, Commands};
pub use config::Config;
use services::AdminProvisioning;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: &Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config)?;

    match cli.command() {
        Commands::Serve => run_server(config).await,
        Commands::CreateAdmin {
            email,
            username,
            password,
        } => cmd_create_admin(config, &email, &username, &password).await,
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let json = config.general.log_json;
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer));

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key, value)?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Cosmorate v{} starting...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);

    if shared
        .auth_service
        .ensure_bootstrap_admin(&shared.config.bootstrap)
        .await
        .context("Failed to provision bootstrap administrator")?
    {
        info!("Bootstrap administrator created");
    }

    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

async fn cmd_create_admin(
    config: Config,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let outcome = shared
        .auth_service
        .create_admin(email, username, password)
        .await?;

    match outcome {
        AdminProvisioning::Created => println!("Created administrator {email}"),
        AdminProvisioning::Promoted => println!("Promoted {email} to administrator"),
        AdminProvisioning::AlreadyAdmin => println!("{email} is already an administrator"),
    }

    Ok(())
}
