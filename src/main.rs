mod config;
mod prompt;
mod protocol;
mod provider;
mod server;

use std::sync::Arc;

use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{normalize_addr, Config};
use provider::SamplingOptions;
use server::handlers::AppState;

#[tokio::main]
async fn main() {
    let matches = Config::command().get_matches();
    let config = Config::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Configure logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
        }
    }

    if matches.value_source("api_key") == Some(ValueSource::CommandLine) {
        warn!("provider API key provided via command-line flag - use PROVIDER_API_KEY env var in production");
    }

    let provider_config = Arc::new(config.provider_config(|name| std::env::var(name).ok()));

    if !provider_config.has_credential() {
        warn!(
            env = provider_config.kind.api_key_env(),
            "provider API key not configured - puzzle requests will fail until PROVIDER_API_KEY is set"
        );
    }

    // HTTP client for provider calls
    let http_client = match reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let provider = provider::from_config(&provider_config, http_client);

    info!(
        provider = provider.name(),
        model = provider.model(),
        base_url = provider_config.base_url.as_str(),
        prompt_style = %config.prompt_style,
        "using provider"
    );

    let state = Arc::new(AppState {
        provider,
        provider_config,
        prompt_style: config.prompt_style,
        sampling: SamplingOptions::creative(),
    });

    let app = server::build_router(state);

    let addr = normalize_addr(&config.addr);
    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        error!(addr = addr, error = %e, "failed to bind");
        std::process::exit(1);
    });

    info!(addr = addr, "server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "server error");
            std::process::exit(1);
        });

    info!("server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
