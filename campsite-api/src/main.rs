//! Campsite API Main Entry Point
//!
//! Seeds the default site content, then serves it over HTTP until stopped.

use campsite_api::{
    config::LogFormat,
    server::{create_app, run_server, shutdown_signal, AppState},
    ApiConfig, AppError, Dependencies, Seeder,
};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("campsite_api=info,campsite_repository=info,tower_http=info")
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .init();

            info!(
                service_name = "campsite-api",
                service_version = env!("CARGO_PKG_VERSION"),
                "Tracing initialized with JSON format"
            );
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
                .init();

            info!(
                service_name = "campsite-api",
                service_version = env!("CARGO_PKG_VERSION"),
                "Tracing initialized with console output"
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    // Tracing needs the log format, so it starts before config errors are reported
    let config = ApiConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|config| config.log_format)
            .unwrap_or_default(),
    );
    let config = config.inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    info!("Starting Campsite API");

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    // Seed before accepting traffic so readers never see an empty store
    if let Err(e) = Seeder::new(deps.store.clone()).run().await {
        error!(error = %e, "Seeding failed");
        deps.shutdown().await;
        return Err(e.into());
    }

    let app = create_app(AppState::new(deps.store.clone()), &config);
    let result = run_server(app, config.bind_addr, shutdown_signal()).await;

    deps.shutdown().await;

    match result {
        Ok(()) => {
            info!("Campsite API stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Server failed");
            Err(e)
        }
    }
}
