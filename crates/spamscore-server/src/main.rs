//! spamscore Server
//!
//! Serves spam predictions over HTTP, or scores a single text from the
//! command line.

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use spamscore_classifiers::SpamModel;
use spamscore_server::{create_router, AppState, Cli, Commands, ScoreArgs, ServeArgs, ServerConfig};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Score(args) => score_once(args),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    init_tracing(args.verbose, args.json_logs);

    info!("Starting spamscore server");

    let mut config = ServerConfig::load(&args.config)?;
    config.apply_overrides((&args).into());
    config.validate()?;
    info!("Classifier: {}", config.model.classifier_path.display());
    info!("Vectorizer: {}", config.model.vectorizer_path.display());
    info!("Default threshold: {}", config.default_threshold);

    let metrics_handle = if config.metrics.enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.bind_address()))?;

    let mut state = AppState::load(config);
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }
    if !state.model_loaded() {
        warn!("Serving without a model; /score will answer 500 until restart");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn score_once(args: ScoreArgs) -> Result<()> {
    init_tracing(args.verbose, false);

    let mut config = ServerConfig::load(&args.config)?;
    config.apply_overrides((&args).into());
    config.validate()?;

    let model = SpamModel::load(&config.model).context("failed to load model")?;
    let score = model.score(&args.text, config.default_threshold)?;

    println!("{}", score.to_json()?);
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamscore=debug,spamscore_server=debug,spamscore_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spamscore=info,spamscore_server=info,spamscore_classifiers=info")
        })
    };

    // Logs go to stderr so `score` can print its JSON result on stdout.
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spamscore_requests_total",
        "Total number of /score requests by response status"
    );
    metrics::describe_counter!(
        "spamscore_predictions_total",
        "Total number of predictions by outcome"
    );
    metrics::describe_histogram!(
        "spamscore_scoring_latency_us",
        metrics::Unit::Microseconds,
        "Scoring latency in microseconds"
    );
    metrics::describe_counter!("spamscore_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
