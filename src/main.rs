//! Status service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use idle_api::api::{create_router, AppState};
use idle_api::config::{Config, LogFormat};
use idle_api::metrics;
use idle_api::status::StatusHolder;
use idle_api::utils::shutdown_signal;

/// Single-resource HTTP status service.
#[derive(Parser, Debug)]
#[command(name = "idle-api")]
#[command(about = "Serves one in-memory status string over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    config.verbose |= args.verbose;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { port, host }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            cmd_serve(config).await
        }
        None => cmd_serve(config).await,
    }
}

/// Install the global tracing subscriber.
fn init_logging(config: &Config, format: LogFormat) {
    let filter = if config.verbose {
        EnvFilter::new("idle_api=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with((format == LogFormat::Text).then(fmt::layer))
        .with((format == LogFormat::Json).then(|| fmt::layer().json()))
        .init();
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("IDLE API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Initial Status: {:?}", config.initial_status);
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let format = config.log_format()?;
    init_logging(&config, format);

    // Validate configuration
    let addr = config.socket_addr().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    // Create app state
    let mut app_state = AppState::new(StatusHolder::new(config.initial_status.clone()));

    if config.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => app_state = app_state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled: {}", e),
        }
    }

    info!("Initial status: {:?}", config.initial_status);

    // Start HTTP server
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
