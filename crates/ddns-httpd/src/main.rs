// # ddns-httpd - DDNS update endpoint daemon
//
// Thin integration layer: reads configuration from the environment,
// wires the Cloudflare client into the reconciler, and serves the
// single update route. All decision logic lives in ddns-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `DDNS_ZONE_ID`: Cloudflare zone the managed records live in
// - `DDNS_API_EMAIL`: account email (sent as X-Auth-Email)
// - `DDNS_API_KEY`: API key (sent as X-Auth-Key)
// - `DDNS_PASSWORD`: shared secret checked against the `pwd` parameter
// - `DDNS_LISTEN_ADDR`: bind address (default 0.0.0.0:8080)
// - `DDNS_LOG_LEVEL`: trace|debug|info|warn|error (default info)
//
// ## Example
//
// ```bash
// export DDNS_ZONE_ID=023e105f4ecef8ad9ca31a8372d0c353
// export DDNS_API_EMAIL=ops@example.com
// export DDNS_API_KEY=your_key
// export DDNS_PASSWORD=your_shared_secret
//
// ddns-httpd
// ```

use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use ddns_core::{DdnsConfig, ProviderConfig, Reconciler};
use ddns_httpd::{AppState, router};
use ddns_provider_cloudflare::CloudflareClient;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum HttpdExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<HttpdExitCode> for ExitCode {
    fn from(code: HttpdExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    zone_id: String,
    api_email: String,
    api_key: String,
    password: String,
    listen_addr: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            zone_id: require("DDNS_ZONE_ID")?,
            api_email: require("DDNS_API_EMAIL")?,
            api_key: require("DDNS_API_KEY")?,
            password: require("DDNS_PASSWORD")?,
            listen_addr: env::var("DDNS_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            log_level: env::var("DDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate what the core config types don't cover
    fn validate(&self) -> Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "DDNS_LISTEN_ADDR '{}' is not a valid socket address. \
                Example: 0.0.0.0:8080",
                self.listen_addr
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the core configuration passed into every operation
    fn to_ddns_config(&self) -> DdnsConfig {
        DdnsConfig {
            provider: ProviderConfig::Cloudflare {
                zone_id: self.zone_id.clone(),
                api_email: self.api_email.clone(),
                api_key: self.api_key.clone(),
            },
            password: self.password.clone(),
        }
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        anyhow::anyhow!("{name} is required. Set it via: export {name}=<value>")
    })
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return HttpdExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        return HttpdExitCode::ConfigError.into();
    }

    let ddns_config = config.to_ddns_config();
    if let Err(e) = ddns_config.validate() {
        eprintln!("Configuration validation error: {e}");
        return HttpdExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return HttpdExitCode::ConfigError.into();
    }

    info!("Starting ddns-httpd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return HttpdExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        if let Err(e) = serve(&config.listen_addr, ddns_config).await {
            error!("Server error: {e}");
            HttpdExitCode::RuntimeError
        } else {
            HttpdExitCode::CleanShutdown
        }
    })
    .into()
}

/// Wire the components together and serve until shutdown
async fn serve(listen_addr: &str, ddns_config: DdnsConfig) -> Result<()> {
    info!(
        provider = ddns_config.provider.type_name(),
        "initializing record client"
    );
    let client = CloudflareClient::from_config(&ddns_config.provider)?;
    let reconciler = Reconciler::new(Box::new(client));

    let state = AppState {
        reconciler: Arc::new(reconciler),
        config: Arc::new(ddns_config),
    };

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolve when a shutdown signal (SIGTERM, SIGINT) arrives
#[cfg(unix)]
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to setup SIGTERM handler: {e}");
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sig) => sig,
        Err(e) => {
            error!("Failed to setup SIGINT handler: {e}");
            return;
        }
    };

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!("Received shutdown signal: {received}");
}

/// Resolve when CTRL-C arrives (non-Unix fallback)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for CTRL-C: {e}");
        return;
    }
    info!("Received shutdown signal: CTRL-C");
}
