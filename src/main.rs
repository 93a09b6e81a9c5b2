//! Pixelgate - on-demand image resize middleware server.
//!
//! This binary wires the resize middleware into an axum server that serves
//! materialized assets from the public root.

use std::process::ExitCode;

use axum::http::Uri;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pixelgate::{create_router, Config, MiddlewareBuilder, ServerMiddleware};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Source root: {}", config.source_root.display());
    info!("  Public root: {}", config.public_root.display());
    if let Some(ref extensions) = config.allowed_extensions {
        info!("  Allowed extensions: {}", extensions.join(", "));
    }
    if let Some(ref resolutions) = config.allowed_resolutions {
        let listed: Vec<String> = resolutions.iter().map(|r| r.to_string()).collect();
        info!("  Allowed resolutions: {}", listed.join(", "));
    }

    let middleware = match build_middleware(&config) {
        Ok(middleware) => middleware,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(middleware, !config.no_tracing);

    let bind_address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_address, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Listening on http://{}", bind_address);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn build_middleware(config: &Config) -> Result<ServerMiddleware, pixelgate::BuildError> {
    let mut builder = MiddlewareBuilder::<Uri>::new(&config.source_root, &config.public_root)
        .request_path(|uri: &Uri| Some(uri.path().to_string()));

    if let Some(extensions) = config.allowed_extensions.clone() {
        builder = builder.allowed_extensions(extensions)?;
    }
    if let Some(resolutions) = config.allowed_resolutions.clone() {
        builder = builder.allowed_resolutions(resolutions)?;
    }

    builder.build()
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pixelgate=debug,tower_http=debug"
    } else {
        "pixelgate=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
