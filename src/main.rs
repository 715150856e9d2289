//! # Site Server - Entry Point
//! src/main.rs

use site_server::config::Config;
use site_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(2);
    }

    config.print_summary();

    let server = Server::new(config);

    // Bloquea el thread principal
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "fatal server error");
        std::process::exit(1);
    }
}
