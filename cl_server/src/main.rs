//! Card-game lobby server using the async actor model.
//!
//! This server spawns one SessionActor task per game session, managed by
//! the library's SessionManager, and exposes the four lobby operations
//! over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use card_lobby::session::SessionManager;
use cl_server::{api, logging};
use ctrlc::set_handler;
use pico_args::Arguments;

const HELP: &str = "\
Run a four-seat card-game lobby server

USAGE:
  cl_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  RUST_LOG                 Log filter (e.g., info,cl_server=debug)
";

struct Args {
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.value_from_str("--bind").unwrap_or_else(|_| {
            std::env::var("SERVER_BIND")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse()
                .expect("Invalid SERVER_BIND address")
        }),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();
    tracing::info!("Starting card-game lobby server at {}", args.bind);

    let session_manager = Arc::new(SessionManager::new());

    let api_state = api::AppState {
        session_manager: session_manager.clone(),
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", args.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        args.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!(
        "Shutting down with {} active session(s)",
        session_manager.active_session_count().await
    );

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
