//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging.
///
/// Log levels are configurable via the `RUST_LOG` env var; the default
/// keeps the lobby chatty and the HTTP plumbing quiet. The subscriber also
/// captures `log` records emitted by the `card_lobby` library.
///
/// # Example
///
/// ```no_run
/// use cl_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}
