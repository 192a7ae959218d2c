//! Local preview of the built MkDocs site.

use anyhow::Context as _;
use axum::routing::get;
use envconfig::Envconfig;
use tokio::signal;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracking_setup();

    let config = Config::init_from_env().context("failed to get the config")?;

    if !config.served_dir_path.join("index.html").exists() {
        tracing::warn!(
            "no index.html in {}, run tablesite-generator first",
            config.served_dir_path.display()
        );
    }

    let addr = std::net::SocketAddrV4::new(config.addr, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on address: {}", addr))?;

    tracing::info!("serve {} at http://{}", config.served_dir_path.display(), addr);

    let app = router(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("failed to serve")
}

fn router(config: &Config) -> axum::Router {
    let not_found_service = ServeFile::new(
        config
            .served_dir_path
            .join(&config.not_found_page_file_path),
    );
    // pages are `report.csv.html` files (no directory urls), so paths are
    // served as-is; `/` still resolves to `index.html`
    let serve_dir = ServeDir::new(&config.served_dir_path).not_found_service(not_found_service);

    axum::Router::new()
        .route("/healthcheck/", get(async || "healthy"))
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
}

#[derive(Clone, Envconfig)]
pub struct Config {
    /// The IP address the server listens on.
    #[envconfig(from = "TABLESITE_WEB_ADDR", default = "127.0.0.1")]
    pub addr: std::net::Ipv4Addr,
    /// The port the server listens on.
    #[envconfig(from = "TABLESITE_WEB_PORT", default = "8080")]
    pub port: u16,
    /// The built site, i.e. the `site/` dir mkdocs writes into the project.
    #[envconfig(from = "TABLESITE_WEB_SERVED_DIR_PATH", default = "site_project/site")]
    pub served_dir_path: std::path::PathBuf,
    /// The file to serve when a requested file is not found.
    #[envconfig(from = "TABLESITE_WEB_NOT_FOUND_PAGE_FILE_PATH", default = "404.html")]
    pub not_found_page_file_path: std::path::PathBuf,
}

fn tracking_setup() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .inspect_err(|err| {
            tracing::warn!(
                error = ?err,
                "failed to read env RUST_LOG, fallback to default value"
            );
        })
        .unwrap_or_else(|_| "debug,hyper=off".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
