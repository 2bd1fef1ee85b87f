use anyhow::{bail, Context, Result};
use tokio::net::TcpListener;

use crate::http::backend::Backend;
use crate::validation::Gateway;
use crate::Config;

/// Start the HTTP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;

    serve_listener(listener, config).await
}

/// Serve the gateway on an already bound listener until Ctrl-C
pub async fn serve_listener(listener: TcpListener, config: Config) -> Result<()> {
    if !config.tmp_dir.is_dir() {
        bail!(
            "scratch directory {} does not exist",
            config.tmp_dir.display()
        );
    }

    log::info!(
        "listening on {} (w3cgrep: {}, yangre: {}, scratch dir: {})",
        listener.local_addr()?,
        config.w3cgrep.program.display(),
        config.yangre.program.display(),
        config.tmp_dir.display()
    );

    let app = Backend::new(Gateway::new(&config)).router();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    Ok(())
}

/// Configured level first, `RUST_LOG` on top
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level).parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutdown requested");
}
