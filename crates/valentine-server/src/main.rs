use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use valentine_api::notify::{Notifier, SmtpConfig, SmtpNotifier};
use valentine_api::state::AppStateInner;
use valentine_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "valentine=debug,valentine_server=debug,valentine_api=debug,valentine_db=debug,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Init database
    let db = valentine_db::Database::open(&config.db_path)?;

    let notifier: Option<Arc<dyn Notifier>> = match SmtpConfig::from_env() {
        Some(smtp) => match SmtpNotifier::new(&smtp) {
            Ok(n) => {
                info!("Email notifications enabled via {}:{}", smtp.host, smtp.port);
                Some(Arc::new(n))
            }
            Err(e) => {
                error!("Email notifications disabled: {}", e);
                None
            }
        },
        None => {
            info!("Email notifications disabled (SMTP_HOST / SMTP_FROM_EMAIL not set)");
            None
        }
    };

    if config.admin_key.is_empty() {
        info!("VALENTINE_ADMIN_KEY not set, activity log is readable by anyone");
    }

    let state = AppStateInner::new(db, config.admin_key.clone(), notifier);
    let app = valentine_server::app(state, &config.cors_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Valentine server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
