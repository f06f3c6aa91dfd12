use std::{net::SocketAddr, sync::Arc};

use portfolio_site::{
    analytics,
    config::Settings,
    contact::HttpContactBackend,
    content_loader::load_content,
    hot_reload::start_content_watcher,
    routes::router,
    state::{AppState, RouterState},
};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    info!(
        development = settings.is_development,
        content_dir = %settings.content_dir.display(),
        "Starting portfolio site"
    );

    let content = load_content(&settings.content_dir).await?;
    info!(
        posts = content.posts.len(),
        photos = content.photos.len(),
        "Content loaded"
    );

    let analytics = analytics::from_settings(&settings.analytics);
    if settings.backend_url.is_none() {
        info!("BACKEND_URL not set, contact submissions will fail");
    }
    let contact = Arc::new(HttpContactBackend::new(settings.backend_url.as_deref())?);

    let port = settings.port;
    let is_development = settings.is_development;
    let state = Arc::new(AppState::new(content, settings, analytics, contact));

    // Hot-reload setup
    let (tx, _rx) = broadcast::channel(1);
    if is_development {
        info!("Hot reload enabled. Check logs for file change events.");
        start_content_watcher(tx.clone(), state.clone());
    }

    let app = router(RouterState {
        app_state: state,
        broadcaster: tx,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
