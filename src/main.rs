use loonges::config::Config;
use loonges::notify::Notifier;
use loonges::render::Pages;
use loonges::server::router::{LoongesState, loonges_router};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        static_dir = %cfg.basic.static_dir.display(),
        mail_enabled = cfg.mail.enabled,
        mail_server = %cfg.mail.server,
        mail_port = cfg.mail.port,
        mail_use_tls = cfg.mail.use_tls,
        mail_username = %cfg.mail.username,
        "Configuration loaded"
    );

    let db = loonges::db::spawn(&cfg.basic.database_url).await?;
    let notifier = Notifier::from_config(&cfg.mail);
    let pages = Pages::new()?;
    let admin_password: Arc<str> = Arc::from(cfg.admin.password.as_str());

    let state = LoongesState::new(db, notifier, pages, admin_password);
    let app = loonges_router(state, &cfg.basic.static_dir);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
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
