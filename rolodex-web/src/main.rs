use anyhow::Context;
use rolodex_web::config::ServeOpt;
use rolodex_web::{create_router, AppState};
use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str =
    "rolodex=info,rolodex_sqlite=info,rolodex_driver=info,rolodex_web=info,tower_http=info";

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opt = ServeOpt::from_args();
    let driver = opt.store.open().context("failed to open contact store")?;
    let app = create_router(AppState::new(driver));

    let listener = tokio::net::TcpListener::bind(opt.addr)
        .await
        .with_context(|| format!("failed to bind {}", opt.addr))?;
    tracing::info!("listening on http://{}", opt.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
