use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use quizpoll::{db::Db, models::WorkbookFixture, names, router, AppState};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database holding the spreadsheets, e.g. `sqlite://quizpoll.db`.
    #[clap(env)]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Header in which the authenticating proxy passes the user's email address.
    #[arg(long, env, default_value = names::DEFAULT_USER_HEADER)]
    user_header: String,

    /// Workbook fixture files to load before serving.
    #[arg(long, value_name = "FILE")]
    import: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quizpoll=debug,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;

    for path in &args.import {
        let raw = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
        let fixture: WorkbookFixture = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("{} is not a workbook fixture", path.display()))?;
        let count = db.import(&fixture).await?;
        tracing::info!("imported {count} documents from {}", path.display());
    }

    let app = router(AppState::new(db, args.user_header));

    let listener = TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
