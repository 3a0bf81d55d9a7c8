//! `funddb` server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Own the process lifecycle: logging, database handle, HTTP listener.

use clap::Parser;
use funddb_core::db::reset_db_file;
use funddb_core::{default_log_level, init_logging, Store};
use funddb_http::{build_router, AppState};
use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

/// Campaign/contributor ledger HTTP server
#[derive(Parser, Debug)]
#[command(name = "funddb", version)]
#[command(about = "HTTP server tracking crowdfunding campaigns and their contributors")]
struct Args {
    /// SQLite database file
    #[arg(long, default_value = "test_fund.db", env = "FUNDDB_DB_PATH")]
    db_path: PathBuf,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "FUNDDB_LISTEN")]
    listen: SocketAddr,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, env = "FUNDDB_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; stderr when unset
    #[arg(long, env = "FUNDDB_LOG_DIR")]
    log_dir: Option<String>,

    /// Truncate the database file before opening it
    #[arg(long, env = "FUNDDB_RESET")]
    reset: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("funddb: logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.reset {
        reset_db_file(&args.db_path)?;
    }
    let store = Store::open(&args.db_path)?;
    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(
        "event=http_listen module=cli status=ok address={} db_path={}",
        args.listen,
        args.db_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=app_exit module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_listen module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown module=cli status=start");
}
