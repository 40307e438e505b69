//! `taskflow` binary: serves the HTTP API or seeds storage.
//!
//! ```text
//! taskflow serve [--bind ADDR] [--database-url URL] [--seed] [--seed-file PATH]
//! taskflow seed [--database-url URL] [--seed-file PATH]
//! ```

use clap::Parser;
use eyre::WrapErr;
use mockable::DefaultClock;
use std::sync::Arc;
use taskflow::bootstrap::{
    Backends, SeedPlan, apply_schema, apply_seed_plan, connect, load_seed_plan,
};
use taskflow::config::{Cli, Command, ServeArgs, StorageArgs};
use taskflow::{http, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_filter)?;

    match cli.command {
        Command::Serve(args) => serve(&args).await,
        Command::Seed(storage) => seed(&storage).await,
    }
}

async fn serve(args: &ServeArgs) -> eyre::Result<()> {
    let clock = Arc::new(DefaultClock);
    let backends = open_backends(&args.storage).await?;
    if args.should_seed() {
        seed_backends(&backends, &args.storage, &clock).await?;
    }

    http::serve(args.bind, backends.app_state(&clock), shutdown_signal())
        .await
        .wrap_err_with(|| format!("HTTP server on {} failed", args.bind))?;
    info!("server stopped");
    Ok(())
}

async fn seed(storage: &StorageArgs) -> eyre::Result<()> {
    if storage.database_url.is_none() {
        warn!("no database URL configured; seeding volatile in-memory storage");
    }
    let clock = Arc::new(DefaultClock);
    let backends = open_backends(storage).await?;
    seed_backends(&backends, storage, &clock).await
}

async fn open_backends(storage: &StorageArgs) -> eyre::Result<Backends> {
    let Some(database_url) = storage.database_url.as_deref() else {
        info!("using in-memory storage");
        return Ok(Backends::in_memory());
    };
    let pool = connect(database_url).wrap_err("failed to connect to PostgreSQL")?;
    apply_schema(&pool).await?;
    info!("using PostgreSQL storage");
    Ok(Backends::postgres(&pool))
}

async fn seed_backends(
    backends: &Backends,
    storage: &StorageArgs,
    clock: &Arc<DefaultClock>,
) -> eyre::Result<()> {
    let plan = match storage.seed_file.as_deref() {
        Some(path) => load_seed_plan(path)?,
        None => SeedPlan::stock()?,
    };
    apply_seed_plan(&plan, &backends.registry(clock), backends.users.as_ref()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
