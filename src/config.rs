//! Command-line configuration.
//!
//! Every option has an environment fallback so the service can be configured
//! the same way in containers and from a shell.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Default filter directive for log output.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default HTTP listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Task workflow service.
#[derive(Debug, Parser)]
#[command(name = "taskflow", author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter directive, for example `info` or `taskflow=debug,tower_http=info`.
    #[arg(long, env = "TASKFLOW_LOG", default_value = DEFAULT_LOG_FILTER, global = true)]
    pub log_filter: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve(ServeArgs),

    /// Apply the schema and seed data, then exit.
    Seed(StorageArgs),
}

/// Storage and seed options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// `PostgreSQL` connection URL. In-memory storage is used when absent.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// YAML seed file. The bundled stock plan is used when absent.
    #[arg(long, env = "TASKFLOW_SEED_FILE")]
    pub seed_file: Option<Utf8PathBuf>,
}

/// Options for [`Command::Serve`].
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "TASKFLOW_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Seed storage before serving. Always done for in-memory storage.
    #[arg(long)]
    pub seed: bool,

    /// Storage options.
    #[command(flatten)]
    pub storage: StorageArgs,
}

impl ServeArgs {
    /// Returns `true` when seed data should be applied before serving.
    #[must_use]
    pub const fn should_seed(&self) -> bool {
        self.seed || self.storage.database_url.is_none()
    }
}
