//! # drm CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules. The binary
//! owns the store lifecycle: open the durable directory, attempt a
//! startup pull when a sync key is configured, attach the background
//! push sink, run the command, and drain in-flight pushes before exit.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;

use drm_cli::{data, login, member, region, report, resolve_acting, sync, user};
use drm_registry::{LocalStore, RegistryStore};
use drm_sync::{PushSink, SlotClient, DEFAULT_BASE_URL};

/// DRM Registry CLI: member registry over a five-tier administrative
/// hierarchy, with audit logging and optional shared-slot sync.
#[derive(Parser, Debug)]
#[command(name = "drm", version, about)]
struct Cli {
    /// Durable storage directory.
    #[arg(long, global = true, default_value = ".drm-registry")]
    data_dir: PathBuf,

    /// Remote slot endpoint base URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    sync_url: String,

    /// Username attributed in the audit log for mutations.
    #[arg(long, global = true, default_value = "admin")]
    acting_user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Register, update, delete and list members.
    Member(member::MemberArgs),
    /// Inspect and manage the region hierarchy.
    Region(region::RegionArgs),
    /// Manage system users.
    User(user::UserArgs),
    /// Simulate a portal login.
    Login(login::LoginArgs),
    /// Aggregate statistics and the audit log.
    Report(report::ReportArgs),
    /// Export and import full-state backups.
    Data(data::DataArgs),
    /// Shared-slot sync controls.
    Sync(sync::SyncArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let disk = LocalStore::open(&cli.data_dir)?;
    let mut store = RegistryStore::open(disk)?;
    let client = SlotClient::new(&cli.sync_url);

    // Mirror the portal's mount behavior: adopt the shared slot before
    // serving anything, best-effort.
    if let Some(key) = store.sync_key().map(str::to_string) {
        match client.pull(&key).await {
            Ok(Some(remote)) => {
                store.adopt_remote(remote)?;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "startup pull failed; using local state"),
        }
    }

    let sink = Arc::new(PushSink::new(client.clone()));
    let mut store = store.with_sink(sink.clone());

    match cli.command {
        Commands::Member(args) => {
            let acting = resolve_acting(&store, &cli.acting_user)?;
            member::run(args, &mut store, acting)?;
        }
        Commands::Region(args) => {
            let acting = resolve_acting(&store, &cli.acting_user)?;
            region::run(args, &mut store, acting)?;
        }
        Commands::User(args) => {
            let acting = resolve_acting(&store, &cli.acting_user)?;
            user::run(args, &mut store, acting)?;
        }
        Commands::Login(args) => {
            login::run(args, &mut store)?;
        }
        Commands::Report(args) => {
            report::run(args, &store)?;
        }
        Commands::Data(args) => {
            let acting = resolve_acting(&store, &cli.acting_user)?;
            data::run(args, &mut store, acting)?;
        }
        Commands::Sync(args) => {
            sync::run(args, &mut store, &client).await?;
        }
    }

    // Let background pushes land before the runtime is torn down;
    // returning immediately would cancel them mid-flight.
    sink.drain().await;

    Ok(())
}
