//! # Sync Subcommands
//!
//! Shared-slot management: configure the sync key, and force explicit
//! push/pull cycles. Background pushes happen automatically after every
//! mutation while a key is configured; the commands here are the manual
//! controls.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::warn;

use drm_registry::RegistryStore;
use drm_sync::SlotClient;

/// Arguments for the sync subcommand group.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(subcommand)]
    command: SyncCmd,
}

#[derive(Subcommand, Debug)]
enum SyncCmd {
    /// Show or change the configured sync key.
    Key {
        #[command(subcommand)]
        command: KeyCmd,
    },
    /// Push the current snapshot to the shared slot now.
    Push,
    /// Pull the shared slot and adopt its snapshot wholesale.
    Pull,
}

#[derive(Subcommand, Debug)]
enum KeyCmd {
    /// Print the configured key.
    Show,
    /// Set the key; anyone holding the same key shares the slot.
    Set {
        /// The key value.
        key: String,
    },
    /// Clear the key, disabling remote mirroring.
    Clear,
}

/// Dispatch a sync subcommand.
pub async fn run(args: SyncArgs, store: &mut RegistryStore, client: &SlotClient) -> Result<()> {
    match args.command {
        SyncCmd::Key { command } => match command {
            KeyCmd::Show => match store.sync_key() {
                Some(key) => println!("{key}"),
                None => println!("(no sync key configured)"),
            },
            KeyCmd::Set { key } => {
                store.set_sync_key(Some(key))?;
                println!("sync key set");
            }
            KeyCmd::Clear => {
                store.set_sync_key(None)?;
                println!("sync key cleared");
            }
        },
        SyncCmd::Push => {
            let Some(key) = store.sync_key().map(str::to_string) else {
                println!("no sync key configured; set one with `drm sync key set`");
                return Ok(());
            };
            match client.push(&key, &store.snapshot()).await {
                Ok(()) => println!("snapshot pushed"),
                Err(e) => {
                    warn!(error = %e, "push failed");
                    println!("push failed ({e}); local state is unaffected");
                }
            }
        }
        SyncCmd::Pull => {
            let Some(key) = store.sync_key().map(str::to_string) else {
                println!("no sync key configured; set one with `drm sync key set`");
                return Ok(());
            };
            match client.pull(&key).await {
                Ok(Some(remote)) => {
                    if store.adopt_remote(remote)? {
                        println!("remote snapshot adopted ({} members)", store.members().len());
                    } else {
                        println!("remote payload carried no members; ignored");
                    }
                }
                Ok(None) => println!("slot is empty; nothing to adopt"),
                Err(e) => {
                    warn!(error = %e, "pull failed");
                    println!("pull failed ({e}); local state is unaffected");
                }
            }
        }
    }
    Ok(())
}
