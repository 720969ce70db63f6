//! # Backup Subcommands
//!
//! Manual export/import of the full registry as one JSON document with
//! the four top-level arrays. Import is all-or-nothing.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use drm_core::UserId;
use drm_registry::RegistryStore;

/// Arguments for the data subcommand group.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    command: DataCmd,
}

#[derive(Subcommand, Debug)]
enum DataCmd {
    /// Write the full registry document to a file or stdout.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all registry state from a backup document.
    Import {
        /// The backup file to read.
        file: PathBuf,
    },
}

/// Dispatch a data subcommand.
pub fn run(args: DataArgs, store: &mut RegistryStore, _acting: UserId) -> Result<()> {
    match args.command {
        DataCmd::Export { out } => {
            let document = store.export_data()?;
            match out {
                Some(path) => {
                    fs::write(&path, document)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("exported to {}", path.display());
                }
                None => println!("{document}"),
            }
        }
        DataCmd::Import { file } => {
            let document =
                fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            store.import_data(&document)?;
            println!(
                "imported: {} members, {} regions, {} users, {} log entries",
                store.members().len(),
                store.regions().len(),
                store.users().len(),
                store.logs().len(),
            );
        }
    }
    Ok(())
}
