//! # Region Subcommands

use anyhow::Result;
use clap::{Args, Subcommand};

use drm_core::UserId;
use drm_registry::RegistryStore;

use crate::{parse_region_id, LevelArg};

/// Arguments for the region subcommand group.
#[derive(Args, Debug)]
pub struct RegionArgs {
    #[command(subcommand)]
    command: RegionCmd,
}

#[derive(Subcommand, Debug)]
enum RegionCmd {
    /// List all hierarchy nodes.
    List,
    /// Create a region node explicitly.
    Add {
        /// Region name.
        name: String,
        /// Hierarchy level.
        #[arg(long, value_enum)]
        level: LevelArg,
        /// Parent region id (omit only for the state root).
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete a region; refused while members map to it directly.
    Delete {
        /// Region id (UUID).
        id: String,
    },
}

/// Dispatch a region subcommand.
pub fn run(args: RegionArgs, store: &mut RegistryStore, acting: UserId) -> Result<()> {
    match args.command {
        RegionCmd::List => {
            for region in store.regions() {
                let indent = usize::from(region.level.depth()) * 2;
                println!(
                    "{:indent$}{} {} ({})",
                    "",
                    region.level,
                    region.name,
                    region.id.as_uuid(),
                );
            }
        }
        RegionCmd::Add { name, level, parent } => {
            let parent = parent.as_deref().map(parse_region_id).transpose()?;
            let region = store.add_region(name, level.into(), parent, acting)?;
            println!("created {} {} ({})", region.level, region.name, region.id.as_uuid());
        }
        RegionCmd::Delete { id } => {
            let id = parse_region_id(&id)?;
            if store.delete_region(id, acting)? {
                println!("region deleted");
            } else {
                println!("refused: members are registered directly in this region");
            }
        }
    }
    Ok(())
}
