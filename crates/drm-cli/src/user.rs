//! # User Subcommands

use anyhow::Result;
use clap::{Args, Subcommand};

use drm_core::UserId;
use drm_registry::RegistryStore;

use crate::{parse_region_id, RoleArg};

/// Arguments for the user subcommand group.
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCmd,
}

#[derive(Subcommand, Debug)]
enum UserCmd {
    /// List system users.
    List,
    /// Create a user.
    Add {
        /// Login name (matched case-insensitively at login).
        username: String,
        /// Access role.
        #[arg(long, value_enum)]
        role: RoleArg,
        /// For staff: the district region id their visibility narrows to.
        #[arg(long)]
        district: Option<String>,
    },
}

/// Dispatch a user subcommand.
pub fn run(args: UserArgs, store: &mut RegistryStore, acting: UserId) -> Result<()> {
    match args.command {
        UserCmd::List => {
            for user in store.users() {
                let scope = user
                    .assigned_district
                    .map(|d| format!(" district={}", d.as_uuid()))
                    .unwrap_or_default();
                println!("{:<20} {}{}", user.username, user.role, scope);
            }
        }
        UserCmd::Add {
            username,
            role,
            district,
        } => {
            let district = district.as_deref().map(parse_region_id).transpose()?;
            let user = store.add_user(username, role.into(), district, acting)?;
            println!("created user {} ({})", user.username, user.role);
        }
    }
    Ok(())
}
