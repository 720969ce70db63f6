//! # Login Subcommand
//!
//! Simulates the portal login: credential check is a username/role
//! comparison against the user table, nothing more. A successful login
//! lands in the audit log.

use anyhow::Result;
use clap::Args;

use drm_registry::RegistryStore;

use crate::RoleArg;

/// Arguments for the login subcommand.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to log in as.
    pub username: String,

    /// Role the credentials claim.
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

/// Attempt a login and report the outcome.
pub fn run(args: LoginArgs, store: &mut RegistryStore) -> Result<()> {
    match store.authenticate(&args.username, args.role.into())? {
        Some(user) => {
            let scope = user
                .assigned_district
                .map(|d| format!(", assigned district {}", d.as_uuid()))
                .unwrap_or_default();
            println!("logged in as {} ({}{})", user.username, user.role, scope);
        }
        None => println!("invalid credentials: username and role must both match"),
    }
    Ok(())
}
