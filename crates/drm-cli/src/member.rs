//! # Member Subcommands

use anyhow::Result;
use clap::{Args, Subcommand};

use drm_core::{MemberDraft, MemberId, MemberPatch, UserId};
use drm_registry::RegistryStore;

/// Arguments for the member subcommand group.
#[derive(Args, Debug)]
pub struct MemberArgs {
    #[command(subcommand)]
    command: MemberCmd,
}

#[derive(Subcommand, Debug)]
enum MemberCmd {
    /// Register a member; missing hierarchy nodes are created on the way.
    Add {
        /// Full legal name.
        #[arg(long)]
        full_name: String,
        /// Age in years.
        #[arg(long)]
        age: u32,
        /// Contact phone number.
        #[arg(long, default_value = "")]
        phone: String,
        /// Street address.
        #[arg(long, default_value = "")]
        address: String,
        /// House number.
        #[arg(long, default_value = "")]
        house_number: String,
        /// District name.
        #[arg(long)]
        district: String,
        /// Block panchayat name.
        #[arg(long)]
        block: String,
        /// Grama panchayat name.
        #[arg(long)]
        grama: String,
        /// Ward number.
        #[arg(long)]
        ward: u32,
    },
    /// Update fields of an existing member (unknown ids are ignored).
    Update {
        /// The member id, e.g. KER-KTM-W05-0001.
        id: String,
        /// New full name.
        #[arg(long)]
        full_name: Option<String>,
        /// New age.
        #[arg(long)]
        age: Option<u32>,
        /// New phone number.
        #[arg(long)]
        phone: Option<String>,
        /// New street address.
        #[arg(long)]
        address: Option<String>,
        /// New house number.
        #[arg(long)]
        house_number: Option<String>,
        /// New district name.
        #[arg(long)]
        district: Option<String>,
        /// New block panchayat name.
        #[arg(long)]
        block: Option<String>,
        /// New grama panchayat name.
        #[arg(long)]
        grama: Option<String>,
        /// New ward number.
        #[arg(long)]
        ward: Option<u32>,
    },
    /// Delete a member (absent ids are ignored).
    Delete {
        /// The member id.
        id: String,
    },
    /// List members joined with their resolved region.
    List {
        /// View as this username, applying their role's visibility scope.
        #[arg(long)]
        as_user: Option<String>,
    },
}

/// Dispatch a member subcommand.
pub fn run(args: MemberArgs, store: &mut RegistryStore, acting: UserId) -> Result<()> {
    match args.command {
        MemberCmd::Add {
            full_name,
            age,
            phone,
            address,
            house_number,
            district,
            block,
            grama,
            ward,
        } => {
            let member = store.register_member(
                MemberDraft {
                    full_name,
                    age,
                    phone,
                    address,
                    house_number,
                    district,
                    block_panchayat: block,
                    grama_panchayat: grama,
                    ward_number: ward,
                },
                acting,
            )?;
            println!("registered {} as {}", member.full_name, member.id);
        }
        MemberCmd::Update {
            id,
            full_name,
            age,
            phone,
            address,
            house_number,
            district,
            block,
            grama,
            ward,
        } => {
            store.update_member(
                &MemberId(id.clone()),
                MemberPatch {
                    full_name,
                    age,
                    phone,
                    address,
                    house_number,
                    district,
                    block_panchayat: block,
                    grama_panchayat: grama,
                    ward_number: ward,
                },
                acting,
            )?;
            println!("update applied to {id} (no-op if the id is unknown)");
        }
        MemberCmd::Delete { id } => {
            store.delete_member(&MemberId(id.clone()), acting)?;
            println!("deleted {id} (no-op if the id was unknown)");
        }
        MemberCmd::List { as_user } => {
            let scope = as_user
                .as_deref()
                .and_then(|name| {
                    store
                        .users()
                        .iter()
                        .find(|u| u.username.trim().eq_ignore_ascii_case(name.trim()))
                })
                .map(|u| (u.role, u.assigned_district));
            let (role, district) = match scope {
                Some((role, district)) => (Some(role), district),
                None => (None, None),
            };
            for row in store.members_joined(role, district) {
                println!(
                    "{:<20} {:<24} age {:>3}  {} / {} / ward {}  [{} {}]",
                    row.member.id,
                    row.member.full_name,
                    row.member.age,
                    row.member.district,
                    row.member.grama_panchayat,
                    row.member.ward_number,
                    row.region_level,
                    row.region_name,
                );
            }
        }
    }
    Ok(())
}
