//! # Reporting Subcommands
//!
//! Aggregate statistics and the audit log. Pure reads; nothing here
//! mutates or persists.

use anyhow::Result;
use clap::{Args, Subcommand};

use drm_registry::RegistryStore;

/// Arguments for the report subcommand group.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    command: ReportCmd,
}

#[derive(Subcommand, Debug)]
enum ReportCmd {
    /// Dashboard counters plus ranked per-district and per-region counts.
    Stats {
        /// Narrow the counters to one district.
        #[arg(long)]
        district: Option<String>,
    },
    /// Print the audit log, newest first.
    Logs {
        /// Show at most this many entries.
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

/// Dispatch a report subcommand.
pub fn run(args: ReportArgs, store: &RegistryStore) -> Result<()> {
    match args.command {
        ReportCmd::Stats { district } => {
            let stats = store.dashboard_stats(district.as_deref());
            println!("members:         {}", stats.total_members);
            println!("regions:         {}", stats.total_regions);
            println!("users:           {}", stats.total_users);
            println!("average age:     {:.1}", stats.average_age);
            println!("distinct gramas: {}", stats.distinct_gramas);

            println!("\nmembers by district:");
            for row in store.district_stats() {
                println!("  {:<24} {}", row.name, row.count);
            }

            println!("\ntop regions by direct membership:");
            for row in store.region_stats().into_iter().take(10) {
                println!("  {:<24} {}", row.name, row.count);
            }
        }
        ReportCmd::Logs { limit } => {
            for entry in store.logs().iter().take(limit) {
                println!(
                    "{}  {:<8} {:<7} {}",
                    entry.timestamp,
                    format!("{:?}", entry.action).to_uppercase(),
                    format!("{:?}", entry.entity).to_uppercase(),
                    entry.details,
                );
            }
        }
    }
    Ok(())
}
