pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::models::role::Role;

/// Staff admin for the marketplace: review service edits, manage
/// accounts, export user lists.
#[derive(Parser, Debug)]
#[command(name = "marketplace-admin", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file (default: ./admin.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Data API token; overrides [data_api] auth_token
    #[arg(long, global = true, env = "MARKETPLACE_ADMIN_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the admin web server
    Serve {
        /// Address to listen on; overrides [server] bind
        #[arg(long)]
        bind: Option<String>,
    },

    /// Write a CSV report without going through the web server
    Export {
        #[command(subcommand)]
        report: ExportReport,
    },

    /// Validate the config file and show where data comes from
    CheckConfig,
}

#[derive(clap::Args, Debug)]
pub struct Actor {
    /// Role to export as (e.g. admin, admin-framework-manager)
    #[arg(long)]
    pub role: Role,

    /// Email address recorded as the actor
    #[arg(long, default_value = "cli@localhost")]
    pub email: String,

    /// Where to write the CSV (default: the report's own filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ExportReport {
    /// Buyer accounts, sorted by name
    Buyers {
        #[command(flatten)]
        actor: Actor,
    },

    /// Supplier users on a framework
    Suppliers {
        /// Framework slug, e.g. g-cloud-7
        slug: String,

        /// Only suppliers whose application passed
        #[arg(long)]
        on_framework_only: bool,

        /// Only users opted in to user research
        #[arg(long)]
        user_research: bool,

        #[command(flatten)]
        actor: Actor,
    },
}
