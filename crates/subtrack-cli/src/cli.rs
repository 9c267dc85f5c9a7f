//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// subtrack - Keep recurring subscription costs in view
#[derive(Parser)]
#[command(name = "subtrack")]
#[command(about = "Track subscription costs, renewals and budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subscription snapshot file (JSON)
    #[arg(long, default_value = "subtrack.json", global = true)]
    pub data: PathBuf,

    /// Settings file (defaults to ~/.local/share/subtrack/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty snapshot file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show totals, upcoming renewals and budget recommendations
    Dashboard {
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        now: Option<String>,
    },

    /// Search, filter, sort and page through subscriptions
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Page number (starts at 1)
        #[arg(short, long, default_value = "1")]
        page: i64,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<i64>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a subscription
    Add {
        /// Service name (e.g., "Netflix")
        name: String,

        /// Cost per billing period
        #[arg(short, long)]
        cost: f64,

        /// Billing cycle: Monthly, Quarterly, Yearly
        #[arg(long, default_value = "Monthly")]
        cycle: String,

        /// Category name or ID
        #[arg(long)]
        category: Option<String>,

        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,

        /// Subscription does not renew automatically
        #[arg(long)]
        no_auto_renew: bool,
    },

    /// Edit a subscription (only the given fields change)
    Update {
        /// Subscription ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        cost: Option<f64>,

        #[arg(long)]
        cycle: Option<String>,

        /// Category name or ID ("none" to clear)
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        start: Option<String>,

        /// Whether the subscription renews automatically
        #[arg(long)]
        auto_renews: Option<bool>,
    },

    /// Delete a subscription
    Delete {
        /// Subscription ID
        id: i64,
    },

    /// Category breakdown and management
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// List subscriptions renewing soon
    Renewals {
        /// Days to look ahead (defaults to the configured horizon)
        #[arg(short, long)]
        days: Option<u32>,

        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        now: Option<String>,
    },

    /// Show the monthly and annualized cost of a price
    Preview {
        /// Cost per billing period
        #[arg(short, long)]
        cost: f64,

        /// Billing cycle: Monthly, Quarterly, Yearly
        #[arg(long, default_value = "Monthly")]
        cycle: String,
    },

    /// Export the filtered subscription view to CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Search, filter and sort options shared by list and export
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Match service or category name (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this category (name or ID)
    #[arg(long)]
    pub category: Option<String>,

    /// Only this billing cycle: Monthly, Quarterly, Yearly
    #[arg(long)]
    pub cycle: Option<String>,

    /// Sort by: start_date, cost, annualized_cost
    #[arg(long, default_value = "start_date")]
    pub sort: String,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Current category name or ID
        category: String,
        /// New name
        new_name: String,
    },

    /// Delete a category (its subscriptions become Uncategorized)
    Delete {
        /// Category name or ID
        category: String,
    },
}
