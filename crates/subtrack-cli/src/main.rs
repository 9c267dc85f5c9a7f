//! subtrack CLI - Subscription cost tracker
//!
//! Usage:
//!   subtrack init                         Create an empty snapshot
//!   subtrack add Netflix --cost 15.49     Add a subscription
//!   subtrack list --sort annualized_cost  Browse subscriptions
//!   subtrack dashboard                    Totals, renewals, budget advice

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { force } => commands::cmd_init(&cli.data, force),
        Commands::Preview { cost, cycle } => commands::cmd_preview(&settings, cost, &cycle),
        Commands::Dashboard { now } => {
            let portfolio = commands::open_portfolio(&cli.data)?;
            let today = commands::resolve_today(now.as_deref())?;
            commands::cmd_dashboard(&portfolio, &settings, today)
        }
        Commands::List {
            view,
            page,
            page_size,
            json,
        } => {
            let portfolio = commands::open_portfolio(&cli.data)?;
            commands::cmd_list(&portfolio, &settings, &view, page, page_size, json)
        }
        Commands::Add {
            name,
            cost,
            cycle,
            category,
            start,
            no_auto_renew,
        } => {
            let mut portfolio = commands::open_portfolio(&cli.data)?;
            commands::cmd_add(
                &mut portfolio,
                &settings,
                &name,
                cost,
                &cycle,
                category.as_deref(),
                start.as_deref(),
                !no_auto_renew,
            )?;
            commands::save_portfolio(&cli.data, &portfolio)
        }
        Commands::Update {
            id,
            name,
            cost,
            cycle,
            category,
            start,
            auto_renews,
        } => {
            let mut portfolio = commands::open_portfolio(&cli.data)?;
            commands::cmd_update(
                &mut portfolio,
                id,
                name.as_deref(),
                cost,
                cycle.as_deref(),
                category.as_deref(),
                start.as_deref(),
                auto_renews,
            )?;
            commands::save_portfolio(&cli.data, &portfolio)
        }
        Commands::Delete { id } => {
            let mut portfolio = commands::open_portfolio(&cli.data)?;
            commands::cmd_delete(&mut portfolio, id)?;
            commands::save_portfolio(&cli.data, &portfolio)
        }
        Commands::Categories { action } => {
            let mut portfolio = commands::open_portfolio(&cli.data)?;
            match action {
                None => commands::cmd_categories(&portfolio, &settings),
                Some(CategoriesAction::Add { name }) => {
                    commands::cmd_category_add(&mut portfolio, &name)?;
                    commands::save_portfolio(&cli.data, &portfolio)
                }
                Some(CategoriesAction::Rename { category, new_name }) => {
                    commands::cmd_category_rename(&mut portfolio, &category, &new_name)?;
                    commands::save_portfolio(&cli.data, &portfolio)
                }
                Some(CategoriesAction::Delete { category }) => {
                    commands::cmd_category_delete(&mut portfolio, &category)?;
                    commands::save_portfolio(&cli.data, &portfolio)
                }
            }
        }
        Commands::Renewals { days, now } => {
            let portfolio = commands::open_portfolio(&cli.data)?;
            let today = commands::resolve_today(now.as_deref())?;
            commands::cmd_renewals(&portfolio, &settings, days, today)
        }
        Commands::Export { view, output } => {
            let portfolio = commands::open_portfolio(&cli.data)?;
            commands::cmd_export(&portfolio, &view, output)
        }
    }
}
