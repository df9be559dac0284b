//! Expense dashboard CLI
//!
//! Command-line front end for the expense dashboard backend.
//!
//! # Commands
//!
//! - `me` - Show the signed-in user
//! - `logout` - End the session
//! - `summary` - Show the rollup summary
//! - `series` - Show the chart series for a period
//! - `list` - Show one page of expenses
//! - `add` / `edit` / `remove` - Change expenses
//! - `label` - Format a bucket key the way the dashboard chart does

mod commands;

use clap::{Parser, Subcommand};
use commands::{Context, ExpenseArgs, OutputFormat};
use expensedash_client::{ClientConfig, WriteFailureMode};
use expensedash_model::{LabelMode, Period};
use tracing_subscriber::EnvFilter;

/// Expense dashboard command-line client.
#[derive(Parser)]
#[command(name = "expensedash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(global = true, short, long, env = "EXPENSEDASH_BACKEND_URL")]
    backend_url: Option<String>,

    /// Session cookie sent with every request (e.g. "connect.sid=...")
    #[arg(global = true, long, env = "EXPENSEDASH_COOKIE")]
    cookie: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Output format
    #[arg(global = true, short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Return backend write failures as errors instead of logging them
    #[arg(global = true, long)]
    surface_write_errors: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the signed-in user
    Me,

    /// End the session
    Logout,

    /// Show the rollup summary
    Summary {
        /// User id
        user: String,
    },

    /// Show the chart series for a period
    Series {
        /// User id
        user: String,

        /// Bucket size (daily, weekly, monthly)
        #[arg(short, long, default_value = "monthly")]
        period: Period,

        /// Label style (tick, label)
        #[arg(short, long, default_value = "tick")]
        mode: LabelMode,
    },

    /// Show one page of expenses
    List {
        /// User id
        user: String,

        /// 1-indexed page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Create an expense
    Add {
        #[command(flatten)]
        expense: ExpenseArgs,
    },

    /// Replace an expense
    Edit {
        /// Expense id
        id: String,

        #[command(flatten)]
        expense: ExpenseArgs,
    },

    /// Delete an expense
    Remove {
        /// Expense id
        id: String,
    },

    /// Format a chart bucket key
    Label {
        /// Bucket key, e.g. 2024-03-05, 2024-W09 or 2024-03
        key: String,

        /// Bucket size (daily, weekly, monthly)
        #[arg(short, long)]
        period: Period,

        /// Label style (tick, label)
        #[arg(short, long, default_value = "tick")]
        mode: LabelMode,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Label formatting never talks to the backend.
    if let Commands::Label { key, period, mode } = &cli.command {
        commands::label::run(key, *period, *mode, cli.format)?;
        return Ok(());
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.backend_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if cli.surface_write_errors {
        config = config.with_write_failure_mode(WriteFailureMode::Surface);
    }
    if config.base_url.is_empty() {
        return Err("Backend URL required (--backend-url or EXPENSEDASH_BACKEND_URL)".into());
    }

    let ctx = Context::connect(config, cli.cookie.as_deref(), cli.format)?;

    match cli.command {
        Commands::Me => commands::session::me(&ctx)?,
        Commands::Logout => commands::session::logout(&ctx)?,
        Commands::Summary { user } => commands::summary::run(&ctx, &user)?,
        Commands::Series { user, period, mode } => {
            commands::series::run(&ctx, &user, period, mode)?
        }
        Commands::List { user, page, limit } => commands::list::run(&ctx, &user, page, limit)?,
        Commands::Add { expense } => commands::write::add(&ctx, &expense)?,
        Commands::Edit { id, expense } => commands::write::edit(&ctx, &id, &expense)?,
        Commands::Remove { id } => commands::write::remove(&ctx, &id)?,
        Commands::Label { .. } => {}
    }

    Ok(())
}
