//! Storekeep CLI - catalog fixtures and reports.
//!
//! # Usage
//!
//! ```bash
//! # Print the category tree of a fixture
//! sk-cli tree fixtures/demo.yaml
//!
//! # Second page of active shirts
//! sk-cli products fixtures/demo.yaml --category Shirts --tab active --page 2
//!
//! # Refunded orders from the last 30 days
//! sk-cli orders fixtures/demo.yaml --status Refund --range "Last 30 Days"
//!
//! # Dashboard figures
//! sk-cli dashboard fixtures/demo.yaml --limit 5
//! ```
//!
//! Set `STOREKEEP_LOG_JSON=1` for JSON logs on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod fixture;

use commands::catalog::ListingArgs;

#[derive(Parser)]
#[command(name = "sk-cli")]
#[command(author, version, about = "Storekeep CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the category tree
    Tree {
        /// Fixture YAML file
        fixture: PathBuf,
    },
    /// Print a filtered page of products
    Products {
        /// Fixture YAML file
        fixture: PathBuf,

        /// Search name, SKU, and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category name, or `all`
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Status tab (`all`, `active`, `drafts`, `archived`)
        #[arg(short, long, default_value = "all")]
        tab: String,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page (0 uses the configured default)
        #[arg(long, default_value_t = 0)]
        page_size: u32,
    },
    /// Print a filtered page of orders
    Orders {
        /// Fixture YAML file
        fixture: PathBuf,

        /// Search order number and customer name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Order status, or `All`
        #[arg(long, default_value = "All")]
        status: String,

        /// Date range (`Last 7 Days`, `Last 30 Days`, `This Year`, `All`)
        #[arg(short, long, default_value = "All")]
        range: String,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page (0 uses the configured default)
        #[arg(long, default_value_t = 0)]
        page_size: u32,
    },
    /// Print dashboard figures, recent orders, and popular products
    Dashboard {
        /// Fixture YAML file
        fixture: PathBuf,

        /// How many recent orders and popular products to list
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

fn init_tracing() {
    // Defaults to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storekeep_admin=info,storekeep_cli=info".into());

    let json = std::env::var("STOREKEEP_LOG_JSON").is_ok();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Tree { fixture } => commands::catalog::tree(&fixture).await?,
        Commands::Products {
            fixture,
            search,
            category,
            tab,
            page,
            page_size,
        } => {
            let args = ListingArgs {
                search,
                facet: category,
                window: tab,
                page,
                page_size,
            };
            commands::catalog::products(&fixture, &args).await?;
        }
        Commands::Orders {
            fixture,
            search,
            status,
            range,
            page,
            page_size,
        } => {
            let args = ListingArgs {
                search,
                facet: status,
                window: range,
                page,
                page_size,
            };
            commands::catalog::orders(&fixture, &args).await?;
        }
        Commands::Dashboard { fixture, limit } => commands::dashboard::show(&fixture, limit).await?,
    }
    Ok(())
}
