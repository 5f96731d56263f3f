//! Mockshop CLI - catalog and pricing tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! mockshop-cli catalog
//!
//! # Price a cart without running the storefront
//! mockshop-cli quote p1=2 p3=1
//! ```
//!
//! # Commands
//!
//! - `catalog` - Print every product with its price
//! - `quote` - Price a cart using the storefront's cart service

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mockshop-cli")]
#[command(author, version, about = "Mockshop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog,
    /// Price a cart offline
    Quote {
        /// Cart entries as `product_id=quantity` (quantity defaults to 1)
        #[arg(required = true, value_name = "ITEM")]
        items: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog => print!("{}", commands::catalog::render()),
        Commands::Quote { items } => {
            let quote = commands::quote::quote(&items).await?;
            print!("{quote}");
        }
    }
    Ok(())
}
