//! Fitroom CLI - drive the try-on service from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List products for a gender
//! fitroom products --gender female
//!
//! # Show, add to, and clear the cart
//! fitroom cart show
//! fitroom cart add --product 1
//! fitroom cart clear
//!
//! # Generate a try-on preview and save it
//! fitroom try-on --photo me.jpg --product 1 --output preview.png
//! ```
//!
//! # Environment Variables
//!
//! - `FITROOM_API_URL` - Base URL of the try-on service
//!   (default: `http://localhost:8000`)
//! - `FITROOM_HTTP_TIMEOUT_SECS` - Optional per-request HTTP timeout

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI output goes to stdout
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fitroom_core::Gender;

mod commands;

#[derive(Parser)]
#[command(name = "fitroom")]
#[command(author, version, about = "Fitroom try-on client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products for a gender
    Products {
        /// Gender filter (female, male, unisex)
        #[arg(short, long, default_value = "female")]
        gender: Gender,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Generate a try-on preview image
    TryOn {
        /// Path to your photo
        #[arg(short, long)]
        photo: PathBuf,

        /// Product id to try on
        #[arg(long)]
        product: i32,

        /// Gender filter the product belongs to
        #[arg(short, long, default_value = "female")]
        gender: Gender,

        /// Where to save the preview image
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(short, long)]
        product: i32,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Clear the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fitroom=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { gender } => commands::catalog::list(gender).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add { product, quantity } => commands::cart::add(product, quantity).await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
        Commands::TryOn {
            photo,
            product,
            gender,
            output,
        } => commands::tryon::run(&photo, product, gender, &output).await?,
    }
    Ok(())
}
