//! Vital Harvest CLI - terminal shell for the storefront.
//!
//! One process is one browsing session: the cart lives in memory and is gone
//! on exit, while the identity registry and the active session persist in the
//! data directory and are restored on the next start.
//!
//! # Usage
//!
//! ```bash
//! # Start a browsing session against ./data
//! vh-cli
//!
//! # Use a different data directory
//! vh-cli --data-dir ~/.vital-harvest
//! ```
//!
//! Type `help` inside the shell for the command list.

#![cfg_attr(not(test), forbid(unsafe_code))]
// The shell's output IS the product here; this binary is the renderer.
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::Parser;

use vital_harvest_storefront::AppState;
use vital_harvest_storefront::config::StorefrontConfig;

mod shell;

#[derive(Parser)]
#[command(name = "vh-cli")]
#[command(author, version, about = "Vital Harvest storefront shell")]
struct Cli {
    /// Directory holding the persisted store (overrides VH_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

fn main() {
    // Initialize tracing; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vh_cli=info,vital_harvest_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Shell failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let mut state = AppState::new(config)?;
    shell::run(&mut state)
}
