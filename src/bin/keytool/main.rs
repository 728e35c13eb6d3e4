//! Key tool for the DEX data store.
//!
//! Derives namespace and composite keys, checks the key catalogue against
//! recorded digests, and prints the data-store calls that apply market and
//! protocol configuration. Nothing is signed or submitted.

mod commands;
mod config;
mod error;

use std::process::exit;

use clap::Parser;
use dex_keys::Deployment;
use tracing::error;

use config::{CliConfig, Command, EnvConfig};
use error::Result;

fn run(env_config: &EnvConfig, command: Command) -> Result<String> {
    let deployment =
        || Deployment::load(&env_config.dex_addresses_dir, env_config.dex_env);

    match command {
        Command::Namespace {
            name,
            wrapping,
            fixed,
        } => commands::namespace(&name, wrapping, fixed),
        Command::Key { fields, fixed } => commands::key(&fields, fixed),
        Command::Catalogue { check: None } => commands::catalogue(),
        Command::Catalogue { check: Some(path) } => {
            commands::check_catalogue(&std::fs::read_to_string(path)?)
        }
        Command::PlanMarket {
            market,
            config,
            tokens,
        } => commands::plan_market(
            &deployment()?,
            &market,
            &std::fs::read_to_string(config)?,
            &std::fs::read_to_string(tokens)?,
        ),
        Command::PlanProtocol {
            config,
            ui_fee_receiver,
        } => commands::plan_protocol(
            &deployment()?,
            &std::fs::read_to_string(config)?,
            &ui_fee_receiver,
        ),
        Command::GrantRoles {
            account,
            role,
            handlers,
        } => commands::grant_roles(&deployment()?, account, &role, handlers),
    }
}

fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&env_config, cli_config.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!(%e, "keytool failed");
            exit(1);
        }
    }
}
