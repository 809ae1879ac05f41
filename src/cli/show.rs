use super::CellArgs;
use crate::config::Config;
use crate::error::Result;
use clap::Subcommand;
use std::path::Path;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration and credential paths
    Paths,
    /// Print the batch update request for a debit without sending it
    Request(CellArgs),
}

impl ShowResource {
    pub async fn execute(&self, config: &Config, config_path: Option<&Path>) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(config, config_path),
            ShowResource::Request(args) => show_request(config, args),
        }
    }
}

fn show_paths(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let config_path = Config::config_path(config_path)?;

    info!(path = ?config_path, "Config path");
    info!(path = ?config.google.credentials_file, "Client secret path");
    info!(path = ?config.google.token_file, "Token cache path");

    Ok(())
}

fn show_request(config: &Config, args: &CellArgs) -> Result<()> {
    let request = args.build_request(&config.sheet)?;
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}
