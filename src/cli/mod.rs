mod auth;
mod show;
mod strike;

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use show::ShowResource;
pub use strike::CellArgs;

#[derive(Parser, Debug)]
#[command(name = "debit-strike")]
#[command(about = "Strike through paid debits in a monthly Google Sheets ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the one in the XDG config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Spreadsheet to update, overrides the config file
    #[arg(long, global = true)]
    pub spreadsheet_id: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?
            .with_spreadsheet_id(self.spreadsheet_id.as_deref());

        match &self.command {
            Commands::Strike(args) => strike::execute(&config, args).await,
            Commands::Auth { reset } => auth::execute(&config, *reset).await,
            Commands::Show { resource } => {
                resource.execute(&config, self.config.as_deref()).await
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Strike through the cell of a debit once it is filled in
    Strike(CellArgs),
    /// Authenticate with Google Sheets
    Auth {
        /// Discard cached tokens and authenticate again
        #[arg(long)]
        reset: bool,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strike() {
        let cli = Cli::try_parse_from([
            "debit-strike",
            "strike",
            "d",
            "--month",
            "August",
            "--spreadsheet-id",
            "abc",
        ])
        .unwrap();

        assert_eq!(cli.spreadsheet_id.as_deref(), Some("abc"));
        let Commands::Strike(args) = cli.command else {
            panic!("expected strike command");
        };
        assert_eq!(args.debit, "d");
        assert_eq!(args.month.as_deref(), Some("August"));
        assert!(!args.strict);
    }

    #[test]
    fn test_parse_auth_reset() {
        let cli = Cli::try_parse_from(["debit-strike", "auth", "--reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Auth { reset: true }));
    }

    #[test]
    fn test_parse_show_request() {
        let cli = Cli::try_parse_from([
            "debit-strike",
            "--config",
            "/tmp/config.toml",
            "show",
            "request",
            "z",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        let Commands::Show {
            resource: ShowResource::Request(args),
        } = cli.command
        else {
            panic!("expected show request command");
        };
        assert_eq!(args.debit, "z");
        assert!(args.strict);
    }

    #[test]
    fn test_strike_requires_debit() {
        assert!(Cli::try_parse_from(["debit-strike", "strike"]).is_err());
    }
}
