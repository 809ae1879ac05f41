use crate::config::Config;
use crate::error::Result;
use crate::sheets::{access_token, clear_sheets_tokens};
use tracing::info;

pub async fn execute(config: &Config, reset: bool) -> Result<()> {
    if reset {
        clear_sheets_tokens(&config.google)?;
    }

    access_token(&config.google).await?;

    info!(path = ?config.google.token_file, "Google Sheets authentication verified");

    Ok(())
}
