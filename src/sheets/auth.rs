use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::client::AUTH_SCOPE;
use hyper_util::client::legacy::connect::Connect;
use serde::Deserialize;
use std::fs;
use std::future::{Future, ready};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::pin::Pin;
use tracing::{debug, info, instrument, warn};
use yup_oauth2::authenticator::{Authenticator, DefaultHyperClient, HyperClientBuilder};
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::storage::TokenInfo;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

/// Fetch an access token for the Sheets API, prompting for an authorization
/// code only when the token cache holds nothing usable.
#[instrument(name = "Authenticating to Google Sheets", skip_all)]
pub(crate) async fn access_token(config: &GoogleConfig) -> Result<String> {
    let secret = read_client_secret(&config.credentials_file)?;
    let auth = from_installed_flow(
        secret,
        &config.token_file,
        Box::new(StdinPrompt),
        DefaultHyperClient,
    )
    .await?;

    bearer_token(&auth).await
}

async fn bearer_token<C>(auth: &Authenticator<C>) -> Result<String>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    let token = auth
        .token(&[AUTH_SCOPE])
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| AppError::Auth("Token response has no access token".to_string()))
}

async fn from_installed_flow<C>(
    secret: ApplicationSecret,
    token_cache_path: &Path,
    delegate: Box<dyn InstalledFlowDelegate>,
    client: C,
) -> Result<Authenticator<C::Connector>>
where
    C: HyperClientBuilder,
{
    if let Some(parent) = token_cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Auth(format!("Failed to create token cache directory: {}", e))
        })?;
    }

    discard_unreadable_cache(token_cache_path)?;

    // User will copy/paste the authorization code from the browser
    InstalledFlowAuthenticator::with_client(secret, InstalledFlowReturnMethod::Interactive, client)
        .flow_delegate(delegate)
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))
}

/// Entry layout of the token cache written by `persist_tokens_to_disk`
#[derive(Deserialize)]
#[allow(dead_code)]
struct CacheEntry {
    scopes: Vec<String>,
    token: TokenInfo,
}

/// Remove a token cache that would fail to load, so the user is prompted
/// for a new authorization code instead.
fn discard_unreadable_cache(path: &Path) -> Result<()> {
    let Ok(contents) = fs::read(path) else {
        return Ok(());
    };

    if let Err(e) = serde_json::from_slice::<Vec<CacheEntry>>(&contents) {
        warn!(path = ?path, "Ignoring unreadable token cache: {}", e);
        fs::remove_file(path)?;
    }

    Ok(())
}

/// Read the OAuth client configuration downloaded from the Google Cloud console
pub(crate) fn read_client_secret(path: &Path) -> Result<ApplicationSecret> {
    let contents = fs::read(path).map_err(|e| {
        AppError::Config(format!(
            "Unable to read client secret file {:?}: {}",
            path, e
        ))
    })?;

    yup_oauth2::parse_application_secret(contents).map_err(|e| {
        AppError::Config(format!(
            "Unable to parse client secret file {:?}: {}",
            path, e
        ))
    })
}

/// Print the authorization URL and read the code from one line of `input`.
fn prompt_for_code<R: BufRead, W: Write>(
    url: &str,
    need_code: bool,
    input: &mut R,
    output: &mut W,
) -> std::result::Result<String, String> {
    if !need_code {
        writeln!(output, "Go to the following link in your browser:\n{}", url)
            .map_err(|e| format!("Unable to print authorization URL: {}", e))?;
        return Ok(String::new());
    }

    writeln!(
        output,
        "Go to the following link in your browser then type the authorization code:\n{}",
        url
    )
    .and_then(|_| output.flush())
    .map_err(|e| format!("Unable to print authorization URL: {}", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| format!("Unable to read authorization code: {}", e))?;

    match line.trim() {
        "" => Err("Unable to read authorization code: no input".to_string()),
        code => Ok(code.to_string()),
    }
}

/// Prompt on stdout, read the code from stdin.
struct StdinPrompt;

impl InstalledFlowDelegate for StdinPrompt {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
        let code = prompt_for_code(url, need_code, &mut io::stdin().lock(), &mut io::stdout());
        Box::pin(ready(code))
    }
}

/// Clear cached Google tokens by deleting the token cache file
#[instrument(name = "Clearing auth tokens for Google Sheets", skip_all)]
pub fn clear_tokens(config: &GoogleConfig) -> Result<()> {
    let token_path = &config.token_file;

    if !token_path.exists() {
        debug!("No Google Sheets tokens to clear");
        return Ok(());
    }

    fs::remove_file(token_path)
        .map_err(|e| AppError::Auth(format!("Failed to delete tokens file: {}", e)))?;
    info!("Cleared Google Sheets cached tokens");

    Ok(())
}
