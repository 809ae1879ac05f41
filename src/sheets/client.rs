use super::SheetOperations;
use crate::config::Config;
use crate::error::Result;
use crate::sheets::auth::access_token;
use async_trait::async_trait;
use google_sheets4::api::Scope;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{debug, info, instrument};

// Read and write access to the user's spreadsheets
pub(crate) const AUTH_SCOPE: Scope = Scope::Spreadsheet;

/// Response from the Sheets API as received, without interpretation.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "response Status: {}", self.status)?;
        writeln!(f, "response Headers: {:?}", self.headers)?;
        write!(f, "response Body: {}", self.body)
    }
}

pub struct SheetsClient {
    client: Client,
    access_token: String,
    batch_update_url: String,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access
    ///
    /// Uses the cached token when it is still valid, otherwise refreshes it or
    /// runs the interactive authorization flow.
    pub async fn new(config: &Config) -> Result<Self> {
        let batch_update_url = config.sheet.batch_update_url()?;
        let access_token = access_token(&config.google).await?;

        Ok(Self {
            client: Client::new(),
            access_token,
            batch_update_url,
        })
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Applying batch update", skip_all)]
    async fn batch_update(&self, body: String) -> Result<RawResponse> {
        info!(url = %self.batch_update_url, "Posting batch update");

        let response = self
            .client
            .post(&self.batch_update_url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(%status, "Received batch update response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
