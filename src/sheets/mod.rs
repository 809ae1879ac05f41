mod auth;
mod client;
mod formatting;

pub use auth::clear_tokens as clear_sheets_tokens;
pub(crate) use auth::access_token;
pub use client::{RawResponse, SheetsClient};
pub(crate) use formatting::strikethrough_rule;

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SheetOperations {
    /// Send a serialized `batchUpdate` body and hand back the response untouched.
    async fn batch_update(&self, body: String) -> Result<RawResponse>;
}
