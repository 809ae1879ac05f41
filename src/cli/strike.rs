use crate::config::{Config, SheetConfig};
use crate::error::{AppError, Result};
use crate::models::{BatchUpdateRequest, CellIndex, CellIndexResolver, current_month_name};
use crate::sheets::{RawResponse, SheetOperations, SheetsClient, strikethrough_rule};
use clap::Args;
use tracing::{debug, info, instrument};

#[derive(Args, Debug)]
pub struct CellArgs {
    /// Debit code, a letter from a to o
    pub debit: String,

    /// Month column to use instead of the current month
    #[arg(long)]
    pub month: Option<String>,

    /// Fail on an unknown month or debit code instead of using index 0
    #[arg(long)]
    pub strict: bool,
}

impl CellArgs {
    fn resolve(&self, resolver: &CellIndexResolver) -> Result<CellIndex> {
        let month = self.month.clone().unwrap_or_else(current_month_name);

        if !self.strict {
            return Ok(CellIndex {
                row: resolver.debit_to_row(&self.debit),
                column: resolver.month_to_column(&month),
            });
        }

        let column = resolver
            .column_for_month(&month)
            .ok_or_else(|| AppError::Lookup(format!("No column for month '{}'", month)))?;
        let row = resolver
            .row_for_debit(&self.debit)
            .ok_or_else(|| AppError::Lookup(format!("No row for debit code '{}'", self.debit)))?;

        Ok(CellIndex { row, column })
    }

    pub fn build_request(&self, sheet: &SheetConfig) -> Result<BatchUpdateRequest> {
        let resolver = CellIndexResolver::new();
        let cell = self.resolve(&resolver)?;
        debug!(row = cell.row, column = cell.column, "Resolved debit cell");

        Ok(strikethrough_rule(sheet.sheet_id, cell))
    }
}

pub async fn execute(config: &Config, args: &CellArgs) -> Result<()> {
    let request = args.build_request(&config.sheet)?;
    let body = serde_json::to_string(&request)?;

    let client = SheetsClient::new(config).await?;
    let response = dispatch(&client, body).await?;

    println!("{}", response);

    Ok(())
}

#[instrument(name = "Applying strikethrough rule", skip_all)]
async fn dispatch<S: SheetOperations>(sheets: &S, body: String) -> Result<RawResponse> {
    let response = sheets.batch_update(body).await?;
    info!(status = %response.status, "Batch update sent");

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;
    use std::sync::Mutex;

    fn args(debit: &str, month: &str, strict: bool) -> CellArgs {
        CellArgs {
            debit: debit.to_string(),
            month: Some(month.to_string()),
            strict,
        }
    }

    #[derive(Default)]
    struct MockSheets {
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SheetOperations for MockSheets {
        async fn batch_update(&self, body: String) -> Result<RawResponse> {
            self.bodies.lock().unwrap().push(body);
            Ok(RawResponse {
                status: StatusCode::BAD_REQUEST,
                headers: HeaderMap::new(),
                body: "{\"error\":{\"code\":400}}".to_string(),
            })
        }
    }

    #[test]
    fn test_build_request() {
        let sheet = SheetConfig::default();
        let request = args("d", "August", false).build_request(&sheet).unwrap();

        let range = request.requests[0].add_conditional_format_rule.rule.ranges[0];
        assert_eq!((range.start_row_index, range.end_row_index), (5, 6));
        assert_eq!((range.start_column_index, range.end_column_index), (1, 2));
    }

    #[test]
    fn test_lenient_lookup_falls_back_to_zero() {
        let resolver = CellIndexResolver::new();
        let cell = args("z", "March", false).resolve(&resolver).unwrap();
        assert_eq!(cell, CellIndex { row: 0, column: 0 });
    }

    #[test]
    fn test_strict_lookup_rejects_unknown_keys() {
        let resolver = CellIndexResolver::new();

        let err = args("z", "August", true).resolve(&resolver).unwrap_err();
        assert!(matches!(err, AppError::Lookup(_)));

        let err = args("a", "March", true).resolve(&resolver).unwrap_err();
        assert!(matches!(err, AppError::Lookup(_)));

        let cell = args("o", "December", true).resolve(&resolver).unwrap();
        assert_eq!(cell, CellIndex { row: 17, column: 5 });
    }

    #[tokio::test]
    async fn test_dispatch_sends_body_and_returns_response_unchanged() {
        let sheets = MockSheets::default();
        let body = serde_json::to_string(
            &args("a", "September", false)
                .build_request(&SheetConfig::default())
                .unwrap(),
        )
        .unwrap();

        let response = dispatch(&sheets, body.clone()).await.unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(*sheets.bodies.lock().unwrap(), vec![body.clone()]);

        let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
        let range = &sent["requests"][0]["addConditionalFormatRule"]["rule"]["ranges"][0];
        assert_eq!(range["startRowIndex"], 2);
        assert_eq!(range["startColumnIndex"], 2);
    }
}
