//! Request body for `spreadsheets.batchUpdate`, restricted to the one
//! conditional format rule this tool applies.
//!
//! The `google_sheets4::api` request types serialize every unset field as
//! `null` (80+ keys for this rule), and the body is sent as a raw reqwest POST,
//! so it is modelled here with only the fields that are sent.
//!
//! https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/request#addconditionalformatrulerequest

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub add_conditional_format_rule: AddConditionalFormatRuleRequest,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddConditionalFormatRuleRequest {
    pub rule: ConditionalFormatRule,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub ranges: Vec<GridRange>,
    pub boolean_rule: BooleanRule,
}

/// Rectangular region of a sheet. End indices are exclusive.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i32,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

impl GridRange {
    /// Range covering exactly one cell.
    pub fn single_cell(sheet_id: i32, row: u32, column: u32) -> Self {
        Self {
            sheet_id,
            start_row_index: row,
            end_row_index: row + 1,
            start_column_index: column,
            end_column_index: column + 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BooleanRule {
    pub condition: BooleanCondition,
    pub format: CellFormat,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BooleanCondition {
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub text_format: TextFormat,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}
