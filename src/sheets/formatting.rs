use crate::models::CellIndex;
use crate::models::format_rule::{
    AddConditionalFormatRuleRequest, BatchUpdateRequest, BooleanCondition, BooleanRule, CellFormat,
    ConditionalFormatRule, GridRange, Request, TextFormat,
};

/// Strike through the cell once anything has been entered in it.
pub(crate) fn strikethrough_rule(sheet_id: i32, cell: CellIndex) -> BatchUpdateRequest {
    let request = Request {
        add_conditional_format_rule: AddConditionalFormatRuleRequest {
            rule: ConditionalFormatRule {
                ranges: vec![GridRange::single_cell(sheet_id, cell.row, cell.column)],
                boolean_rule: BooleanRule {
                    condition: BooleanCondition {
                        type_: "NOT_BLANK".to_string(),
                    },
                    format: CellFormat {
                        text_format: TextFormat {
                            strikethrough: Some(true),
                        },
                    },
                },
            },
        },
    };

    BatchUpdateRequest {
        requests: vec![request],
    }
}
