pub mod cell_index;
pub mod format_rule;

pub use cell_index::{CellIndex, CellIndexResolver, current_month_name};
pub use format_rule::BatchUpdateRequest;
