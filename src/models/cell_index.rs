use chrono::{Local, Month};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

/// Ledger column for each tracked month.
const MONTH_COLUMNS: [(Month, u32); 5] = [
    (Month::August, 1),
    (Month::September, 2),
    (Month::October, 3),
    (Month::November, 4),
    (Month::December, 5),
];

/// Ledger row for each debit code. Row 13 is not assigned to any code.
const DEBIT_ROWS: [(&str, u32); 15] = [
    ("a", 2),
    ("b", 3),
    ("c", 4),
    ("d", 5),
    ("e", 6),
    ("f", 7),
    ("g", 8),
    ("h", 9),
    ("i", 10),
    ("j", 11),
    ("k", 12),
    ("l", 14),
    ("m", 15),
    ("n", 16),
    ("o", 17),
];

/// Zero-based position of a single cell in the ledger sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    pub row: u32,
    pub column: u32,
}

/// Maps month names and debit codes onto ledger coordinates.
pub struct CellIndexResolver {
    columns: HashMap<Month, u32>,
    rows: HashMap<&'static str, u32>,
}

impl Default for CellIndexResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CellIndexResolver {
    pub fn new() -> Self {
        Self {
            columns: MONTH_COLUMNS.into_iter().collect(),
            rows: DEBIT_ROWS.into_iter().collect(),
        }
    }

    /// Column for a month name such as "August" or "aug", if the month is tracked.
    pub fn column_for_month(&self, month_name: &str) -> Option<u32> {
        let month = Month::from_str(month_name.trim()).ok()?;
        self.columns.get(&month).copied()
    }

    /// Row for a debit code, if the code is known.
    pub fn row_for_debit(&self, code: &str) -> Option<u32> {
        self.rows.get(code.trim()).copied()
    }

    /// Column for a month name, falling back to 0 for untracked months.
    pub fn month_to_column(&self, month_name: &str) -> u32 {
        self.column_for_month(month_name).unwrap_or_else(|| {
            warn!(month = month_name, "Month is not tracked, using column 0");
            0
        })
    }

    /// Row for a debit code, falling back to 0 for unknown codes.
    pub fn debit_to_row(&self, code: &str) -> u32 {
        self.row_for_debit(code).unwrap_or_else(|| {
            warn!(code, "Unknown debit code, using row 0");
            0
        })
    }
}

/// English name of the current month in local time, e.g. "October".
pub fn current_month_name() -> String {
    Local::now().format("%B").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_months() {
        let resolver = CellIndexResolver::new();
        let expected = [
            ("August", 1),
            ("September", 2),
            ("October", 3),
            ("November", 4),
            ("December", 5),
        ];

        for (month, column) in expected {
            assert_eq!(resolver.month_to_column(month), column, "month {}", month);
        }
    }

    #[test]
    fn test_month_names_are_case_insensitive() {
        let resolver = CellIndexResolver::new();
        assert_eq!(resolver.column_for_month("august"), Some(1));
        assert_eq!(resolver.column_for_month("DECEMBER"), Some(5));
        assert_eq!(resolver.column_for_month("Oct"), Some(3));
    }

    #[test]
    fn test_untracked_months_fall_back_to_zero() {
        let resolver = CellIndexResolver::new();

        for month in ["January", "February", "March", "April", "May", "June", "July"] {
            assert_eq!(resolver.column_for_month(month), None);
            assert_eq!(resolver.month_to_column(month), 0, "month {}", month);
        }

        assert_eq!(resolver.month_to_column("Smarch"), 0);
        assert_eq!(resolver.month_to_column(""), 0);
    }

    #[test]
    fn test_debit_codes() {
        let resolver = CellIndexResolver::new();
        let codes = [
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
        ];
        let rows = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 16, 17];

        for (code, row) in codes.iter().zip(rows) {
            assert_eq!(resolver.debit_to_row(code), row, "code {}", code);
        }
    }

    #[test]
    fn test_row_13_is_unassigned() {
        let resolver = CellIndexResolver::new();
        assert!(DEBIT_ROWS.iter().all(|(code, _)| resolver.debit_to_row(code) != 13));
    }

    #[test]
    fn test_unknown_debit_codes_fall_back_to_zero() {
        let resolver = CellIndexResolver::new();

        for code in ["z", "p", "A", "ab", ""] {
            assert_eq!(resolver.row_for_debit(code), None);
            assert_eq!(resolver.debit_to_row(code), 0, "code {:?}", code);
        }
    }

    #[test]
    fn test_current_month_name_parses() {
        let name = current_month_name();
        assert!(Month::from_str(&name).is_ok(), "unexpected month name {}", name);
    }
}
