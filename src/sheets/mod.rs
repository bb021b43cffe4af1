//! Interpretation of spreadsheet cells as quizzes, polls and their results.
//!
//! Everything in here is pure: the services read cells from a
//! [`SheetStore`](crate::services::SheetStore), hand them to these functions
//! and write the outcome back.

mod grid;
pub mod leaderboard;
pub mod poll;
pub mod quiz;
pub mod statistics;

pub use grid::{read_grid, Grid};

use crate::db::{Inaccessible, Workbook};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("spreadsheet is not formatted correctly: {0}")]
    Format(&'static str),

    #[error("no access to {0}")]
    Permission(String),

    #[error("client version {client} is older than the minimal version {minimal}")]
    NeedsUpdate { client: i64, minimal: i64 },

    #[error("invalid submission: {0}")]
    Submission(&'static str),

    #[error("could not encode response: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("spreadsheet store failed: {0}")]
    Store(color_eyre::Report),
}

impl From<color_eyre::Report> for SheetError {
    fn from(report: color_eyre::Report) -> Self {
        match report.downcast_ref::<Inaccessible>() {
            Some(Inaccessible(what)) => SheetError::Permission(what.clone()),
            None => SheetError::Store(report),
        }
    }
}

/// Returns the ids of the first four worksheets, which every quiz and poll needs.
pub fn required_sheets(workbook: &Workbook) -> Result<[&str; 4], SheetError> {
    match workbook.sheet_ids.as_slice() {
        [first, second, third, fourth, ..] => Ok([
            first.as_str(),
            second.as_str(),
            third.as_str(),
            fourth.as_str(),
        ]),
        _ => Err(SheetError::Format("a workbook needs at least four sheets")),
    }
}

/// Removes a tag like `[Q]` from a document title.
pub fn format_title(title: &str, tag: &str) -> String {
    title.replace(tag, "").trim().to_string()
}

/// Splits an answer cell into its display text and correctness.
///
/// A trailing `*` marks the correct answer. Spreadsheets turn typed booleans
/// into `TRUE`/`FALSE`, so those are shown as `True`/`False`.
pub fn parse_answer(cell: &str) -> (String, bool) {
    let correct = cell.ends_with('*');
    let text = cell.trim_end_matches('*');

    let text = if text.eq_ignore_ascii_case("true") {
        "True".to_string()
    } else if text.eq_ignore_ascii_case("false") {
        "False".to_string()
    } else {
        text.to_string()
    };

    (text, correct)
}

/// Cells of a sheet given as rows, header row included.
#[cfg(test)]
pub(crate) fn cells_of(rows: &[&[&str]]) -> Vec<crate::db::Cell> {
    rows.iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, value)| crate::db::Cell {
                row: r as u32 + 1,
                col: c as u32 + 1,
                value: value.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_marker_is_stripped() {
        assert_eq!(parse_answer("Paris*"), ("Paris".to_string(), true));
        assert_eq!(parse_answer("Paris"), ("Paris".to_string(), false));
        assert_eq!(parse_answer("42**"), ("42".to_string(), true));
    }

    #[test]
    fn booleans_are_capitalized() {
        assert_eq!(parse_answer("true*"), ("True".to_string(), true));
        assert_eq!(parse_answer("FALSE"), ("False".to_string(), false));
        assert_eq!(parse_answer("trueish"), ("trueish".to_string(), false));
    }

    #[test]
    fn title_tags_are_removed() {
        assert_eq!(format_title("[Q] Capitals of Europe ", "[Q]"), "Capitals of Europe");
        assert_eq!(format_title("Lecture poll [P]", "[P]"), "Lecture poll");
        assert_eq!(format_title("Untagged", "[Q]"), "Untagged");
    }

    #[test]
    fn fewer_than_four_sheets_is_a_format_error() {
        let workbook = Workbook {
            title: "[Q] Short".to_string(),
            sheet_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert!(matches!(
            required_sheets(&workbook),
            Err(SheetError::Format(_))
        ));

        let workbook = Workbook {
            title: "[Q] Full".to_string(),
            sheet_ids: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
        };
        assert_eq!(required_sheets(&workbook).unwrap(), ["a", "b", "c", "d"]);
    }
}
