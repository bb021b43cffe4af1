use crate::db::Cell;

/// Rows of cell values below the header row. Gaps inside a row are empty strings.
pub type Grid = Vec<Vec<String>>;

/// Builds a [`Grid`] from cells sorted by `(row, col)`.
///
/// Columns skipped between two cells of the same row become empty strings.
/// The first row is treated as column headers and dropped. Unsorted input
/// produces an unspecified grid.
pub fn read_grid(cells: impl IntoIterator<Item = Cell>) -> Grid {
    let mut rows: Grid = Vec::new();
    let mut current: Option<(u32, u32, Vec<String>)> = None;

    for cell in cells {
        match current.as_mut() {
            Some((row, col, values)) if *row == cell.row => {
                let gap = cell.col.saturating_sub(*col).saturating_sub(1);
                values.extend((0..gap).map(|_| String::new()));
                values.push(cell.value);
                *col = cell.col;
            }
            _ => {
                if let Some((_, _, values)) = current.take() {
                    rows.push(values);
                }
                current = Some((cell.row, cell.col, vec![cell.value]));
            }
        }
    }

    if let Some((_, _, values)) = current {
        rows.push(values);
    }

    if !rows.is_empty() {
        rows.remove(0);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u32, col: u32, value: &str) -> Cell {
        Cell {
            row,
            col,
            value: value.to_string(),
        }
    }

    #[test]
    fn header_row_is_dropped() {
        let grid = read_grid(vec![
            cell(1, 1, "Question"),
            cell(1, 2, "Answer"),
            cell(2, 1, "Capital of France?"),
            cell(2, 2, "Paris*"),
        ]);

        assert_eq!(grid, vec![vec!["Capital of France?", "Paris*"]]);
    }

    #[test]
    fn gaps_within_a_row_are_padded() {
        let grid = read_grid(vec![
            cell(1, 1, "header"),
            cell(2, 1, "a"),
            cell(2, 4, "d"),
            cell(3, 1, "x"),
            cell(3, 2, "y"),
        ]);

        assert_eq!(grid, vec![vec!["a", "", "", "d"], vec!["x", "y"]]);
    }

    #[test]
    fn header_only_or_empty_sheet_gives_empty_grid() {
        assert!(read_grid(Vec::new()).is_empty());
        assert!(read_grid(vec![cell(1, 1, "Question"), cell(1, 2, "Answer")]).is_empty());
    }

    #[test]
    fn skipped_rows_are_not_materialized() {
        let grid = read_grid(vec![cell(1, 1, "h"), cell(2, 1, "first"), cell(5, 1, "second")]);

        assert_eq!(grid, vec![vec!["first"], vec!["second"]]);
    }
}
