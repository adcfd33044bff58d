//! Column sorting
//!
//! Sorting reorders data rows only. Rows are referenced by their index in
//! the parsed table, so sorting moves indices rather than row contents.

use std::cmp::Ordering;

use super::model::CsvData;

/// Sort direction for the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next direction when the same column is activated again
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }
}

/// Which column is sorted and how
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Advance the sort state for a column activation
    ///
    /// The same column cycles none → ascending → descending → none.
    /// A different column always starts at ascending.
    pub fn toggle(&mut self, column: usize) {
        let direction = if self.column == Some(column) {
            self.direction.next()
        } else {
            SortDirection::Ascending
        };

        *self = match direction {
            SortDirection::None => SortState::default(),
            _ => SortState {
                column: Some(column),
                direction,
            },
        };
    }

    /// True when rows are in their original order
    pub fn is_unsorted(&self) -> bool {
        self.column.is_none() || self.direction == SortDirection::None
    }

    /// Direction for a given column (None if another column is sorted)
    pub fn direction_for(&self, column: usize) -> SortDirection {
        if self.column == Some(column) {
            self.direction
        } else {
            SortDirection::None
        }
    }
}

/// Parse a cell as a number the way a sort key needs it
pub fn numeric_value(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Reorder `rows` (indices into `data`) by a column
///
/// When every value in the column parses as a number the comparison is
/// numeric, otherwise it is textual. Missing cells read as `""`. The sort is
/// stable in both directions and leaves `rows` untouched for
/// `SortDirection::None`.
///
/// Text compares by lowercased code points, not by locale collation: case is
/// ignored (lowercase first on ties) but accents are not folded, so `é`
/// sorts after `z`.
pub fn sort_rows(data: &CsvData, rows: &mut [usize], column: usize, direction: SortDirection) {
    if direction == SortDirection::None || rows.len() < 2 {
        return;
    }

    let numeric: Option<Vec<(f64, usize)>> = rows
        .iter()
        .map(|&idx| numeric_value(data.get(idx, column)).map(|v| (v, idx)))
        .collect();

    match numeric {
        Some(mut keyed) => {
            keyed.sort_by(|(a, _), (b, _)| directed(a.total_cmp(b), direction));
            for (slot, (_, idx)) in rows.iter_mut().zip(keyed) {
                *slot = idx;
            }
        }
        None => {
            let mut keyed: Vec<(String, &str, usize)> = rows
                .iter()
                .map(|&idx| {
                    let value = data.get(idx, column);
                    (value.to_lowercase(), value, idx)
                })
                .collect();
            keyed.sort_by(|(a_folded, a, _), (b_folded, b, _)| {
                let ordering = a_folded.cmp(b_folded).then_with(|| b.cmp(a));
                directed(ordering, direction)
            });
            for (slot, (_, _, idx)) in rows.iter_mut().zip(keyed) {
                *slot = idx;
            }
        }
    }

    tracing::debug!(
        "Sorted {} rows by column {} ({:?})",
        rows.len(),
        column,
        direction
    );
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Descending => ordering.reverse(),
        _ => ordering,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(rows: &[&[&str]]) -> CsvData {
        CsvData::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn column(data: &CsvData, rows: &[usize], col: usize) -> Vec<String> {
        rows.iter().map(|&i| data.get(i, col).to_string()).collect()
    }

    #[test]
    fn test_toggle_cycles_same_column() {
        let mut sort = SortState::default();

        sort.toggle(1);
        assert_eq!(sort.column, Some(1));
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.toggle(1);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.toggle(1);
        assert!(sort.is_unsorted());
        assert_eq!(sort, SortState::default());

        sort.toggle(1);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_other_column_resets_to_ascending() {
        let mut sort = SortState::default();
        sort.toggle(0);
        sort.toggle(0);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.toggle(2);
        assert_eq!(sort.column, Some(2));
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(sort.direction_for(0), SortDirection::None);
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let d = data(&[&["3"], &["10"], &["2"]]);
        let mut rows = vec![0, 1, 2];

        sort_rows(&d, &mut rows, 0, SortDirection::Ascending);
        assert_eq!(column(&d, &rows, 0), vec!["2", "3", "10"]);

        sort_rows(&d, &mut rows, 0, SortDirection::Descending);
        assert_eq!(column(&d, &rows, 0), vec!["10", "3", "2"]);
    }

    #[test]
    fn test_mixed_column_sorts_as_text() {
        let d = data(&[&["b"], &["10"], &["A"], &["2"]]);
        let mut rows = vec![0, 1, 2, 3];
        sort_rows(&d, &mut rows, 0, SortDirection::Ascending);
        assert_eq!(column(&d, &rows, 0), vec!["10", "2", "A", "b"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let d = data(&[&["x", "1"], &["y", "0"], &["z", "1"], &["w", "0"]]);
        let mut rows = vec![0, 1, 2, 3];

        sort_rows(&d, &mut rows, 1, SortDirection::Ascending);
        assert_eq!(rows, vec![1, 3, 0, 2]);

        let mut rows = vec![0, 1, 2, 3];
        sort_rows(&d, &mut rows, 1, SortDirection::Descending);
        assert_eq!(rows, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_ragged_rows_sort_without_panicking() {
        let d = data(&[&["b", "2"], &["a"], &["c", "1"]]);
        let mut rows = vec![0, 1, 2];
        sort_rows(&d, &mut rows, 1, SortDirection::Ascending);
        // Missing cell reads as "" which is not a number, so text order applies
        assert_eq!(column(&d, &rows, 1), vec!["", "1", "2"]);
    }

    #[test]
    fn test_none_direction_leaves_order() {
        let d = data(&[&["b"], &["a"]]);
        let mut rows = vec![0, 1];
        sort_rows(&d, &mut rows, 0, SortDirection::None);
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value("42"), Some(42.0));
        assert_eq!(numeric_value(" -1.5 "), Some(-1.5));
        assert_eq!(numeric_value("1e3"), Some(1000.0));
        assert_eq!(numeric_value(""), None);
        assert_eq!(numeric_value("NaN"), None);
        assert_eq!(numeric_value("12abc"), None);
    }

    #[test]
    fn test_text_sort_ignores_case_first() {
        let d = data(&[&["Banana"], &["B"], &["apple"], &["b"]]);
        let mut rows = vec![0, 1, 2, 3];
        sort_rows(&d, &mut rows, 0, SortDirection::Ascending);
        assert_eq!(column(&d, &rows, 0), vec!["apple", "b", "B", "Banana"]);
    }

    #[test]
    fn test_text_order_is_by_code_point() {
        let data = CsvData::from_rows(vec![
            vec!["w".into()],
            vec!["éclair".into()],
            vec!["Zebra".into()],
            vec!["apple".into()],
        ]);
        let mut rows = vec![0, 1, 2, 3];
        sort_rows(&data, &mut rows, 0, SortDirection::Ascending);
        assert_eq!(rows, vec![3, 0, 2, 1]);
    }
}
