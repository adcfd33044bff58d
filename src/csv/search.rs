//! Row filtering and match highlighting

use std::ops::Range;

use super::model::CsvData;

/// Lowercase one char, folding final sigma to `σ`
///
/// Per-char so match positions map back to the source text. Both sigma forms
/// are two bytes, so folding never shifts offsets.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
}

/// Case-fold text for matching
fn fold_case(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// Normalize user input into a search term (trimmed, case-folded)
pub fn normalize_term(input: &str) -> String {
    fold_case(input.trim())
}

/// True if any field contains `term` case-insensitively
///
/// `term` must already be normalized. An empty term matches every row.
pub fn row_matches(row: &[String], term: &str) -> bool {
    term.is_empty() || row.iter().any(|field| fold_case(field).contains(term))
}

/// Keep the rows (indices into `data`) that match `term`, preserving order
pub fn filter_rows(data: &CsvData, rows: &[usize], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .copied()
        .filter(|&idx| data.row(idx).is_some_and(|row| row_matches(row, term)))
        .collect()
}

/// Byte ranges in `text` whose case-folded form equals `term`
///
/// Matches are found on the folded text and mapped back to the source
/// characters they came from, so ranges always fall on char boundaries of
/// `text` even when lowercasing changes byte lengths.
pub fn match_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    if term.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let mut folded = String::with_capacity(text.len());
    // For each byte of `folded`, the source char it came from
    let mut origin: Vec<Range<usize>> = Vec::with_capacity(text.len());

    for (start, ch) in text.char_indices() {
        let source = start..start + ch.len_utf8();
        for lower in fold_char(ch) {
            folded.push(lower);
            origin.extend(std::iter::repeat(source.clone()).take(lower.len_utf8()));
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (pos, matched) in folded.match_indices(term) {
        let start = origin[pos].start;
        let end = origin[pos + matched.len() - 1].end;
        match ranges.last_mut() {
            // Two matches can land in the same source char after folding
            Some(last) if start < last.end => last.end = last.end.max(end),
            _ => ranges.push(start..end),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  HeLLo "), "hello");
        assert_eq!(normalize_term("   "), "");
    }

    #[test]
    fn test_row_matches_any_field() {
        let r = row(&["Alice", "Berlin", "42"]);
        assert!(row_matches(&r, "berl"));
        assert!(row_matches(&r, "4"));
        assert!(!row_matches(&r, "paris"));
        assert!(row_matches(&r, ""));
    }

    #[test]
    fn test_filter_rows_preserves_order() {
        let data = CsvData::from_rows(vec![
            row(&["name"]),
            row(&["anna"]),
            row(&["bob"]),
            row(&["hannah"]),
        ]);
        assert_eq!(filter_rows(&data, &[3, 1, 2], "nn"), vec![3, 1]);
        assert_eq!(filter_rows(&data, &[1, 2, 3], ""), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_tolerates_ragged_rows() {
        let data = CsvData::from_rows(vec![row(&["a", "b", "c"]), row(&["x"]), row(&[])]);
        assert_eq!(filter_rows(&data, &[0, 1, 2], "x"), vec![1]);
    }

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(match_ranges("Foo foo FOO", "foo"), vec![0..3, 4..7, 8..11]);
        assert!(match_ranges("bar", "foo").is_empty());
        assert!(match_ranges("bar", "").is_empty());
    }

    #[test]
    fn test_match_ranges_non_ascii() {
        // 'Ä' is two bytes in UTF-8
        let text = "xÄbc";
        assert_eq!(match_ranges(text, "äb"), vec![1..4]);
        assert_eq!(&text[1..4], "Äb");
    }

    #[test]
    fn test_match_ranges_with_expanding_lowercase() {
        // 'İ' lowercases to two chars ("i" + combining dot)
        let text = "İx";
        let ranges = match_ranges(text, "x");
        assert_eq!(ranges, vec![2..3]);
        assert_eq!(&text[ranges[0].clone()], "x");
    }

    #[test]
    fn test_final_sigma_matches_and_highlights() {
        let term = normalize_term("ΟΔΟΣ");
        let r = row(&["οδος", "x"]);
        assert!(row_matches(&r, &term));
        assert_eq!(match_ranges("οδος", &term), vec![0..8]);

        // A row that matches always gets a highlight
        let term = normalize_term("ς");
        assert!(row_matches(&row(&["ΛΟΓΟΣ"]), &term));
        assert_eq!(match_ranges("ΛΟΓΟΣ", &term), vec![8..10]);
    }
}
