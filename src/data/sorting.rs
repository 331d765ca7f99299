//! Column-agnostic sorting for summary tables.
//!
//! Rows expose their fields by column id through [`Row`], so one stable sort
//! serves every table. Missing values always sort after present ones, in
//! either direction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single field value as seen by the table model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Int(i64),
    Text(String),
    /// Column id not produced by the row, or a null field
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Raw display form (missing renders as an empty cell)
    pub fn display(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Missing => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map(CellValue::from).unwrap_or(Self::Missing)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// Anything that can be shown in a sortable table
pub trait Row {
    fn cell(&self, column_id: &str) -> CellValue;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// View-local sort state of one table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub order_by: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a click on a column header.
    ///
    /// The active column flips direction; any other column becomes active ascending.
    pub fn toggle(&mut self, column_id: &str) {
        if self.order_by.as_deref() == Some(column_id) {
            self.direction = self.direction.flipped();
        } else {
            self.order_by = Some(column_id.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn is_active(&self, column_id: &str) -> bool {
        self.order_by.as_deref() == Some(column_id)
    }
}

/// Three-way comparison of two cells under a direction.
///
/// Ints order before text when kinds differ. Missing is last regardless of direction.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    let natural = match (a, b) {
        (CellValue::Missing, CellValue::Missing) => return Ordering::Equal,
        (CellValue::Missing, _) => return Ordering::Greater,
        (_, CellValue::Missing) => return Ordering::Less,
        (CellValue::Int(x), CellValue::Int(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Int(_), CellValue::Text(_)) => Ordering::Less,
        (CellValue::Text(_), CellValue::Int(_)) => Ordering::Greater,
    };
    match direction {
        SortDirection::Asc => natural,
        SortDirection::Desc => natural.reverse(),
    }
}

/// Sort rows by a column without touching the caller's slice.
///
/// `order_by == None` keeps the input order. Equal cells keep their relative order.
pub fn sort_rows<'a, R: Row>(
    rows: &'a [R],
    order_by: Option<&str>,
    direction: SortDirection,
) -> Vec<&'a R> {
    let mut sorted: Vec<&R> = rows.iter().collect();
    let Some(column_id) = order_by else {
        return sorted;
    };
    // Vec::sort_by is stable
    sorted.sort_by(|a, b| compare_cells(&a.cell(column_id), &b.cell(column_id), direction));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Named {
        id: &'static str,
        score: Option<u32>,
        label: &'static str,
    }

    impl Row for Named {
        fn cell(&self, column_id: &str) -> CellValue {
            match column_id {
                "id" => self.id.into(),
                "score" => self.score.map(CellValue::from).unwrap_or(CellValue::Missing),
                "label" => self.label.into(),
                _ => CellValue::Missing,
            }
        }
    }

    fn make(id: &'static str, score: Option<u32>, label: &'static str) -> Named {
        Named { id, score, label }
    }

    fn ids(rows: &[&Named]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_numeric_not_lexicographic() {
        let rows = vec![make("a", Some(10), "x"), make("b", Some(9), "y"), make("c", Some(100), "z")];
        let sorted = sort_rows(&rows, Some("score"), SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_sorts_last_both_directions() {
        let rows = vec![make("a", None, "x"), make("b", Some(2), "y"), make("c", Some(1), "z")];

        let asc = sort_rows(&rows, Some("score"), SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["c", "b", "a"]);

        let desc = sort_rows(&rows, Some("score"), SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_desc() {
        let rows = vec![make("a", Some(1), "x"), make("b", Some(1), "y"), make("c", Some(2), "z")];
        let desc = sort_rows(&rows, Some("score"), SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_order_by_keeps_input() {
        let rows = vec![make("b", Some(2), "x"), make("a", Some(1), "y")];
        let sorted = sort_rows(&rows, None, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_column_is_all_missing() {
        let rows = vec![make("b", Some(2), "x"), make("a", Some(1), "y")];
        let sorted = sort_rows(&rows, Some("nope"), SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_toggle_rule() {
        let mut state = SortState::default();
        assert_eq!(state.order_by, None);

        state.toggle("score");
        assert_eq!(state.order_by.as_deref(), Some("score"));
        assert_eq!(state.direction, SortDirection::Asc);

        state.toggle("score");
        assert_eq!(state.direction, SortDirection::Desc);

        state.toggle("label");
        assert_eq!(state.order_by.as_deref(), Some("label"));
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn test_mixed_kinds_do_not_panic() {
        assert_eq!(
            compare_cells(&CellValue::Int(5), &CellValue::Text("a".into()), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Missing, &CellValue::Int(0), SortDirection::Desc),
            Ordering::Greater
        );
    }
}
