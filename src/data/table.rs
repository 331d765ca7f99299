//! Column descriptors and the render-ready table model.
//!
//! A [`TableModel`] owns a fixed column set and the view-local sort state.
//! Rendering produces a [`RenderedTable`], a plain value that the terminal
//! view and the page export both draw from.

use super::sorting::{sort_rows, CellValue, Row, SortDirection, SortState};
use super::{AssigneeSummary, StatusSummary};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

// Column ids of the assignee table
pub const COL_ASSIGNEE: &str = "assignee";
pub const COL_ACCOUNT_ID: &str = "account_id";
pub const COL_AVATAR_URL: &str = "avatar_url";
pub const COL_TOTAL_CARDS: &str = "total_cards";
pub const COL_DONE_CARDS: &str = "done_cards";
pub const COL_IN_PROGRESS_CARDS: &str = "in_progress_cards";
pub const COL_TIME_SPENT_HOURS: &str = "time_spent_hours";

// Column ids of the status table
pub const COL_STATUS: &str = "status";
pub const COL_COUNT: &str = "count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// How a computed cell derives its text from the row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFormat {
    /// Whole hours with an `h` suffix
    Hours,
    /// `value/other` where `other` is another column of the same row
    OutOf(String),
}

/// Where a cell's display text comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellRender {
    #[default]
    Plain,
    Computed(CellFormat),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub align: ColumnAlign,
    pub render: CellRender,
}

impl Column {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            align: ColumnAlign::default(),
            render: CellRender::Plain,
        }
    }

    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    pub fn computed(mut self, format: CellFormat) -> Self {
        self.render = CellRender::Computed(format);
        self
    }

    /// Display text of this column for a row
    pub fn render_cell<R: Row>(&self, row: &R) -> String {
        let value = row.cell(&self.id);
        match &self.render {
            CellRender::Plain => value.display(),
            CellRender::Computed(CellFormat::Hours) => match value {
                CellValue::Missing => String::new(),
                other => format!("{}h", other.display()),
            },
            CellRender::Computed(CellFormat::OutOf(other_id)) => {
                let other = row.cell(other_id);
                if value.is_missing() || other.is_missing() {
                    value.display()
                } else {
                    format!("{}/{}", value.display(), other.display())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub label: String,
    pub align: ColumnAlign,
    /// Set on the active sort column
    pub sort: Option<SortDirection>,
    /// Keyboard cursor sits on this column
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableBody {
    Rows(Vec<Vec<String>>),
    /// Single row spanning every column, shown when there is no data
    Placeholder { message: String, span: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTable {
    pub title: Option<String>,
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder { .. } => 1,
        }
    }
}

/// Sort and render model for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModel {
    title: Option<String>,
    columns: Vec<Column>,
    sort: SortState,
    cursor: usize,
    empty_message: String,
}

impl TableModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            title: None,
            columns,
            sort: SortState::default(),
            cursor: 0,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Toggle sorting on a column by id. Unknown ids are ignored.
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        let Some(idx) = self.columns.iter().position(|c| c.id == column_id) else {
            return false;
        };
        self.cursor = idx;
        self.sort.toggle(column_id);
        true
    }

    /// Toggle sorting on the column at a 0-based index
    pub fn toggle_sort_at(&mut self, idx: usize) -> bool {
        match self.columns.get(idx) {
            Some(column) => {
                let id = column.id.clone();
                self.toggle_sort(&id)
            }
            None => false,
        }
    }

    pub fn sort_by_cursor(&mut self) -> bool {
        self.toggle_sort_at(self.cursor)
    }

    pub fn next_column(&mut self) {
        if !self.columns.is_empty() {
            self.cursor = (self.cursor + 1) % self.columns.len();
        }
    }

    pub fn prev_column(&mut self) {
        if !self.columns.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.columns.len() - 1);
        }
    }

    /// Rows in display order
    pub fn sorted<'a, R: Row>(&self, rows: &'a [R]) -> Vec<&'a R> {
        sort_rows(rows, self.sort.order_by.as_deref(), self.sort.direction)
    }

    pub fn render<R: Row>(&self, rows: &[R]) -> RenderedTable {
        let header = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| HeaderCell {
                label: column.label.clone(),
                align: column.align,
                sort: self
                    .sort
                    .is_active(&column.id)
                    .then_some(self.sort.direction),
                focused: idx == self.cursor,
            })
            .collect();

        let body = if rows.is_empty() {
            TableBody::Placeholder {
                message: self.empty_message.clone(),
                span: self.columns.len(),
            }
        } else {
            TableBody::Rows(
                self.sorted(rows)
                    .into_iter()
                    .map(|row| self.columns.iter().map(|c| c.render_cell(row)).collect())
                    .collect(),
            )
        };

        RenderedTable {
            title: self.title.clone(),
            header,
            body,
        }
    }
}

impl Row for AssigneeSummary {
    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            COL_ASSIGNEE => self.assignee.as_str().into(),
            COL_ACCOUNT_ID => self.account_id.as_deref().into(),
            COL_AVATAR_URL => self.avatar_url.as_deref().into(),
            COL_TOTAL_CARDS => self.total_cards.into(),
            COL_DONE_CARDS => self.done_cards.into(),
            COL_IN_PROGRESS_CARDS => self.in_progress_cards.into(),
            COL_TIME_SPENT_HOURS => self.time_spent_hours.into(),
            _ => CellValue::Missing,
        }
    }
}

impl Row for StatusSummary {
    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            COL_STATUS => self.status.as_str().into(),
            COL_COUNT => self.count.into(),
            _ => CellValue::Missing,
        }
    }
}

/// Workload table: one row per assignee
pub fn assignee_table(empty_message: &str) -> TableModel {
    TableModel::new(vec![
        Column::new(COL_ASSIGNEE, "Assignee"),
        Column::new(COL_TOTAL_CARDS, "Total").align(ColumnAlign::Right),
        Column::new(COL_DONE_CARDS, "Done")
            .align(ColumnAlign::Right)
            .computed(CellFormat::OutOf(COL_TOTAL_CARDS.to_string())),
        Column::new(COL_IN_PROGRESS_CARDS, "In Progress").align(ColumnAlign::Right),
        Column::new(COL_TIME_SPENT_HOURS, "Hours")
            .align(ColumnAlign::Right)
            .computed(CellFormat::Hours),
    ])
    .with_title("Workload by Assignee")
    .with_empty_message(empty_message)
}

/// Breakdown table: one row per status label
pub fn status_table(empty_message: &str) -> TableModel {
    TableModel::new(vec![
        Column::new(COL_STATUS, "Status"),
        Column::new(COL_COUNT, "Cards").align(ColumnAlign::Right),
    ])
    .with_title("Cards by Status")
    .with_empty_message(empty_message)
}
