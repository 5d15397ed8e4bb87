//! Sortable results table with a pinned average row.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Desc,
    Asc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Desc => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
        }
    }

    /// Header marker for the active column
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Desc => "▼",
            SortDirection::Asc => "▲",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        column: usize,
        direction: SortDirection,
    },
}

impl SortState {
    /// State after a click on `column`. A new column starts descending,
    /// the active column flips.
    pub fn click(self, column: usize) -> Self {
        let direction = match self {
            SortState::Sorted {
                column: active,
                direction,
            } if active == column => direction.flip(),
            _ => SortDirection::Desc,
        };
        SortState::Sorted { column, direction }
    }

    pub fn direction_of(&self, column: usize) -> Option<SortDirection> {
        match *self {
            SortState::Sorted {
                column: active,
                direction,
            } if active == column => Some(direction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardRow {
    pub label: String,
    #[serde(rename = "values", default)]
    pub cells: Vec<Option<f64>>,
    #[serde(rename = "average", default)]
    pub is_average: bool,
}

impl LeaderboardRow {
    pub fn new(label: impl Into<String>, cells: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            cells: cells.into_iter().map(Some).collect(),
            is_average: false,
        }
    }

    pub fn average(label: impl Into<String>, cells: Vec<f64>) -> Self {
        Self {
            is_average: true,
            ..Self::new(label, cells)
        }
    }

    /// Sort key for `column`; absent or null cells count as 0
    pub fn value(&self, column: usize) -> f64 {
        self.cells.get(column).copied().flatten().unwrap_or(0.0)
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Failed to read leaderboard file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid leaderboard JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row '{label}' has {found} values but the table has {expected} columns")]
    RowWidth {
        label: String,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Deserialize)]
struct LeaderboardFile {
    columns: Vec<String>,
    rows: Vec<LeaderboardRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    columns: Vec<String>,
    rows: Vec<LeaderboardRow>,
    state: SortState,
}

impl Leaderboard {
    pub fn new(columns: Vec<String>, rows: Vec<LeaderboardRow>) -> Self {
        Self {
            columns,
            rows,
            state: SortState::Unsorted,
        }
    }

    pub fn from_json(body: &str) -> Result<Self, LeaderboardError> {
        let file: LeaderboardFile = serde_json::from_str(body)?;
        let expected = file.columns.len();
        if let Some(row) = file.rows.iter().find(|r| r.cells.len() > expected) {
            return Err(LeaderboardError::RowWidth {
                label: row.label.clone(),
                found: row.cells.len(),
                expected,
            });
        }
        Ok(Self::new(file.columns, file.rows))
    }

    pub fn from_file(path: &Path) -> Result<Self, LeaderboardError> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in display order
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    pub fn state(&self) -> SortState {
        self.state
    }

    /// Advance the sort state for a header click and reorder. Clicks on
    /// a column that doesn't exist are ignored.
    pub fn click_header(&mut self, column: usize) -> SortState {
        if column >= self.columns.len() {
            return self.state;
        }
        self.state = self.state.click(column);
        if let SortState::Sorted { column, direction } = self.state {
            self.sort(column, direction);
        }
        self.state
    }

    fn sort(&mut self, column: usize, direction: SortDirection) {
        let (mut data, pinned): (Vec<_>, Vec<_>) =
            self.rows.drain(..).partition(|row| !row.is_average);

        data.sort_by(|a, b| {
            let ord = a.value(column).total_cmp(&b.value(column));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        self.rows = data;
        self.rows.extend(pinned);
    }

    /// Header text with the active column's arrow
    pub fn header(&self, column: usize) -> String {
        let name = self.columns.get(column).map(String::as_str).unwrap_or("");
        match self.state.direction_of(column) {
            Some(direction) => format!("{} {}", name, direction.arrow()),
            None => name.to_string(),
        }
    }
}
