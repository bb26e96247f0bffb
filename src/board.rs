//! Mine placement and neighbor numbering over a normalized grid.
//!
//! Classification draws one sample per cell and never looks at other cells,
//! so the whole board is labeled before any neighbor is counted.
use crate::calendar::{Grid, DAYS_PER_WEEK};
use crate::config::MineOdds;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellLabel {
    Mine,
    Safe,
    Empty,
}

impl CellLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            CellLabel::Mine => "mine",
            CellLabel::Safe => "safe",
            CellLabel::Empty => "empty",
        }
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type LabelRow = [CellLabel; DAYS_PER_WEEK];

/// One label per grid position, same shape as the source [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedGrid {
    rows: Vec<LabelRow>,
}

impl ClassifiedGrid {
    pub fn from_rows(rows: Vec<LabelRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LabelRow] {
        &self.rows
    }

    pub fn weeks(&self) -> usize {
        self.rows.len()
    }

    pub fn label(&self, week: usize, day: usize) -> CellLabel {
        self.rows[week][day]
    }

    pub fn is_mine(&self, week: usize, day: usize) -> bool {
        self.label(week, day) == CellLabel::Mine
    }

    pub fn mine_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|label| **label == CellLabel::Mine)
            .count()
    }
}

/// Source of uniform samples in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: rand::Rng> UnitSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Label a single cell from its count and one sample.
///
/// Zero-count days are mines below `odds.no_commit`; active days are mines at
/// or above `1 - odds.commit`.
pub fn classify_cell(count: u32, sample: f64, odds: MineOdds) -> CellLabel {
    if count == 0 {
        if sample < odds.no_commit {
            CellLabel::Mine
        } else {
            CellLabel::Empty
        }
    } else if sample < 1.0 - odds.commit {
        CellLabel::Safe
    } else {
        CellLabel::Mine
    }
}

/// Label every cell, drawing samples in row-major order (week, then weekday).
pub fn classify<S: UnitSource + ?Sized>(
    grid: &Grid,
    odds: MineOdds,
    source: &mut S,
) -> ClassifiedGrid {
    let rows = grid
        .rows()
        .iter()
        .map(|&week| week.map(|count| classify_cell(count, source.next_unit(), odds)))
        .collect();
    ClassifiedGrid::from_rows(rows)
}

/// What a cell shows once the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Mine,
    /// Number of adjacent mines, `0..=8`.
    Clear(u8),
}

impl Annotation {
    /// The visible number, if any. Zero is left blank.
    pub fn number(self) -> Option<u8> {
        match self {
            Annotation::Clear(count) if count > 0 => Some(count),
            _ => None,
        }
    }
}

pub type AnnotationRow = [Annotation; DAYS_PER_WEEK];

/// Count mines among the up-to-eight neighbors of a cell.
pub fn neighbor_mines(board: &ClassifiedGrid, week: usize, day: usize) -> u8 {
    let mut mines = 0;
    for dw in -1isize..=1 {
        for dd in -1isize..=1 {
            if dw == 0 && dd == 0 {
                continue;
            }
            let (Some(w), Some(d)) = (week.checked_add_signed(dw), day.checked_add_signed(dd))
            else {
                continue;
            };
            if w < board.weeks() && d < DAYS_PER_WEEK && board.is_mine(w, d) {
                mines += 1;
            }
        }
    }
    mines
}

/// Annotate a fully classified board.
pub fn annotate(board: &ClassifiedGrid) -> Vec<AnnotationRow> {
    (0..board.weeks())
        .map(|week| {
            std::array::from_fn(|day| {
                if board.is_mine(week, day) {
                    Annotation::Mine
                } else {
                    Annotation::Clear(neighbor_mines(board, week, day))
                }
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
