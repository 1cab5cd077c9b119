//! Fixed-size plate grid.

use serde::Serialize;

use crate::domain::{HALF_ROWS, HalfGrid, PLATE_COLS, PLATE_ROWS};
use crate::error::AssayError;
use crate::grid::GridSource;

/// One 8 × 12 plate read, fully numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateGrid {
    cells: [[f64; PLATE_COLS]; PLATE_ROWS],
}

impl PlateGrid {
    pub fn from_cells(cells: [[f64; PLATE_COLS]; PLATE_ROWS]) -> Self {
        Self { cells }
    }

    /// A plate with every well set to `value`.
    pub fn filled(value: f64) -> Self {
        Self::from_cells([[value; PLATE_COLS]; PLATE_ROWS])
    }

    /// Read the current plate of a source.
    ///
    /// The source must expose exactly 8 × 12 cells, all finite numbers.
    pub fn from_source<S: GridSource + ?Sized>(source: &S) -> Result<Self, AssayError> {
        let (rows, cols) = source.dimensions();
        if (rows, cols) != (PLATE_ROWS, PLATE_COLS) {
            return Err(AssayError::data_format(format!(
                "expected a {PLATE_ROWS}x{PLATE_COLS} plate, found {rows}x{cols}"
            )));
        }

        let mut cells = [[0.0; PLATE_COLS]; PLATE_ROWS];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = source
                    .cell(r, c)
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| non_numeric(r, c))?;
            }
        }
        Ok(Self { cells })
    }

    /// Build from row vectors, rejecting anything but 8 rows of 12 finite values.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AssayError> {
        if rows.len() != PLATE_ROWS {
            return Err(AssayError::data_format(format!(
                "expected {PLATE_ROWS} rows, found {}",
                rows.len()
            )));
        }
        let mut cells = [[0.0; PLATE_COLS]; PLATE_ROWS];
        for (r, (dst, src)) in cells.iter_mut().zip(rows).enumerate() {
            if src.len() != PLATE_COLS {
                return Err(AssayError::data_format(format!(
                    "row {r} has {} values, expected {PLATE_COLS}",
                    src.len()
                )));
            }
            if let Some(c) = src.iter().position(|v| !v.is_finite()) {
                return Err(non_numeric(r, c));
            }
            dst.copy_from_slice(src);
        }
        Ok(Self { cells })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[f64; PLATE_COLS]; PLATE_ROWS] {
        &self.cells
    }

    /// Mean of `cols` in `row`.
    pub fn row_mean(&self, row: usize, cols: std::ops::Range<usize>) -> f64 {
        crate::math::mean(&self.cells[row][cols])
    }

    /// Split into the top (rows 0..4) and bottom (rows 4..8) halves.
    pub fn halves(&self) -> (HalfGrid, HalfGrid) {
        let mut top = [[0.0; PLATE_COLS]; HALF_ROWS];
        let mut bottom = [[0.0; PLATE_COLS]; HALF_ROWS];
        top.copy_from_slice(&self.cells[..HALF_ROWS]);
        bottom.copy_from_slice(&self.cells[HALF_ROWS..]);
        (top, bottom)
    }
}

fn non_numeric(row: usize, col: usize) -> AssayError {
    AssayError::data_format(format!(
        "missing or non-numeric value at row {row}, column {col}"
    ))
}

impl GridSource for PlateGrid {
    fn dimensions(&self) -> (usize, usize) {
        (PLATE_ROWS, PLATE_COLS)
    }

    fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}
