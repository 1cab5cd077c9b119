//! The seam between plate-reader exports and the numeric core.
//!
//! Spreadsheet parsing lives outside this crate. Whatever reads the file only has
//! to expose the current plate as a rectangular grid of optional numbers and,
//! for multi-plate reads, say whether another plate follows.

/// A rectangular grid of measurements, optionally one of several plates.
pub trait GridSource {
    /// `(rows, cols)` of the current plate.
    fn dimensions(&self) -> (usize, usize);

    /// Value at `(row, col)` of the current plate; `None` for an empty or
    /// non-numeric cell.
    fn cell(&self, row: usize, col: usize) -> Option<f64>;

    /// Whether another plate follows the current one.
    fn has_next_plate(&self) -> bool {
        false
    }

    /// Move to the next plate. Only meaningful after `has_next_plate()` returned true.
    fn advance_to_next_plate(&mut self) {}
}

/// A tall sheet holding several plate reads stacked vertically.
///
/// Plate-reader exports place each read below the previous one, separated by
/// blank rows. The layout is described by the first data row/column and the
/// number of separator rows between plates. The end of the dataset is detected
/// by probing the first cell where the next plate would start.
#[derive(Debug, Clone)]
pub struct StackedPlates {
    sheet: Vec<Vec<Option<f64>>>,
    plate_rows: usize,
    plate_cols: usize,
    first_col: usize,
    gap_rows: usize,
    current_start: usize,
}

impl StackedPlates {
    /// Plates start at the top-left corner and are separated by one blank row.
    pub fn new(sheet: Vec<Vec<Option<f64>>>, plate_rows: usize, plate_cols: usize) -> Self {
        Self::with_layout(sheet, plate_rows, plate_cols, 0, 0, 1)
    }

    pub fn with_layout(
        sheet: Vec<Vec<Option<f64>>>,
        plate_rows: usize,
        plate_cols: usize,
        first_row: usize,
        first_col: usize,
        gap_rows: usize,
    ) -> Self {
        Self {
            sheet,
            plate_rows,
            plate_cols,
            first_col,
            gap_rows,
            current_start: first_row,
        }
    }

    /// Row index (in the sheet) of the first row of the current plate.
    pub fn current_start(&self) -> usize {
        self.current_start
    }

    fn next_start(&self) -> usize {
        self.current_start + self.plate_rows + self.gap_rows
    }

    fn sheet_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.sheet.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Count the complete rows/cols available for the plate starting at `start`.
    ///
    /// A plate cut short by the end of the sheet reports fewer rows so that
    /// the consumer can reject it as a format error.
    fn available(&self, start: usize) -> (usize, usize) {
        let rows = self
            .sheet
            .len()
            .saturating_sub(start)
            .min(self.plate_rows);
        let cols = (start..start + rows)
            .map(|r| self.sheet[r].len().saturating_sub(self.first_col).min(self.plate_cols))
            .min()
            .unwrap_or(0);
        (rows, cols)
    }
}

impl GridSource for StackedPlates {
    fn dimensions(&self) -> (usize, usize) {
        self.available(self.current_start)
    }

    fn cell(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.plate_rows || col >= self.plate_cols {
            return None;
        }
        self.sheet_cell(self.current_start + row, self.first_col + col)
    }

    fn has_next_plate(&self) -> bool {
        self.sheet_cell(self.next_start(), self.first_col).is_some()
    }

    fn advance_to_next_plate(&mut self) {
        self.current_start = self.next_start();
    }
}
