//! Replicate averaging with background subtraction.
//!
//! Plate layout (duplicate shown; triplicate uses groups of three):
//!
//! ```text
//!          cols 0-1      cols 2-3   cols 4-5   ...   cols 10-11
//! row 0    0 µg std      sample     sample           sample
//! row 1    1 µg std      sample     sample           sample
//! ...
//! row 6    40 µg std     sample     sample           sample
//! row 7    (unused)      sample     sample           sample
//! ```
//!
//! The zero standard is the background; it is subtracted from every average.

use std::ops::Range;

use serde::Serialize;

use crate::domain::{PLATE_COLS, PLATE_ROWS, ReplicateMode, SampleWell, WellPosition};
use crate::error::AssayError;
use crate::grid::PlateGrid;

/// Averages of one BCA plate, before any sample gating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicateAverages {
    /// Mean of the zero-standard replicate group.
    pub background: f64,
    /// Background-subtracted standard averages, one per standard row.
    pub std_avgs: Vec<f64>,
    /// Every sample group average, groups left to right and rows top to bottom.
    pub wells: Vec<SampleWell>,
}

/// Column ranges of the sample replicate groups for a replicate mode.
///
/// The first group is the standard block; every remaining column must belong to
/// a complete group of the same size.
pub fn sample_groups(mode: ReplicateMode) -> Result<Vec<Range<usize>>, AssayError> {
    let size = mode.group_size();
    let remaining = PLATE_COLS - size;
    if remaining % size != 0 {
        return Err(AssayError::data_format(format!(
            "{remaining} sample columns cannot be split into replicate groups of {size}"
        )));
    }

    Ok((size..PLATE_COLS)
        .step_by(size)
        .map(|start| start..start + size)
        .collect())
}

/// Average standards and samples of a BCA plate.
pub fn average_replicates(
    grid: &PlateGrid,
    mode: ReplicateMode,
    standard_rows: usize,
) -> Result<ReplicateAverages, AssayError> {
    if standard_rows == 0 || standard_rows > PLATE_ROWS {
        return Err(AssayError::data_format(format!(
            "standard rows must be in 1..={PLATE_ROWS}, got {standard_rows}"
        )));
    }

    let std_cols = 0..mode.group_size();
    let background = grid.row_mean(0, std_cols.clone());

    let std_avgs = (0..standard_rows)
        .map(|row| grid.row_mean(row, std_cols.clone()) - background)
        .collect();

    let mut wells = Vec::new();
    for (group, cols) in sample_groups(mode)?.into_iter().enumerate() {
        for row in 0..PLATE_ROWS {
            wells.push(SampleWell {
                position: WellPosition { group, row },
                signal: grid.row_mean(row, cols.clone()) - background,
            });
        }
    }

    Ok(ReplicateAverages {
        background,
        std_avgs,
        wells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_and_triplicate_groups() {
        let dup = sample_groups(ReplicateMode::Duplicate).unwrap();
        assert_eq!(dup, vec![2..4, 4..6, 6..8, 8..10, 10..12]);

        let tri = sample_groups(ReplicateMode::Triplicate).unwrap();
        assert_eq!(tri, vec![3..6, 6..9, 9..12]);
    }

    #[test]
    fn constant_plate_averages_to_zero() {
        for mode in [ReplicateMode::Duplicate, ReplicateMode::Triplicate] {
            let avgs = average_replicates(&PlateGrid::filled(0.734), mode, 7).unwrap();
            assert!((avgs.background - 0.734).abs() < 1e-12);
            assert_eq!(avgs.std_avgs.len(), 7);
            assert!(avgs.std_avgs.iter().all(|v| v.abs() < 1e-12));
            assert!(avgs.wells.iter().all(|w| w.signal.abs() < 1e-12));
        }
    }

    #[test]
    fn well_counts_follow_mode() {
        let plate = PlateGrid::filled(1.0);
        let dup = average_replicates(&plate, ReplicateMode::Duplicate, 7).unwrap();
        assert_eq!(dup.wells.len(), 5 * PLATE_ROWS);
        let tri = average_replicates(&plate, ReplicateMode::Triplicate, 7).unwrap();
        assert_eq!(tri.wells.len(), 3 * PLATE_ROWS);
    }

    #[test]
    fn subtracts_zero_standard_from_each_group() {
        let mut cells = [[0.1; PLATE_COLS]; PLATE_ROWS];
        cells[0][0] = 0.08;
        cells[0][1] = 0.12; // background = 0.10
        cells[3][0] = 0.55;
        cells[3][1] = 0.65; // 5 µg standard = 0.60 - 0.10
        cells[1][4] = 0.30;
        cells[1][5] = 0.50; // group 1, row 1 = 0.40 - 0.10

        let avgs = average_replicates(&PlateGrid::from_cells(cells), ReplicateMode::Duplicate, 7)
            .unwrap();
        assert!((avgs.background - 0.10).abs() < 1e-12);
        assert!((avgs.std_avgs[3] - 0.50).abs() < 1e-12);

        let well = avgs
            .wells
            .iter()
            .find(|w| w.position == WellPosition { group: 1, row: 1 })
            .unwrap();
        assert!((well.signal - 0.30).abs() < 1e-12);
    }

    #[test]
    fn triplicate_uses_three_columns() {
        let mut cells = [[0.0; PLATE_COLS]; PLATE_ROWS];
        cells[2][0] = 0.3;
        cells[2][1] = 0.3;
        cells[2][2] = 0.6; // 2 µg standard = 0.4
        let avgs = average_replicates(&PlateGrid::from_cells(cells), ReplicateMode::Triplicate, 7)
            .unwrap();
        assert!((avgs.std_avgs[2] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn wells_are_scanned_down_each_group() {
        let avgs =
            average_replicates(&PlateGrid::filled(0.0), ReplicateMode::Duplicate, 7).unwrap();
        assert_eq!(avgs.wells[0].position, WellPosition { group: 0, row: 0 });
        assert_eq!(avgs.wells[7].position, WellPosition { group: 0, row: 7 });
        assert_eq!(avgs.wells[8].position, WellPosition { group: 1, row: 0 });
    }

    #[test]
    fn rejects_impossible_standard_rows() {
        let plate = PlateGrid::filled(0.0);
        assert!(matches!(
            average_replicates(&plate, ReplicateMode::Duplicate, 9),
            Err(AssayError::DataFormat(_))
        ));
        assert!(average_replicates(&plate, ReplicateMode::Duplicate, 0).is_err());
    }
}
