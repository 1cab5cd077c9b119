//! Percent-of-control normalization for CTG viability plates.
//!
//! Each plate is read as two independent 4-row experiments (top and bottom).
//! Within a half, the two leftmost and two rightmost columns are untreated
//! controls; their mean defines 100% viability.

use rayon::prelude::*;

use crate::domain::{
    CTG_CONTROL_COLUMNS, HALF_ROWS, HalfGrid, NormalizedDataset, PLATE_COLS, PlateHalf,
};
use crate::error::AssayError;
use crate::grid::{GridSource, PlateGrid};

/// A raw plate half tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHalf {
    pub plate_index: usize,
    pub half: PlateHalf,
    pub raw: HalfGrid,
}

/// Read every plate the source exposes, in order.
///
/// The source decides where plates start and when the data ends; this only
/// walks it. An empty source is a format error.
pub fn read_plates<S: GridSource + ?Sized>(source: &mut S) -> Result<Vec<PlateGrid>, AssayError> {
    let mut plates = Vec::new();
    loop {
        let plate = PlateGrid::from_source(&*source).map_err(|e| match e {
            AssayError::DataFormat(msg) => {
                AssayError::data_format(format!("plate {}: {msg}", plates.len() + 1))
            }
            other => other,
        })?;
        plates.push(plate);

        if !source.has_next_plate() {
            break;
        }
        source.advance_to_next_plate();
    }
    log::debug!("read {} CTG plate(s)", plates.len());
    Ok(plates)
}

/// Split plates into tagged halves: plate 0 top, plate 0 bottom, plate 1 top, ...
pub fn split_halves(plates: &[PlateGrid]) -> Vec<RawHalf> {
    plates
        .iter()
        .enumerate()
        .flat_map(|(plate_index, plate)| {
            let (top, bottom) = plate.halves();
            [
                RawHalf {
                    plate_index,
                    half: PlateHalf::Top,
                    raw: top,
                },
                RawHalf {
                    plate_index,
                    half: PlateHalf::Bottom,
                    raw: bottom,
                },
            ]
        })
        .collect()
}

/// Mean of the 16 control wells of a half.
pub fn control_average(half: &HalfGrid) -> f64 {
    let sum: f64 = half
        .iter()
        .flat_map(|row| CTG_CONTROL_COLUMNS.iter().map(move |&c| row[c]))
        .sum();
    sum / (CTG_CONTROL_COLUMNS.len() * HALF_ROWS) as f64
}

/// Express every well as a percentage of the control average.
pub fn normalize_half(half: &RawHalf) -> Result<NormalizedDataset, AssayError> {
    let control_average = control_average(&half.raw);
    if !(control_average.is_finite() && control_average != 0.0) {
        return Err(AssayError::computation(format!(
            "plate {} {} half has control average {control_average}; cannot normalize",
            half.plate_index + 1,
            half.half.label()
        )));
    }

    let mut normalized = [[0.0; PLATE_COLS]; HALF_ROWS];
    for (dst, src) in normalized.iter_mut().zip(half.raw.iter()) {
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d = (s / control_average) * 100.0;
        }
    }

    Ok(NormalizedDataset {
        plate_index: half.plate_index,
        half: half.half,
        raw: half.raw,
        control_average,
        normalized,
    })
}

/// Normalize all halves, optionally on the rayon pool.
///
/// Output order always matches input order.
pub fn normalize_halves(
    halves: &[RawHalf],
    parallel: bool,
) -> Result<Vec<NormalizedDataset>, AssayError> {
    if parallel {
        halves.par_iter().map(normalize_half).collect()
    } else {
        halves.iter().map(normalize_half).collect()
    }
}
