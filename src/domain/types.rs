//! Shared domain types.
//!
//! These types are plain immutable values so they can be:
//!
//! - passed between pipeline stages without copying the grid around
//! - serialized by exporters (JSON, CSV, spreadsheets) outside this crate
//! - compared directly in tests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rows on a physical 96-well plate.
pub const PLATE_ROWS: usize = 8;
/// Columns on a physical 96-well plate.
pub const PLATE_COLS: usize = 12;
/// Rows in one CTG plate half.
pub const HALF_ROWS: usize = PLATE_ROWS / 2;

/// Known protein mass (µg) of each BCA standard, in row order.
pub const MASS_LADDER_UG: [f64; 7] = [0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 40.0];

/// Number of standard rows on a BCA plate.
pub const STANDARD_ROWS: usize = MASS_LADDER_UG.len();

/// Microliters of sample loaded per well during the BCA read.
pub const DEFAULT_DILUTION_VOLUME_UL: f64 = 2.5;

/// Protein mass to load when the caller does not specify one.
pub const DEFAULT_TARGET_MASS_UG: f64 = 20.0;

/// Drug concentration label for each CTG column.
pub const CTG_COLUMN_LABELS: [&str; PLATE_COLS] = [
    "control", "control", "0.003µM", "0.01µM", "0.03µM", "0.1µM", "0.3µM", "1µM", "3µM",
    "10µM", "control", "control",
];

/// Columns holding untreated control wells on a CTG plate.
pub const CTG_CONTROL_COLUMNS: [usize; 4] = [0, 1, PLATE_COLS - 2, PLATE_COLS - 1];

/// A 4 × 12 block of a CTG plate.
pub type HalfGrid = [[f64; PLATE_COLS]; HALF_ROWS];

/// How many wells make up one replicate group.
///
/// One mode applies to the whole plate: standards and samples share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicateMode {
    #[default]
    Duplicate,
    Triplicate,
}

impl ReplicateMode {
    /// Wells per replicate group.
    pub fn group_size(self) -> usize {
        match self {
            ReplicateMode::Duplicate => 2,
            ReplicateMode::Triplicate => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "duplicate" | "2" => Some(ReplicateMode::Duplicate),
            "triplicate" | "3" => Some(ReplicateMode::Triplicate),
            _ => None,
        }
    }
}

/// What to do with sample wells whose background-subtracted average is `<= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleGating {
    /// Treat the well as "no sample" and remove it from the output sequence.
    ///
    /// Downstream indices and names then follow the retained samples only.
    #[default]
    DropNonPositive,
    /// Keep one record per well in scan order; empty wells carry no quantity.
    MarkAbsent,
}

impl SampleGating {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "drop" | "drop_non_positive" => Some(SampleGating::DropNonPositive),
            "mark" | "mark_absent" => Some(SampleGating::MarkAbsent),
            _ => None,
        }
    }
}

/// One (signal, known mass) pair used to fit the standard curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardCurvePoint {
    pub signal: f64,
    pub mass_ug: f64,
}

/// Least-squares line through the standards: `mass = slope * signal + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardCurve {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit (1.0 for a perfect line).
    pub r_squared: f64,
}

impl StandardCurve {
    /// Predicted protein mass (µg) for a background-subtracted signal.
    pub fn predict_mass(&self, signal: f64) -> f64 {
        signal * self.slope + self.intercept
    }
}

/// Location of a sample replicate group on the plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WellPosition {
    /// Index of the sample replicate group, left to right (0 = first after standards).
    pub group: usize,
    /// Plate row (0 = A).
    pub row: usize,
}

/// Background-subtracted average of one sample replicate group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleWell {
    pub position: WellPosition,
    pub signal: f64,
}

impl SampleWell {
    /// A well counts as holding a sample only when its signal is above background.
    pub fn is_present(&self) -> bool {
        self.signal > 0.0
    }
}

/// Derived amounts for a present sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantification {
    /// Protein concentration in µg/µL.
    pub concentration: f64,
    /// Volume (µL) that delivers the run's target mass.
    pub load_volume_ul: f64,
}

/// One named sample of a BCA run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub name: String,
    pub position: WellPosition,
    pub signal: f64,
    /// `None` when the well was marked absent by [`SampleGating::MarkAbsent`].
    pub quantity: Option<Quantification>,
}

/// Everything computed for one BCA plate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssayRun {
    pub run_date: NaiveDate,
    pub replicate_mode: ReplicateMode,
    pub gating: SampleGating,
    pub background: f64,
    pub std_avgs: Vec<f64>,
    pub curve: StandardCurve,
    pub target_mass_ug: f64,
    pub dilution_volume_ul: f64,
    pub records: Vec<SampleRecord>,
}

impl AssayRun {
    pub fn std_avgs(&self) -> &[f64] {
        &self.std_avgs
    }

    /// Signals of the samples that carry a quantity, in record order.
    pub fn sample_avgs(&self) -> Vec<f64> {
        self.present().map(|r| r.signal).collect()
    }

    pub fn sample_concentrations(&self) -> Vec<f64> {
        self.present()
            .filter_map(|r| r.quantity.map(|q| q.concentration))
            .collect()
    }

    pub fn load_volumes(&self) -> Vec<f64> {
        self.present()
            .filter_map(|r| r.quantity.map(|q| q.load_volume_ul))
            .collect()
    }

    /// Names of the samples that carry a quantity, index-aligned with
    /// `sample_avgs`, `sample_concentrations` and `load_volumes`.
    pub fn sample_names(&self) -> Vec<String> {
        self.present().map(|r| r.name.clone()).collect()
    }

    /// One name per record, absent wells included under `MarkAbsent`.
    pub fn well_names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn slope(&self) -> f64 {
        self.curve.slope
    }

    pub fn intercept(&self) -> f64 {
        self.curve.intercept
    }

    fn present(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter().filter(|r| r.quantity.is_some())
    }
}

/// Which 4-row half of a CTG plate a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateHalf {
    Top,
    Bottom,
}

impl PlateHalf {
    pub fn label(self) -> &'static str {
        match self {
            PlateHalf::Top => "top",
            PlateHalf::Bottom => "bottom",
        }
    }
}

/// Raw and percent-of-control values for one plate half.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDataset {
    /// Zero-based index of the plate in the source.
    pub plate_index: usize,
    pub half: PlateHalf,
    pub raw: HalfGrid,
    pub control_average: f64,
    /// Percent viability relative to `control_average`.
    pub normalized: HalfGrid,
}

impl NormalizedDataset {
    /// Human-readable label, e.g. `Plate 1 top`.
    pub fn label(&self) -> String {
        format!("Plate {} {}", self.plate_index + 1, self.half.label())
    }
}

/// All plate halves of one CTG read, ordered by plate then top/bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtgRun {
    pub run_date: NaiveDate,
    pub datasets: Vec<NormalizedDataset>,
}

impl CtgRun {
    pub fn normalized_datasets(&self) -> Vec<HalfGrid> {
        self.datasets.iter().map(|d| d.normalized).collect()
    }

    pub fn control_averages(&self) -> Vec<f64> {
        self.datasets.iter().map(|d| d.control_average).collect()
    }

    pub fn column_labels(&self) -> &'static [&'static str; PLATE_COLS] {
        &CTG_COLUMN_LABELS
    }

    /// Number of physical plates read.
    pub fn plate_count(&self) -> usize {
        self.datasets.len() / 2
    }
}
