//! End-to-end assay pipelines.
//!
//! Keeping the stage order in one place means front-ends (spreadsheet tools,
//! notebooks, services) only deal with presentation:
//!
//! - BCA: grid -> replicate averages -> standard curve -> gating/naming ->
//!   concentrations -> load volumes
//! - CTG: source -> plates -> halves -> percent-of-control
//!
//! The run date is supplied by the caller so runs are reproducible.

use chrono::NaiveDate;

use crate::bca::{Quantifier, average_replicates, build_records, gate_wells};
use crate::ctg::{normalize_halves, read_plates, split_halves};
use crate::domain::{AssayRun, BcaConfig, CtgConfig, CtgRun, STANDARD_ROWS};
use crate::error::AssayError;
use crate::fit::fit_standard_curve;
use crate::grid::{GridSource, PlateGrid};

/// Quantify every sample on a BCA plate.
pub fn run_bca(
    grid: &PlateGrid,
    sample_names: Option<&[String]>,
    config: &BcaConfig,
    run_date: NaiveDate,
) -> Result<AssayRun, AssayError> {
    // 1) Reject configurations that make every quantity meaningless.
    config.validate()?;

    // 2) Average replicates and subtract background.
    let averages = average_replicates(grid, config.replicate_mode, STANDARD_ROWS)?;

    // 3) Fit the standard curve.
    let curve = fit_standard_curve(&averages.std_avgs)?;

    // 4) Gate, name and quantify samples.
    let gated = gate_wells(&averages.wells, config.gating);
    let quantifier = Quantifier {
        curve: &curve,
        dilution_volume_ul: config.dilution_volume_ul,
        target_mass_ug: config.target_mass_ug,
    };
    let records = build_records(&gated, sample_names, &quantifier)?;

    log::debug!(
        "BCA run {run_date}: {} sample record(s), target {} µg",
        records.len(),
        config.target_mass_ug
    );

    Ok(AssayRun {
        run_date,
        replicate_mode: config.replicate_mode,
        gating: config.gating,
        background: averages.background,
        std_avgs: averages.std_avgs,
        curve,
        target_mass_ug: config.target_mass_ug,
        dilution_volume_ul: config.dilution_volume_ul,
        records,
    })
}

/// Read a BCA plate from a source and quantify it.
pub fn run_bca_from_source<S: GridSource + ?Sized>(
    source: &S,
    sample_names: Option<&[String]>,
    config: &BcaConfig,
    run_date: NaiveDate,
) -> Result<AssayRun, AssayError> {
    let grid = PlateGrid::from_source(source)?;
    run_bca(&grid, sample_names, config, run_date)
}

/// Normalize every plate the source exposes.
pub fn run_ctg<S: GridSource + ?Sized>(
    source: &mut S,
    config: &CtgConfig,
    run_date: NaiveDate,
) -> Result<CtgRun, AssayError> {
    let plates = read_plates(source)?;
    let halves = split_halves(&plates);
    let datasets = normalize_halves(&halves, config.parallel)?;

    Ok(CtgRun { run_date, datasets })
}
