//! Turning averaged sample wells into named, quantified records.

use crate::bca::concentration::concentration;
use crate::bca::load_volume::load_volume;
use crate::domain::{Quantification, SampleGating, SampleRecord, SampleWell, StandardCurve};
use crate::error::AssayError;

/// Inputs shared by every sample of a run.
#[derive(Debug, Clone, Copy)]
pub struct Quantifier<'a> {
    pub curve: &'a StandardCurve,
    pub dilution_volume_ul: f64,
    pub target_mass_ug: f64,
}

impl Quantifier<'_> {
    pub fn quantify(&self, signal: f64) -> Result<Quantification, AssayError> {
        let concentration = concentration(signal, self.curve, self.dilution_volume_ul);
        let load_volume_ul = load_volume(concentration, self.target_mass_ug)?;
        Ok(Quantification {
            concentration,
            load_volume_ul,
        })
    }
}

/// Apply the gating policy to averaged wells, preserving scan order.
///
/// Returns each retained well with a flag telling whether it holds a sample.
pub fn gate_wells(wells: &[SampleWell], gating: SampleGating) -> Vec<(SampleWell, bool)> {
    let gated: Vec<(SampleWell, bool)> = match gating {
        SampleGating::DropNonPositive => wells
            .iter()
            .filter(|w| w.is_present())
            .map(|w| (*w, true))
            .collect(),
        SampleGating::MarkAbsent => wells.iter().map(|w| (*w, w.is_present())).collect(),
    };

    let absent = wells.iter().filter(|w| !w.is_present()).count();
    match gating {
        SampleGating::DropNonPositive => {
            log::debug!("dropped {absent} of {} wells at or below background", wells.len())
        }
        SampleGating::MarkAbsent => {
            log::debug!("marked {absent} of {} wells as absent", wells.len())
        }
    }
    gated
}

/// Names for `count` samples.
///
/// A supplied list is used only when it covers every sample; otherwise (missing,
/// empty or too short) the generic `Sample 1..Sample n` names are used.
/// Surplus names are ignored.
pub fn resolve_names(supplied: Option<&[String]>, count: usize) -> Vec<String> {
    match supplied {
        Some(names) if names.len() >= count && !names.is_empty() => names[..count].to_vec(),
        Some(names) if !names.is_empty() => {
            log::warn!(
                "{} sample names supplied for {count} samples; using generic names",
                names.len()
            );
            default_names(count)
        }
        _ => default_names(count),
    }
}

pub fn default_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Sample {i}")).collect()
}

/// Build records for the gated wells.
///
/// Present wells are quantified; any of them failing load-volume derivation
/// fails the run. Absent wells carry no quantity.
pub fn build_records(
    gated: &[(SampleWell, bool)],
    names: Option<&[String]>,
    quantifier: &Quantifier<'_>,
) -> Result<Vec<SampleRecord>, AssayError> {
    let names = resolve_names(names, gated.len());

    gated
        .iter()
        .zip(names)
        .map(|((well, present), name)| {
            let quantity = if *present {
                Some(quantifier.quantify(well.signal).map_err(|e| match e {
                    AssayError::Computation(msg) => {
                        AssayError::computation(format!("{name}: {msg}"))
                    }
                    other => other,
                })?)
            } else {
                None
            };
            Ok(SampleRecord {
                name,
                position: well.position,
                signal: well.signal,
                quantity,
            })
        })
        .collect()
}
