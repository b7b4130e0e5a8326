//! Unit and sign normalization of flow records.
//!
//! Both unit variants split the records into the kg subset and the m3 subset,
//! convert the m3 subset and concatenate kg-then-m3. Rows in any other unit
//! are dropped.

use log::warn;

use crate::config::BalanceConfig;
use crate::record::{FlowRecord, FlowType, Unit};

/// Records after unit normalization, with the number of rows dropped for
/// having a unit outside kg / m3.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub records: Vec<FlowRecord>,
    pub dropped_units: usize,
    pub unconverted_volumes: usize,
}

fn split_by_unit(records: Vec<FlowRecord>) -> (Vec<FlowRecord>, Vec<FlowRecord>, usize) {
    let mut mass = Vec::new();
    let mut volume = Vec::new();
    let mut dropped = 0;
    for record in records {
        match record.unit {
            Unit::Kilogram => mass.push(record),
            Unit::CubicMeter => volume.push(record),
            Unit::Other(ref unit) => {
                warn!("dropping flow '{}' with unsupported unit '{}'", record.name, unit);
                dropped += 1;
            }
        }
    }
    (mass, volume, dropped)
}

/// Elementary flows: m3 rows matching a density rule become kg.
///
/// m3 rows without a rule keep their volume amount and unit tag; they are
/// counted in `unconverted_volumes` and logged.
pub fn normalize_elementary(records: Vec<FlowRecord>, config: &BalanceConfig) -> Normalized {
    let (mut out, volume, dropped_units) = split_by_unit(records);
    let mut unconverted_volumes = 0;

    for mut record in volume {
        match config.density_for(&record.name) {
            Some(density) => {
                record.amount *= density;
                record.unit = Unit::Kilogram;
            }
            None => {
                warn!(
                    "no density rule for volumetric flow '{}'; amount left in m3",
                    record.name
                );
                unconverted_volumes += 1;
            }
        }
        out.push(record);
    }

    Normalized {
        records: out,
        dropped_units,
        unconverted_volumes,
    }
}

/// Intermediate flows: m3 amounts are scaled by the row's wet mass, or by the
/// fixed volume factor when no wet mass is given. Dry mass is rescaled to the
/// new basis.
pub fn normalize_intermediate(records: Vec<FlowRecord>, config: &BalanceConfig) -> Normalized {
    let (mut out, volume, dropped_units) = split_by_unit(records);

    for mut record in volume {
        let factor = record.wet_mass.unwrap_or(config.volume_to_mass_factor);
        record.amount *= factor;
        if let Some(dry) = record.dry_mass.as_mut() {
            *dry /= config.dry_mass_volume_divisor;
        }
        record.unit = Unit::Kilogram;
        out.push(record);
    }

    Normalized {
        records: out,
        dropped_units,
        unconverted_volumes: 0,
    }
}

/// A negative input is a positive output.
pub fn flip_negative_amounts(records: &mut [FlowRecord]) {
    for record in records.iter_mut().filter(|r| r.amount < 0.0) {
        record.flow_type = FlowType::Output;
        record.amount = -record.amount;
    }
}
