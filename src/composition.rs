use log::trace;

use crate::grouping::FlowGroup;
use crate::record::FlowRecord;
use crate::reference::{normalize_name, ReferenceData};

/// Accumulates element masses per group from compound names and explicit
/// content columns. The two sources are summed without de-duplication, so a
/// flow that is both named after a compound and annotated with content
/// columns is counted twice.
pub struct CompositionCalculator<'r> {
    reference: &'r ReferenceData,
}

impl<'r> CompositionCalculator<'r> {
    pub fn new(reference: &'r ReferenceData) -> Self {
        Self { reference }
    }

    /// Every compound whose name occurs in the flow name contributes
    /// `amount * fraction` per element.
    pub fn add_compound_matches(&self, flow_name: &str, amount: f64, totals: &mut [f64]) {
        let name = normalize_name(flow_name);
        for compound in self.reference.compounds() {
            if name.contains(&compound.match_key) {
                trace!("'{}' matches compound '{}'", flow_name, compound.name);
                for &(idx, fraction) in &compound.fractions {
                    totals[idx] += fraction * amount;
                }
            }
        }
    }

    /// `content * basis` for each element content column on the record.
    pub fn add_content_columns(&self, record: &FlowRecord, basis: f64, totals: &mut [f64]) {
        for (element_name, content) in &record.contents {
            if let Some(idx) = self.reference.index_of_name(element_name) {
                totals[idx] += content * basis;
            }
        }
    }

    /// Split `water content * dry mass` into hydrogen and oxygen.
    pub fn add_water_content(&self, record: &FlowRecord, totals: &mut [f64]) {
        if let (Some(water), Some(dry)) = (record.water_content, record.dry_mass) {
            let water_mass = water * dry;
            for &(idx, fraction) in self.reference.water_fractions() {
                totals[idx] += fraction * water_mass;
            }
        }
    }

    /// Elementary groups: compound matches and content columns, both on amount.
    pub fn populate_elementary(&self, group: &mut FlowGroup<'_>) {
        for record in &group.members {
            self.add_compound_matches(&record.name, record.amount, &mut group.element_totals);
            self.add_content_columns(record, record.amount, &mut group.element_totals);
        }
    }

    /// Intermediate rows: content columns and water content, both on dry
    /// mass. Rows without a dry mass contribute nothing.
    pub fn populate_intermediate(&self, group: &mut FlowGroup<'_>) {
        for record in &group.members {
            if let Some(dry) = record.dry_mass {
                self.add_content_columns(record, dry, &mut group.element_totals);
            }
            self.add_water_content(record, &mut group.element_totals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{group_by_provenance, group_per_row};
    use crate::record::{FlowType, Unit};
    use approx::assert_relative_eq;

    fn reference() -> ReferenceData {
        ReferenceData::standard().unwrap()
    }

    fn at(r: &ReferenceData, totals: &[f64], symbol: &str) -> f64 {
        totals[r.index_of_symbol(symbol).unwrap()]
    }

    #[test]
    fn water_name_splits_into_hydrogen_and_oxygen() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let mut totals = vec![0.0; r.element_count()];
        calc.add_compound_matches("Water, unspecified natural origin", 10.0, &mut totals);

        let h2o = 2.0 * 1.008 + 15.999;
        assert_relative_eq!(at(&r, &totals, "H"), 10.0 * (2.0 * 1.008 / h2o), epsilon = 1e-12);
        assert_relative_eq!(at(&r, &totals, "O"), 10.0 * (15.999 / h2o), epsilon = 1e-12);
    }

    #[test]
    fn matching_ignores_case_and_extra_whitespace() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let mut totals = vec![0.0; r.element_count()];
        calc.add_compound_matches("CARBON   DIOXIDE, fossil", 1.0, &mut totals);
        let co2 = 12.011 + 2.0 * 15.999;
        assert_relative_eq!(at(&r, &totals, "C"), 12.011 / co2, epsilon = 1e-12);
    }

    #[test]
    fn every_matching_compound_contributes() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let mut totals = vec![0.0; r.element_count()];
        // "Ammonium" and "Water" both occur
        calc.add_compound_matches("Ammonium, in water", 1.0, &mut totals);
        let sum: f64 = totals.iter().sum();
        assert_relative_eq!(sum, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn compound_and_content_column_are_both_counted() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let records = vec![FlowRecord::new(
            "Carbon dioxide, fossil",
            2.0,
            Unit::Kilogram,
            FlowType::Output,
            "air",
            "unspecified",
        )
        .with_content("carbon", 0.5)];
        let mut groups = group_by_provenance(&records, r.element_count());
        calc.populate_elementary(&mut groups[0]);

        let co2 = 12.011 + 2.0 * 15.999;
        let expected = 2.0 * 12.011 / co2 + 2.0 * 0.5;
        assert_relative_eq!(at(&r, &groups[0].element_totals, "C"), expected, epsilon = 1e-12);
    }

    #[test]
    fn intermediate_uses_dry_mass_and_water_content() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let records = vec![FlowRecord::new(
            "Wood chips, wet",
            10.0,
            Unit::Kilogram,
            FlowType::Input,
            "Technosphere",
            "RER",
        )
        .with_content("carbon", 0.5)
        .with_dry_mass(0.8)
        .with_water_content(0.25)];
        let mut groups = group_per_row(&records, r.element_count());
        calc.populate_intermediate(&mut groups[0]);

        let totals = &groups[0].element_totals;
        let h2o = 2.0 * 1.008 + 15.999;
        assert_relative_eq!(at(&r, totals, "C"), 0.4, epsilon = 1e-12);
        assert_relative_eq!(at(&r, totals, "H"), 0.2 * 2.0 * 1.008 / h2o, epsilon = 1e-12);
        assert_relative_eq!(at(&r, totals, "O"), 0.2 * 15.999 / h2o, epsilon = 1e-12);
    }

    #[test]
    fn intermediate_without_dry_mass_contributes_nothing() {
        let r = reference();
        let calc = CompositionCalculator::new(&r);
        let records = vec![FlowRecord::new(
            "Electricity",
            1.0,
            Unit::Kilogram,
            FlowType::Input,
            "Technosphere",
            "CH",
        )
        .with_content("carbon", 0.5)
        .with_water_content(0.1)];
        let mut groups = group_per_row(&records, r.element_count());
        calc.populate_intermediate(&mut groups[0]);
        assert!(groups[0].element_totals.iter().all(|&v| v == 0.0));
    }
}
