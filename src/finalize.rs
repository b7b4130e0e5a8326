use polars::prelude::*;

use crate::error::BalanceError;
use crate::grouping::FlowGroup;
use crate::record::{FlowType, Unit};
use crate::reference::ReferenceData;
use crate::schema::output;

/// One row of the mass-balance table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub flow_name: String,
    pub sub_process: String,
    pub amount: f64,
    pub unit: Unit,
    pub flow_type: FlowType,
    pub compartment: String,
    pub subcompartment: String,
    /// Indexed like `ReferenceData::elements()`.
    pub fractions: Vec<f64>,
    pub rest: f64,
}

impl OutputRecord {
    pub fn fraction_sum(&self) -> f64 {
        self.fractions.iter().sum()
    }
}

/// "<Flow Type> Elementary flow <to|from> <Compartment>, <Subcompartment>"
pub fn elementary_flow_name(flow_type: FlowType, compartment: &str, subcompartment: &str) -> String {
    let direction = if flow_type == FlowType::Output { "to" } else { "from" };
    format!("{flow_type} Elementary flow {direction} {compartment}, {subcompartment}")
}

/// Divide element totals by the group total. A zero total gives all-zero
/// fractions and a zero rest; otherwise rest is `1 - sum` and may go negative.
pub fn finalize_elementary(group: &FlowGroup<'_>, sub_process: &str) -> OutputRecord {
    let total = group.total_amount;
    let (fractions, rest) = if total == 0.0 {
        (vec![0.0; group.element_totals.len()], 0.0)
    } else {
        let fractions: Vec<f64> = group.element_totals.iter().map(|m| m / total).collect();
        let rest = 1.0 - fractions.iter().sum::<f64>();
        (fractions, rest)
    };

    OutputRecord {
        flow_name: elementary_flow_name(
            group.key.flow_type,
            &group.key.compartment,
            &group.key.subcompartment,
        ),
        sub_process: sub_process.to_string(),
        amount: total,
        unit: Unit::Kilogram,
        flow_type: group.key.flow_type,
        compartment: group.key.compartment.clone(),
        subcompartment: group.key.subcompartment.clone(),
        fractions,
        rest,
    }
}

/// Intermediate rows already hold fractions per unit of amount (content
/// times per-unit dry mass). Rest is clamped at 0, unlike the elementary path.
pub fn finalize_intermediate(group: &FlowGroup<'_>, sub_process: &str) -> Result<OutputRecord, BalanceError> {
    let record = match group.members.as_slice() {
        [record] => *record,
        members => {
            return Err(BalanceError::InvalidData(format!(
                "intermediate group must hold exactly one row, found {}",
                members.len()
            )))
        }
    };

    let fractions = group.element_totals.clone();
    let rest = (1.0 - fractions.iter().sum::<f64>()).max(0.0);

    Ok(OutputRecord {
        flow_name: record.name.clone(),
        sub_process: sub_process.to_string(),
        amount: record.amount,
        unit: record.unit.clone(),
        flow_type: record.flow_type,
        compartment: record.compartment.clone(),
        subcompartment: record.subcompartment.clone(),
        fractions,
        rest,
    })
}

/// Build the output table: leading descriptive columns, one column per
/// element symbol, "rest" last.
pub fn to_dataframe(records: &[OutputRecord], reference: &ReferenceData) -> Result<DataFrame, BalanceError> {
    let names: Vec<&str> = records.iter().map(|r| r.flow_name.as_str()).collect();
    let sub_processes: Vec<&str> = records.iter().map(|r| r.sub_process.as_str()).collect();
    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let unit_values: Vec<&str> = records.iter().map(|r| r.unit.as_str()).collect();
    let types: Vec<&str> = records.iter().map(|r| r.flow_type.as_str()).collect();
    let compartments: Vec<&str> = records.iter().map(|r| r.compartment.as_str()).collect();
    let subcompartments: Vec<&str> = records.iter().map(|r| r.subcompartment.as_str()).collect();

    let mut columns: Vec<Column> = vec![
        Column::new(output::FLOW_NAME.into(), names),
        Column::new(output::SUB_PROCESS.into(), sub_processes),
        Column::new(output::AMOUNT.into(), amounts),
        Column::new(output::UNIT.into(), unit_values),
        Column::new(output::FLOW_TYPE.into(), types),
        Column::new(output::COMPARTMENT.into(), compartments),
        Column::new(output::SUBCOMPARTMENT.into(), subcompartments),
    ];

    for (i, element) in reference.elements().iter().enumerate() {
        let values: Vec<f64> = records
            .iter()
            .map(|r| r.fractions.get(i).copied().unwrap_or(0.0))
            .collect();
        columns.push(Column::new(element.symbol.into(), values));
    }

    let rest: Vec<f64> = records.iter().map(|r| r.rest).collect();
    columns.push(Column::new(output::REST.into(), rest));

    Ok(DataFrame::new(columns)?)
}
