use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;

use crate::error::BalanceError;
use crate::reference::ReferenceData;
use crate::sanitizer::require_columns;
use crate::schema::{flow, flow_type, units};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Kilogram,
    CubicMeter,
    Other(String),
}

impl Unit {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            units::KILOGRAM => Unit::Kilogram,
            units::CUBIC_METER => Unit::CubicMeter,
            other => Unit::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Unit::Kilogram => units::KILOGRAM,
            Unit::CubicMeter => units::CUBIC_METER,
            Unit::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowType {
    Input,
    Output,
    Unknown,
}

impl FlowType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            flow_type::INPUT => FlowType::Input,
            flow_type::OUTPUT => FlowType::Output,
            _ => FlowType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowType::Input => flow_type::INPUT,
            FlowType::Output => flow_type::OUTPUT,
            FlowType::Unknown => flow_type::UNKNOWN,
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported exchange, after sanitization.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRecord {
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
    pub flow_type: FlowType,
    pub compartment: String,
    pub subcompartment: String,
    /// Element name → dimensionless content, only for columns present on the table.
    pub contents: BTreeMap<String, f64>,
    pub dry_mass: Option<f64>,
    pub wet_mass: Option<f64>,
    pub water_content: Option<f64>,
    pub carbon_fossil: Option<f64>,
    pub carbon_non_fossil: Option<f64>,
}

impl FlowRecord {
    pub fn new(
        name: &str,
        amount: f64,
        unit: Unit,
        flow_type: FlowType,
        compartment: &str,
        subcompartment: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            amount,
            unit,
            flow_type,
            compartment: compartment.to_string(),
            subcompartment: subcompartment.to_string(),
            contents: BTreeMap::new(),
            dry_mass: None,
            wet_mass: None,
            water_content: None,
            carbon_fossil: None,
            carbon_non_fossil: None,
        }
    }

    pub fn with_content(mut self, element_name: &str, fraction: f64) -> Self {
        self.contents.insert(element_name.to_string(), fraction);
        self
    }

    pub fn with_dry_mass(mut self, kg: f64) -> Self {
        self.dry_mass = Some(kg);
        self
    }

    pub fn with_wet_mass(mut self, kg: f64) -> Self {
        self.wet_mass = Some(kg);
        self
    }

    pub fn with_water_content(mut self, fraction: f64) -> Self {
        self.water_content = Some(fraction);
        self
    }
}

/// NaN / inf parsed from text count as absent.
fn finite_or_zero(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0)
}

fn optional_f64<'a>(df: &'a DataFrame, name: &str) -> Result<Option<&'a Float64Chunked>, BalanceError> {
    match df.column(name) {
        Ok(column) => Ok(Some(column.f64()?)),
        Err(_) => Ok(None),
    }
}

/// Read typed flow records out of a sanitized table.
pub fn records_from_frame(
    df: &DataFrame,
    reference: &ReferenceData,
) -> Result<Vec<FlowRecord>, BalanceError> {
    require_columns(df, &flow::REQUIRED)?;

    let names = df.column(flow::NAME)?.str()?;
    let amounts = df.column(flow::AMOUNT)?.f64()?;
    let unit_col = df.column(flow::UNIT)?.str()?;
    let types = df.column(flow::FLOW_TYPE)?.str()?;
    let compartments = df.column(flow::COMPARTMENT)?.str()?;
    let subcompartments = df.column(flow::SUBCOMPARTMENT)?.str()?;

    let dry_mass = optional_f64(df, flow::DRY_MASS)?;
    let wet_mass = optional_f64(df, flow::WET_MASS)?;
    let water = optional_f64(df, flow::WATER_CONTENT)?;
    let fossil = optional_f64(df, flow::CARBON_FOSSIL)?;
    let non_fossil = optional_f64(df, flow::CARBON_NON_FOSSIL)?;

    let mut content_cols: Vec<(&'static str, &Float64Chunked)> = Vec::new();
    for element in reference.elements() {
        if let Some(ca) = optional_f64(df, &flow::content_column(element.name))? {
            content_cols.push((element.name, ca));
        }
    }

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut record = FlowRecord::new(
            names.get(i).unwrap_or(""),
            finite_or_zero(amounts.get(i)),
            Unit::parse(unit_col.get(i).unwrap_or("")),
            FlowType::parse(types.get(i).unwrap_or("")),
            compartments.get(i).unwrap_or(""),
            subcompartments.get(i).unwrap_or(""),
        );
        for (element_name, ca) in &content_cols {
            record
                .contents
                .insert(element_name.to_string(), finite_or_zero(ca.get(i)));
        }
        record.dry_mass = dry_mass.map(|ca| finite_or_zero(ca.get(i)));
        record.wet_mass = wet_mass.and_then(|ca| ca.get(i)).filter(|w| w.is_finite());
        record.water_content = water.map(|ca| finite_or_zero(ca.get(i)));
        record.carbon_fossil = fossil.map(|ca| finite_or_zero(ca.get(i)));
        record.carbon_non_fossil = non_fossil.map(|ca| finite_or_zero(ca.get(i)));
        records.push(record);
    }

    Ok(records)
}
