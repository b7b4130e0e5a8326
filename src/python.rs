use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::PyDataFrame;

use crate::config::{BalanceConfig, DensityRule};
use crate::io;
use crate::processor::MassBalance;
use crate::reference::ReferenceData;
use crate::schema;

#[pyclass(name = "MassBalance", frozen)]
pub struct MassBalanceModel {
    engine: MassBalance,
}

#[pymethods]
impl MassBalanceModel {
    /// `densities`: extra (keyword, kg/m3) rules for elementary volume flows,
    /// consulted after the built-in water rule.
    #[new]
    #[pyo3(signature = (densities=None, excluded_flows=None))]
    fn new(
        densities: Option<Vec<(String, f64)>>,
        excluded_flows: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let mut config = BalanceConfig::default();
        if let Some(rules) = densities {
            config
                .density_rules
                .extend(rules.iter().map(|(k, d)| DensityRule::new(k, *d)));
        }
        if let Some(names) = excluded_flows {
            config.excluded_flows = names;
        }
        let reference = ReferenceData::standard()?;
        Ok(Self {
            engine: MassBalance::new(reference, config),
        })
    }

    /// Load a CSV as an all-string DataFrame.
    #[staticmethod]
    fn load_csv(path: &str) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(io::read_csv_as_strings(path)?))
    }

    fn process_elementary(&self, df: PyDataFrame) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(self.engine.process_elementary(df.0)?))
    }

    fn process_intermediate(&self, df: PyDataFrame) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(self.engine.process_intermediate(df.0)?))
    }

    /// `exchange_type`: "intermediate" or "elementary".
    fn process(&self, exchange_type: &str, df: PyDataFrame) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(self.engine.process(exchange_type, df.0)?))
    }

    /// Element symbols in output column order.
    #[getter]
    fn element_symbols(&self) -> Vec<&'static str> {
        self.engine
            .reference()
            .elements()
            .iter()
            .map(|e| e.symbol)
            .collect()
    }
}

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let flow = PyModule::new(m.py(), "flow")?;
    flow.add("NAME", schema::flow::NAME)?;
    flow.add("AMOUNT", schema::flow::AMOUNT)?;
    flow.add("UNIT", schema::flow::UNIT)?;
    flow.add("FLOW_TYPE", schema::flow::FLOW_TYPE)?;
    flow.add("COMPARTMENT", schema::flow::COMPARTMENT)?;
    flow.add("SUBCOMPARTMENT", schema::flow::SUBCOMPARTMENT)?;
    flow.add("DRY_MASS", schema::flow::DRY_MASS)?;
    flow.add("WET_MASS", schema::flow::WET_MASS)?;
    flow.add("WATER_CONTENT", schema::flow::WATER_CONTENT)?;
    m.add_submodule(&flow)?;

    let output = PyModule::new(m.py(), "output")?;
    output.add("FLOW_NAME", schema::output::FLOW_NAME)?;
    output.add("SUB_PROCESS", schema::output::SUB_PROCESS)?;
    output.add("REST", schema::output::REST)?;
    m.add_submodule(&output)?;

    let exchange = PyModule::new(m.py(), "exchange")?;
    exchange.add("INTERMEDIATE", schema::exchange::INTERMEDIATE)?;
    exchange.add("ELEMENTARY", schema::exchange::ELEMENTARY)?;
    m.add_submodule(&exchange)?;

    Ok(())
}

#[pyfunction]
#[pyo3(signature = (level="info"))]
fn init_logging(level: &str) -> bool {
    crate::logging::init(crate::logging::level_from_str(level))
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MassBalanceModel>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    add_schema_exports(m)?;
    Ok(())
}
