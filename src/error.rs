use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unknown exchange type: '{0}'. Use 'intermediate' or 'elementary'")]
    UnknownExchangeType(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("InvalidData: {0}")]
    InvalidData(String),
}

#[cfg(feature = "python")]
impl From<BalanceError> for pyo3::PyErr {
    fn from(err: BalanceError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};
        match err {
            BalanceError::MissingColumn(_)
            | BalanceError::UnknownExchangeType(_)
            | BalanceError::UnknownElement(_)
            | BalanceError::InvalidData(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}
