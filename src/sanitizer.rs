use std::collections::HashSet;

use log::debug;
use polars::prelude::*;

use crate::config::BalanceConfig;
use crate::error::BalanceError;
use crate::reference::ReferenceData;
use crate::schema::flow;

/// Columns coerced to Float64, with unparseable or missing cells set to 0.
pub fn numeric_columns(reference: &ReferenceData) -> Vec<String> {
    let mut cols = vec![flow::AMOUNT.to_string(), flow::DRY_MASS.to_string()];
    cols.extend(
        reference
            .elements()
            .iter()
            .map(|e| flow::content_column(e.name)),
    );
    cols.push(flow::CARBON_FOSSIL.to_string());
    cols.push(flow::CARBON_NON_FOSSIL.to_string());
    cols.push(flow::WATER_CONTENT.to_string());
    cols
}

/// Coerce numeric columns and drop non-additive measurement flows.
///
/// Text columns are cast to String with nulls replaced by "". The wet mass
/// column is parsed but keeps its nulls, since an empty wet mass means
/// "not given" rather than zero.
pub fn sanitize(
    df: DataFrame,
    reference: &ReferenceData,
    config: &BalanceConfig,
) -> Result<DataFrame, BalanceError> {
    require_columns(&df, &flow::REQUIRED)?;
    let rows_in = df.height();

    let mut exprs: Vec<Expr> = flow::TEXT
        .iter()
        .map(|&name| {
            col(name)
                .cast(DataType::String)
                .fill_null(lit(""))
                .alias(name)
        })
        .collect();

    for name in numeric_columns(reference) {
        if let Ok(column) = df.column(&name) {
            exprs.push(
                parse_float_expr(&name, column.dtype())
                    .fill_null(lit(0.0))
                    .alias(name.as_str()),
            );
        }
    }
    if let Ok(column) = df.column(flow::WET_MASS) {
        exprs.push(parse_float_expr(flow::WET_MASS, column.dtype()).alias(flow::WET_MASS));
    }

    let df = df.lazy().with_columns(exprs).collect()?;

    let excluded: HashSet<&str> = config.excluded_flows.iter().map(|s| s.as_str()).collect();
    let keep: BooleanChunked = {
        let names = df.column(flow::NAME)?.str()?;
        names
            .into_iter()
            .map(|name| Some(!excluded.contains(name.unwrap_or(""))))
            .collect()
    };
    let df = df.filter(&keep)?;

    debug!(
        "sanitized {} rows, {} non-additive flows removed",
        rows_in,
        rows_in - df.height()
    );
    Ok(df)
}

/// Strip whitespace from text cells before casting; non-strict cast turns
/// anything unparseable into null.
fn parse_float_expr(name: &str, dtype: &DataType) -> Expr {
    match dtype {
        DataType::String => col(name)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .cast(DataType::Float64),
        _ => col(name).cast(DataType::Float64),
    }
}

pub(crate) fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), BalanceError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(BalanceError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}
