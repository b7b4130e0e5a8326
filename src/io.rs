//! Thin table I/O around the engine: CSV in, CSV or Parquet out.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::BalanceError;
use crate::schema::sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Parquet,
}

impl SheetFormat {
    fn extension(self) -> &'static str {
        match self {
            SheetFormat::Csv => "csv",
            SheetFormat::Parquet => "parquet",
        }
    }
}

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
pub fn read_csv_as_strings(path: impl AsRef<Path>) -> Result<DataFrame, BalanceError> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), BalanceError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

pub fn write_parquet(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), BalanceError> {
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(df)?;
    Ok(())
}

/// Write each named table to `<dir>/<name>.<ext>`, creating `dir` if needed.
/// Returns the written paths in input order.
pub fn write_sheets(
    dir: impl AsRef<Path>,
    sheets: &mut [(&str, DataFrame)],
    format: SheetFormat,
) -> Result<Vec<PathBuf>, BalanceError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(sheets.len());
    for (name, df) in sheets.iter_mut() {
        let path = dir.join(format!("{name}.{}", format.extension()));
        match format {
            SheetFormat::Csv => write_csv(df, &path)?,
            SheetFormat::Parquet => write_parquet(df, &path)?,
        }
        written.push(path);
    }
    Ok(written)
}

/// Both exchange tables of one process under their sheet names.
pub fn write_exchange_sheets(
    dir: impl AsRef<Path>,
    intermediate: DataFrame,
    elementary: DataFrame,
    format: SheetFormat,
) -> Result<Vec<PathBuf>, BalanceError> {
    let mut sheets = [
        (sheet::INTERMEDIATE, intermediate),
        (sheet::ELEMENTARY, elementary),
    ];
    write_sheets(dir, &mut sheets, format)
}
