use std::str::FromStr;

use log::{debug, info};
use polars::prelude::DataFrame;

use crate::composition::CompositionCalculator;
use crate::config::BalanceConfig;
use crate::error::BalanceError;
use crate::finalize::{finalize_elementary, finalize_intermediate, to_dataframe, OutputRecord};
use crate::grouping::{group_by_provenance, group_per_row};
use crate::record::records_from_frame;
use crate::reference::ReferenceData;
use crate::sanitizer::sanitize;
use crate::schema::exchange;
use crate::units::{flip_negative_amounts, normalize_elementary, normalize_intermediate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeType {
    Intermediate,
    Elementary,
}

impl FromStr for ExchangeType {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            exchange::INTERMEDIATE => Ok(ExchangeType::Intermediate),
            exchange::ELEMENTARY => Ok(ExchangeType::Elementary),
            other => Err(BalanceError::UnknownExchangeType(other.to_string())),
        }
    }
}

/// Bookkeeping for one processed table.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub rows_in: usize,
    pub rows_excluded: usize,
    pub rows_dropped_unit: usize,
    pub unconverted_volumes: usize,
    pub output_rows: usize,
    /// Sum of all normalized amounts across the table.
    pub total_mass: f64,
}

#[derive(Debug, Clone)]
pub struct BalanceRun {
    pub records: Vec<OutputRecord>,
    pub table: DataFrame,
    pub summary: BalanceSummary,
}

/// Mass-balance engine over one set of reference data and settings.
#[derive(Debug, Clone)]
pub struct MassBalance {
    reference: ReferenceData,
    config: BalanceConfig,
}

impl MassBalance {
    pub fn new(reference: ReferenceData, config: BalanceConfig) -> Self {
        Self { reference, config }
    }

    /// Standard reference data with default settings.
    pub fn standard() -> Result<Self, BalanceError> {
        Ok(Self::new(ReferenceData::standard()?, BalanceConfig::default()))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn process(&self, exchange_type: &str, df: DataFrame) -> Result<DataFrame, BalanceError> {
        match exchange_type.parse::<ExchangeType>()? {
            ExchangeType::Intermediate => self.process_intermediate(df),
            ExchangeType::Elementary => self.process_elementary(df),
        }
    }

    pub fn process_elementary(&self, df: DataFrame) -> Result<DataFrame, BalanceError> {
        Ok(self.run_elementary(df)?.table)
    }

    pub fn process_intermediate(&self, df: DataFrame) -> Result<DataFrame, BalanceError> {
        Ok(self.run_intermediate(df)?.table)
    }

    /// Both exchange tables of one process, as (intermediate, elementary).
    pub fn process_exchanges(
        &self,
        intermediate: DataFrame,
        elementary: DataFrame,
    ) -> Result<(DataFrame, DataFrame), BalanceError> {
        Ok((
            self.process_intermediate(intermediate)?,
            self.process_elementary(elementary)?,
        ))
    }

    /// Sanitize, convert to mass, group by provenance and finalize.
    pub fn run_elementary(&self, df: DataFrame) -> Result<BalanceRun, BalanceError> {
        let rows_in = df.height();
        let sanitized = sanitize(df, &self.reference, &self.config)?;
        let rows_excluded = rows_in - sanitized.height();

        let records = records_from_frame(&sanitized, &self.reference)?;
        let normalized = normalize_elementary(records, &self.config);
        let total_mass: f64 = normalized.records.iter().map(|r| r.amount).sum();

        let calculator = CompositionCalculator::new(&self.reference);
        let mut groups = group_by_provenance(&normalized.records, self.reference.element_count());
        debug!("{} elementary flows in {} groups", normalized.records.len(), groups.len());

        let mut rows = Vec::with_capacity(groups.len());
        for group in groups.iter_mut() {
            calculator.populate_elementary(group);
            rows.push(finalize_elementary(group, &self.config.sub_process_label));
        }

        let summary = BalanceSummary {
            rows_in,
            rows_excluded,
            rows_dropped_unit: normalized.dropped_units,
            unconverted_volumes: normalized.unconverted_volumes,
            output_rows: rows.len(),
            total_mass,
        };
        info!("elementary flows: {:?}", summary);

        let table = to_dataframe(&rows, &self.reference)?;
        Ok(BalanceRun {
            records: rows,
            table,
            summary,
        })
    }

    /// Sanitize, convert to mass, flip negative amounts and finalize each row.
    pub fn run_intermediate(&self, df: DataFrame) -> Result<BalanceRun, BalanceError> {
        let rows_in = df.height();
        let sanitized = sanitize(df, &self.reference, &self.config)?;
        let rows_excluded = rows_in - sanitized.height();

        let records = records_from_frame(&sanitized, &self.reference)?;
        let mut normalized = normalize_intermediate(records, &self.config);
        flip_negative_amounts(&mut normalized.records);
        let total_mass: f64 = normalized.records.iter().map(|r| r.amount).sum();

        let calculator = CompositionCalculator::new(&self.reference);
        let mut groups = group_per_row(&normalized.records, self.reference.element_count());

        let mut rows = Vec::with_capacity(groups.len());
        for group in groups.iter_mut() {
            calculator.populate_intermediate(group);
            rows.push(finalize_intermediate(group, &self.config.sub_process_label)?);
        }

        let summary = BalanceSummary {
            rows_in,
            rows_excluded,
            rows_dropped_unit: normalized.dropped_units,
            unconverted_volumes: normalized.unconverted_volumes,
            output_rows: rows.len(),
            total_mass,
        };
        info!("intermediate flows: {:?}", summary);

        let table = to_dataframe(&rows, &self.reference)?;
        Ok(BalanceRun {
            records: rows,
            table,
            summary,
        })
    }
}
