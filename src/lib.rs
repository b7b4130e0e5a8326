//! Elemental mass balance for life-cycle-inventory flow tables.
//!
//! Flow tables (one per exchange type) are sanitized, brought onto a kg
//! basis, grouped and decomposed into per-element mass fractions plus an
//! unexplained "rest" fraction.

pub mod composition;
pub mod config;
pub mod error;
pub mod finalize;
pub mod grouping;
pub mod io;
pub mod logging;
pub mod processor;
pub mod record;
pub mod reference;
pub mod sanitizer;
pub mod schema;
pub mod units;

#[cfg(feature = "python")]
mod python;

pub use config::{BalanceConfig, DensityRule};
pub use error::BalanceError;
pub use finalize::OutputRecord;
pub use processor::{BalanceRun, BalanceSummary, ExchangeType, MassBalance};
pub use record::{FlowRecord, FlowType, Unit};
pub use reference::{CompoundSpec, MolarMassTable, ReferenceData};
