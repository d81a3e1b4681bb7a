//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use transport_rs::output::export::{CsvConfig, CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::new(CsvConfig { include_metadata: true, ..Default::default() });
//!
//! exporter.export_profile(&result, exact.as_ref(), Path::new("profile.csv"))?;
//! exporter.export_time_steps(&result, Path::new("steps.csv"))?;
//! ```

pub mod csv;

pub use csv::{
    CsvConfig, CsvExporter, CsvMetadata, export_columns_csv, export_profile_csv,
    export_time_steps_csv,
};

use nalgebra::DVector;
use std::path::Path;

use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can match on them without downcasting.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the final profile, optionally next to a reference solution.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - the reference does not have one value per node
    /// - the state contains NaN or Inf
    fn export_profile(
        &self,
        result: &SimulationResult,
        exact: Option<&DVector<f64>>,
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// Exports the time reached and the dt of every step.
    ///
    /// # Errors
    ///
    /// Returns an error if the run has no steps or the path is invalid.
    fn export_time_steps(&self, result: &SimulationResult, path: &Path)
    -> Result<(), Self::Error>;
}
