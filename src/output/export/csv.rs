//! CSV export of transport simulation results
//!
//! Writes spatial profiles and step histories to CSV (Comma-Separated
//! Values), readable by spreadsheets, pandas, gnuplot and MATLAB.
//!
//! # Features
//!
//! - **Profiles**: x, numerical U, optional exact U and pointwise error
//! - **Step history**: step index, time reached, dt
//! - **Metadata**: optional `#` comment header with the run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: refuses empty data, mismatched lengths, NaN / Inf
//!
//! # Quick Examples
//!
//! ## Final profile against the exact solution
//!
//! ```rust,ignore
//! use transport_rs::output::export::export_profile_csv;
//!
//! let exact = problem.exact_solution(&result.grid, result.elapsed_time());
//! export_profile_csv(&result, exact.as_ref(), "profile.csv", None)?;
//! ```
//!
//! **Output** (`profile.csv`):
//! ```csv
//! x,U,U_exact,error
//! 0.000000,0.000000,0.000000,0.000000
//! 0.010000,0.000000,0.000000,0.000000
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use transport_rs::output::export::{export_time_steps_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
//! export_time_steps_csv(&result, "steps.csv", Some(&config))?;
//! ```
//!
//! **Output** (`steps.csv`):
//! ```csv
//! # Transport Simulation Data
//! # Generated: 2026-10-18T09:12:44+00:00
//! # Problem: Linear transport
//! # Time scheme: RK-6
//! # Space scheme: CD4
//! # Courant number: 0.25
//! # Total time: 0.5
//! # Points: 201
//! # Iterations: 50
//! #
//! step,t,dt
//! 1,0.002500,0.002500
//! ...
//! ```

use nalgebra::DVector;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TransportError};
use crate::output::export::Exporter;
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use transport_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set end up in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub problem_name: Option<String>,
    pub time_scheme: Option<String>,
    pub space_scheme: Option<String>,
    pub courant_number: Option<f64>,
    pub total_time: Option<f64>,
    pub points: Option<usize>,
    pub iterations: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect the run parameters recorded in `result`
    pub fn from_result(result: &SimulationResult) -> Self {
        let text = |key: &str| result.get_metadata(key).map(str::to_string);
        let number = |key: &str| result.get_metadata(key).and_then(|v| v.parse::<f64>().ok());

        Self {
            problem_name: text("problem"),
            time_scheme: text("time scheme"),
            space_scheme: text("space scheme"),
            courant_number: number("courant number"),
            total_time: number("total time"),
            points: Some(result.grid.len()),
            iterations: Some(result.iterations()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(writer, "# Transport Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(writer, "# Generated: {}", now.to_rfc3339())?;

    if let Some(problem) = &metadata.problem_name {
        writeln!(writer, "# Problem: {}", problem)?;
    }
    if let Some(scheme) = &metadata.time_scheme {
        writeln!(writer, "# Time scheme: {}", scheme)?;
    }
    if let Some(scheme) = &metadata.space_scheme {
        writeln!(writer, "# Space scheme: {}", scheme)?;
    }
    if let Some(courant) = metadata.courant_number {
        writeln!(writer, "# Courant number: {}", courant)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(writer, "# Total time: {}", total_time)?;
    }
    if let Some(points) = metadata.points {
        writeln!(writer, "# Points: {}", points)?;
    }
    if let Some(iterations) = metadata.iterations {
        writeln!(writer, "# Iterations: {}", iterations)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export named columns of equal length
///
/// The building block of the other exporters. Column order is preserved.
///
/// # Errors
///
/// `Export` for no columns, empty or mismatched columns, or NaN / Inf
/// values; `Io` when the file cannot be written.
pub fn export_columns_csv<P: AsRef<Path>>(
    columns: &[(&str, &[f64])],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    let Some((_, first)) = columns.first() else {
        return Err(TransportError::Export("no columns to export".to_string()));
    };
    let rows = first.len();
    if rows == 0 {
        return Err(TransportError::Export(
            "Empty data: columns must not be empty".to_string(),
        ));
    }

    for (name, values) in columns {
        if values.len() != rows {
            return Err(TransportError::Export(format!(
                "Column '{}' has {} values, expected {}",
                name,
                values.len(),
                rows
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TransportError::Export(format!(
                "Invalid data: NaN or Inf detected in column '{}'",
                name
            )));
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let delimiter = configuration.delimiter.to_string();

    // ============================= Write ==================================

    let mut file = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    let header: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    writeln!(file, "{}", header.join(&delimiter))?;

    for row in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|(_, values)| format_number(values[row], configuration))
            .collect();
        writeln!(file, "{}", line.join(&delimiter))?;
    }

    file.flush()?;
    Ok(())
}

/// Export the final profile of a run
///
/// Columns `x` and `U`; with a reference, also `U_exact` and
/// `error = U - U_exact`.
pub fn export_profile_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    exact: Option<&DVector<f64>>,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let x = result.grid.nodes().as_slice();
    let u = result.final_state.as_slice();

    match exact {
        Some(reference) => {
            if reference.len() != u.len() {
                return Err(TransportError::dimension_mismatch(
                    "exact profile",
                    u.len(),
                    reference.len(),
                ));
            }
            let error: Vec<f64> = u.iter().zip(reference.iter()).map(|(a, b)| a - b).collect();
            export_columns_csv(
                &[
                    ("x", x),
                    ("U", u),
                    ("U_exact", reference.as_slice()),
                    ("error", error.as_slice()),
                ],
                output_path,
                configuration,
            )
        }
        None => export_columns_csv(&[("x", x), ("U", u)], output_path, configuration),
    }
}

/// Export the step history of a run: `step`, `t` (time reached), `dt`
pub fn export_time_steps_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    if result.dt_history.is_empty() {
        return Err(TransportError::Export(
            "Empty data: the run has no steps".to_string(),
        ));
    }

    let times = result.time_points.get(1..).unwrap_or(&[]);
    if times.iter().chain(&result.dt_history).any(|v| !v.is_finite()) {
        return Err(TransportError::Export(
            "Invalid data: NaN or Inf detected in step history".to_string(),
        ));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let delimiter = configuration.delimiter;

    let mut file = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    writeln!(file, "step{d}t{d}dt", d = delimiter)?;
    for (step, (t, dt)) in times.iter().zip(&result.dt_history).enumerate() {
        writeln!(
            file,
            "{}{d}{}{d}{}",
            step + 1,
            format_number(*t, configuration),
            format_number(*dt, configuration),
            d = delimiter
        )?;
    }

    file.flush()?;
    Ok(())
}

// =============================================================================
// Exporter Implementation
// =============================================================================

/// [`Exporter`] writing CSV files with a fixed configuration
///
/// When the configuration asks for metadata but carries none, the header is
/// filled from the exported result.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn config_for(&self, result: &SimulationResult) -> CsvConfig {
        let mut config = self.config.clone();
        if config.include_metadata && config.metadata.is_none() {
            config.metadata = Some(CsvMetadata::from_result(result));
        }
        config
    }
}

impl Exporter for CsvExporter {
    type Error = TransportError;

    fn export_profile(
        &self,
        result: &SimulationResult,
        exact: Option<&DVector<f64>>,
        path: &Path,
    ) -> Result<()> {
        export_profile_csv(result, exact, path, Some(&self.config_for(result)))
    }

    fn export_time_steps(&self, result: &SimulationResult, path: &Path) -> Result<()> {
        export_time_steps_csv(result, path, Some(&self.config_for(result)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
