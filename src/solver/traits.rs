//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - `Solver` trait: one entry point, `solve(scenario, config)`
//! - `SolverConfiguration`: HOW to solve (schemes, Courant number, budget)
//! - `SimulationResult`: the final state plus the step history and metadata
//! - `ProgressObserver`: cosmetic progress reporting, never touches numerics

use nalgebra::DVector;
use std::collections::HashMap;

use crate::error::{Result, TransportError};
use crate::grid::Grid;
use crate::solver::scenario::Scenario;
use crate::solver::stencil::SpaceScheme;
use crate::solver::tableau::TimeScheme;

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Numerical solver interface
///
/// Implementations are stateless: the same solver can be reused for any
/// number of scenarios and configurations.
pub trait Solver {
    /// Run a simulation
    ///
    /// # Errors
    ///
    /// Invalid configuration or scenario. Running out of iterations is NOT
    /// an error; see [`SimulationResult::is_truncated`].
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Display name
    fn name(&self) -> &str;
}

// =================================================================================================
// Solver Configuration
// =================================================================================================

/// Default Courant number
pub const DEFAULT_COURANT_NUMBER: f64 = 0.5;

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Parameters of a method-of-lines run
///
/// # Examples
///
/// ```rust
/// use transport_rs::solver::SolverConfiguration;
///
/// // From registry keys
/// let config = SolverConfiguration::from_names(0.25, 0.5, 10_000, "Hoin", "Upwind3")?;
/// assert_eq!(config.time_scheme.name(), "Hoin");
///
/// // Builder style from the defaults
/// let config = SolverConfiguration::default()
///     .with_total_time(2.0)
///     .with_courant_number(0.1);
/// config.validate()?;
/// # Ok::<(), transport_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfiguration {
    /// Cu in `dt = Cu · dx`
    pub courant_number: f64,

    /// Simulated time span, starting at t = 0
    pub total_time: f64,

    /// Iteration cap; reaching it truncates the run
    pub max_iterations: usize,

    /// Runge-Kutta scheme
    pub time_scheme: TimeScheme,

    /// Spatial derivative stencil
    pub space_scheme: SpaceScheme,
}

impl SolverConfiguration {
    pub fn new(
        courant_number: f64,
        total_time: f64,
        max_iterations: usize,
        time_scheme: TimeScheme,
        space_scheme: SpaceScheme,
    ) -> Self {
        Self {
            courant_number,
            total_time,
            max_iterations,
            time_scheme,
            space_scheme,
        }
    }

    /// Build a configuration from registry keys
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when either name is not registered.
    pub fn from_names(
        courant_number: f64,
        total_time: f64,
        max_iterations: usize,
        time_step_method: &str,
        space_deriv_approx_method: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            courant_number,
            total_time,
            max_iterations,
            time_step_method.parse()?,
            space_deriv_approx_method.parse()?,
        ))
    }

    pub fn with_courant_number(mut self, courant_number: f64) -> Self {
        self.courant_number = courant_number;
        self
    }

    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_time_scheme(mut self, time_scheme: TimeScheme) -> Self {
        self.time_scheme = time_scheme;
        self
    }

    pub fn with_space_scheme(mut self, space_scheme: SpaceScheme) -> Self {
        self.space_scheme = space_scheme;
        self
    }

    /// Validate configuration
    ///
    /// Checks the numeric ranges and the layout of the selected tableau.
    pub fn validate(&self) -> Result<()> {
        if !(self.courant_number.is_finite() && self.courant_number > 0.0) {
            return Err(TransportError::InvalidConfiguration(format!(
                "Courant number must be positive and finite, got {}",
                self.courant_number
            )));
        }
        if !(self.total_time.is_finite() && self.total_time > 0.0) {
            return Err(TransportError::InvalidConfiguration(format!(
                "total time must be positive and finite, got {}",
                self.total_time
            )));
        }
        if self.max_iterations == 0 {
            return Err(TransportError::InvalidConfiguration(
                "maximum iterations must be greater than 0".to_string(),
            ));
        }
        self.time_scheme.tableau()?;
        self.space_scheme.stencil().validate()
    }
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self::new(
            DEFAULT_COURANT_NUMBER,
            1.0,
            DEFAULT_MAX_ITERATIONS,
            TimeScheme::Rk6,
            SpaceScheme::CD4,
        )
    }
}

// =================================================================================================
// Simulation Result
// =================================================================================================

/// Outcome of a run
///
/// Holds the initial and final states on the run's grid, the cumulative
/// time after every step (`time_points[0] == 0`) and the dt of every step.
/// `time_points.len() == dt_history.len() + 1`.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub grid: Grid,
    pub initial_state: DVector<f64>,
    pub final_state: DVector<f64>,
    pub time_points: Vec<f64>,
    pub dt_history: Vec<f64>,
    truncated: bool,
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        grid: Grid,
        initial_state: DVector<f64>,
        final_state: DVector<f64>,
        time_points: Vec<f64>,
        dt_history: Vec<f64>,
        truncated: bool,
    ) -> Self {
        Self {
            grid,
            initial_state,
            final_state,
            time_points,
            dt_history,
            truncated,
            metadata: HashMap::new(),
        }
    }

    /// Number of completed steps
    pub fn iterations(&self) -> usize {
        self.dt_history.len()
    }

    /// Time reached by the last step
    pub fn elapsed_time(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    /// True when the iteration cap stopped the run before the end time
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Add metadata
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// =================================================================================================
// Progress Reporting
// =================================================================================================

/// Receives progress events from the time loop
///
/// Observers cannot change the run; they only see iteration counts and
/// times.
pub trait ProgressObserver {
    fn on_start(&mut self, _total_time: f64, _max_iterations: usize) {}

    /// Called after every completed step
    fn on_step(&mut self, iteration: usize, elapsed_time: f64, total_time: f64);

    fn on_finish(&mut self, _iterations: usize, _elapsed_time: f64) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_step(&mut self, _iteration: usize, _elapsed_time: f64, _total_time: f64) {}
}

/// Observer that logs progress at `debug` level every `report_every` steps
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    report_every: usize,
}

impl LogProgress {
    /// # Panics
    ///
    /// Panics when `report_every == 0`.
    pub fn new(report_every: usize) -> Self {
        assert!(report_every > 0, "report interval must be at least 1");
        Self { report_every }
    }

    pub fn report_every(&self) -> usize {
        self.report_every
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ProgressObserver for LogProgress {
    fn on_step(&mut self, iteration: usize, elapsed_time: f64, total_time: f64) {
        if iteration % self.report_every == 0 {
            log::debug!(
                "iteration {}: t = {:.6} / {} ({:.1}%)",
                iteration,
                elapsed_time,
                total_time,
                100.0 * elapsed_time / total_time
            );
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
