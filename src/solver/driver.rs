//! Method-of-lines driver
//!
//! # Algorithm
//!
//! The driver turns the PDE into an ODE system and integrates it:
//!
//! ```text
//! F(t, U) = f(x, t, U) - a(x, U) · D(U)          D = selected stencil
//!
//! t = 0, U = U₀(x)
//! while t < T and iterations < max_iterations:
//!     dt = next_dt(t, T, grid, Cu)
//!     U  = rk_step(U, t, grid, dt, F, tableau)
//!     t += dt
//! ```
//!
//! The product `a · D(U)` is taken node by node.
//!
//! # Truncation
//!
//! When the iteration cap is hit first, the partial result is returned with
//! [`SimulationResult::is_truncated`] set and a warning is logged.
//!
//! # Example
//!
//! ```rust
//! use transport_rs::grid::Grid;
//! use transport_rs::physics::TaskParams;
//! use transport_rs::solver::{MethodOfLinesSolver, Scenario, Solver, SolverConfiguration};
//!
//! let problem = TaskParams::constant_speed(|x| (-((x - 0.5) / 0.1).powi(2)).exp(), 1.0);
//! let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 2.0, 201)?);
//! let config = SolverConfiguration::from_names(0.25, 0.5, 10_000, "Hoin", "Upwind3")?;
//!
//! let result = MethodOfLinesSolver::new().solve(&scenario, &config)?;
//! assert!(!result.is_truncated());
//! assert!((result.elapsed_time() - 0.5).abs() < 1e-12);
//! # Ok::<(), transport_rs::TransportError>(())
//! ```

use nalgebra::DVector;

use crate::error::Result;
use crate::grid::Grid;
use crate::physics::{TransportProblem, check_output_lengths};
use crate::solver::runge_kutta::rk_step;
use crate::solver::scenario::Scenario;
use crate::solver::stencil::{Stencil, apply_stencil};
use crate::solver::step_control::next_dt;
use crate::solver::traits::{
    LogProgress, ProgressObserver, SimulationResult, Solver, SolverConfiguration,
};

// =================================================================================================
// Right-Hand Side Assembly
// =================================================================================================

/// Semi-discrete right-hand side `source - speed · D(U)` of `problem`
pub fn build_rhs<'a>(
    problem: &'a dyn TransportProblem,
    stencil: &'a Stencil,
) -> impl Fn(&Grid, f64, &DVector<f64>) -> DVector<f64> + 'a {
    move |grid: &Grid, t: f64, u: &DVector<f64>| {
        let dudx = apply_stencil(u, grid, stencil);
        let speed = problem.speed(grid, u);
        let mut rhs = problem.source(grid, t, u);
        rhs -= speed.component_mul(&dudx);
        rhs
    }
}

// =================================================================================================
// Time Loop
// =================================================================================================

/// Integrate `problem` on `grid` from t = 0 to `config.total_time`
///
/// Validates `config`, then checks once that the problem's speed and source
/// return one value per node.
pub fn integrate(
    problem: &dyn TransportProblem,
    grid: &Grid,
    config: &SolverConfiguration,
    observer: &mut dyn ProgressObserver,
) -> Result<SimulationResult> {
    // ====== Step 1: Validation ======

    config.validate()?;
    let tableau = config.time_scheme.tableau()?;
    let stencil = config.space_scheme.stencil();
    check_output_lengths(problem, grid)?;

    log::info!(
        "solving '{}' with {} + {}: N = {}, dx = {:e}, Cu = {}, T = {}",
        problem.name(),
        config.time_scheme,
        config.space_scheme,
        grid.len(),
        grid.dx(),
        config.courant_number,
        config.total_time
    );

    // ====== Step 2: Setup ======

    let rhs = build_rhs(problem, stencil);
    let total_time = config.total_time;

    let initial_state = grid.map_nodes(|x| problem.initial_condition(x));
    let mut state = initial_state.clone();

    let mut time_points = Vec::new();
    let mut dt_history = Vec::new();

    let mut t = 0.0;
    time_points.push(t);

    // ====== Step 3: Time Integration ======

    observer.on_start(total_time, config.max_iterations);

    while t < total_time && dt_history.len() < config.max_iterations {
        let dt = next_dt(t, total_time, grid, config.courant_number);

        // Fresh vector every step; the previous state is dropped, never mutated
        state = rk_step(&state, t, grid, dt, &rhs, tableau);

        t += dt;
        dt_history.push(dt);
        time_points.push(t);

        observer.on_step(dt_history.len(), t, total_time);
    }

    let iterations = dt_history.len();
    observer.on_finish(iterations, t);

    // ====== Step 4: Build Result ======

    let truncated = t < total_time;
    if truncated {
        log::warn!(
            "'{}' stopped at the iteration cap ({}) at t = {} of {}",
            problem.name(),
            config.max_iterations,
            t,
            total_time
        );
    } else {
        log::info!("'{}' finished in {} iterations", problem.name(), iterations);
    }

    let mut result = SimulationResult::new(
        grid.clone(),
        initial_state,
        state,
        time_points,
        dt_history,
        truncated,
    );

    result.add_metadata("problem", problem.name());
    result.add_metadata("time scheme", config.time_scheme.name());
    result.add_metadata("space scheme", config.space_scheme.name());
    result.add_metadata("courant number", &config.courant_number.to_string());
    result.add_metadata("total time", &total_time.to_string());
    result.add_metadata("points", &grid.len().to_string());
    result.add_metadata("iterations", &iterations.to_string());
    result.add_metadata(
        "function evaluations",
        &(tableau.stages() * iterations).to_string(),
    );

    Ok(result)
}

// =================================================================================================
// Method-of-Lines Solver
// =================================================================================================

/// Explicit method-of-lines solver
///
/// Scheme selection lives in [`SolverConfiguration`]; the solver itself only
/// chooses how progress is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOfLinesSolver {
    progress: LogProgress,
}

impl MethodOfLinesSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log progress every `report_every` iterations (at `debug` level)
    pub fn with_report_interval(report_every: usize) -> Self {
        Self {
            progress: LogProgress::new(report_every),
        }
    }

    /// Solve with a caller-supplied progress observer
    pub fn solve_with_progress(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
        observer: &mut dyn ProgressObserver,
    ) -> Result<SimulationResult> {
        let mut result = integrate(scenario.problem.as_ref(), &scenario.grid, config, observer)?;
        result.add_metadata("solver", self.name());
        Ok(result)
    }
}

impl Solver for MethodOfLinesSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        let mut progress = self.progress;
        self.solve_with_progress(scenario, config, &mut progress)
    }

    fn name(&self) -> &str {
        "Method of lines (explicit Runge-Kutta)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::physics::TaskParams;
    use crate::solver::stencil::SpaceScheme;
    use crate::solver::tableau::TimeScheme;
    use crate::solver::traits::NoProgress;

    fn gaussian(x: f64) -> f64 {
        (-((x - 0.5) / 0.1).powi(2)).exp()
    }

    fn advection_scenario(points: usize) -> Scenario {
        let problem = TaskParams::constant_speed(gaussian, 1.0).with_name("gaussian");
        Scenario::new(Box::new(problem), Grid::new(0.0, 2.0, points).unwrap())
    }

    /// Counts observer callbacks
    #[derive(Default)]
    struct Recorder {
        started: bool,
        steps: Vec<usize>,
        finished: Option<usize>,
    }

    impl ProgressObserver for Recorder {
        fn on_start(&mut self, _total_time: f64, _max_iterations: usize) {
            self.started = true;
        }

        fn on_step(&mut self, iteration: usize, _elapsed_time: f64, _total_time: f64) {
            self.steps.push(iteration);
        }

        fn on_finish(&mut self, iterations: usize, _elapsed_time: f64) {
            self.finished = Some(iterations);
        }
    }

    // ====== Right-hand side ======

    #[test]
    fn test_rhs_is_source_minus_speed_times_derivative() {
        let problem = TaskParams::new(
            |x| x,
            |grid: &Grid, _u: &DVector<f64>| DVector::from_element(grid.len(), 2.0),
            |grid: &Grid, t: f64, _u: &DVector<f64>| DVector::from_element(grid.len(), t),
        );
        let grid = Grid::new(0.0, 1.0, 11).unwrap();
        let u = grid.map_nodes(|x| 3.0 * x);
        let rhs = build_rhs(&problem, SpaceScheme::CD2.stencil());

        let value = rhs(&grid, 1.5, &u);
        // Interior: 1.5 - 2 * 3
        assert!((value[5] + 4.5).abs() < 1e-12);
        // Edge: derivative left at zero, only the source remains
        assert_eq!(value[0], 1.5);
        assert_eq!(value[10], 1.5);
    }

    // ====== Time loop ======

    #[test]
    fn test_reaches_total_time() {
        let scenario = advection_scenario(101);
        let config = SolverConfiguration::from_names(0.5, 0.3, 10_000, "Hoin", "Upwind3").unwrap();

        let result = MethodOfLinesSolver::new().solve(&scenario, &config).unwrap();

        assert!(!result.is_truncated());
        assert!((result.elapsed_time() - 0.3).abs() < 1e-12);
        assert_eq!(result.time_points.len(), result.dt_history.len() + 1);
        assert_eq!(result.time_points[0], 0.0);
        assert!(result.dt_history.iter().all(|&dt| dt > 0.0 && dt <= 0.01 + 1e-15));
    }

    #[test]
    fn test_dt_history_sums_to_elapsed_time() {
        let scenario = advection_scenario(51);
        let config = SolverConfiguration::default().with_total_time(0.37);

        let result = MethodOfLinesSolver::new().solve(&scenario, &config).unwrap();
        let sum: f64 = result.dt_history.iter().sum();

        assert!((sum - result.elapsed_time()).abs() < 1e-12);
        assert_eq!(
            result.get_metadata("iterations"),
            Some(result.iterations().to_string().as_str())
        );
    }

    #[test]
    fn test_iteration_cap_truncates() {
        let scenario = advection_scenario(101);
        let config = SolverConfiguration::default()
            .with_total_time(1.0)
            .with_max_iterations(3);

        let result = MethodOfLinesSolver::new().solve(&scenario, &config).unwrap();

        assert!(result.is_truncated());
        assert_eq!(result.iterations(), 3);
        assert!(result.elapsed_time() < 1.0);
        assert_eq!(result.final_state.len(), 101);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let scenario = advection_scenario(21);
        let config = SolverConfiguration::default().with_total_time(0.2);
        let mut recorder = Recorder::default();

        let result = MethodOfLinesSolver::new()
            .solve_with_progress(&scenario, &config, &mut recorder)
            .unwrap();

        assert!(recorder.started);
        assert_eq!(recorder.finished, Some(result.iterations()));
        let expected: Vec<usize> = (1..=result.iterations()).collect();
        assert_eq!(recorder.steps, expected);
    }

    #[test]
    fn test_zero_speed_zero_source_keeps_initial_state() {
        let problem = TaskParams::constant_speed(gaussian, 0.0);
        let grid = Grid::new(0.0, 1.0, 41).unwrap();
        let config = SolverConfiguration::default().with_total_time(0.1);

        let result = integrate(&problem, &grid, &config, &mut NoProgress).unwrap();
        assert_eq!(result.final_state, result.initial_state);
    }

    #[test]
    fn test_tiny_courant_number_truncates_at_cap() {
        let scenario = Scenario::new(
            Box::new(TaskParams::constant_speed(gaussian, 1.0)),
            Grid::new(0.0, 1.0, 101).unwrap(),
        );
        let config = SolverConfiguration::from_names(1e-20, 1.0, 5, "Euler-1", "Backward").unwrap();

        let result = MethodOfLinesSolver::new().solve(&scenario, &config).unwrap();

        assert!(result.is_truncated());
        assert_eq!(result.iterations(), 5);
    }

    #[test]
    fn test_integrate_rejects_wrong_speed_length() {
        let problem = TaskParams::new(
            gaussian,
            |_grid: &Grid, _u: &DVector<f64>| DVector::from_element(3, 1.0),
            |grid: &Grid, _t: f64, _u: &DVector<f64>| DVector::zeros(grid.len()),
        );
        let grid = Grid::new(0.0, 1.0, 11).unwrap();

        assert!(matches!(
            integrate(&problem, &grid, &SolverConfiguration::default(), &mut NoProgress),
            Err(TransportError::DimensionMismatch {
                expected: 11,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_configuration_is_rejected_before_solving() {
        let scenario = advection_scenario(21);
        let config = SolverConfiguration::default().with_courant_number(0.0);

        assert!(matches!(
            MethodOfLinesSolver::new().solve(&scenario, &config),
            Err(TransportError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_metadata() {
        let scenario = advection_scenario(21);
        let config = SolverConfiguration::default()
            .with_time_scheme(TimeScheme::Euler2)
            .with_space_scheme(SpaceScheme::Upwind2)
            .with_total_time(0.1);

        let result = MethodOfLinesSolver::new().solve(&scenario, &config).unwrap();

        assert_eq!(result.get_metadata("problem"), Some("gaussian"));
        assert_eq!(result.get_metadata("time scheme"), Some("Euler-2"));
        assert_eq!(result.get_metadata("space scheme"), Some("Upwind2"));
        assert_eq!(
            result.get_metadata("function evaluations"),
            Some((2 * result.iterations()).to_string().as_str())
        );
        assert!(result.get_metadata("solver").is_some());
    }
}
