//! Helper functions for integration tests

use nalgebra::DVector;
use transport_rs::analysis::ErrorNorms;
use transport_rs::grid::Grid;
use transport_rs::physics::TransportProblem;
use transport_rs::solver::{NoProgress, SolverConfiguration, integrate};

use super::problems::calibration_pulse;

/// Assert that two states agree node by node (within tolerance)
pub fn assert_states_close(
    actual: &DVector<f64>,
    expected: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff < tolerance,
            "{}: Node {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Max-norm error of a finished run against the problem's exact solution
pub fn max_error(problem: &dyn TransportProblem, grid: &Grid, config: &SolverConfiguration) -> f64 {
    let result = integrate(problem, grid, config, &mut NoProgress).unwrap();
    assert!(!result.is_truncated(), "run on {} nodes was truncated", grid.len());

    let exact = problem
        .exact_solution(&result.grid, result.elapsed_time())
        .expect("problem has an exact solution");

    ErrorNorms::between(&result.final_state, &exact, &result.grid)
        .unwrap()
        .max
}

/// Max error of the calibration pulse at T = 0.5, Cu = 0.25, on [0, 2] with `points` nodes
pub fn run_pulse(time_scheme: &str, space_scheme: &str, points: usize) -> f64 {
    let config = SolverConfiguration::from_names(0.25, 0.5, 100_000, time_scheme, space_scheme)
        .unwrap();
    let grid = Grid::new(0.0, 2.0, points).unwrap();

    max_error(&calibration_pulse(), &grid, &config)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
