//! Simulation scenario definition
//!
//! A scenario combines a transport problem with the grid it is solved on.

use nalgebra::DVector;

use crate::error::Result;
use crate::grid::Grid;
use crate::physics::{TransportProblem, check_output_lengths};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Transport problem (equation and initial data)
/// - Grid (spatial domain and resolution)
///
/// # Design
///
/// The same scenario can be solved with different schemes.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use transport_rs::grid::Grid;
/// use transport_rs::physics::TaskParams;
/// use transport_rs::solver::Scenario;
///
/// let problem = TaskParams::constant_speed(|x| (-x * x).exp(), 1.0);
/// let scenario = Scenario::new(Box::new(problem), Grid::new(-1.0, 1.0, 41)?);
///
/// scenario.validate()?;
/// assert_eq!(scenario.points(), 41);
/// # Ok::<(), transport_rs::TransportError>(())
/// ```
pub struct Scenario {
    /// Transport problem (equation)
    pub problem: Box<dyn TransportProblem>,

    /// Spatial grid
    pub grid: Grid,
}

impl Scenario {
    /// Create a scenario
    pub fn new(problem: Box<dyn TransportProblem>, grid: Grid) -> Self {
        Self { problem, grid }
    }

    /// Check that the problem's functions produce one value per node
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when speed or source returns the wrong length.
    pub fn validate(&self) -> Result<()> {
        check_output_lengths(self.problem.as_ref(), &self.grid)
    }

    /// Initial condition sampled at the grid nodes
    pub fn initial_state(&self) -> DVector<f64> {
        self.grid.map_nodes(|x| self.problem.initial_condition(x))
    }

    /// Get problem name
    pub fn get_problem_name(&self) -> &str {
        self.problem.name()
    }

    /// Number of grid nodes
    pub fn points(&self) -> usize {
        self.grid.len()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("problem", &self.get_problem_name())
            .field("points", &self.points())
            .field("bounds", &(self.grid.left(), self.grid.right()))
            .field("dx", &self.grid.dx())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::physics::TaskParams;

    // Mocking a problem whose speed field has one node too few
    struct ShortSpeed;

    impl TransportProblem for ShortSpeed {
        fn initial_condition(&self, _x: f64) -> f64 {
            1.0
        }

        fn speed(&self, grid: &Grid, _u: &DVector<f64>) -> DVector<f64> {
            DVector::from_element(grid.len() - 1, 1.0)
        }

        fn source(&self, grid: &Grid, _t: f64, _u: &DVector<f64>) -> DVector<f64> {
            DVector::zeros(grid.len())
        }

        fn name(&self) -> &str {
            "ShortSpeed"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let problem = TaskParams::constant_speed(|x| x, 1.0).with_name("ramp");
        let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 1.0, 11).unwrap());

        assert_eq!(scenario.get_problem_name(), "ramp");
        assert_eq!(scenario.points(), 11);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_initial_state_samples_nodes() {
        let problem = TaskParams::constant_speed(|x| 2.0 * x, 1.0);
        let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 1.0, 5).unwrap());

        assert_eq!(
            scenario.initial_state().as_slice(),
            &[0.0, 0.5, 1.0, 1.5, 2.0]
        );
    }

    #[test]
    fn test_validate_detects_speed_length() {
        let scenario = Scenario::new(Box::new(ShortSpeed), Grid::new(0.0, 1.0, 8).unwrap());

        match scenario.validate() {
            Err(TransportError::DimensionMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 8);
                assert_eq!(actual, 7);
            }
            other => panic!("expected a dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_detects_source_length() {
        let problem = TaskParams::new(
            |_| 0.0,
            |grid: &Grid, _u: &DVector<f64>| DVector::from_element(grid.len(), 1.0),
            |_grid: &Grid, _t: f64, _u: &DVector<f64>| DVector::zeros(3),
        );
        let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 1.0, 10).unwrap());

        assert!(matches!(
            scenario.validate(),
            Err(TransportError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_debug_output() {
        let problem = TaskParams::constant_speed(|x| x, 1.0).with_name("ramp");
        let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 1.0, 3).unwrap());

        let debug = format!("{:?}", scenario);
        assert!(debug.contains("ramp"));
        assert!(debug.contains("points: 3"));
    }
}
