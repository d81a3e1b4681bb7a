//! Transport problem traits and types
//!
//! This module defines the problem-side API:
//! - `TransportProblem`: trait for every problem definition
//! - `TaskParams`: closure-backed problem, built at the call site

use nalgebra::DVector;
use std::sync::Arc;

use crate::error::{Result, TransportError};
use crate::grid::Grid;

// =================================================================================================
// Transport Problem Trait
// =================================================================================================

/// Problem definition for `dU/dt + a(x,t,U)·dU/dx = f(x,t,U)`
///
/// # Responsibility
///
/// Supplies the three pure functions of the equation. Does NOT discretise
/// or integrate anything (that's the solver's job).
///
/// The problem provides the "physics" (speed, source, initial data), the
/// solver provides the "numerics" (stencil, Runge-Kutta scheme, time step).
///
/// # Shapes
///
/// - `initial_condition`: x → U₀(x)
/// - `speed`: (grid, U) → a at every node (length N)
/// - `source`: (grid, t, U) → f at every node (length N)
///
/// The solver only calls these functions, it never builds them.
pub trait TransportProblem: Send + Sync {
    /// Initial value at coordinate `x`
    fn initial_condition(&self, x: f64) -> f64;

    /// Transport speed at every node
    fn speed(&self, grid: &Grid, u: &DVector<f64>) -> DVector<f64>;

    /// Right-hand side (source term) at every node
    fn source(&self, grid: &Grid, t: f64, u: &DVector<f64>) -> DVector<f64>;

    /// Name of the problem (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the problem (option)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Closed-form solution at time `t`, when one is known
    ///
    /// Used for validation only; the solve path never calls it.
    fn exact_solution(&self, _grid: &Grid, _t: f64) -> Option<DVector<f64>> {
        None
    }
}

/// Check that `speed` and `source` return one value per node of `grid`
///
/// Probes both once at t = 0 on the sampled initial condition.
///
/// # Errors
///
/// `DimensionMismatch` naming the offending function.
pub fn check_output_lengths(problem: &dyn TransportProblem, grid: &Grid) -> Result<()> {
    let n = grid.len();
    let u0 = grid.map_nodes(|x| problem.initial_condition(x));

    let speed = problem.speed(grid, &u0);
    if speed.len() != n {
        return Err(TransportError::dimension_mismatch(
            format!("speed field of '{}'", problem.name()),
            n,
            speed.len(),
        ));
    }

    let source = problem.source(grid, 0.0, &u0);
    if source.len() != n {
        return Err(TransportError::dimension_mismatch(
            format!("source term of '{}'", problem.name()),
            n,
            source.len(),
        ));
    }

    Ok(())
}

// =================================================================================================
// Task Parameters (closure bundle)
// =================================================================================================

type InitialFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
type SpeedFn = Arc<dyn Fn(&Grid, &DVector<f64>) -> DVector<f64> + Send + Sync>;
type SourceFn = Arc<dyn Fn(&Grid, f64, &DVector<f64>) -> DVector<f64> + Send + Sync>;

/// Problem assembled from three closures
///
/// # Example
///
/// ```rust
/// use transport_rs::physics::{TaskParams, TransportProblem};
/// use transport_rs::grid::Grid;
/// use nalgebra::DVector;
///
/// let params = TaskParams::new(
///     |x| (-(x - 0.5) * (x - 0.5) / 0.01).exp(),
///     |grid: &Grid, _u: &DVector<f64>| DVector::from_element(grid.len(), 1.0),
///     |grid: &Grid, _t: f64, _u: &DVector<f64>| DVector::zeros(grid.len()),
/// )
/// .with_name("Gaussian advection");
///
/// assert_eq!(params.name(), "Gaussian advection");
/// assert!((params.initial_condition(0.5) - 1.0).abs() < 1e-15);
/// ```
#[derive(Clone)]
pub struct TaskParams {
    name: String,
    initial: InitialFn,
    speed: SpeedFn,
    source: SourceFn,
}

impl TaskParams {
    /// Bundle an initial condition, a speed field and a source term
    pub fn new<I, S, F>(initial: I, speed: S, source: F) -> Self
    where
        I: Fn(f64) -> f64 + Send + Sync + 'static,
        S: Fn(&Grid, &DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
        F: Fn(&Grid, f64, &DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
    {
        Self {
            name: "Task parameters".to_string(),
            initial: Arc::new(initial),
            speed: Arc::new(speed),
            source: Arc::new(source),
        }
    }

    /// Constant speed `a`, zero source
    pub fn constant_speed<I>(initial: I, speed: f64) -> Self
    where
        I: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::new(
            initial,
            move |grid: &Grid, _u: &DVector<f64>| DVector::from_element(grid.len(), speed),
            |grid: &Grid, _t: f64, _u: &DVector<f64>| DVector::zeros(grid.len()),
        )
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl TransportProblem for TaskParams {
    fn initial_condition(&self, x: f64) -> f64 {
        (self.initial)(x)
    }

    fn speed(&self, grid: &Grid, u: &DVector<f64>) -> DVector<f64> {
        (self.speed)(grid, u)
    }

    fn source(&self, grid: &Grid, t: f64, u: &DVector<f64>) -> DVector<f64> {
        (self.source)(grid, t, u)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for TaskParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskParams")
            .field("name", &self.name)
            .field("initial", &"<user-defined>")
            .field("speed", &"<user-defined>")
            .field("source", &"<user-defined>")
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_params_forwards_to_closures() {
        let params = TaskParams::new(
            |x| 3.0 * x,
            |_grid: &Grid, u: &DVector<f64>| u.map(|v| 2.0 * v),
            |_grid: &Grid, t: f64, u: &DVector<f64>| u.map(|v| v + t),
        );
        let grid = Grid::new(0.0, 1.0, 3).unwrap();
        let u = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        assert_eq!(params.initial_condition(2.0), 6.0);
        assert_eq!(params.speed(&grid, &u).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(params.source(&grid, 0.5, &u).as_slice(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_constant_speed_shapes() {
        let params = TaskParams::constant_speed(|x| x, 0.75);
        let grid = Grid::new(0.0, 1.0, 7).unwrap();
        let u = DVector::zeros(7);

        let speed = params.speed(&grid, &u);
        assert_eq!(speed.len(), 7);
        assert!(speed.iter().all(|&a| a == 0.75));
        assert!(params.source(&grid, 1.0, &u).iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_default_name_and_no_exact_solution() {
        let params = TaskParams::constant_speed(|x| x, 1.0);
        let grid = Grid::new(0.0, 1.0, 3).unwrap();

        assert_eq!(params.name(), "Task parameters");
        assert!(params.description().is_none());
        assert!(params.exact_solution(&grid, 0.0).is_none());
    }

    #[test]
    fn test_output_lengths() {
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        assert!(check_output_lengths(&TaskParams::constant_speed(|x| x, 1.0), &grid).is_ok());

        let short_source = TaskParams::new(
            |x| x,
            |grid: &Grid, _u: &DVector<f64>| DVector::from_element(grid.len(), 1.0),
            |_grid: &Grid, _t: f64, _u: &DVector<f64>| DVector::zeros(4),
        );
        match check_output_lengths(&short_source, &grid) {
            Err(TransportError::DimensionMismatch {
                context,
                expected,
                actual,
            }) => {
                assert!(context.starts_with("source term"));
                assert_eq!((expected, actual), (5, 4));
            }
            other => panic!("expected a dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_hides_closures() {
        let params = TaskParams::constant_speed(|x| x, 1.0).with_name("demo");
        let debug = format!("{:?}", params);

        assert!(debug.contains("demo"));
        assert!(debug.contains("<user-defined>"));
    }
}
