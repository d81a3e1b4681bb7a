//! Validation against exact solutions
//!
//! - [`transport_eq_solution`]: closed form of constant-speed transport
//! - [`ErrorNorms`]: discrete max / L1 / L2 distances between two states
//! - [`observed_order`] and [`ConvergenceStudy`]: refine the grid, watch the
//!   error fall
//!
//! # Convergence Study
//!
//! For a scheme of order p and a smooth solution, halving dx (with a fixed
//! Courant number, so dt halves too) divides the error by about 2ᵖ:
//!
//! ```text
//! p ≈ log₂(e(dx) / e(dx/2))
//! ```
//!
//! # Example
//!
//! ```rust
//! use transport_rs::analysis::ConvergenceStudy;
//! use transport_rs::grid::Grid;
//! use transport_rs::models::LinearTransport;
//! use transport_rs::solver::SolverConfiguration;
//!
//! let problem = LinearTransport::gaussian_pulse(1.0, 0.5, 0.1);
//! let config = SolverConfiguration::from_names(0.25, 0.5, 100_000, "Hoin", "Upwind3")?;
//!
//! let study = ConvergenceStudy::run(&problem, &Grid::new(0.0, 2.0, 101)?, 3, &config)?;
//! assert_eq!(study.rows().len(), 3);
//! assert!(study.finest_order().unwrap() > 2.5);
//! # Ok::<(), transport_rs::TransportError>(())
//! ```

use nalgebra::DVector;
use std::fmt;

use crate::error::{Result, TransportError};
use crate::grid::Grid;
use crate::physics::TransportProblem;
use crate::solver::{NoProgress, SolverConfiguration, integrate};

// =================================================================================================
// Exact Solution
// =================================================================================================

/// Exact solution of `dU/dt + a·dU/dx = 0` with constant `a`
///
/// `U(x, t) = U₀(x - a·t)` sampled at the grid nodes.
pub fn transport_eq_solution<F>(init_cond: F, grid: &Grid, speed: f64, time: f64) -> DVector<f64>
where
    F: Fn(f64) -> f64,
{
    grid.map_nodes(|x| init_cond(x - speed * time))
}

// =================================================================================================
// Error Norms
// =================================================================================================

/// Discrete distances between a numerical state and a reference
///
/// ```text
/// max = maxᵢ |eᵢ|
/// l1  = dx · Σ |eᵢ|
/// l2  = sqrt(dx · Σ eᵢ²)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorNorms {
    pub max: f64,
    pub l1: f64,
    pub l2: f64,
}

impl ErrorNorms {
    /// Norms of `numeric - reference` on `grid`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when either vector does not have one value per
    /// node.
    pub fn between(numeric: &DVector<f64>, reference: &DVector<f64>, grid: &Grid) -> Result<Self> {
        for (what, vector) in [("numerical state", numeric), ("reference state", reference)] {
            if vector.len() != grid.len() {
                return Err(TransportError::dimension_mismatch(what, grid.len(), vector.len()));
            }
        }

        let difference = numeric - reference;
        let dx = grid.dx();

        Ok(Self {
            max: difference.amax(),
            l1: dx * difference.iter().map(|e| e.abs()).sum::<f64>(),
            l2: (dx * difference.norm_squared()).sqrt(),
        })
    }
}

/// Observed order of accuracy between two successive refinements
///
/// `log₂(coarse / fine)`, for errors measured on grids whose spacing
/// differs by a factor 2.
pub fn observed_order(coarse_error: f64, fine_error: f64) -> f64 {
    (coarse_error / fine_error).log2()
}

// =================================================================================================
// Convergence Study
// =================================================================================================

/// One refinement level of a [`ConvergenceStudy`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRow {
    pub points: usize,
    pub dx: f64,
    pub iterations: usize,
    pub errors: ErrorNorms,

    /// Max-norm order against the previous (coarser) row
    pub order: Option<f64>,
}

/// Errors of one configuration over successive grid refinements
#[derive(Debug, Clone)]
pub struct ConvergenceStudy {
    rows: Vec<ConvergenceRow>,
}

impl ConvergenceStudy {
    /// Solve `problem` on `coarsest` and `levels - 1` successive refinements
    ///
    /// Each level is compared with `problem.exact_solution` at the time the
    /// run actually reached.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` when `levels == 0`, when the problem has no
    ///   exact solution, or when a run hits the iteration cap
    /// - anything [`integrate`] reports
    pub fn run(
        problem: &dyn TransportProblem,
        coarsest: &Grid,
        levels: usize,
        config: &SolverConfiguration,
    ) -> Result<Self> {
        if levels == 0 {
            return Err(TransportError::InvalidConfiguration(
                "a convergence study needs at least one level".to_string(),
            ));
        }

        let mut rows: Vec<ConvergenceRow> = Vec::with_capacity(levels);
        let mut grid = coarsest.clone();

        for level in 0..levels {
            if level > 0 {
                grid = grid.refine()?;
            }

            let result = integrate(problem, &grid, config, &mut NoProgress)?;
            if result.is_truncated() {
                return Err(TransportError::InvalidConfiguration(format!(
                    "run on {} nodes stopped at the iteration cap ({})",
                    grid.len(),
                    config.max_iterations
                )));
            }

            let exact = problem
                .exact_solution(&grid, result.elapsed_time())
                .ok_or_else(|| {
                    TransportError::InvalidConfiguration(format!(
                        "'{}' has no exact solution to compare with",
                        problem.name()
                    ))
                })?;

            let errors = ErrorNorms::between(&result.final_state, &exact, &grid)?;
            let order = rows
                .last()
                .map(|previous| observed_order(previous.errors.max, errors.max));

            log::debug!(
                "convergence level {}: N = {}, max error = {:e}",
                level,
                grid.len(),
                errors.max
            );

            rows.push(ConvergenceRow {
                points: grid.len(),
                dx: grid.dx(),
                iterations: result.iterations(),
                errors,
                order,
            });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ConvergenceRow] {
        &self.rows
    }

    /// Orders between successive levels (one fewer than the rows)
    pub fn observed_orders(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row.order).collect()
    }

    /// Order measured between the two finest levels
    pub fn finest_order(&self) -> Option<f64> {
        self.rows.last().and_then(|row| row.order)
    }
}

impl fmt::Display for ConvergenceStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>12} {:>10} {:>12} {:>12} {:>12} {:>7}",
            "N", "dx", "steps", "max", "L1", "L2", "order"
        )?;
        for row in &self.rows {
            let order = row
                .order
                .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p));
            writeln!(
                f,
                "{:>8} {:>12.4e} {:>10} {:>12.4e} {:>12.4e} {:>12.4e} {:>7}",
                row.points, row.dx, row.iterations, row.errors.max, row.errors.l1, row.errors.l2, order
            )?;
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
