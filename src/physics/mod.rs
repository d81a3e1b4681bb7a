//! Problem definitions
//!
//! This module provides the trait every transport problem implements. A
//! problem encapsulates the continuous equation
//!
//! ```text
//! dU/dt + a(x,t,U)·dU/dx = f(x,t,U),    U(x, 0) = U₀(x)
//! ```
//!
//! through three pure functions: initial condition, speed field and source
//! term.
//!
//! # Architecture
//!
//! Problems are **separate from numerical solvers**:
//! - The problem provides the **equation** (physics)
//! - The solver provides the **method** to solve it (numerics)
//!
//! This separation allows:
//! - Same problem with different stencils and Runge-Kutta schemes
//! - Same solver with different problems (linear transport, Burgers, ...)
//!
//! # Implementing a New Problem
//!
//! ```rust
//! use transport_rs::physics::TransportProblem;
//! use transport_rs::grid::Grid;
//! use nalgebra::DVector;
//!
//! struct Drift;
//!
//! impl TransportProblem for Drift {
//!     fn initial_condition(&self, x: f64) -> f64 {
//!         x.sin()
//!     }
//!
//!     fn speed(&self, grid: &Grid, _u: &DVector<f64>) -> DVector<f64> {
//!         grid.map_nodes(|x| 1.0 + 0.5 * x)
//!     }
//!
//!     fn source(&self, grid: &Grid, _t: f64, _u: &DVector<f64>) -> DVector<f64> {
//!         DVector::zeros(grid.len())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Drift"
//!     }
//! }
//! ```
//!
//! For one-off problems, [`TaskParams`] builds the same thing from closures.

pub mod traits;

pub use traits::{TaskParams, TransportProblem, check_output_lengths};
