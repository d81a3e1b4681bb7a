//! transport-rs: 1-D Scalar Transport by the Method of Lines
//!
//! Solves
//!
//! ```text
//! dU/dt + a(x,t,U)·dU/dx = f(x,t,U),    x ∈ [left, right],  t ∈ [0, T]
//! ```
//!
//! on a uniform grid: dU/dx is replaced by a finite-difference stencil, and
//! the resulting system of ODEs is advanced with an explicit Runge-Kutta
//! scheme whose step follows a Courant number.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Problems define the equation (what to solve)
//!    - Stencils and Butcher tableaux define the method (how to solve)
//!
//! 2. **Data-Driven Schemes**
//!    - A stencil is offsets + coefficients, a Runge-Kutta scheme is a
//!      Butcher tableau
//!    - One generic stepper and one generic stencil routine serve them all
//!
//! # Quick Start
//!
//! ```rust
//! use transport_rs::analysis::ErrorNorms;
//! use transport_rs::grid::Grid;
//! use transport_rs::models::LinearTransport;
//! use transport_rs::physics::TransportProblem;
//! use transport_rs::solver::{MethodOfLinesSolver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. Problem and grid
//! let problem = LinearTransport::gaussian_pulse(1.0, 0.5, 0.1);
//! let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 2.0, 201)?);
//!
//! // 2. Schemes, by name
//! let config = SolverConfiguration::from_names(0.25, 0.5, 100_000, "Hoin", "Upwind3")?;
//!
//! // 3. Run and compare with the exact solution
//! let result = MethodOfLinesSolver::new().solve(&scenario, &config)?;
//! let exact = scenario
//!     .problem
//!     .exact_solution(&result.grid, result.elapsed_time())
//!     .unwrap();
//!
//! let errors = ErrorNorms::between(&result.final_state, &exact, &result.grid)?;
//! assert!(errors.max < 1e-2);
//! # Ok::<(), transport_rs::TransportError>(())
//! ```
//!
//! # Modules
//!
//! - [`grid`]: uniform 1-D grid
//! - [`physics`]: the [`TransportProblem`](physics::TransportProblem) trait
//! - [`models`]: linear transport, inviscid Burgers, initial profiles
//! - [`solver`]: stencils, tableaux, Runge-Kutta step, CFL control, driver
//! - [`analysis`]: exact solutions, error norms, convergence studies
//! - [`output`]: CSV export and plots
//!
//! # Features
//!
//! - `parallel`: evaluate stencils with rayon on grids above
//!   [`solver::parallel_threshold`] nodes

pub mod analysis;
pub mod error;
pub mod grid;
pub mod models;
pub mod output;
pub mod physics;
pub mod solver;

pub use error::{Result, TransportError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use transport_rs::prelude::*;
    //! ```
    pub use crate::analysis::{ConvergenceStudy, ErrorNorms, transport_eq_solution};
    pub use crate::error::{Result, TransportError};
    pub use crate::grid::Grid;
    pub use crate::models::{InitialProfile, InviscidBurgers, LinearTransport};
    pub use crate::physics::{TaskParams, TransportProblem};
    pub use crate::solver::{
        MethodOfLinesSolver, Scenario, SimulationResult, Solver, SolverConfiguration,
        SpaceScheme, TimeScheme,
    };
}
