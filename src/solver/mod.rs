//! Numerical solvers
//!
//! This module turns a transport problem into numbers: it discretises dU/dx
//! with a finite-difference stencil and advances the resulting ODE system
//! with an explicit Runge-Kutta scheme.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Transport problem (initial condition, speed, source)
//!    - Grid
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Time scheme (Butcher tableau) and space scheme (stencil)
//!    - Courant number, total time, iteration cap
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - `MethodOfLinesSolver` wires stencil, stepper and step controller
//!
//! # Module Organization
//!
//! - **`stencil`**: stencil descriptors, the `SpaceScheme` registry and
//!   `apply_stencil`
//! - **`tableau`**: Butcher tableaux and the `TimeScheme` registry
//! - **`runge_kutta`**: the generic explicit step `rk_step`
//! - **`step_control`**: Courant-number step size `next_dt`
//! - **`driver`**: right-hand-side assembly and the time loop
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SimulationResult`,
//!   progress observers
//! - **`scenario`**: problem + grid
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌───────────────────┐   ┌──────┐
//! │ TransportProblem  │   │ Grid │
//! └─────────┬─────────┘   └──┬───┘
//!           └───────┬────────┘
//!          ┌────────▼────────┐
//!          │    Scenario     │ ← WHAT to solve
//!          └────────┬────────┘
//!          ┌────────▼─────────────┐
//!          │ SolverConfiguration  │ ← HOW to solve
//!          │ (tableau + stencil)  │
//!          └────────┬─────────────┘
//!          ┌────────▼────────────┐
//!          │ MethodOfLinesSolver │ ← next_dt → rk_step → ...
//!          └────────┬────────────┘
//!          ┌────────▼────────────┐
//!          │  SimulationResult   │ ← final state + dt history
//!          └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use transport_rs::grid::Grid;
//! use transport_rs::models::LinearTransport;
//! use transport_rs::solver::{MethodOfLinesSolver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. WHAT: a Gaussian pulse moving right at unit speed
//! let problem = LinearTransport::gaussian_pulse(1.0, 0.5, 0.1);
//! let scenario = Scenario::new(Box::new(problem), Grid::new(0.0, 2.0, 201)?);
//!
//! // 2. HOW: RK-6 in time, fourth-order central differences in space
//! let config = SolverConfiguration::from_names(0.25, 0.5, 100_000, "RK-6", "CD4")?;
//!
//! // 3. Solve
//! let result = MethodOfLinesSolver::new().solve(&scenario, &config)?;
//! println!("{} steps, t = {}", result.iterations(), result.elapsed_time());
//! # Ok::<(), transport_rs::TransportError>(())
//! ```
//!
//! # Time Step Selection
//!
//! `dt = Cu · dx`. The controller does not look at the speed field, so the
//! Courant number has to keep `|a|·dt/dx` inside the stability region of
//! the chosen pair. Central stencils with Euler-1 or Euler-2 are unstable
//! for any Cu; Hoin and the high-order schemes are fine around Cu ≤ 0.5.

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod driver;
pub mod runge_kutta;
mod scenario;
pub mod step_control;
pub mod stencil;
pub mod tableau;
mod traits;

// =================================================================================================
// Parallel Stencil Threshold
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Grids with more nodes than this evaluate stencils with rayon
/// (feature `parallel` only)
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Node count above which [`stencil::apply_stencil()`] goes parallel
///
/// ```rust
/// use transport_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Move the parallel threshold, e.g. to benchmark both stencil paths
///
/// # Panics
///
/// Panics when `nodes == 0`.
///
/// ```rust
/// use transport_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
/// ```
pub fn set_parallel_threshold(nodes: usize) {
    assert!(nodes > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(nodes, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Test-only override of the threshold, undone on drop
///
/// Holds a lock so that tests touching the threshold run one at a time.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(nodes: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(nodes);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    DEFAULT_COURANT_NUMBER, DEFAULT_MAX_ITERATIONS, LogProgress, NoProgress, ProgressObserver,
    SimulationResult, Solver, SolverConfiguration,
};

pub use driver::{MethodOfLinesSolver, build_rhs, integrate};
pub use runge_kutta::{RightHandSide, rk_step};
pub use scenario::Scenario;
pub use step_control::next_dt;
pub use stencil::{SpaceScheme, Stencil, apply_stencil};
pub use tableau::{ButcherTableau, TimeScheme};

// =================================================================================================
// Tests
// =================================================================================================
