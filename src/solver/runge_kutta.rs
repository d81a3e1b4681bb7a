//! Generic explicit Runge-Kutta step
//!
//! # Mathematical Background
//!
//! After spatial discretisation the PDE becomes a system of ODEs
//! `dU/dt = F(t, U)`. One step of an s-stage explicit scheme with tableau
//! `(a, b, c)` advances U by dt:
//!
//! ```text
//! k₀ = F(tᵢ* , U)                         with tᵢ* = t + cᵢ·dt
//! kᵢ = F(tᵢ*, U + dt · Σ_{j<i} aᵢⱼ · kⱼ)     for i = 1 .. s-1
//!
//! U_next = U + dt · Σᵢ bᵢ · kᵢ
//! ```
//!
//! Every stage sees one scalar stage time, shared by all nodes.
//!
//! # Cost
//!
//! - s right-hand-side evaluations per step
//! - s stage vectors of length N kept alive during the step
//!
//! The same routine drives every tableau from the registry, so Euler-1 and
//! RK-7 go through exactly the same code.

use nalgebra::DVector;

use crate::grid::Grid;
use crate::solver::tableau::ButcherTableau;

// =================================================================================================
// Right-Hand Side
// =================================================================================================

/// Semi-discrete right-hand side `F(t, U)`
///
/// Closures with the matching signature implement this trait, so a step can
/// be driven by a plain `|grid, t, u| ...`.
pub trait RightHandSide {
    /// Time derivative of `u` at time `t`, same length as `u`
    fn evaluate(&self, grid: &Grid, t: f64, u: &DVector<f64>) -> DVector<f64>;
}

impl<F> RightHandSide for F
where
    F: Fn(&Grid, f64, &DVector<f64>) -> DVector<f64>,
{
    fn evaluate(&self, grid: &Grid, t: f64, u: &DVector<f64>) -> DVector<f64> {
        self(grid, t, u)
    }
}

// =================================================================================================
// Step
// =================================================================================================

/// Advance `u` from `t` to `t + dt` with one explicit Runge-Kutta step
///
/// `tableau` must have a valid layout (see [`ButcherTableau::validate`]);
/// tables handed out by the registry always do. `u` is left untouched and a
/// new vector is returned.
///
/// # Example
///
/// ```rust
/// use transport_rs::grid::Grid;
/// use transport_rs::solver::runge_kutta::rk_step;
/// use transport_rs::solver::tableau::EULER_1;
/// use nalgebra::DVector;
///
/// let grid = Grid::new(0.0, 1.0, 3)?;
/// let u = DVector::from_element(3, 1.0);
/// let rhs = |_g: &Grid, _t: f64, u: &DVector<f64>| u.map(|_| 2.0);
///
/// let next = rk_step(&u, 0.0, &grid, 0.25, &rhs, &EULER_1);
/// assert_eq!(next.as_slice(), &[1.5, 1.5, 1.5]);
/// # Ok::<(), transport_rs::TransportError>(())
/// ```
pub fn rk_step<R>(
    u: &DVector<f64>,
    t: f64,
    grid: &Grid,
    dt: f64,
    rhs: &R,
    tableau: &ButcherTableau,
) -> DVector<f64>
where
    R: RightHandSide + ?Sized,
{
    let stages = tableau.stages();
    let mut k: Vec<DVector<f64>> = Vec::with_capacity(stages);

    // ====== Stages ======

    k.push(rhs.evaluate(grid, t + tableau.c[0] * dt, u));

    for (i, row) in tableau.a.iter().enumerate().map(|(r, row)| (r + 1, row)) {
        let mut stage_state = u.clone();
        for (coefficient, slope) in row.iter().zip(k.iter()) {
            stage_state.axpy(dt * coefficient, slope, 1.0);
        }
        k.push(rhs.evaluate(grid, t + tableau.c[i] * dt, &stage_state));
    }

    // ====== Update ======

    let mut next = u.clone();
    for (weight, slope) in tableau.b.iter().zip(k.iter()) {
        next.axpy(dt * weight, slope, 1.0);
    }

    next
}

// =================================================================================================
// Tests
// =================================================================================================
