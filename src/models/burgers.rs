//! Inviscid Burgers equation
//!
//! ```text
//! dU/dt + U · dU/dx = 0
//! ```
//!
//! The speed is the solution itself, so smooth initial data steepens until
//! the characteristics cross. For a profile with negative slope somewhere,
//! that happens at
//!
//! ```text
//! t_b = -1 / min(U₀'(x))
//! ```
//!
//! Past `t_b` the classical solution no longer exists; the explicit schemes
//! of this crate produce oscillations there. No closed form is provided.

use nalgebra::DVector;

use crate::grid::Grid;
use crate::models::profiles::InitialProfile;
use crate::physics::TransportProblem;
use crate::solver::stencil::SpaceScheme;

/// Inviscid Burgers problem
#[derive(Debug, Clone)]
pub struct InviscidBurgers {
    profile: InitialProfile,
}

impl InviscidBurgers {
    pub fn new(profile: InitialProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &InitialProfile {
        &self.profile
    }

    /// Wave-breaking time estimated on `grid`
    ///
    /// Uses the sixth-order central stencil on the sampled profile. `None`
    /// when the profile never decreases (a rarefaction, no breaking).
    pub fn breaking_time(&self, grid: &Grid) -> Option<f64> {
        let u0 = self.profile.sample(grid);
        let slope = SpaceScheme::CD6.apply(&u0, grid);
        let steepest = slope.iter().copied().fold(f64::INFINITY, f64::min);

        if steepest < 0.0 {
            Some(-1.0 / steepest)
        } else {
            None
        }
    }
}

impl TransportProblem for InviscidBurgers {
    fn initial_condition(&self, x: f64) -> f64 {
        self.profile.evaluate(x)
    }

    fn speed(&self, _grid: &Grid, u: &DVector<f64>) -> DVector<f64> {
        u.clone()
    }

    fn source(&self, grid: &Grid, _t: f64, _u: &DVector<f64>) -> DVector<f64> {
        DVector::zeros(grid.len())
    }

    fn name(&self) -> &str {
        "Inviscid Burgers"
    }

    fn description(&self) -> Option<&str> {
        Some("dU/dt + U dU/dx = 0")
    }
}
