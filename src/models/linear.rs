//! Linear transport with constant speed
//!
//! # Equation
//!
//! ```text
//! dU/dt + a · dU/dx = -k · U,      U(x, 0) = U₀(x)
//! ```
//!
//! - `a`: transport speed (constant)
//! - `k`: first-order decay rate (0 for pure advection)
//!
//! # Exact Solution
//!
//! The profile moves along the characteristics `x - a·t = const` and decays
//! exponentially:
//!
//! ```text
//! U(x, t) = U₀(x - a·t) · exp(-k·t)
//! ```
//!
//! which makes this problem the reference case for convergence studies.

use nalgebra::DVector;

use crate::analysis::transport_eq_solution;
use crate::grid::Grid;
use crate::models::profiles::InitialProfile;
use crate::physics::TransportProblem;

/// Constant-speed transport with optional linear decay
///
/// # Example
///
/// ```rust
/// use transport_rs::grid::Grid;
/// use transport_rs::models::{InitialProfile, LinearTransport};
/// use transport_rs::physics::TransportProblem;
///
/// let problem = LinearTransport::new(InitialProfile::gaussian(0.5, 0.1, 1.0), 2.0);
/// let grid = Grid::new(0.0, 3.0, 301)?;
///
/// // After t = 0.25 the peak sits at x = 1.0
/// let exact = problem.exact_solution(&grid, 0.25).unwrap();
/// assert!((exact[100] - 1.0).abs() < 1e-12);
/// # Ok::<(), transport_rs::TransportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinearTransport {
    profile: InitialProfile,
    speed: f64,
    decay_rate: f64,
    name: String,
}

impl LinearTransport {
    /// Pure advection of `profile` at speed `speed`
    pub fn new(profile: InitialProfile, speed: f64) -> Self {
        Self {
            profile,
            speed,
            decay_rate: 0.0,
            name: "Linear transport".to_string(),
        }
    }

    /// Gaussian pulse `exp(-((x - center)/width)²)` moving at `speed`
    pub fn gaussian_pulse(speed: f64, center: f64, width: f64) -> Self {
        Self::new(InitialProfile::gaussian(center, width, 1.0), speed)
    }

    /// Add a decay source `-k·U`
    pub fn with_decay(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self.name = "Linear transport with decay".to_string();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn speed_value(&self) -> f64 {
        self.speed
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn profile(&self) -> &InitialProfile {
        &self.profile
    }
}

impl TransportProblem for LinearTransport {
    fn initial_condition(&self, x: f64) -> f64 {
        self.profile.evaluate(x)
    }

    fn speed(&self, grid: &Grid, _u: &DVector<f64>) -> DVector<f64> {
        DVector::from_element(grid.len(), self.speed)
    }

    fn source(&self, _grid: &Grid, _t: f64, u: &DVector<f64>) -> DVector<f64> {
        u * (-self.decay_rate)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        Some("dU/dt + a dU/dx = -k U with constant a and k")
    }

    fn exact_solution(&self, grid: &Grid, t: f64) -> Option<DVector<f64>> {
        let advected = transport_eq_solution(|x| self.profile.evaluate(x), grid, self.speed, t);
        Some(advected * (-self.decay_rate * t).exp())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_functions() {
        let problem = LinearTransport::gaussian_pulse(1.5, 0.5, 0.1).with_decay(2.0);
        let grid = Grid::new(0.0, 1.0, 11).unwrap();
        let u = DVector::from_element(11, 0.5);

        assert!(problem.speed(&grid, &u).iter().all(|&a| a == 1.5));
        assert!(problem.source(&grid, 0.0, &u).iter().all(|&f| f == -1.0));
        assert_eq!(problem.initial_condition(0.5), 1.0);
        assert_eq!(problem.name(), "Linear transport with decay");
    }

    #[test]
    fn test_exact_solution_at_zero_is_initial_condition() {
        let problem = LinearTransport::new(InitialProfile::sine(1.0, 1.0, 0.3), -0.7);
        let grid = Grid::new(0.0, 1.0, 21).unwrap();

        let exact = problem.exact_solution(&grid, 0.0).unwrap();
        let initial = problem.profile().sample(&grid);
        assert_eq!(exact, initial);
    }

    #[test]
    fn test_exact_solution_shifts_and_decays() {
        let problem = LinearTransport::gaussian_pulse(1.0, 0.5, 0.1).with_decay(1.0);
        let grid = Grid::new(0.0, 2.0, 201).unwrap();

        let exact = problem.exact_solution(&grid, 0.5).unwrap();
        // Peak moved from x = 0.5 to x = 1.0 and shrank by e⁻⁰·⁵
        let (peak_index, peak) = exact
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });

        assert_eq!(peak_index, 100);
        assert!((peak - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_default_has_no_decay() {
        let problem = LinearTransport::gaussian_pulse(1.0, 0.0, 1.0);
        let grid = Grid::new(0.0, 1.0, 3).unwrap();
        let u = DVector::from_element(3, 4.0);

        assert_eq!(problem.decay_rate(), 0.0);
        assert_eq!(problem.speed_value(), 1.0);
        assert!(problem.source(&grid, 0.0, &u).iter().all(|&f| f == 0.0));
    }
}
