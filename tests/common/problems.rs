//! Problems with known solutions
//!
//! Each one isolates part of the solver: decay exercises only the time
//! stepper, the pulse exercises stencil and stepper together.

use nalgebra::DVector;
use transport_rs::grid::Grid;
use transport_rs::models::{InitialProfile, LinearTransport};
use transport_rs::physics::TransportProblem;

// =================================================================================================
// Exponential Decay: dU/dt = -k·U
// =================================================================================================

/// U ≡ 1 at rest, decaying at rate `k`
///
/// Exact solution: `U(t) = exp(-k·t)` at every node. The speed is zero, so
/// the stencil drops out and the error is the time scheme's alone.
pub fn exponential_decay(decay_rate: f64) -> LinearTransport {
    LinearTransport::new(InitialProfile::custom(|_| 1.0), 0.0)
        .with_decay(decay_rate)
        .with_name("Exponential decay")
}

// =================================================================================================
// Constant Growth: dU/dt = c
// =================================================================================================

/// Zero speed, constant source `rate`
///
/// Exact solution: `U(t) = U₀ + rate·t`, which every consistent scheme,
/// Euler-1 included, reproduces to round-off.
pub struct ConstantGrowth {
    pub rate: f64,
}

impl TransportProblem for ConstantGrowth {
    fn initial_condition(&self, x: f64) -> f64 {
        x
    }

    fn speed(&self, grid: &Grid, _u: &DVector<f64>) -> DVector<f64> {
        DVector::zeros(grid.len())
    }

    fn source(&self, grid: &Grid, _t: f64, _u: &DVector<f64>) -> DVector<f64> {
        DVector::from_element(grid.len(), self.rate)
    }

    fn name(&self) -> &str {
        "Constant growth"
    }

    fn exact_solution(&self, grid: &Grid, t: f64) -> Option<DVector<f64>> {
        Some(grid.map_nodes(|x| x + self.rate * t))
    }
}

// =================================================================================================
// Calibration Pulse
// =================================================================================================

/// Unit-speed Gaussian `exp(-((x - 0.5)/0.1)²)` on [0, 2]
///
/// Over t ∈ [0, 0.5] the pulse stays clear of both ends, where the edge
/// nodes keep a zero derivative.
pub fn calibration_pulse() -> LinearTransport {
    LinearTransport::gaussian_pulse(1.0, 0.5, 0.1)
}
