//! Initial profiles U₀(x)
//!
//! Defines the solution at t = 0 as a function of SPACE. Sampling a profile
//! on a grid gives the initial state vector of a run.
//!
//! # Example
//!
//! ```rust
//! use transport_rs::models::InitialProfile;
//! // Gaussian bump centred at x = 0.5, width 0.1, height 1
//! let profile = InitialProfile::gaussian(0.5, 0.1, 1.0);
//!
//! assert!((profile.evaluate(0.5) - 1.0).abs() < 1e-15);   // Peak
//! assert!(profile.evaluate(0.0) < 1e-10);                 // Far left
//! assert!(profile.evaluate(1.0) < 1e-10);                 // Far right
//! ```

use nalgebra::DVector;
use std::f64::consts::PI;
use std::sync::Arc;

use crate::grid::Grid;

/// Initial profile U₀(x)
///
/// # Types
///
/// - **Gaussian**: smooth bump
/// - **Rectangle**: box (discontinuous edges)
/// - **Sine**: periodic wave
/// - **Custom**: user-defined function
/// - **Zero**: U₀ = 0 everywhere
pub enum InitialProfile {
    /// Gaussian bump
    ///
    /// ```text
    /// U₀(x) = A · exp(-((x - x₀) / w)²)
    /// ```
    Gaussian {
        center: f64,
        width: f64,
        amplitude: f64,
    },

    /// `value` on `[start, end)`, zero elsewhere
    Rectangle { start: f64, end: f64, value: f64 },

    /// ```text
    /// U₀(x) = A · sin(2π x / λ + φ)
    /// ```
    Sine {
        amplitude: f64,
        wavelength: f64,
        phase: f64,
    },

    /// Custom profile from user function
    ///
    /// # Example
    ///
    /// ```rust
    /// use transport_rs::models::InitialProfile;
    /// let ramp = InitialProfile::custom(|x| if x < 1.0 { x } else { 1.0 });
    /// assert_eq!(ramp.evaluate(2.0), 1.0);
    /// ```
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),

    /// Zero everywhere
    Zero,
}

// ==================== Manual Clone Implementation ====================

impl Clone for InitialProfile {
    fn clone(&self) -> Self {
        match self {
            Self::Gaussian {
                center,
                width,
                amplitude,
            } => Self::Gaussian {
                center: *center,
                width: *width,
                amplitude: *amplitude,
            },
            Self::Rectangle { start, end, value } => Self::Rectangle {
                start: *start,
                end: *end,
                value: *value,
            },
            Self::Sine {
                amplitude,
                wavelength,
                phase,
            } => Self::Sine {
                amplitude: *amplitude,
                wavelength: *wavelength,
                phase: *phase,
            },
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
            Self::Zero => Self::Zero,
        }
    }
}

// ==================== Manual Debug Implementation ====================

impl std::fmt::Debug for InitialProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gaussian {
                center,
                width,
                amplitude,
            } => f
                .debug_struct("Gaussian")
                .field("center", center)
                .field("width", width)
                .field("amplitude", amplitude)
                .finish(),
            Self::Rectangle { start, end, value } => f
                .debug_struct("Rectangle")
                .field("start", start)
                .field("end", end)
                .field("value", value)
                .finish(),
            Self::Sine {
                amplitude,
                wavelength,
                phase,
            } => f
                .debug_struct("Sine")
                .field("amplitude", amplitude)
                .field("wavelength", wavelength)
                .field("phase", phase)
                .finish(),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
            Self::Zero => f.debug_struct("Zero").finish(),
        }
    }
}

// ==================== Implementation ====================

impl InitialProfile {
    /// # Panics
    ///
    /// Panics when `width <= 0`.
    pub fn gaussian(center: f64, width: f64, amplitude: f64) -> Self {
        assert!(width > 0.0, "Gaussian width must be > 0");
        Self::Gaussian {
            center,
            width,
            amplitude,
        }
    }

    /// # Panics
    ///
    /// Panics when `end <= start`.
    pub fn rectangle(start: f64, end: f64, value: f64) -> Self {
        assert!(end > start, "Rectangle end must be > start");
        Self::Rectangle { start, end, value }
    }

    /// # Panics
    ///
    /// Panics when `wavelength <= 0`.
    pub fn sine(amplitude: f64, wavelength: f64, phase: f64) -> Self {
        assert!(wavelength > 0.0, "Sine wavelength must be > 0");
        Self::Sine {
            amplitude,
            wavelength,
            phase,
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn zero() -> Self {
        Self::Zero
    }

    /// Value of the profile at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Gaussian {
                center,
                width,
                amplitude,
            } => {
                let distance = (x - center) / width;
                amplitude * (-distance * distance).exp()
            }

            Self::Rectangle { start, end, value } => {
                if x >= *start && x < *end {
                    *value
                } else {
                    0.0
                }
            }

            Self::Sine {
                amplitude,
                wavelength,
                phase,
            } => amplitude * (2.0 * PI * x / wavelength + phase).sin(),

            Self::Custom(f) => f(x),

            Self::Zero => 0.0,
        }
    }

    /// Profile sampled at every grid node (the initial state vector)
    pub fn sample(&self, grid: &Grid) -> DVector<f64> {
        grid.map_nodes(|x| self.evaluate(x))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_profile() {
        let profile = InitialProfile::gaussian(0.5, 0.1, 2.0);

        assert!((profile.evaluate(0.5) - 2.0).abs() < 1e-15);

        // One width away: A·e⁻¹
        let expected = 2.0 * (-1.0f64).exp();
        assert!((profile.evaluate(0.4) - expected).abs() < 1e-12);
        assert!((profile.evaluate(0.6) - expected).abs() < 1e-12);

        assert!(profile.evaluate(1.5) < 1e-40);
    }

    #[test]
    fn test_rectangle_profile() {
        let profile = InitialProfile::rectangle(0.2, 0.4, 3.0);

        assert_eq!(profile.evaluate(0.1), 0.0);
        assert_eq!(profile.evaluate(0.2), 3.0);
        assert_eq!(profile.evaluate(0.3), 3.0);
        assert_eq!(profile.evaluate(0.4), 0.0);
    }

    #[test]
    fn test_sine_profile() {
        let profile = InitialProfile::sine(1.5, 2.0, 0.0);

        assert!(profile.evaluate(0.0).abs() < 1e-15);
        assert!((profile.evaluate(0.5) - 1.5).abs() < 1e-12);
        assert!((profile.evaluate(1.5) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_custom_and_zero_profiles() {
        let custom = InitialProfile::custom(|x| x * x);
        assert_eq!(custom.evaluate(3.0), 9.0);

        let zero = InitialProfile::zero();
        assert_eq!(zero.evaluate(-7.0), 0.0);
    }

    #[test]
    fn test_sample_on_grid() {
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        let values = InitialProfile::rectangle(0.25, 0.75, 1.0).sample(&grid);

        assert_eq!(values.as_slice(), &[0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_clone_shares_custom_function() {
        let profile = InitialProfile::custom(|x| x + 1.0);
        let copy = profile.clone();

        assert_eq!(copy.evaluate(1.0), 2.0);
        assert!(format!("{:?}", copy).contains("<user-defined>"));
    }

    #[test]
    #[should_panic(expected = "Rectangle end must be > start")]
    fn test_rectangle_invalid() {
        InitialProfile::rectangle(1.0, 1.0, 0.5);
    }

    #[test]
    #[should_panic(expected = "Gaussian width must be > 0")]
    fn test_gaussian_invalid() {
        InitialProfile::gaussian(0.0, 0.0, 1.0);
    }
}
