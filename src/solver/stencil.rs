//! Finite-difference stencils for the spatial derivative dU/dx
//!
//! # Mathematical Background
//!
//! A stencil approximates the first derivative at node i by a linear
//! combination of neighbouring values:
//!
//! ```text
//!            1          max
//! dU/dx|ᵢ ≈ ─────────    Σ    cₖ · U[i + k]
//!           d · dx     k=min
//! ```
//!
//! where `(min, max)` is the index window, `cₖ` the integer coefficients and
//! `d` the divisor applied to dx.
//!
//! # Available Stencils
//!
//! | Name     | Window   | Coefficients              | d  | Order |
//! |----------|----------|---------------------------|----|-------|
//! | Forward  | (0, 1)   | -1 1                      | 1  | 1     |
//! | Backward | (-1, 0)  | -1 1                      | 1  | 1     |
//! | Upwind2  | (-2, 0)  | 1 -4 3                    | 2  | 2     |
//! | Upwind3  | (-2, 1)  | 1 -6 3 2                  | 6  | 3     |
//! | Upwind5  | (-3, 2)  | -2 15 -60 20 30 -3        | 60 | 5     |
//! | CD2      | (-1, 1)  | -1 0 1                    | 2  | 2     |
//! | CD4      | (-2, 2)  | 1 -8 0 8 -1               | 12 | 4     |
//! | CD6      | (-3, 3)  | -1 9 -45 0 45 -9 1        | 60 | 6     |
//!
//! The upwind family leans on upstream nodes and is meant for positive
//! speeds; the central family (CD) is symmetric and non-dissipative.
//!
//! # Edges
//!
//! The stencil is evaluated only where its whole window fits inside the grid,
//! i.e. for `i ∈ [-min, N - max)`. Every other entry of the result is left at
//! zero. This is not a boundary condition: the nodes near the edges simply
//! receive no transport.
//!
//! # Example
//!
//! ```rust
//! use transport_rs::grid::Grid;
//! use transport_rs::solver::stencil::{apply_stencil, SpaceScheme};
//!
//! let grid = Grid::new(0.0, 1.0, 11)?;
//! let u = grid.map_nodes(|x| 3.0 * x);
//!
//! let scheme: SpaceScheme = "CD4".parse()?;
//! let dudx = apply_stencil(&u, &grid, scheme.stencil());
//!
//! // Exact for a linear function away from the edges
//! assert!((dudx[5] - 3.0).abs() < 1e-12);
//! // Window does not fit at the first two nodes
//! assert_eq!(dudx[0], 0.0);
//! # Ok::<(), transport_rs::TransportError>(())
//! ```

use nalgebra::DVector;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, TransportError};
use crate::grid::Grid;

// =================================================================================================
// Stencil Descriptor
// =================================================================================================

/// Finite-difference stencil descriptor
///
/// `coefficients[j]` multiplies `U[i + min_offset + j]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    /// Lowest relative index touched (≤ 0 for every registered stencil)
    pub min_offset: isize,

    /// Highest relative index touched
    pub max_offset: isize,

    /// Coefficients in ascending offset order
    pub coefficients: &'static [f64],

    /// Divisor `d` in `d · dx`
    pub dx_coefficient: f64,
}

impl Stencil {
    /// Number of nodes in the window
    pub fn width(&self) -> usize {
        (self.max_offset - self.min_offset + 1) as usize
    }

    /// Check that the coefficient list covers the window exactly
    pub fn validate(&self) -> Result<()> {
        if self.max_offset < self.min_offset {
            return Err(TransportError::InvalidConfiguration(format!(
                "stencil window ({}, {}) is inverted",
                self.min_offset, self.max_offset
            )));
        }
        if self.coefficients.len() != self.width() {
            return Err(TransportError::InvalidConfiguration(format!(
                "stencil window ({}, {}) needs {} coefficients, got {}",
                self.min_offset,
                self.max_offset,
                self.width(),
                self.coefficients.len()
            )));
        }
        if self.dx_coefficient == 0.0 || !self.dx_coefficient.is_finite() {
            return Err(TransportError::InvalidConfiguration(format!(
                "stencil divisor must be finite and non-zero, got {}",
                self.dx_coefficient
            )));
        }
        Ok(())
    }

    /// Range of node indices where the whole window fits in `points` nodes
    ///
    /// Empty when the grid is narrower than the window.
    pub fn valid_range(&self, points: usize) -> std::ops::Range<usize> {
        let start = (-self.min_offset).max(0) as usize;
        let end = points as isize - self.max_offset.max(0);
        let end = if end < start as isize { start } else { end as usize };
        start..end
    }
}

// =================================================================================================
// Registry
// =================================================================================================

const FORWARD: Stencil = Stencil {
    min_offset: 0,
    max_offset: 1,
    coefficients: &[-1.0, 1.0],
    dx_coefficient: 1.0,
};

const BACKWARD: Stencil = Stencil {
    min_offset: -1,
    max_offset: 0,
    coefficients: &[-1.0, 1.0],
    dx_coefficient: 1.0,
};

const UPWIND2: Stencil = Stencil {
    min_offset: -2,
    max_offset: 0,
    coefficients: &[1.0, -4.0, 3.0],
    dx_coefficient: 2.0,
};

const UPWIND3: Stencil = Stencil {
    min_offset: -2,
    max_offset: 1,
    coefficients: &[1.0, -6.0, 3.0, 2.0],
    dx_coefficient: 6.0,
};

const UPWIND5: Stencil = Stencil {
    min_offset: -3,
    max_offset: 2,
    coefficients: &[-2.0, 15.0, -60.0, 20.0, 30.0, -3.0],
    dx_coefficient: 60.0,
};

const CD2: Stencil = Stencil {
    min_offset: -1,
    max_offset: 1,
    coefficients: &[-1.0, 0.0, 1.0],
    dx_coefficient: 2.0,
};

const CD4: Stencil = Stencil {
    min_offset: -2,
    max_offset: 2,
    coefficients: &[1.0, -8.0, 0.0, 8.0, -1.0],
    dx_coefficient: 12.0,
};

const CD6: Stencil = Stencil {
    min_offset: -3,
    max_offset: 3,
    coefficients: &[-1.0, 9.0, -45.0, 0.0, 45.0, -9.0, 1.0],
    dx_coefficient: 60.0,
};

/// Named spatial discretisation schemes
///
/// Parsed from the same string keys used on the command line and in
/// configurations (`"Forward"`, `"Upwind3"`, `"CD6"`, ...). Unknown names are
/// rejected with `InvalidConfiguration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceScheme {
    Forward,
    Backward,
    Upwind2,
    Upwind3,
    Upwind5,
    CD2,
    CD4,
    CD6,
}

impl SpaceScheme {
    /// Every registered scheme, lowest order first within each family
    pub const ALL: [SpaceScheme; 8] = [
        SpaceScheme::Forward,
        SpaceScheme::Backward,
        SpaceScheme::Upwind2,
        SpaceScheme::Upwind3,
        SpaceScheme::Upwind5,
        SpaceScheme::CD2,
        SpaceScheme::CD4,
        SpaceScheme::CD6,
    ];

    /// Registry key
    pub fn name(&self) -> &'static str {
        match self {
            SpaceScheme::Forward => "Forward",
            SpaceScheme::Backward => "Backward",
            SpaceScheme::Upwind2 => "Upwind2",
            SpaceScheme::Upwind3 => "Upwind3",
            SpaceScheme::Upwind5 => "Upwind5",
            SpaceScheme::CD2 => "CD2",
            SpaceScheme::CD4 => "CD4",
            SpaceScheme::CD6 => "CD6",
        }
    }

    /// Coefficient table for this scheme
    pub fn stencil(&self) -> &'static Stencil {
        match self {
            SpaceScheme::Forward => &FORWARD,
            SpaceScheme::Backward => &BACKWARD,
            SpaceScheme::Upwind2 => &UPWIND2,
            SpaceScheme::Upwind3 => &UPWIND3,
            SpaceScheme::Upwind5 => &UPWIND5,
            SpaceScheme::CD2 => &CD2,
            SpaceScheme::CD4 => &CD4,
            SpaceScheme::CD6 => &CD6,
        }
    }

    /// Nominal order of accuracy
    pub fn order(&self) -> usize {
        match self {
            SpaceScheme::Forward | SpaceScheme::Backward => 1,
            SpaceScheme::Upwind2 | SpaceScheme::CD2 => 2,
            SpaceScheme::Upwind3 => 3,
            SpaceScheme::CD4 => 4,
            SpaceScheme::Upwind5 => 5,
            SpaceScheme::CD6 => 6,
        }
    }

    /// Look a scheme up by registry key
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                TransportError::unknown_scheme("space derivative scheme", name, &known)
            })
    }

    /// Apply this scheme to `u`
    pub fn apply(&self, u: &DVector<f64>, grid: &Grid) -> DVector<f64> {
        apply_stencil(u, grid, self.stencil())
    }
}

impl FromStr for SpaceScheme {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for SpaceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Evaluation
// =================================================================================================

/// Approximate dU/dx with `stencil` on `grid`
///
/// Returns a vector of the same length as `u`. Nodes where the window does
/// not fit are left at zero.
///
/// With the `parallel` feature, grids above
/// [`parallel_threshold()`](crate::solver::parallel_threshold) nodes are
/// evaluated with rayon. Each node is accumulated in the same order either
/// way, so both paths give identical bits.
pub fn apply_stencil(u: &DVector<f64>, grid: &Grid, stencil: &Stencil) -> DVector<f64> {
    let n = u.len();
    let mut dudx = DVector::zeros(n);
    let range = stencil.valid_range(n);
    if range.is_empty() {
        return dudx;
    }

    let values = u.as_slice();
    let divisor = stencil.dx_coefficient * grid.dx();

    let node = |i: usize| -> f64 {
        let first = (i as isize + stencil.min_offset) as usize;
        let mut acc = 0.0;
        for (j, coefficient) in stencil.coefficients.iter().enumerate() {
            acc += coefficient * values[first + j];
        }
        acc / divisor
    };

    let start = range.start;
    let slots = &mut dudx.as_mut_slice()[range];

    #[cfg(feature = "parallel")]
    {
        if n > crate::solver::parallel_threshold() {
            slots
                .par_iter_mut()
                .enumerate()
                .for_each(|(offset, slot)| *slot = node(start + offset));
            return dudx;
        }
    }

    slots
        .iter_mut()
        .enumerate()
        .for_each(|(offset, slot)| *slot = node(start + offset));

    dudx
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn max_interior_error(scheme: SpaceScheme, points: usize) -> f64 {
        let grid = Grid::new(0.0, 1.0, points).unwrap();
        let two_pi = 2.0 * std::f64::consts::PI;
        let u = grid.map_nodes(|x| (two_pi * x).sin());
        let exact = grid.map_nodes(|x| two_pi * (two_pi * x).cos());
        let dudx = scheme.apply(&u, &grid);

        // Skip three nodes on each side: the widest window is (-3, 3)
        (3..points - 3)
            .map(|i| (dudx[i] - exact[i]).abs())
            .fold(0.0, f64::max)
    }

    // ====== Registry tests ======

    #[test]
    fn test_registry_tables_are_consistent() {
        for scheme in SpaceScheme::ALL {
            let stencil = scheme.stencil();
            assert!(stencil.validate().is_ok(), "{} is malformed", scheme);

            // Coefficients of a derivative stencil sum to zero
            let sum: f64 = stencil.coefficients.iter().sum();
            assert_eq!(sum, 0.0, "{} does not annihilate constants", scheme);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        for scheme in SpaceScheme::ALL {
            assert_eq!(SpaceScheme::from_name(scheme.name()).unwrap(), scheme);
            assert_eq!(scheme.to_string().parse::<SpaceScheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid_configuration() {
        let result = "CD8".parse::<SpaceScheme>();
        assert!(matches!(
            result,
            Err(TransportError::InvalidConfiguration(_))
        ));

        // Keys are case-sensitive
        assert!(SpaceScheme::from_name("cd4").is_err());
        assert!(SpaceScheme::from_name("").is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_coefficient_count() {
        let broken = Stencil {
            min_offset: -1,
            max_offset: 1,
            coefficients: &[-1.0, 1.0],
            dx_coefficient: 2.0,
        };
        assert!(broken.validate().is_err());
    }

    // ====== Evaluation tests ======

    #[test]
    fn test_valid_range() {
        assert_eq!(CD6.valid_range(10), 3..7);
        assert_eq!(FORWARD.valid_range(10), 0..9);
        assert_eq!(BACKWARD.valid_range(10), 1..10);
        assert_eq!(UPWIND5.valid_range(10), 3..8);
        // Window wider than the grid
        assert!(CD6.valid_range(5).is_empty());
    }

    #[test]
    fn test_edges_are_left_at_zero() {
        let grid = Grid::new(0.0, 1.0, 21).unwrap();
        let u = grid.map_nodes(|x| x * x + 1.0);

        let dudx = SpaceScheme::CD6.apply(&u, &grid);
        for i in [0, 1, 2, 18, 19, 20] {
            assert_eq!(dudx[i], 0.0);
        }

        let dudx = SpaceScheme::Forward.apply(&u, &grid);
        assert_eq!(dudx[20], 0.0);
        assert!(dudx[0] > 0.0);
    }

    #[test]
    fn test_too_small_grid_gives_zeros() {
        let grid = Grid::new(0.0, 1.0, 4).unwrap();
        let u = grid.map_nodes(|x| x);
        let dudx = SpaceScheme::CD6.apply(&u, &grid);

        assert_eq!(dudx.len(), 4);
        assert!(dudx.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_forward_matches_hand_computation() {
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        let u = DVector::from_vec(vec![0.0, 1.0, 4.0, 9.0, 16.0]);
        let dudx = SpaceScheme::Forward.apply(&u, &grid);

        // (U[i+1] - U[i]) / 0.25
        assert_eq!(dudx.as_slice(), &[4.0, 12.0, 20.0, 28.0, 0.0]);
    }

    #[test]
    fn test_exact_on_linear_functions() {
        let grid = Grid::new(-1.0, 2.0, 31).unwrap();
        let u = grid.map_nodes(|x| 4.0 * x - 7.0);

        for scheme in SpaceScheme::ALL {
            let stencil = scheme.stencil();
            let dudx = scheme.apply(&u, &grid);
            for i in stencil.valid_range(grid.len()) {
                assert!(
                    (dudx[i] - 4.0).abs() < 1e-11,
                    "{} at node {}: {}",
                    scheme,
                    i,
                    dudx[i]
                );
            }
        }
    }

    #[test]
    fn test_declared_order_of_accuracy() {
        for scheme in SpaceScheme::ALL {
            let coarse = max_interior_error(scheme, 41);
            let fine = max_interior_error(scheme, 81);
            let observed = (coarse / fine).log2();
            let expected = scheme.order() as f64;

            assert!(
                (observed - expected).abs() < 0.3,
                "{}: observed order {:.3}, expected {}",
                scheme,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_input_is_not_modified() {
        let grid = Grid::new(0.0, 1.0, 11).unwrap();
        let u = grid.map_nodes(|x| x.exp());
        let before = u.clone();

        let _ = SpaceScheme::Upwind3.apply(&u, &grid);
        assert_eq!(u, before);
    }
}
