//! Uniform one-dimensional grid
//!
//! The grid is the only spatial information the solver needs: the node
//! coordinates (to sample initial conditions and exact solutions) and the
//! spacing `dx` (for the stencils and the step-size controller).
//!
//! ```text
//!  left                                              right
//!   x₀ ──── x₁ ──── x₂ ──── ... ──── x_{N-2} ──── x_{N-1}
//!   |<- dx ->|
//!
//!   dx = (right - left) / (N - 1)
//! ```
//!
//! # Refinement
//!
//! [`Grid::refine`] inserts one node in the middle of every cell, giving
//! `2N - 1` nodes over the same bounds. Every node of the coarse grid is
//! also a node of the refined one, which is what convergence studies rely on.
//!
//! # Example
//!
//! ```rust
//! use transport_rs::grid::Grid;
//!
//! let grid = Grid::new(0.0, 1.0, 5)?;
//! assert_eq!(grid.len(), 5);
//! assert!((grid.dx() - 0.25).abs() < 1e-15);
//!
//! let fine = grid.refine()?;
//! assert_eq!(fine.len(), 9);
//! # Ok::<(), transport_rs::TransportError>(())
//! ```

use nalgebra::DVector;

use crate::error::{Result, TransportError};

/// Immutable uniform grid on `[left, right]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    left: f64,
    right: f64,
    nodes: DVector<f64>,
    dx: f64,
}

impl Grid {
    /// Create a uniform grid with `points` nodes.
    ///
    /// # Errors
    ///
    /// `InvalidGrid` when `points < 2`, a bound is not finite, or
    /// `right <= left`.
    pub fn new(left: f64, right: f64, points: usize) -> Result<Self> {
        if points < 2 {
            return Err(TransportError::InvalidGrid(format!(
                "need at least 2 nodes, got {}",
                points
            )));
        }
        if !left.is_finite() || !right.is_finite() {
            return Err(TransportError::InvalidGrid(format!(
                "bounds must be finite, got [{}, {}]",
                left, right
            )));
        }
        if right <= left {
            return Err(TransportError::InvalidGrid(format!(
                "right bound {} must be greater than left bound {}",
                right, left
            )));
        }

        let dx = (right - left) / (points - 1) as f64;

        // Last node pinned to the right bound so that rounding in i*dx
        // never moves the domain end.
        let nodes = DVector::from_fn(points, |i, _| {
            if i == points - 1 {
                right
            } else {
                left + i as f64 * dx
            }
        });

        Ok(Self {
            left,
            right,
            nodes,
            dx,
        })
    }

    /// Grid with twice the resolution: `2N - 1` nodes over the same bounds.
    pub fn refine(&self) -> Result<Self> {
        Self::new(self.left, self.right, 2 * self.len() - 1)
    }

    /// Alias of [`Grid::refine`].
    pub fn get_twice_grid(&self) -> Result<Self> {
        self.refine()
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    /// Domain length `right - left`.
    pub fn length(&self) -> f64 {
        self.right - self.left
    }

    /// Node spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Number of nodes N.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a grid holds at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node coordinates, ascending.
    pub fn nodes(&self) -> &DVector<f64> {
        &self.nodes
    }

    /// Evaluate `f` at every node.
    pub fn map_nodes<F>(&self, f: F) -> DVector<f64>
    where
        F: Fn(f64) -> f64,
    {
        self.nodes.map(f)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(0.0, 1.0, 11).unwrap();

        assert_eq!(grid.len(), 11);
        assert!((grid.dx() - 0.1).abs() < 1e-15);
        assert_eq!(grid.nodes()[0], 0.0);
        assert_eq!(grid.nodes()[10], 1.0);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_nodes_are_ascending_and_uniform() {
        let grid = Grid::new(-2.0, 3.0, 51).unwrap();

        for i in 1..grid.len() {
            let step = grid.nodes()[i] - grid.nodes()[i - 1];
            assert!(step > 0.0);
            assert!((step - grid.dx()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_refinement_doubles_resolution() {
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        let twice = grid.get_twice_grid().unwrap();

        assert_eq!(twice.len(), 9);
        assert_eq!(twice.left(), grid.left());
        assert_eq!(twice.right(), grid.right());
        assert_eq!(twice.dx(), grid.dx() / 2.0);
    }

    #[test]
    fn test_refined_grid_contains_coarse_nodes() {
        let grid = Grid::new(0.0, 2.0, 21).unwrap();
        let fine = grid.refine().unwrap();

        for i in 0..grid.len() {
            assert!((grid.nodes()[i] - fine.nodes()[2 * i]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_rejects_too_few_points() {
        assert!(matches!(
            Grid::new(0.0, 1.0, 1),
            Err(TransportError::InvalidGrid(_))
        ));
        assert!(Grid::new(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_rejects_inverted_or_degenerate_bounds() {
        assert!(Grid::new(1.0, 0.0, 10).is_err());
        assert!(Grid::new(1.0, 1.0, 10).is_err());
        assert!(Grid::new(f64::NAN, 1.0, 10).is_err());
        assert!(Grid::new(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_map_nodes() {
        let grid = Grid::new(0.0, 1.0, 3).unwrap();
        let values = grid.map_nodes(|x| 2.0 * x);

        assert_eq!(values.as_slice(), &[0.0, 1.0, 2.0]);
    }
}
