//! Courant-number step-size controller
//!
//! ```text
//! dt = Cu · dx,   clamped so that t + dt never passes the end time
//! ```
//!
//! The controller looks neither at the solution nor at the transport
//! speed: keeping `|a|·dt/dx` inside the stability region of the chosen
//! scheme is up to whoever picks the Courant number.

use crate::grid::Grid;

/// Time increment for the next step
///
/// Returns `courant_number * grid.dx()`, or the remaining time
/// `total_time - current_time` when the full step would overshoot.
/// Positive whenever `current_time < total_time` and `courant_number > 0`.
///
/// # Example
///
/// ```rust
/// use transport_rs::grid::Grid;
/// use transport_rs::solver::step_control::next_dt;
///
/// let grid = Grid::new(0.0, 1.0, 101)?;
/// assert_eq!(next_dt(0.0, 10.0, &grid, 0.5), 0.005);
/// # Ok::<(), transport_rs::TransportError>(())
/// ```
pub fn next_dt(current_time: f64, total_time: f64, grid: &Grid, courant_number: f64) -> f64 {
    let dt = grid.dx() * courant_number;
    if current_time + dt > total_time {
        total_time - current_time
    } else {
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_step() {
        let grid = Grid::new(0.0, 1.0, 101).unwrap();
        assert_eq!(next_dt(0.0, 10.0, &grid, 0.5), 0.005);
    }

    #[test]
    fn test_clamped_to_remaining_time() {
        // Raw step 0.2 would overshoot the end by 0.1
        let grid = Grid::new(0.0, 1.0, 6).unwrap();
        let dt = next_dt(0.9, 1.0, &grid, 1.0);

        assert!((dt - 0.1).abs() < 1e-12);
        assert!(dt < grid.dx());
    }

    #[test]
    fn test_step_that_lands_on_the_end_is_not_clamped() {
        let grid = Grid::new(0.0, 1.0, 5).unwrap();
        // 0.5 + 0.25 == 0.75 exactly
        assert_eq!(next_dt(0.5, 0.75, &grid, 1.0), 0.25);
    }

    #[test]
    fn test_positive_while_time_remains() {
        let grid = Grid::new(0.0, 2.0, 201).unwrap();
        let total = 0.37;
        let mut t = 0.0;
        let mut steps = 0;

        while t < total {
            let dt = next_dt(t, total, &grid, 0.3);
            assert!(dt > 0.0);
            t += dt;
            steps += 1;
        }

        assert!((t - total).abs() < 1e-12);
        assert!(steps >= 123);
    }
}
