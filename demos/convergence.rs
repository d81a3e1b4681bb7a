//! Convergence Table for Every Scheme Pair
//!
//! Refines the grid four times for the Gaussian pulse (Cu = 0.25, T = 0.5)
//! and prints the max-norm error and observed order for each combination
//! of time and space scheme that is stable at this Courant number.
//!
//! ```bash
//! cargo run --release --example convergence
//! cargo run --release --example convergence --features parallel
//! ```

use std::error::Error;

use transport_rs::{
    analysis::ConvergenceStudy,
    grid::Grid,
    models::LinearTransport,
    solver::{SolverConfiguration, SpaceScheme, TimeScheme},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let problem = LinearTransport::gaussian_pulse(1.0, 0.5, 0.1);
    let coarsest = Grid::new(0.0, 2.0, 51)?;

    for time_scheme in TimeScheme::ALL {
        for space_scheme in SpaceScheme::ALL {
            // forward differences blow up for a > 0; the Euler schemes only
            // tolerate the first-order upwind stencil
            let unstable = space_scheme == SpaceScheme::Forward
                || (matches!(time_scheme, TimeScheme::Euler1 | TimeScheme::Euler2)
                    && space_scheme != SpaceScheme::Backward);
            if unstable {
                continue;
            }

            let config = SolverConfiguration::new(0.25, 0.5, 100_000, time_scheme, space_scheme);
            let study = ConvergenceStudy::run(&problem, &coarsest, 4, &config)?;

            println!("=== {} + {} ===", time_scheme, space_scheme);
            println!("{}", study);
        }
    }

    Ok(())
}
