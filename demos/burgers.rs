//! Inviscid Burgers: Steepening Towards a Shock
//!
//! dU/dt + U·dU/dx = 0,    U(x, 0) = sin(πx) on [0, 2]
//!
//! The profile steepens until the characteristics cross at t_b = 1/π.
//! Before t_b every scheme pair agrees; after it, central stencils ring
//! while upwind stencils smear.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example burgers
//! ```

use std::error::Error;
use std::fs;

use transport_rs::{
    grid::Grid,
    models::{InitialProfile, InviscidBurgers},
    output::{PlotConfig, plot_profiles_comparison},
    solver::{MethodOfLinesSolver, Scenario, Solver, SolverConfiguration},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Inviscid Burgers, U₀ = sin(πx) ===\n");

    let grid = Grid::new(0.0, 2.0, 401)?;
    let problem = InviscidBurgers::new(InitialProfile::sine(1.0, 2.0, 0.0));

    let breaking_time = problem
        .breaking_time(&grid)
        .ok_or("sine profile must break")?;
    println!("Estimated breaking time: {:.5} (1/π = {:.5})\n", breaking_time, 1.0 / std::f64::consts::PI);

    let scenario = Scenario::new(Box::new(problem), grid);
    let solver = MethodOfLinesSolver::with_report_interval(50);

    fs::create_dir_all("output")?;

    for (tag, fraction) in [("before", 0.8), ("after", 1.5)] {
        let final_time = fraction * breaking_time;
        let mut finals = Vec::new();

        for (time_scheme, space_scheme) in [("Hoin", "Upwind3"), ("RK-6", "CD4"), ("RK-7", "CD6")] {
            let config =
                SolverConfiguration::from_names(0.2, final_time, 100_000, time_scheme, space_scheme)?;
            let result = solver.solve(&scenario, &config)?;

            let total_variation: f64 = result
                .final_state
                .as_slice()
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).abs())
                .sum();

            println!(
                "t = {:.4} ({}) {:>16}: max U = {:.4}, total variation = {:.4}",
                final_time,
                tag,
                format!("{} + {}", time_scheme, space_scheme),
                result.final_state.max(),
                total_variation
            );
            finals.push((format!("{} + {}", time_scheme, space_scheme), result));
        }

        let x = finals[0].1.grid.nodes().as_slice();
        let profiles: Vec<(&str, &[f64])> = finals
            .iter()
            .map(|(label, result)| (label.as_str(), result.final_state.as_slice()))
            .collect();

        let config = PlotConfig::profile(format!("Burgers at t = {:.3}", final_time));
        plot_profiles_comparison(x, &profiles, &format!("output/burgers_{}.png", tag), Some(&config))?;
        println!();
    }

    println!("✓ Plots written to output/");

    Ok(())
}
