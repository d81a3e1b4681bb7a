//! Gaussian Pulse under Linear Transport
//!
//! dU/dt + a·dU/dx = 0,    U(x, 0) = exp(-((x - 0.5)/0.1)²),    a = 1
//!
//! Solves the same pulse with four scheme pairs, prints their errors against
//! the exact solution U₀(x - a·t), then plots and exports the best one.
//!
//! ```bash
//! RUST_LOG=info cargo run --example gaussian_pulse
//! ```

use std::error::Error;
use std::fs;
use std::path::Path;

use transport_rs::{
    analysis::ErrorNorms,
    grid::Grid,
    models::LinearTransport,
    output::{
        CsvConfig, CsvExporter, Exporter, PlotConfig, plot_profile, plot_profiles_comparison,
        plot_time_steps,
    },
    physics::TransportProblem,
    solver::{MethodOfLinesSolver, Scenario, Solver, SolverConfiguration},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Gaussian pulse, a = 1 ===\n");

    // Physical parameters
    let speed = 1.0;
    let center = 0.5;
    let width = 0.1;

    // Simulation parameters
    let points = 201;
    let courant = 0.25;
    let final_time = 0.5;

    let scenario = Scenario::new(
        Box::new(LinearTransport::gaussian_pulse(speed, center, width)),
        Grid::new(0.0, 2.0, points)?,
    );
    println!("{:?}\n", scenario);

    let pairs = [
        ("Euler-1", "Backward"),
        ("Hoin", "Upwind2"),
        ("Hoin", "Upwind3"),
        ("RK-6", "CD4"),
    ];

    let solver = MethodOfLinesSolver::new();
    let mut runs = Vec::new();

    println!("{:<22} {:>8} {:>12} {:>12}", "schemes", "steps", "max error", "L2 error");
    for (time_scheme, space_scheme) in pairs {
        let config =
            SolverConfiguration::from_names(courant, final_time, 100_000, time_scheme, space_scheme)?;
        let result = solver.solve(&scenario, &config)?;

        let exact = scenario
            .problem
            .exact_solution(&result.grid, result.elapsed_time())
            .ok_or("linear transport has an exact solution")?;
        let errors = ErrorNorms::between(&result.final_state, &exact, &result.grid)?;

        println!(
            "{:<22} {:>8} {:>12.3e} {:>12.3e}",
            format!("{} + {}", time_scheme, space_scheme),
            result.iterations(),
            errors.max,
            errors.l2
        );
        runs.push((format!("{} + {}", time_scheme, space_scheme), result, exact));
    }

    // ====== Output ======

    fs::create_dir_all("output")?;

    let (label, best, exact) = runs.last().ok_or("no runs")?;
    let config = PlotConfig::profile(format!("Gaussian pulse, {}", label));
    plot_profile(best, Some(exact), "output/gaussian_pulse.png", Some(&config))?;
    plot_time_steps(best, "output/gaussian_pulse_steps.svg", None)?;

    let x = best.grid.nodes().as_slice();
    let profiles: Vec<(&str, &[f64])> = runs
        .iter()
        .map(|(label, result, _)| (label.as_str(), result.final_state.as_slice()))
        .chain(std::iter::once(("exact", exact.as_slice())))
        .collect();
    let config = PlotConfig::profile("Scheme comparison at t = 0.5");
    plot_profiles_comparison(x, &profiles, "output/gaussian_pulse_schemes.png", Some(&config))?;

    let exporter = CsvExporter::new(CsvConfig {
        include_metadata: true,
        ..Default::default()
    });
    exporter.export_profile(best, Some(exact), Path::new("output/gaussian_pulse.csv"))?;
    exporter.export_time_steps(best, Path::new("output/gaussian_pulse_steps.csv"))?;

    println!("\n✓ Plots and CSV files written to output/");

    Ok(())
}
