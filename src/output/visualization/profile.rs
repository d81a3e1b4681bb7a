//! Solution profiles and step-size history
//!
//! The backend is chosen from the file extension: `.svg` gives an SVG file,
//! anything else a bitmap (PNG by default).
//!
//! ```rust,ignore
//! use transport_rs::output::visualization::{plot_profile, plot_time_steps};
//!
//! let result = solver.solve(&scenario, &config)?;
//! let exact = scenario.problem.exact_solution(&result.grid, result.elapsed_time());
//!
//! plot_profile(&result, exact.as_ref(), "profile.png", None)?;
//! plot_time_steps(&result, "steps.svg", None)?;
//! ```

use nalgebra::DVector;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;

use super::config::{NO_TITLE, PlotConfig};
use crate::solver::SimulationResult;

/// One curve: legend label and (x, y) points
type Series = (String, Vec<(f64, f64)>);

// =================================================================================================
// Public Plotting Functions
// =================================================================================================

/// Plot U(x) at t = 0 and at the final time, plus the reference if given
///
/// # Errors
///
/// Fails when `exact` does not have one value per node, or when the
/// backend cannot draw or write the file.
pub fn plot_profile(
    result: &SimulationResult,
    exact: Option<&DVector<f64>>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let x = result.grid.nodes().as_slice();

    let mut series: Vec<Series> = vec![
        ("t = 0".to_string(), zip_points(x, result.initial_state.as_slice())),
        (
            format!("t = {:.4}", result.elapsed_time()),
            zip_points(x, result.final_state.as_slice()),
        ),
    ];

    if let Some(reference) = exact {
        if reference.len() != x.len() {
            return Err(format!(
                "reference has {} values for {} nodes",
                reference.len(),
                x.len()
            )
            .into());
        }
        series.push(("exact".to_string(), zip_points(x, reference.as_slice())));
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    render(&series, output_path, config.unwrap_or(&default_config))
}

/// Overlay several profiles sampled on the same nodes
///
/// Handy for comparing schemes on one grid.
///
/// # Errors
///
/// Fails on an empty list, on a profile whose length differs from `x`, or
/// when the backend cannot draw.
pub fn plot_profiles_comparison(
    x: &[f64],
    profiles: &[(&str, &[f64])],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("No profiles provided".into());
    }

    let mut series: Vec<Series> = Vec::with_capacity(profiles.len());
    for (label, values) in profiles {
        if values.len() != x.len() {
            return Err(format!(
                "profile '{}' has {} values for {} nodes",
                label,
                values.len(),
                x.len()
            )
            .into());
        }
        series.push((label.to_string(), zip_points(x, values)));
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    render(&series, output_path, config.unwrap_or(&default_config))
}

/// Plot the dt chosen at every step against the time it reached
///
/// # Errors
///
/// Fails when the run took no step or the backend cannot draw.
pub fn plot_time_steps(
    result: &SimulationResult,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.dt_history.is_empty() {
        return Err("Run has no time steps".into());
    }

    let points: Vec<(f64, f64)> = result.time_points[1..]
        .iter()
        .copied()
        .zip(result.dt_history.iter().copied())
        .collect();

    let series = vec![("dt".to_string(), points)];

    let default_config = PlotConfig::time_steps(NO_TITLE);
    render(&series, output_path, config.unwrap_or(&default_config))
}

// =================================================================================================
// Rendering
// =================================================================================================

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

/// Axis range covering every point, padded by 5% so curves clear the frame
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (low, high) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !low.is_finite() {
        return 0.0..1.0;
    }

    let span = high - low;
    let pad = if span > 1e-12 { 0.05 * span } else { 0.5 * low.abs().max(1.0) };
    (low - pad)..(high + pad)
}

fn render(series: &[Series], output_path: &str, config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    let x_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let y_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_impl(backend, series, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_impl(backend, series, config, x_range, y_range)
        }
    }
}

fn render_impl<DB: DrawingBackend>(
    backend: DB,
    series: &[Series],
    config: &PlotConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.3}", x))
            .y_label_formatter(&|y| format!("{:.3e}", y))
            .draw()?;
    }

    for (index, (label, points)) in series.iter().enumerate() {
        let color = config.series_color(index);
        let style = color.stroke_width(config.line_width);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
