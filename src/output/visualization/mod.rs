//! Plots of simulation results, drawn with `plotters`
//!
//! - **config**: shared [`PlotConfig`]
//! - **profile**: U(x) profiles and the step-size history
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Initial, final and exact profile of one run | [`plot_profile`] |
//! | Several profiles on the same nodes | [`plot_profiles_comparison`] |
//! | dt chosen by the CFL controller | [`plot_time_steps`] |
//!
//! ```rust,ignore
//! use transport_rs::output::visualization::{PlotConfig, plot_profile};
//!
//! let config = PlotConfig::profile("Gaussian pulse");
//! plot_profile(&result, exact.as_ref(), "pulse.svg", Some(&config))?;
//! ```

pub mod config;
pub mod profile;

pub use config::{IntoOptionalTitle, NO_TITLE, PlotConfig};
pub use profile::{plot_profile, plot_profiles_comparison, plot_time_steps};
