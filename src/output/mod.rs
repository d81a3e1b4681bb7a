//! Getting results out of the solver
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV files for external analysis
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← plots
//! │   ├── config.rs
//! │   └── profile.rs
//! └── export/             ← data files
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use transport_rs::output::{CsvConfig, export_profile_csv, plot_profile};
//!
//! plot_profile(&result, exact.as_ref(), "profile.png", None)?;
//! export_profile_csv(&result, exact.as_ref(), "profile.csv", Some(&CsvConfig::default()))?;
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{PlotConfig, plot_profile, plot_profiles_comparison, plot_time_steps};

pub use export::{
    CsvConfig, CsvExporter, Exporter, export_columns_csv, export_profile_csv,
    export_time_steps_csv,
};
