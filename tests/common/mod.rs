//! Common utilities for integration tests

#![allow(dead_code)]

pub mod problems;
pub mod test_helpers;

pub use problems::{ConstantGrowth, calibration_pulse, exponential_decay};
pub use test_helpers::{assert_states_close, max_error, relative_error, run_pulse};
