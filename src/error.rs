//! Error types
//!
//! Every fallible operation in the crate returns [`Result<T>`], an alias over
//! [`TransportError`].
//!
//! Conditions that are *not* errors:
//! - a run stopped by the iteration cap (see `SimulationResult::is_truncated`)
//! - zero derivatives left by a stencil at the grid edges
//! - non-finite values produced by an unstable Courant number

use thiserror::Error;

/// Errors raised while configuring or running a transport simulation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Unknown scheme name or out-of-range solver parameter.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Butcher tableau whose array lengths break the explicit layout.
    #[error("Malformed Butcher tableau '{name}': {reason}")]
    MalformedTableau { name: String, reason: String },

    /// Grid construction parameters violate the uniform grid invariants.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// A problem function returned a vector of the wrong length.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Result export failed before touching the file system.
    #[error("Export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Create an error for a scheme name missing from its registry.
    pub fn unknown_scheme(kind: &str, name: &str, known: &[&str]) -> Self {
        Self::InvalidConfiguration(format!(
            "unknown {} '{}' (expected one of: {})",
            kind,
            name,
            known.join(", ")
        ))
    }

    /// Create a malformed tableau error.
    pub fn malformed_tableau(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTableau {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TransportError>;
