//! Ready-made transport problems
//!
//! All problems implement the [`TransportProblem`](crate::physics::TransportProblem)
//! trait. Problems supply the equation, the solver does the discretisation
//! and time integration.
//!
//! # Available Problems
//!
//! ## [`LinearTransport`]: constant speed, optional decay
//!
//! The reference problem: known exact solution `U₀(x - a·t)·exp(-k·t)`, used
//! for convergence studies and scheme comparisons.
//!
//! ## [`InviscidBurgers`]: speed = U
//!
//! Nonlinear, steepens into a shock. Useful to watch how each stencil
//! behaves near wave breaking.
//!
//! # Initial Data
//!
//! Both problems take an [`InitialProfile`] describing U₀(x).

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod burgers;
pub mod linear;
pub mod profiles;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use burgers::InviscidBurgers;
pub use linear::LinearTransport;
pub use profiles::InitialProfile;
