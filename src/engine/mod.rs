//! Pure computation engine for the looping calculator.
//!
//! Everything here is synchronous and stateless: identical inputs give
//! bit-identical outputs.

pub mod closer;
pub mod equilibrium;
pub mod opener;
pub mod solver;
pub mod sweep;
pub mod threshold;

pub use closer::close;
pub use opener::{open, open_with_mode};
pub use solver::{Root, SolverSettings};
pub use sweep::{sweep, Sweep, SweepPoint};
pub use threshold::{break_even, total_loss, RoiCurve, Threshold};
