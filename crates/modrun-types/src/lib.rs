//! Pure data types for modrun — values, parameter specs, result objects.
//!
//! This crate is a leaf dependency with no I/O and no process concerns.
//! It exists so that modules and embedders can work with modrun's type
//! system without pulling in the harness.

pub mod param;
pub mod result;
pub mod value;

// Flat re-exports for convenience
pub use param::*;
pub use result::*;
pub use value::*;
