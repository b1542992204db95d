//! ht-core: stable foundation for hydrotrans.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - dimension (runtime coefficient units with half-integer exponents)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod dimension;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use dimension::{Coefficient, Dimension, Exponent, Unit};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
