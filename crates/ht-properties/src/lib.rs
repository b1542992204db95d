//! ht-properties: Arrhenius-law transport properties of hydrogen isotopes.
//!
//! Provides:
//! - `ArrheniusProperty`, one record for diffusivity, solubility,
//!   permeability, and surface dissociation/recombination coefficients
//! - Unit contracts per kind, with Henry/Sievert law inference
//! - Log-linear regression of coefficients from experimental data
//! - Derived quantities (`D * S = P` and its inverses)
//! - `PropertiesGroup` filtering and aggregation
//!
//! # Example
//!
//! ```
//! use ht_core::Coefficient;
//! use ht_core::units::{ev, k};
//! use ht_properties::ArrheniusProperty;
//!
//! let d = ArrheniusProperty::diffusivity(Coefficient::parse(1e-7, "m^2/s").unwrap(), ev(0.3)).unwrap();
//! let s = ArrheniusProperty::solubility(
//!     Coefficient::parse(0.5, "mol m^-3 Pa^-0.5").unwrap(),
//!     ev(0.2),
//! )
//! .unwrap();
//! let p = (&d * &s).unwrap();
//! println!("{}", p.value(k(600.0)).unwrap());
//! ```

pub mod algebra;
pub mod arrhenius;
pub mod error;
pub mod group;
pub mod kind;
pub mod material;
pub mod provenance;
pub mod query;
pub mod regression;

pub use algebra::{Operation, combine, derived_kind};
pub use arrhenius::{
    ArrheniusBuilder, ArrheniusCoefficients, ArrheniusProperty, Coefficients, Resolved,
};
pub use error::{FitError, PropertyError, PropertyResult};
pub use group::{GroupUnits, PropertiesGroup};
pub use kind::{KindSpec, Law, PressureRule, PropertyKind};
pub use material::{Material, MaterialTag};
pub use provenance::{Isotope, Provenance, TemperatureRange};
pub use query::{Field, FieldValue, Predicate, Query};
pub use regression::{ArrheniusFit, ExperimentalData, MIN_FIT_POINTS, fit_arrhenius};
