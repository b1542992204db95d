//! Arrhenius-law transport properties.
//!
//! One concrete record covers every kind; the kind tag selects the unit
//! contract from the static table in [`crate::kind`]. Coefficients are either
//! supplied explicitly or recovered from experimental data. Data-backed
//! properties resolve lazily, exactly once, on first access.

use crate::error::{FitError, PropertyError, PropertyResult};
use crate::kind::{Law, PropertyKind};
use crate::material::Material;
use crate::provenance::{Isotope, Provenance, TemperatureRange};
use crate::regression::{ArrheniusFit, ExperimentalData, fit_arrhenius};
use ht_core::units::constants::BOLTZMANN_EV_PER_K;
use ht_core::units::{Energy, MolarEnergy, Temperature, ev_of, k, kelvin_of, per_particle};
use ht_core::{Coefficient, CoreError, Unit, ensure_finite, ensure_positive};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Resolved law coefficients. `pre_exp` is in the kind's declared unit;
/// `act_energy` is per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrheniusCoefficients {
    pub pre_exp: Coefficient,
    pub act_energy: Energy,
}

impl ArrheniusCoefficients {
    /// `A exp(-Ea / (kB T))` with `T` in Kelvin, in the unit of `pre_exp`.
    pub fn evaluate_kelvin(&self, t_k: f64) -> f64 {
        self.pre_exp.value * (-ev_of(self.act_energy) / (BOLTZMANN_EV_PER_K * t_k)).exp()
    }
}

/// How the coefficients of a property are known.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficients {
    /// Given directly.
    Explicit(ArrheniusCoefficients),
    /// To be recovered from measurements (values in the declared unit).
    Data(ExperimentalData),
}

/// Outcome of resolution, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub coefficients: ArrheniusCoefficients,
    pub fit: Option<ArrheniusFit>,
    pub range: Option<TemperatureRange>,
}

/// A thermally activated transport property `y(T) = A exp(-Ea / (kB T))`.
#[derive(Debug)]
pub struct ArrheniusProperty {
    kind: PropertyKind,
    law: Option<Law>,
    unit: Unit,
    provenance: Provenance,
    range: Option<TemperatureRange>,
    coefficients: Coefficients,
    /// Measurements kept alongside explicit coefficients, for display only.
    reference_data: Option<ExperimentalData>,
    resolved: OnceLock<Result<Resolved, FitError>>,
}

impl ArrheniusProperty {
    pub fn builder(kind: PropertyKind) -> ArrheniusBuilder {
        ArrheniusBuilder::new(kind)
    }

    /// Diffusivity from explicit coefficients.
    pub fn diffusivity(pre_exp: Coefficient, act_energy: Energy) -> PropertyResult<Self> {
        Self::builder(PropertyKind::Diffusivity)
            .pre_exp(pre_exp)
            .act_energy(act_energy)
            .build()
    }

    /// Solubility from explicit coefficients; the law follows from the unit.
    pub fn solubility(pre_exp: Coefficient, act_energy: Energy) -> PropertyResult<Self> {
        Self::builder(PropertyKind::Solubility)
            .pre_exp(pre_exp)
            .act_energy(act_energy)
            .build()
    }

    /// Permeability from explicit coefficients; the law follows from the unit.
    pub fn permeability(pre_exp: Coefficient, act_energy: Energy) -> PropertyResult<Self> {
        Self::builder(PropertyKind::Permeability)
            .pre_exp(pre_exp)
            .act_energy(act_energy)
            .build()
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Henry/Sievert law for solubility and permeability.
    pub fn law(&self) -> Option<Law> {
        self.law
    }

    /// Declared (canonical) unit of `pre_exp` and `value(T)`.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn material(&self) -> Option<&Material> {
        self.provenance.material.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.provenance.source.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.provenance.name.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.provenance.author.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.provenance.year
    }

    pub fn isotope(&self) -> Option<Isotope> {
        self.provenance.isotope
    }

    pub fn note(&self) -> Option<&str> {
        self.provenance.note.as_deref()
    }

    pub fn coefficient_source(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolve coefficients, fitting the data on first call. Later calls
    /// return the cached outcome, including a cached fit failure.
    pub fn resolve(&self) -> PropertyResult<&Resolved> {
        self.resolved
            .get_or_init(|| self.compute_resolution())
            .as_ref()
            .map_err(|e| PropertyError::Fit(e.clone()))
    }

    fn compute_resolution(&self) -> Result<Resolved, FitError> {
        match &self.coefficients {
            Coefficients::Explicit(c) => Ok(Resolved {
                coefficients: c.clone(),
                fit: None,
                range: self.range,
            }),
            Coefficients::Data(data) => {
                let fit = fit_arrhenius(data)?;
                let range = self.range.or_else(|| {
                    let (lo, hi) = fit.samples.span()?;
                    TemperatureRange::new(lo, hi).ok()
                });
                Ok(Resolved {
                    coefficients: ArrheniusCoefficients {
                        pre_exp: Coefficient::new(fit.pre_exp, self.unit.clone()),
                        act_energy: fit.act_energy,
                    },
                    fit: Some(fit),
                    range,
                })
            }
        }
    }

    pub fn coefficients(&self) -> PropertyResult<&ArrheniusCoefficients> {
        Ok(&self.resolve()?.coefficients)
    }

    pub fn pre_exp(&self) -> PropertyResult<&Coefficient> {
        Ok(&self.coefficients()?.pre_exp)
    }

    pub fn act_energy(&self) -> PropertyResult<Energy> {
        Ok(self.coefficients()?.act_energy)
    }

    /// The regression behind a data-backed property.
    pub fn fit(&self) -> PropertyResult<&ArrheniusFit> {
        self.resolve()?
            .fit
            .as_ref()
            .ok_or(PropertyError::Fit(FitError::NotDataBacked))
    }

    /// Validity range: the explicit one, else the span of the fitted data.
    ///
    /// `None` when no range was given and the data cannot be fitted.
    pub fn range(&self) -> Option<TemperatureRange> {
        match &self.coefficients {
            Coefficients::Explicit(_) => self.range,
            Coefficients::Data(_) => self.resolve().ok().and_then(|r| r.range),
        }
    }

    /// Whether `t` lies inside the validity range, `None` without one.
    pub fn covers(&self, t: Temperature) -> Option<bool> {
        self.range().map(|r| r.contains(t))
    }

    /// Experimental samples: the cleaned fit samples once a data-backed
    /// property is resolved, otherwise the data as supplied.
    pub fn data(&self) -> Option<&ExperimentalData> {
        match &self.coefficients {
            Coefficients::Data(raw) => match self.resolved.get() {
                Some(Ok(resolved)) => resolved.fit.as_ref().map(|f| &f.samples),
                _ => Some(raw),
            },
            Coefficients::Explicit(_) => self.reference_data.as_ref(),
        }
    }

    /// Evaluate the law at `t`, in the declared unit.
    pub fn value(&self, t: Temperature) -> PropertyResult<Coefficient> {
        let t_k = kelvin_of(t);
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "temperature must be finite and above 0 K",
            }
            .into());
        }
        let resolved = self.resolve()?;
        if let Some(range) = &resolved.range
            && !range.contains(t)
        {
            debug!(kind = %self.kind, t_k, %range, "evaluating outside the validity range");
        }
        let value = resolved.coefficients.evaluate_kelvin(t_k);
        Ok(Coefficient::new(value, self.unit.clone()))
    }

    /// Evaluate the law at a bare number. Fails unless the caller opts into
    /// reading it as Kelvin, which is logged.
    pub fn value_raw(&self, t: f64, assume_kelvin: bool) -> PropertyResult<Coefficient> {
        if !assume_kelvin {
            return Err(PropertyError::MissingTemperatureUnit);
        }
        warn!(t, "temperature given without unit; assuming Kelvin");
        self.value(k(t))
    }

    /// Evaluate on `n` evenly spaced temperatures from `low` to `high`.
    pub fn sample(
        &self,
        low: Temperature,
        high: Temperature,
        n: usize,
    ) -> PropertyResult<Vec<(Temperature, f64)>> {
        if n < 2 {
            return Err(CoreError::InvalidArg {
                what: "sample grid needs at least 2 points",
            }
            .into());
        }
        let (lo, hi) = (kelvin_of(low), kelvin_of(high));
        let step = (hi - lo) / (n - 1) as f64;
        (0..n)
            .map(|i| {
                let t = if i == n - 1 { high } else { k(lo + step * i as f64) };
                Ok((t, self.value(t)?.value))
            })
            .collect()
    }
}

impl fmt::Display for ArrheniusProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(law) = self.law {
            write!(f, " ({law})")?;
        }
        if let Some(m) = self.material() {
            write!(f, " in {m}")?;
        }
        if let Some(author) = self.author() {
            write!(f, ", {author}")?;
        }
        if let Some(year) = self.year() {
            write!(f, " ({year})")?;
        }
        match self.coefficients() {
            Ok(c) => write!(
                f,
                ": A = {}, Ea = {:.4} eV",
                c.pre_exp,
                ev_of(c.act_energy)
            )?,
            Err(e) => write!(f, ": unresolved ({e})")?,
        }
        if let Some(range) = self.range() {
            write!(f, ", {range}")?;
        }
        Ok(())
    }
}

/// A pre-exponential factor or data values, with an optional unit.
#[derive(Debug, Clone)]
struct Amplitude<T> {
    value: T,
    unit: Option<Unit>,
}

/// Builder for [`ArrheniusProperty`]; `build` enforces the kind's unit
/// contract and converts everything to the declared unit.
#[derive(Debug, Clone)]
pub struct ArrheniusBuilder {
    kind: PropertyKind,
    pre_exp: Option<Amplitude<f64>>,
    act_energy: Option<Energy>,
    data: Option<Amplitude<ExperimentalData>>,
    range: Option<(Temperature, Temperature)>,
    provenance: Provenance,
}

impl ArrheniusBuilder {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            pre_exp: None,
            act_energy: None,
            data: None,
            range: None,
            provenance: Provenance::default(),
        }
    }

    pub fn pre_exp(mut self, pre_exp: Coefficient) -> Self {
        self.pre_exp = Some(Amplitude {
            value: pre_exp.value,
            unit: Some(pre_exp.unit),
        });
        self
    }

    /// Pre-exponential factor without a unit. Only Diffusivity accepts this.
    pub fn pre_exp_unitless(mut self, value: f64) -> Self {
        self.pre_exp = Some(Amplitude { value, unit: None });
        self
    }

    /// Activation energy per particle.
    pub fn act_energy(mut self, act_energy: Energy) -> Self {
        self.act_energy = Some(act_energy);
        self
    }

    /// Activation energy per mole, converted to per particle.
    pub fn act_energy_molar(mut self, act_energy: MolarEnergy) -> Self {
        self.act_energy = Some(per_particle(act_energy));
        self
    }

    /// Measurements with values in `unit`.
    pub fn data(mut self, data: ExperimentalData, unit: Unit) -> Self {
        self.data = Some(Amplitude {
            value: data,
            unit: Some(unit),
        });
        self
    }

    /// Measurements without a unit. Only Diffusivity accepts this.
    pub fn data_unitless(mut self, data: ExperimentalData) -> Self {
        self.data = Some(Amplitude {
            value: data,
            unit: None,
        });
        self
    }

    pub fn range(mut self, low: Temperature, high: Temperature) -> Self {
        self.range = Some((low, high));
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn material(mut self, material: Arc<Material>) -> Self {
        self.provenance.material = Some(material);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.provenance.source = Some(source.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.provenance.name = Some(name.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.provenance.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.provenance.year = Some(year);
        self
    }

    pub fn isotope(mut self, isotope: Isotope) -> Self {
        self.provenance.isotope = Some(isotope);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.provenance.note = Some(note.into());
        self
    }

    pub fn build(self) -> PropertyResult<ArrheniusProperty> {
        let kind = self.kind;
        let has_explicit = match (&self.pre_exp, &self.act_energy) {
            (Some(_), Some(_)) => true,
            (None, None) => false,
            _ => {
                return Err(PropertyError::config(format!(
                    "{kind}: pre_exp and act_energy must be given together"
                )));
            }
        };
        if !has_explicit && self.data.is_none() {
            return Err(PropertyError::config(format!(
                "{kind}: neither explicit coefficients nor experimental data supplied"
            )));
        }

        // The explicit unit decides the law; data must agree with it.
        let supplied = self
            .pre_exp
            .as_ref()
            .map(|a| a.unit.clone())
            .or_else(|| self.data.as_ref().map(|d| d.unit.clone()))
            .flatten();
        let (law, unit) = match &supplied {
            Some(u) => {
                let law = kind.check_unit(u)?;
                (law, kind.declared_unit(law))
            }
            None => {
                if kind.spec().unit_mandatory {
                    return Err(PropertyError::config(format!(
                        "{kind} requires a dimensioned pre-exponential factor"
                    )));
                }
                let unit = kind.declared_unit(None);
                warn!(%kind, %unit, "pre-exponential factor has no unit; assuming declared unit");
                (None, unit)
            }
        };

        let to_declared = |u: &Option<Unit>| -> PropertyResult<f64> {
            match u {
                Some(u) => {
                    kind.check_unit(u)?;
                    if !u.is_compatible(&unit) {
                        return Err(PropertyError::config(format!(
                            "{kind}: expected dimension {}, got {} from '{u}'",
                            unit.dimension(),
                            u.dimension()
                        )));
                    }
                    Ok(u.conversion_factor(&unit)?)
                }
                None if kind.spec().unit_mandatory => Err(PropertyError::config(format!(
                    "{kind} requires dimensioned data values"
                ))),
                None => Ok(1.0),
            }
        };

        let data = match &self.data {
            Some(d) => Some(d.value.scaled(to_declared(&d.unit)?)),
            None => None,
        };

        let range = match self.range {
            Some((lo, hi)) => Some(TemperatureRange::new(lo, hi)?),
            None => None,
        };

        let (coefficients, reference_data) = match (self.pre_exp, self.act_energy) {
            (Some(a), Some(ea)) => {
                let value = ensure_positive(a.value * to_declared(&a.unit)?, "pre_exp")?;
                ensure_finite(ev_of(ea), "act_energy")?;
                let explicit = ArrheniusCoefficients {
                    pre_exp: Coefficient::new(value, unit.clone()),
                    act_energy: ea,
                };
                (Coefficients::Explicit(explicit), data)
            }
            _ => match data {
                Some(d) => (Coefficients::Data(d), None),
                None => {
                    return Err(PropertyError::config(format!(
                        "{kind}: no experimental data supplied"
                    )));
                }
            },
        };

        Ok(ArrheniusProperty {
            kind,
            law,
            unit,
            provenance: self.provenance,
            range,
            coefficients,
            reference_data,
            resolved: OnceLock::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::units::ev;
    use ht_core::units::constants::AVOGADRO;
    use ht_core::{Tolerances, nearly_equal};

    fn coef(value: f64, unit: &str) -> Coefficient {
        Coefficient::parse(value, unit).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        nearly_equal(a, b, Tolerances::relative(1e-9))
    }

    #[test]
    fn diffusivity_value_at_800k() {
        let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
        let v = d.value(k(800.0)).unwrap();
        let expected = 1e-7 * (-0.4 / (BOLTZMANN_EV_PER_K * 800.0)).exp();
        assert!(nearly_equal(v.value, expected, Tolerances::relative(1e-6)));
        // Agrees with the rounded constant to the precision it carries.
        let rounded = 1e-7 * (-0.4_f64 / (8.617e-5 * 800.0)).exp();
        assert!(nearly_equal(v.value, rounded, Tolerances::relative(1e-3)));
        assert_eq!(v.unit, Unit::parse("m^2/s").unwrap());
    }

    #[test]
    fn cgs_input_is_converted_to_declared_unit() {
        let d = ArrheniusProperty::diffusivity(coef(1e-3, "cm^2/s"), ev(0.2)).unwrap();
        assert!(close(d.pre_exp().unwrap().value, 1e-7));
        assert!(d.pre_exp().unwrap().unit.is_canonical());
    }

    #[test]
    fn solubility_law_from_unit() {
        let s = ArrheniusProperty::solubility(coef(0.5, "mol m^-3 Pa^-0.5"), ev(0.2)).unwrap();
        assert_eq!(s.law(), Some(Law::Sievert));
        assert!(close(s.pre_exp().unwrap().value, 0.5 * AVOGADRO));

        let h = ArrheniusProperty::solubility(coef(1e20, "particle m^-3 Pa^-1"), ev(0.1)).unwrap();
        assert_eq!(h.law(), Some(Law::Henry));
        assert_ne!(s.unit(), h.unit());
    }

    #[test]
    fn nothing_supplied_is_a_configuration_error() {
        let err = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .build()
            .unwrap_err();
        assert!(matches!(err, PropertyError::Configuration { .. }));
    }

    #[test]
    fn partial_coefficients_are_rejected() {
        let err = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("together"));
    }

    #[test]
    fn unit_mandatory_kinds_reject_bare_numbers() {
        for kind in [
            PropertyKind::Solubility,
            PropertyKind::Permeability,
            PropertyKind::DissociationCoeff,
            PropertyKind::RecombinationCoeff,
        ] {
            let err = ArrheniusProperty::builder(kind)
                .pre_exp_unitless(1.0)
                .act_energy(ev(0.1))
                .build()
                .unwrap_err();
            assert!(matches!(err, PropertyError::Configuration { .. }), "{kind}");

            let data = ExperimentalData::from_kelvin(&[400.0, 500.0], &[1.0, 2.0]).unwrap();
            let err = ArrheniusProperty::builder(kind)
                .data_unitless(data)
                .build()
                .unwrap_err();
            assert!(matches!(err, PropertyError::Configuration { .. }), "{kind}");
        }
    }

    #[test]
    fn unitless_diffusivity_assumes_declared_unit() {
        let d = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp_unitless(2e-7)
            .act_energy(ev(0.3))
            .build()
            .unwrap();
        assert_eq!(d.unit().to_string(), "m^2 s^-1");
        assert!(close(d.pre_exp().unwrap().value, 2e-7));
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let err = ArrheniusProperty::diffusivity(coef(1.0, "mol m^-3"), ev(0.1)).unwrap_err();
        assert!(err.to_string().contains("Diffusivity"));
    }

    #[test]
    fn data_with_other_law_is_a_configuration_error() {
        let data = ExperimentalData::from_kelvin(&[500.0, 700.0, 900.0], &[1.0, 2.0, 3.0]).unwrap();
        let err = ArrheniusProperty::builder(PropertyKind::Solubility)
            .pre_exp(coef(0.5, "mol m^-3 Pa^-0.5"))
            .act_energy(ev(0.2))
            .data(data, Unit::parse("mol m^-3 Pa^-1").unwrap())
            .build()
            .unwrap_err();
        let PropertyError::Configuration { what } = err else {
            panic!("expected a configuration error, got {err:?}");
        };
        assert!(what.contains("[pressure]^-0.5"), "{what}");
        assert!(what.contains("[pressure]^-1 "), "{what}");
    }

    #[test]
    fn non_positive_pre_exp_is_rejected() {
        for a in [0.0, -1e-7] {
            let err = ArrheniusProperty::diffusivity(coef(a, "m^2/s"), ev(0.2)).unwrap_err();
            assert_eq!(err, PropertyError::Core(CoreError::InvalidArg { what: "pre_exp" }));
        }
        let err = ArrheniusProperty::diffusivity(coef(f64::INFINITY, "m^2/s"), ev(0.2)).unwrap_err();
        assert!(matches!(err, PropertyError::Core(CoreError::NonFinite { .. })));
    }

    #[test]
    fn covers_reports_the_validity_range() {
        let bounded = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .act_energy(ev(0.4))
            .range(k(300.0), k(900.0))
            .build()
            .unwrap();
        assert_eq!(bounded.covers(k(600.0)), Some(true));
        assert_eq!(bounded.covers(k(1200.0)), Some(false));
        // Extrapolation still evaluates.
        assert!(bounded.value(k(1200.0)).is_ok());

        let open = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
        assert_eq!(open.covers(k(600.0)), None);
    }

    #[test]
    fn bad_range_is_rejected() {
        let err = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .act_energy(ev(0.2))
            .range(k(900.0), k(300.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, PropertyError::Configuration { .. }));
    }

    #[test]
    fn data_backed_property_fits_lazily_once() {
        let t = [400.0, 500.0, 600.0, 700.0];
        let y: Vec<f64> = t
            .iter()
            .map(|&tk| 3e-7 * (-0.25 / (BOLTZMANN_EV_PER_K * tk)).exp())
            .collect();
        let p = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .data(
                ExperimentalData::from_kelvin(&t, &y).unwrap(),
                Unit::parse("m^2/s").unwrap(),
            )
            .build()
            .unwrap();
        assert!(!p.is_resolved());
        let a1 = p.pre_exp().unwrap().value;
        assert!(p.is_resolved());
        let a2 = p.pre_exp().unwrap().value;
        assert_eq!(a1, a2);
        assert!(close(a1, 3e-7));
        assert!(close(ev_of(p.act_energy().unwrap()), 0.25));
        assert!(std::ptr::eq(p.fit().unwrap(), p.fit().unwrap()));
    }

    #[test]
    fn range_defaults_to_data_span_unless_overridden() {
        let data = ExperimentalData::from_kelvin(
            &[350.0, f64::NAN, 900.0, 600.0],
            &[1e-9, 5e-9, 1e-7, 2e-8],
        )
        .unwrap();
        let unit = Unit::parse("m^2/s").unwrap();
        let p = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .data(data.clone(), unit.clone())
            .build()
            .unwrap();
        let range = p.range().unwrap();
        assert_eq!(kelvin_of(range.low()), 350.0);
        assert_eq!(kelvin_of(range.high()), 900.0);
        assert_eq!(p.data().unwrap().len(), 3);

        let q = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .data(data, unit)
            .range(k(300.0), k(1000.0))
            .build()
            .unwrap();
        assert_eq!(kelvin_of(q.range().unwrap().high()), 1000.0);
    }

    #[test]
    fn data_values_are_converted() {
        let data = ExperimentalData::from_kelvin(&[500.0, 700.0], &[1.0, 2.0]).unwrap();
        let p = ArrheniusProperty::builder(PropertyKind::Solubility)
            .data(data, Unit::parse("mol m^-3 Pa^-0.5").unwrap())
            .build()
            .unwrap();
        assert_eq!(p.law(), Some(Law::Sievert));
        assert!(close(p.data().unwrap().values()[0], AVOGADRO));
    }

    #[test]
    fn fit_failure_surfaces_on_access() {
        let data = ExperimentalData::from_kelvin(&[500.0, f64::NAN], &[1.0, 2.0]).unwrap();
        let p = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .data(data, Unit::parse("m^2/s").unwrap())
            .build()
            .unwrap();
        assert!(matches!(
            p.pre_exp(),
            Err(PropertyError::Fit(FitError::InsufficientData { .. }))
        ));
        assert!(p.value(k(600.0)).is_err());
        assert!(p.range().is_none());
    }

    #[test]
    fn explicit_property_has_no_fit() {
        let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
        assert_eq!(
            d.fit().unwrap_err(),
            PropertyError::Fit(FitError::NotDataBacked)
        );
    }

    #[test]
    fn explicit_coefficients_win_over_data() {
        let data = ExperimentalData::from_kelvin(&[500.0, 700.0], &[1.0, 2.0]).unwrap();
        let p = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-3, "cm^2/s"))
            .act_energy(ev(0.4))
            .data(data, Unit::parse("cm^2/s").unwrap())
            .build()
            .unwrap();
        assert!(matches!(p.coefficient_source(), Coefficients::Explicit(_)));
        assert!(close(p.pre_exp().unwrap().value, 1e-7));
        assert!(close(p.data().unwrap().values()[1], 2e-4));
        assert!(p.fit().is_err());
    }

    #[test]
    fn raw_temperature_requires_opt_in() {
        let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
        assert_eq!(
            d.value_raw(800.0, false).unwrap_err(),
            PropertyError::MissingTemperatureUnit
        );
        let v = d.value_raw(800.0, true).unwrap();
        assert_eq!(v, d.value(k(800.0)).unwrap());
    }

    #[test]
    fn molar_activation_energy() {
        let d = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .act_energy_molar(ht_core::units::kj_per_mol(96.485_332_12))
            .build()
            .unwrap();
        assert!(nearly_equal(
            ev_of(d.act_energy().unwrap()),
            1.0,
            Tolerances::relative(1e-6)
        ));
    }

    #[test]
    fn sample_grid_hits_endpoints() {
        let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
        let grid = d.sample(k(300.0), k(900.0), 7).unwrap();
        assert_eq!(grid.len(), 7);
        assert_eq!(kelvin_of(grid[0].0), 300.0);
        assert_eq!(kelvin_of(grid[6].0), 900.0);
        assert!(grid.windows(2).all(|w| w[0].1 < w[1].1));
        assert!(d.sample(k(300.0), k(900.0), 1).is_err());
    }

    #[test]
    fn display_summarizes() {
        let d = ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .act_energy(ev(0.4))
            .author("Frauenfelder")
            .year(1969)
            .range(k(1100.0), k(2400.0))
            .build()
            .unwrap();
        let text = d.to_string();
        assert!(text.starts_with("Diffusivity, Frauenfelder (1969)"), "{text}");
        assert!(text.contains("0.4000 eV"), "{text}");
        assert!(text.ends_with("1100-2400 K"), "{text}");
    }
}
