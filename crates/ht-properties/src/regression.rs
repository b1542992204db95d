//! Log-linear regression of Arrhenius coefficients from measurements.
//!
//! `ln y = ln A - (Ea / kB) * (1 / T)` is linear in `1/T`; ordinary least
//! squares on the cleaned samples gives `A = exp(intercept)` and
//! `Ea = -slope * kB`.

use crate::error::FitError;
use ht_core::units::constants::BOLTZMANN_EV_PER_K;
use ht_core::units::{Energy, Temperature, ev, k, kelvin_of};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Minimum number of usable samples for a two-parameter fit.
pub const MIN_FIT_POINTS: usize = 2;

/// Paired temperature / value samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentalData {
    temperatures: Vec<Temperature>,
    values: Vec<f64>,
}

impl ExperimentalData {
    pub fn new(temperatures: Vec<Temperature>, values: Vec<f64>) -> Result<Self, FitError> {
        if temperatures.len() != values.len() {
            return Err(FitError::LengthMismatch {
                t_len: temperatures.len(),
                y_len: values.len(),
            });
        }
        Ok(Self {
            temperatures,
            values,
        })
    }

    /// Samples given as Kelvin numbers.
    pub fn from_kelvin(t_k: &[f64], values: &[f64]) -> Result<Self, FitError> {
        Self::new(t_k.iter().map(|&t| k(t)).collect(), values.to_vec())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn temperatures(&self) -> &[Temperature] {
        &self.temperatures
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn kelvin(&self) -> Vec<f64> {
        self.temperatures.iter().map(|&t| kelvin_of(t)).collect()
    }

    /// Multiply every value by `factor` (unit conversion).
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            temperatures: self.temperatures.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Drop samples that cannot enter `ln y` vs `1/T`: non-finite entries on
    /// either side, and non-positive values. Removal is paired so indices keep
    /// corresponding. Returns the cleaned data and the number dropped.
    pub fn cleaned(&self) -> (Self, usize) {
        let mut temperatures = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());
        for (&t, &y) in self.temperatures.iter().zip(&self.values) {
            let tk = kelvin_of(t);
            if tk.is_finite() && tk > 0.0 && y.is_finite() && y > 0.0 {
                temperatures.push(t);
                values.push(y);
            }
        }
        let dropped = self.len() - values.len();
        (
            Self {
                temperatures,
                values,
            },
            dropped,
        )
    }

    /// (min, max) temperature, ignoring non-finite entries.
    pub fn span(&self) -> Option<(Temperature, Temperature)> {
        let mut lo: Option<Temperature> = None;
        let mut hi: Option<Temperature> = None;
        for &t in &self.temperatures {
            if !kelvin_of(t).is_finite() {
                continue;
            }
            if lo.is_none_or(|l| kelvin_of(t) < kelvin_of(l)) {
                lo = Some(t);
            }
            if hi.is_none_or(|h| kelvin_of(t) > kelvin_of(h)) {
                hi = Some(t);
            }
        }
        lo.zip(hi)
    }
}

/// Result of a regression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrheniusFit {
    /// Pre-exponential factor, in the unit of the sample values.
    pub pre_exp: f64,
    pub act_energy: Energy,
    /// Coefficient of determination of the log-linear fit.
    pub r_squared: f64,
    /// Samples the fit was computed from.
    pub samples: ExperimentalData,
    /// Number of samples removed before fitting.
    pub dropped: usize,
}

/// Fit `y(T) = A exp(-Ea / (kB T))` by least squares on `ln y` vs `1/T`.
pub fn fit_arrhenius(data: &ExperimentalData) -> Result<ArrheniusFit, FitError> {
    let (samples, dropped) = data.cleaned();
    if dropped > 0 {
        debug!(dropped, kept = samples.len(), "dropped unusable samples before fit");
    }

    let n = samples.len();
    if n < MIN_FIT_POINTS {
        return Err(FitError::InsufficientData {
            usable: n,
            required: MIN_FIT_POINTS,
        });
    }

    let inv_t: Vec<f64> = samples.kelvin().iter().map(|t| 1.0 / t).collect();
    let ln_y = DVector::from_iterator(n, samples.values().iter().map(|y| y.ln()));

    // Centering the abscissa keeps the normal equations well conditioned.
    let mean_inv_t = inv_t.iter().sum::<f64>() / n as f64;
    let spread = inv_t
        .iter()
        .map(|x| (x - mean_inv_t).abs())
        .fold(0.0_f64, f64::max);
    if spread <= f64::EPSILON * mean_inv_t.abs() {
        return Err(FitError::DegenerateTemperatures);
    }

    let design = DMatrix::from_fn(n, 2, |i, j| {
        if j == 0 {
            1.0
        } else {
            inv_t[i] - mean_inv_t
        }
    });
    let xt = design.transpose();
    let beta = (&xt * &design)
        .lu()
        .solve(&(&xt * &ln_y))
        .ok_or(FitError::Singular)?;

    let slope = beta[1];
    let intercept = beta[0] - slope * mean_inv_t;

    let predicted = &design * &beta;
    let mean_ln_y = ln_y.mean();
    let ss_res = (&ln_y - &predicted).norm_squared();
    let ss_tot = ln_y.iter().map(|v| (v - mean_ln_y).powi(2)).sum::<f64>();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    let fit = ArrheniusFit {
        pre_exp: intercept.exp(),
        act_energy: ev(-slope * BOLTZMANN_EV_PER_K),
        r_squared,
        samples,
        dropped,
    };
    debug!(
        pre_exp = fit.pre_exp,
        r_squared = fit.r_squared,
        points = n,
        "arrhenius fit"
    );
    Ok(fit)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use ht_core::units::ev_of;
    use ht_core::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn noiseless_round_trip(
            log_a in -12.0_f64..4.0,
            ea in 0.01_f64..1.5,
            t_lo in 250.0_f64..600.0,
            width in 100.0_f64..900.0,
            n in 2_usize..30,
        ) {
            let a = 10f64.powf(log_a);
            let t: Vec<f64> = (0..n)
                .map(|i| t_lo + width * i as f64 / (n - 1) as f64)
                .collect();
            let y: Vec<f64> = t
                .iter()
                .map(|&tk| a * (-ea / (BOLTZMANN_EV_PER_K * tk)).exp())
                .collect();
            let fit = fit_arrhenius(&ExperimentalData::from_kelvin(&t, &y).unwrap()).unwrap();
            let tol = Tolerances::relative(1e-6);
            prop_assert!(nearly_equal(fit.pre_exp, a, tol), "A {} vs {}", fit.pre_exp, a);
            prop_assert!(nearly_equal(ev_of(fit.act_energy), ea, tol));
        }

        #[test]
        fn fit_is_idempotent(
            values in prop::collection::vec(1e-3_f64..1e3, 3..12),
        ) {
            let t: Vec<f64> = (0..values.len()).map(|i| 300.0 + 50.0 * i as f64).collect();
            let data = ExperimentalData::from_kelvin(&t, &values).unwrap();
            let first = fit_arrhenius(&data).unwrap();
            let second = fit_arrhenius(&data).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn cleaned_samples_are_finite(
            raw in prop::collection::vec(
                (prop_oneof![Just(f64::NAN), Just(f64::INFINITY), 200.0_f64..1500.0],
                 prop_oneof![Just(f64::NAN), Just(f64::NEG_INFINITY), 1e-6_f64..1e6]),
                0..40,
            ),
        ) {
            let (t, y): (Vec<f64>, Vec<f64>) = raw.into_iter().unzip();
            let data = ExperimentalData::from_kelvin(&t, &y).unwrap();
            let (clean, dropped) = data.cleaned();
            prop_assert_eq!(clean.temperatures().len(), clean.values().len());
            prop_assert_eq!(clean.len() + dropped, data.len());
            prop_assert!(clean.kelvin().iter().all(|t| t.is_finite()));
            prop_assert!(clean.values().iter().all(|y| y.is_finite()));
        }
    }
}
