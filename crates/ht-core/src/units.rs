// ht-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, MolarEnergy as UomMolarEnergy,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type MolarEnergy = UomMolarEnergy;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn ev(v: f64) -> Energy {
    use uom::si::energy::electronvolt;
    Energy::new::<electronvolt>(v)
}

#[inline]
pub fn joule(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn j_per_mol(v: f64) -> MolarEnergy {
    use uom::si::molar_energy::joule_per_mole;
    MolarEnergy::new::<joule_per_mole>(v)
}

#[inline]
pub fn kj_per_mol(v: f64) -> MolarEnergy {
    use uom::si::molar_energy::kilojoule_per_mole;
    MolarEnergy::new::<kilojoule_per_mole>(v)
}

/// Temperature in Kelvin.
#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Energy in electronvolt.
#[inline]
pub fn ev_of(e: Energy) -> f64 {
    use uom::si::energy::electronvolt;
    e.get::<electronvolt>()
}

/// Convert a molar activation energy to the per-particle energy used by the
/// Arrhenius law.
#[inline]
pub fn per_particle(e: MolarEnergy) -> Energy {
    use uom::si::molar_energy::joule_per_mole;
    joule(e.get::<joule_per_mole>() / constants::AVOGADRO)
}

pub mod constants {
    /// Boltzmann constant [eV/K] (CODATA 2018, exact).
    pub const BOLTZMANN_EV_PER_K: f64 = 8.617_333_262e-5;
    /// Boltzmann constant [J/K] (exact).
    pub const BOLTZMANN_J_PER_K: f64 = 1.380_649e-23;
    /// Avogadro constant [1/mol] (exact).
    pub const AVOGADRO: f64 = 6.022_140_76e23;
}
