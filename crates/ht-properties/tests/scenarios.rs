use std::sync::Arc;
use std::thread;

use ht_core::units::constants::BOLTZMANN_EV_PER_K;
use ht_core::units::{ev, ev_of, k};
use ht_core::{Coefficient, Tolerances, Unit, nearly_equal};
use ht_properties::{
    ArrheniusProperty, ExperimentalData, Isotope, Law, Material, MaterialTag, PropertiesGroup,
    PropertyKind, Query,
};

fn coef(value: f64, unit: &str) -> Coefficient {
    Coefficient::parse(value, unit).unwrap()
}

#[test]
fn diffusivity_at_800k_to_six_figures() {
    let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.4)).unwrap();
    let got = d.value(k(800.0)).unwrap().value;
    let expected = 1e-7 * (-0.4 / (BOLTZMANN_EV_PER_K * 800.0)).exp();
    assert!(nearly_equal(got, expected, Tolerances::relative(5e-7)));
}

#[test]
fn derived_permeability_in_input_units() {
    let d = ArrheniusProperty::diffusivity(coef(1e-7, "m^2/s"), ev(0.3)).unwrap();
    let s = ArrheniusProperty::solubility(coef(0.5, "mol m^-3 Pa^-0.5"), ev(0.2)).unwrap();
    let p = (&d * &s).unwrap();

    assert_eq!(p.kind(), PropertyKind::Permeability);
    assert_eq!(p.law(), Some(Law::Sievert));
    let mol_based = Unit::parse("mol m^-1 s^-1 Pa^-0.5").unwrap();
    let a = p.pre_exp().unwrap().value_in(&mol_based).unwrap();
    assert!(nearly_equal(a, 5e-8, Tolerances::relative(1e-9)));
    assert!(nearly_equal(
        ev_of(p.act_energy().unwrap()),
        0.5,
        Tolerances::relative(1e-12)
    ));

    // Evaluating the product equals the product of evaluations.
    let t = k(650.0);
    let direct = p.value(t).unwrap().value;
    let separate = d.value(t).unwrap().value * s.value(t).unwrap().value;
    assert!(nearly_equal(direct, separate, Tolerances::relative(1e-9)));
}

#[test]
fn mean_recovers_centre_of_symmetric_scatter() {
    let (a0, ea0) = (2.5e-7, 0.45);
    let group: PropertiesGroup = [1.0, 1.3, 2.0, 3.7]
        .iter()
        .flat_map(|&f| {
            let de = 0.02 * f;
            [
                ArrheniusProperty::diffusivity(coef(a0 * f, "m^2/s"), ev(ea0 + de)).unwrap(),
                ArrheniusProperty::diffusivity(coef(a0 / f, "m^2/s"), ev(ea0 - de)).unwrap(),
            ]
        })
        .collect();

    let mean = group.mean().unwrap();
    assert!(nearly_equal(
        mean.pre_exp().unwrap().value,
        a0,
        Tolerances::relative(1e-12)
    ));
    assert!(nearly_equal(
        ev_of(mean.act_energy().unwrap()),
        ea0,
        Tolerances::relative(1e-12)
    ));
}

#[test]
fn mean_of_fitted_members() {
    let temps = [400.0, 500.0, 600.0, 700.0, 800.0];
    let truth = |a: f64, ea: f64| -> Vec<f64> {
        temps
            .iter()
            .map(|&t| a * (-ea / (BOLTZMANN_EV_PER_K * t)).exp())
            .collect()
    };
    let unit = Unit::parse("m^2/s").unwrap();
    let group: PropertiesGroup = [(4e-7, 0.30), (1e-7, 0.40)]
        .iter()
        .map(|&(a, ea)| {
            ArrheniusProperty::builder(PropertyKind::Diffusivity)
                .data(
                    ExperimentalData::from_kelvin(&temps, &truth(a, ea)).unwrap(),
                    unit.clone(),
                )
                .build()
                .unwrap()
        })
        .collect();

    let mean = group.mean().unwrap();
    assert!(nearly_equal(
        mean.pre_exp().unwrap().value,
        2e-7,
        Tolerances::relative(1e-8)
    ));
    assert!(nearly_equal(
        ev_of(mean.act_energy().unwrap()),
        0.35,
        Tolerances::relative(1e-8)
    ));
}

#[test]
fn tungsten_and_copper_partition() {
    let w = Arc::new(
        Material::new("tungsten")
            .alias("W")
            .tag(MaterialTag::PureMetal)
            .tag(MaterialTag::PlasmaFacing),
    );
    let cu = Arc::new(Material::new("copper").alias("Cu").tag(MaterialTag::PureMetal));
    let make = |m: &Arc<Material>, iso: Isotope, year: i32| {
        ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .pre_exp(coef(1e-7, "m^2/s"))
            .act_energy(ev(0.3))
            .material(m.clone())
            .isotope(iso)
            .year(year)
            .build()
            .unwrap()
    };
    let group: PropertiesGroup = vec![
        make(&w, Isotope::H, 1969),
        make(&w, Isotope::D, 1999),
        make(&w, Isotope::T, 2010),
        make(&cu, Isotope::H, 1980),
        make(&cu, Isotope::D, 1985),
    ]
    .into_iter()
    .collect();

    let tungsten = Query::new().material("tungsten");
    assert_eq!(group.filter(&tungsten).len(), 3);
    assert_eq!(group.exclude(&tungsten).len(), 2);
    assert_eq!(group.filter(&Query::new().material("plasma_facing")).len(), 3);

    let chained = group
        .filter(&Query::new().material("metal"))
        .filter(&Query::new().isotope(Isotope::D));
    assert_eq!(chained.len(), 2);
}

#[test]
fn concurrent_first_access_fits_once() {
    let temps: Vec<f64> = (0..40).map(|i| 300.0 + 15.0 * i as f64).collect();
    let values: Vec<f64> = temps
        .iter()
        .map(|&t| 1e-6 * (-0.55 / (BOLTZMANN_EV_PER_K * t)).exp())
        .collect();
    let p = Arc::new(
        ArrheniusProperty::builder(PropertyKind::Diffusivity)
            .data(
                ExperimentalData::from_kelvin(&temps, &values).unwrap(),
                Unit::parse("m^2/s").unwrap(),
            )
            .build()
            .unwrap(),
    );
    assert!(!p.is_resolved());

    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let p = Arc::clone(&p);
                scope.spawn(move || {
                    let fit = p.fit().unwrap();
                    std::ptr::from_ref(fit) as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(p.is_resolved());
    assert!(addresses.iter().all(|&a| a == addresses[0]));
    assert!(nearly_equal(
        p.pre_exp().unwrap().value,
        1e-6,
        Tolerances::relative(1e-8)
    ));
}

#[test]
fn properties_and_groups_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArrheniusProperty>();
    assert_send_sync::<PropertiesGroup>();
}
