//! Turn a validated library file into live properties.

use crate::schema::{EnergyDef, EnergyUnit, LibraryFile, MaterialDef, PropertyDef};
use crate::validate::validate_library;
use crate::{LibraryError, LibraryResult};
use ht_core::units::{Energy, ev, j_per_mol, joule, k, kj_per_mol, per_particle};
use ht_core::{Coefficient, Unit};
use ht_properties::{
    ArrheniusProperty, ExperimentalData, Isotope, Material, MaterialTag, PropertiesGroup,
    PropertyError, PropertyKind,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

fn energy(def: &EnergyDef) -> Energy {
    match def.unit {
        EnergyUnit::Ev => ev(def.value),
        EnergyUnit::Joule => joule(def.value),
        EnergyUnit::KjPerMol => per_particle(kj_per_mol(def.value)),
        EnergyUnit::JPerMol => per_particle(j_per_mol(def.value)),
    }
}

fn material(def: &MaterialDef) -> Result<Material, PropertyError> {
    let mut material = Material::new(def.name.as_deref().unwrap_or(&def.id));
    if def.name.is_some() {
        material = material.alias(def.id.clone());
    }
    for alias in &def.aliases {
        material = material.alias(alias.clone());
    }
    for tag in &def.tags {
        material = material.tag(tag.parse::<MaterialTag>()?);
    }
    Ok(material)
}

/// Materials keyed by id.
pub fn build_materials(library: &LibraryFile) -> LibraryResult<HashMap<String, Arc<Material>>> {
    library
        .materials
        .iter()
        .map(|def| -> LibraryResult<(String, Arc<Material>)> {
            Ok((def.id.clone(), Arc::new(material(def)?)))
        })
        .collect()
}

fn property(
    def: &PropertyDef,
    materials: &HashMap<String, Arc<Material>>,
) -> Result<ArrheniusProperty, PropertyError> {
    let kind: PropertyKind = def.kind.parse()?;
    let mut builder = ArrheniusProperty::builder(kind);

    if let (Some(pre_exp), Some(act_energy)) = (&def.pre_exp, &def.act_energy) {
        builder = match &pre_exp.unit {
            Some(unit) => builder.pre_exp(Coefficient::parse(pre_exp.value, unit)?),
            None => builder.pre_exp_unitless(pre_exp.value),
        };
        builder = builder.act_energy(energy(act_energy));
    }
    if let Some(data) = &def.data {
        let samples = ExperimentalData::from_kelvin(&data.t_k, &data.y)?;
        builder = match &data.unit {
            Some(unit) => builder.data(samples, Unit::parse(unit)?),
            None => builder.data_unitless(samples),
        };
    }
    if let Some([low, high]) = def.range_k {
        builder = builder.range(k(low), k(high));
    }

    if let Some(material) = def.material.as_ref().and_then(|id| materials.get(id)) {
        builder = builder.material(Arc::clone(material));
    }
    if let Some(source) = &def.source {
        builder = builder.source(source.clone());
    }
    if let Some(name) = &def.name {
        builder = builder.name(name.clone());
    }
    if let Some(author) = &def.author {
        builder = builder.author(author.clone());
    }
    if let Some(year) = def.year {
        builder = builder.year(year);
    }
    if let Some(isotope) = &def.isotope {
        builder = builder.isotope(isotope.parse::<Isotope>()?);
    }
    if let Some(note) = &def.note {
        builder = builder.note(note.clone());
    }
    builder.build()
}

/// Validate `library` and build every property definition into a group, in
/// file order. The first failing definition aborts with its index.
pub fn build_group(library: &LibraryFile) -> LibraryResult<PropertiesGroup> {
    validate_library(library)?;
    let materials = build_materials(library)?;
    let group = library
        .properties
        .iter()
        .enumerate()
        .map(|(index, def)| {
            property(def, &materials).map_err(|e| LibraryError::Definition {
                index,
                what: e.to_string(),
            })
        })
        .collect::<LibraryResult<Vec<_>>>()?
        .into_iter()
        .collect::<PropertiesGroup>();
    debug!(
        materials = materials.len(),
        properties = group.len(),
        "built property library"
    );
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataDef, QuantityDef};
    use ht_core::units::ev_of;
    use ht_core::{Tolerances, nearly_equal};

    fn tungsten() -> MaterialDef {
        MaterialDef {
            id: "w".to_string(),
            name: Some("tungsten".to_string()),
            aliases: vec![],
            tags: vec!["pure_metal".to_string()],
        }
    }

    fn explicit(unit: Option<&str>) -> PropertyDef {
        let mut def = PropertyDef::new("diffusivity");
        def.material = Some("w".to_string());
        def.pre_exp = Some(QuantityDef {
            value: 4.1e-7,
            unit: unit.map(str::to_string),
        });
        def.act_energy = Some(EnergyDef {
            value: 0.39,
            unit: EnergyUnit::Ev,
        });
        def
    }

    #[test]
    fn material_id_becomes_alias() {
        let materials = build_materials(&LibraryFile {
            materials: vec![tungsten()],
            ..LibraryFile::default()
        })
        .unwrap();
        let w = &materials["w"];
        assert_eq!(w.name(), "tungsten");
        assert!(w.matches("W"));
        assert!(w.matches("metal"));
    }

    #[test]
    fn builds_explicit_and_data_backed() {
        let mut fitted = PropertyDef::new("diffusivity");
        fitted.data = Some(DataDef {
            t_k: vec![400.0, 600.0, 800.0],
            y: vec![1e-10, 1e-9, 4e-9],
            unit: Some("cm^2/s".to_string()),
        });
        let library = LibraryFile {
            materials: vec![tungsten()],
            properties: vec![explicit(Some("m^2/s")), fitted],
            ..LibraryFile::default()
        };
        let group = build_group(&library).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.get(0).unwrap().material().unwrap().name(), "tungsten");
        assert!(group.get(1).unwrap().fit().is_ok());
    }

    #[test]
    fn molar_energies_are_converted() {
        let mut def = explicit(Some("m^2/s"));
        def.act_energy = Some(EnergyDef {
            value: 96.485_332_12,
            unit: EnergyUnit::KjPerMol,
        });
        let library = LibraryFile {
            materials: vec![tungsten()],
            properties: vec![def],
            ..LibraryFile::default()
        };
        let group = build_group(&library).unwrap();
        let ea = ev_of(group.get(0).unwrap().act_energy().unwrap());
        assert!(nearly_equal(ea, 1.0, Tolerances::relative(1e-6)));
    }

    #[test]
    fn bad_definition_reports_index() {
        let mut bad = explicit(Some("m^2/s"));
        bad.kind = "solubility".to_string();
        let library = LibraryFile {
            materials: vec![tungsten()],
            properties: vec![explicit(None), bad],
            ..LibraryFile::default()
        };
        match build_group(&library) {
            Err(LibraryError::Definition { index, what }) => {
                assert_eq!(index, 1);
                assert!(what.contains("Solubility"), "{what}");
            }
            other => panic!("expected definition error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_material_tag_is_rejected() {
        let mut m = tungsten();
        m.tags.push("unobtainium".to_string());
        let library = LibraryFile {
            materials: vec![m],
            ..LibraryFile::default()
        };
        assert!(matches!(
            build_group(&library),
            Err(LibraryError::Property(_))
        ));
    }
}
