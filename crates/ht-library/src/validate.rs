//! Structural checks on a library file before anything is built.

use crate::schema::{LATEST_VERSION, LibraryFile};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_library(library: &LibraryFile) -> Result<(), ValidationError> {
    if library.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: library.version,
        });
    }

    let mut material_ids = HashSet::new();
    for material in &library.materials {
        if !material_ids.insert(material.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: material.id.clone(),
                context: "materials".to_string(),
            });
        }
    }

    for (index, def) in library.properties.iter().enumerate() {
        let context = format!("properties[{index}]");
        if let Some(id) = &def.material
            && !material_ids.contains(id.as_str())
        {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context,
            });
        }

        if def.pre_exp.is_some() != def.act_energy.is_some() {
            return Err(ValidationError::InvalidValue {
                field: format!("{context}.pre_exp/act_energy"),
                value: "one of two".to_string(),
                reason: "pre_exp and act_energy must be given together".to_string(),
            });
        }
        if def.pre_exp.is_none() && def.data.is_none() {
            return Err(ValidationError::InvalidValue {
                field: context,
                value: def.kind.clone(),
                reason: "needs pre_exp/act_energy or data".to_string(),
            });
        }
        if let Some(data) = &def.data
            && data.t_k.len() != data.y.len()
        {
            return Err(ValidationError::InvalidValue {
                field: format!("{context}.data"),
                value: format!("t_k: {}, y: {}", data.t_k.len(), data.y.len()),
                reason: "arrays differ in length".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataDef, MaterialDef, PropertyDef, QuantityDef};

    fn material(id: &str) -> MaterialDef {
        MaterialDef {
            id: id.to_string(),
            name: None,
            aliases: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn duplicate_material_ids_rejected() {
        let library = LibraryFile {
            materials: vec![material("w"), material("w")],
            ..LibraryFile::default()
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn unknown_material_reference_rejected() {
        let mut def = PropertyDef::new("diffusivity");
        def.material = Some("cu".to_string());
        def.data = Some(DataDef {
            t_k: vec![400.0, 500.0],
            y: vec![1e-9, 2e-9],
            unit: None,
        });
        let library = LibraryFile {
            materials: vec![material("w")],
            properties: vec![def],
            ..LibraryFile::default()
        };
        let err = validate_library(&library).unwrap_err();
        assert!(err.to_string().contains("properties[0]"));
    }

    #[test]
    fn half_given_coefficients_rejected() {
        let mut def = PropertyDef::new("diffusivity");
        def.pre_exp = Some(QuantityDef {
            value: 1e-7,
            unit: None,
        });
        let library = LibraryFile {
            properties: vec![def],
            ..LibraryFile::default()
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn future_version_rejected() {
        let library = LibraryFile {
            version: LATEST_VERSION + 1,
            ..LibraryFile::default()
        };
        assert!(matches!(
            validate_library(&library),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
