//! ht-library: property definition files, bibliography and export.

pub mod bibliography;
pub mod build;
pub mod export;
pub mod schema;
pub mod validate;

pub use bibliography::{BibliographyStore, Citation, InMemoryBibliography};
pub use build::{build_group, build_materials};
pub use export::{ExportRecord, export_records, read_jsonl, write_json, write_jsonl};
pub use schema::*;
pub use validate::{ValidationError, validate_library};

use ht_properties::PropertyError;

pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Property definition #{index}: {what}")]
    Definition { index: usize, what: String },

    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> LibraryResult<LibraryFile> {
    let content = std::fs::read_to_string(path)?;
    let library: LibraryFile = serde_yaml::from_str(&content)?;
    validate_library(&library)?;
    Ok(library)
}

pub fn save_yaml(path: &std::path::Path, library: &LibraryFile) -> LibraryResult<()> {
    validate_library(library)?;
    let content = serde_yaml::to_string(library)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> LibraryResult<LibraryFile> {
    let content = std::fs::read_to_string(path)?;
    let library: LibraryFile = serde_json::from_str(&content)?;
    validate_library(&library)?;
    Ok(library)
}

pub fn save_json(path: &std::path::Path, library: &LibraryFile) -> LibraryResult<()> {
    validate_library(library)?;
    let content = serde_json::to_string_pretty(library)?;
    std::fs::write(path, content)?;
    Ok(())
}
