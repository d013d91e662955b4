//! Versioned document codec for the archive.
//!
//! Every document carries a `format_version` and either one equilibrium or an
//! ordered family of them. Documents are validated against the bundled JSON
//! Schema before deserialization so a malformed archive fails with a
//! path-carrying error instead of a partial parse, and the format version is
//! checked against the allowed set so this build never consumes documents it
//! does not understand.

use crate::error::{Error, Result};
use crate::family::EquilibriaFamily;
use crate::model::Equilibrium;
use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Format version this build reads.
pub const DOCUMENT_FORMAT_VERSION: &str = "equilibrium_document_v1";

const DOCUMENT_SCHEMA: &str = include_str!("../schema/equilibrium_document.schema.json");

/// Either payload shape a document may carry, tagged on `kind`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredDocument {
    Equilibrium { equilibrium: Equilibrium },
    EquilibriumFamily { equilibria: EquilibriaFamily },
}

impl StoredDocument {
    /// Normalize either payload shape into an ordered family.
    pub fn into_family(self) -> EquilibriaFamily {
        match self {
            StoredDocument::Equilibrium { equilibrium } => {
                EquilibriaFamily::from_single(equilibrium)
            }
            StoredDocument::EquilibriumFamily { equilibria } => equilibria,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            StoredDocument::Equilibrium { equilibrium } => equilibrium.validate(),
            StoredDocument::EquilibriumFamily { equilibria } => {
                for equilibrium in equilibria {
                    equilibrium.validate()?;
                }
                Ok(())
            }
        }
    }
}

/// Read, validate, and deserialize one archive document.
///
/// Validation order is schema, then format version, then shape, then the
/// model-level invariants serde cannot express (array lengths, rho ordering,
/// non-empty families).
pub fn load_document(path: &Path) -> Result<StoredDocument> {
    let data = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&data).map_err(|source| Error::Document {
        path: path.to_path_buf(),
        source,
    })?;

    validate_against_schema(path, &value)?;

    let version = value
        .get("format_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != DOCUMENT_FORMAT_VERSION {
        return Err(Error::FormatVersion {
            path: path.to_path_buf(),
            version: version.to_string(),
        });
    }

    let document: StoredDocument =
        serde_json::from_value(value).map_err(|source| Error::Document {
            path: path.to_path_buf(),
            source,
        })?;
    if let StoredDocument::EquilibriumFamily { equilibria } = &document {
        if equilibria.is_empty() {
            return Err(Error::EmptyFamily {
                path: path.to_path_buf(),
            });
        }
    }
    document.validate()?;
    Ok(document)
}

fn validate_against_schema(path: &Path, value: &Value) -> Result<()> {
    if let Err(errors) = compiled_schema().validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(Error::Schema {
            path: path.to_path_buf(),
            details,
        });
    }
    Ok(())
}

fn compiled_schema() -> &'static JSONSchema {
    static SCHEMA: OnceLock<JSONSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let value: Value =
            serde_json::from_str(DOCUMENT_SCHEMA).expect("bundled document schema is valid JSON");
        JSONSchema::compile(&value).expect("bundled document schema compiles")
    })
}
