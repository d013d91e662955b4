//! Read-only catalog and loader for precomputed plasma equilibrium documents.
//!
//! The crate answers two questions: which solved examples does the archive
//! ship ([`listall`]), and what does a named example contain ([`get`]).
//! Archive documents follow the `<Name>_output.h5` naming convention and
//! names are matched case-insensitively. Every call is stateless: the
//! directory is scanned fresh, the document is read and deserialized on a
//! forced CPU context, and the result is handed back without caching. Faults
//! are typed ([`Error`]) so callers can tell a mistyped name from an archive
//! race or a corrupt document.

use log::debug;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod document;
pub mod error;
pub mod family;
pub mod kind;
pub mod model;
pub mod placement;

pub use document::{DOCUMENT_FORMAT_VERSION, StoredDocument, load_document};
pub use error::{Error, Result};
pub use family::EquilibriaFamily;
pub use kind::{DataKind, ExampleData};
pub use model::{Equilibrium, Profile, Surface};
pub use placement::{ComputeContext, CpuScope};

/// Filename suffix that marks an archive document.
pub const OUTPUT_SUFFIX: &str = "_output.h5";

/// One cataloged example: derived name plus the backing document.
#[derive(Debug, Clone)]
pub struct ExampleEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Verifies that a directory hint points at something usable as the archive.
fn data_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.is_dir() {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

/// Locate the archive directory.
///
/// Honors `EQCATALOG_DATA_DIR` when it names a real directory, then falls
/// back to the build-time hint baked by `build.rs` (the crate's `data/`
/// directory). Invalid hints are skipped, not fatal; only a fully
/// unresolvable archive is an error.
pub fn find_data_dir() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("EQCATALOG_DATA_DIR") {
        if let Some(root) = data_dir_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("EQCATALOG_DATA_HINT") {
        if let Some(root) = data_dir_from_hint(hint) {
            return Ok(root);
        }
    }

    Err(Error::NoDataDir)
}

/// Derive the example name from an archive filename, or `None` when the
/// filename does not carry the suffix. The suffix match is case-insensitive.
fn strip_output_suffix(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(OUTPUT_SUFFIX.len())?;
    let stem = file_name.get(..split)?;
    let suffix = file_name.get(split..)?;
    if stem.is_empty() || !suffix.eq_ignore_ascii_case(OUTPUT_SUFFIX) {
        return None;
    }
    Some(stem)
}

/// Enumerate archive documents under `root`, sorted case-insensitively by
/// derived name.
///
/// Symlinked documents are kept without resolving the target; a dangling link
/// surfaces later as a vanished-document fault rather than silently dropping
/// out of the catalog.
fn scan_archive(root: &Path) -> Result<Vec<ExampleEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(name) = strip_output_suffix(file_name) else {
            continue;
        };
        entries.push(ExampleEntry {
            name: name.to_string(),
            path: entry.path(),
        });
    }
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    debug!(
        "archive scan of {} found {} document(s)",
        root.display(),
        entries.len()
    );
    Ok(entries)
}

/// List the example names the archive ships.
///
/// Names are document filenames with the `_output.h5` suffix stripped,
/// sorted case-insensitively so repeated calls and error messages are stable.
pub fn listall() -> Result<Vec<String>> {
    listall_in(&find_data_dir()?)
}

/// [`listall`] against an explicit archive directory.
pub fn listall_in(root: &Path) -> Result<Vec<String>> {
    Ok(scan_archive(root)?.into_iter().map(|e| e.name).collect())
}

/// Resolve an example name to its backing document.
///
/// Matching is case-insensitive on the derived name. Unknown names report the
/// current catalog in the error; names matching more than one file are
/// rejected rather than resolved by directory order.
pub fn resolve_example(name: &str) -> Result<ExampleEntry> {
    resolve_example_in(&find_data_dir()?, name)
}

/// [`resolve_example`] against an explicit archive directory.
pub fn resolve_example_in(root: &Path, name: &str) -> Result<ExampleEntry> {
    let entries = scan_archive(root)?;
    let wanted = name.to_lowercase();
    let mut matches: Vec<ExampleEntry> = entries
        .iter()
        .filter(|e| e.name.to_lowercase() == wanted)
        .cloned()
        .collect();

    match matches.len() {
        0 => Err(Error::UnknownExample {
            name: name.to_string(),
            available: entries.into_iter().map(|e| e.name).collect(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousExample {
            name: name.to_string(),
            matches: matches
                .into_iter()
                .filter_map(|e| {
                    e.path
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                })
                .collect(),
        }),
    }
}

/// Load an example and project out the requested piece.
///
/// `data = None` returns the final solved equilibrium; see [`DataKind`] for
/// the other projections. The resolved path is re-checked just before open —
/// a document that was listed but has since disappeared is a distinct fault
/// from an unknown name. Deserialization runs inside a [`CpuScope`]:
/// archive loads are disk-plus-decode work and never belong on an
/// accelerator context, whatever the ambient default says.
pub fn get(name: &str, data: Option<DataKind>) -> Result<ExampleData> {
    get_in(&find_data_dir()?, name, data)
}

/// [`get`] against an explicit archive directory.
pub fn get_in(root: &Path, name: &str, data: Option<DataKind>) -> Result<ExampleData> {
    let entry = resolve_example_in(root, name)?;
    if !entry.path.exists() {
        return Err(Error::VanishedExample { path: entry.path });
    }

    let stored = {
        let _cpu = CpuScope::enter();
        load_document(&entry.path)?
    };
    let family = stored.into_family();
    let last = family
        .last()
        .cloned()
        .ok_or_else(|| Error::EmptyFamily {
            path: entry.path.clone(),
        })?;
    debug!(
        "loaded example '{}' ({} snapshot(s))",
        entry.name,
        family.len()
    );

    let result = match data {
        None => ExampleData::Equilibrium(last),
        Some(DataKind::All) => ExampleData::Family(family),
        Some(DataKind::Boundary) => ExampleData::Boundary(last.get_surface_at(1.0)?),
        Some(DataKind::Pressure) => ExampleData::Profile(last.pressure),
        Some(DataKind::Iota) => ExampleData::Profile(last.iota),
        Some(DataKind::Current) => ExampleData::Profile(last.current),
    };
    Ok(result)
}
