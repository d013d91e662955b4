//! Fault taxonomy for the archive accessors.
//!
//! Every failure mode gets its own variant so callers can tell user-input
//! errors (unknown name, bad data selector) apart from archive races and
//! propagated codec faults. Nothing below this enum retries or substitutes
//! defaults; each operation surfaces the first fault it hits.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Requested data selector is outside the closed set understood by `get`.
    #[error("unknown data kind '{value}', should be one of: all, boundary, pressure, iota, current")]
    InvalidDataKind { value: String },

    /// No archive document matches the requested example name.
    #[error("example '{name}' not found, should be one of {available:?}")]
    UnknownExample {
        name: String,
        available: Vec<String>,
    },

    /// Two or more archive documents collide on the same case-insensitive name.
    #[error("example '{name}' is ambiguous, matches files {matches:?}")]
    AmbiguousExample { name: String, matches: Vec<String> },

    /// The document was present when the directory was listed but gone at open.
    #[error("example document {} disappeared between listing and open", .path.display())]
    VanishedExample { path: PathBuf },

    /// No archive directory could be resolved from the environment or build hint.
    #[error(
        "unable to locate the equilibrium archive; set EQCATALOG_DATA_DIR to a directory of *_output.h5 documents"
    )]
    NoDataDir,

    /// Document parsed cleanly but holds no snapshots.
    #[error("document {} contains an empty equilibrium family", .path.display())]
    EmptyFamily { path: PathBuf },

    /// Document failed validation against the bundled schema.
    #[error("document {} failed schema validation:\n{details}", .path.display())]
    Schema { path: PathBuf, details: String },

    /// Document declares a format version outside the allowed set.
    #[error("document {} declares unsupported format version '{version}'", .path.display())]
    FormatVersion { path: PathBuf, version: String },

    /// Document is not valid JSON or does not match the expected shape.
    #[error("unable to parse document {}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Profile arrays disagree in length or the radius grid is not increasing.
    #[error("profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// Surface outline arrays are empty, mismatched, or out of order.
    #[error("surface at rho={rho}: {reason}")]
    InvalidSurface { rho: f64, reason: String },

    /// Requested rho lies outside the stored flux surfaces.
    #[error("rho={requested} outside stored surface range [{min}, {max}]")]
    SurfaceOutOfRange { requested: f64, min: f64, max: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
