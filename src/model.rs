//! Domain snapshot types stored in the archive.
//!
//! These mirror what the solver serializes: nested flux-surface outlines
//! ordered by normalized radius, plus the 1-D constraint profiles. Arrays are
//! `ndarray` so downstream numerics can consume them without conversion.
//! Serde bypasses the validating constructors, so the codec re-runs
//! `validate` on everything it deserializes.

use crate::error::{Error, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Tolerance for treating a stored surface as an exact rho match.
const RHO_MATCH_TOL: f64 = 1e-9;

/// A 1-D profile sampled on a normalized-radius grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(with = "f64_array")]
    pub rho: Array1<f64>,
    #[serde(with = "f64_array")]
    pub values: Array1<f64>,
}

impl Profile {
    pub fn new(name: &str, rho: Array1<f64>, values: Array1<f64>) -> Result<Self> {
        let profile = Self {
            name: name.to_string(),
            rho,
            values,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.rho.len() != self.values.len() {
            return Err(Error::InvalidProfile {
                name: self.name.clone(),
                reason: format!("{} rho knots vs {} values", self.rho.len(), self.values.len()),
            });
        }
        if self.rho.is_empty() {
            return Err(Error::InvalidProfile {
                name: self.name.clone(),
                reason: "no samples".to_string(),
            });
        }
        for i in 0..self.rho.len() - 1 {
            if self.rho[i + 1] <= self.rho[i] {
                return Err(Error::InvalidProfile {
                    name: self.name.clone(),
                    reason: format!(
                        "rho grid not increasing at index {}: {} >= {}",
                        i,
                        self.rho[i],
                        self.rho[i + 1]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A closed flux-surface outline at fixed normalized radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub rho: f64,
    #[serde(with = "f64_array")]
    pub r: Array1<f64>,
    #[serde(with = "f64_array")]
    pub z: Array1<f64>,
}

impl Surface {
    pub fn new(rho: f64, r: Array1<f64>, z: Array1<f64>) -> Result<Self> {
        let surface = Self { rho, r, z };
        surface.validate()?;
        Ok(surface)
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.r.len() != self.z.len() {
            return Err(Error::InvalidSurface {
                rho: self.rho,
                reason: format!("{} r points vs {} z points", self.r.len(), self.z.len()),
            });
        }
        if self.r.is_empty() {
            return Err(Error::InvalidSurface {
                rho: self.rho,
                reason: "empty outline".to_string(),
            });
        }
        Ok(())
    }
}

/// One solved snapshot: nested flux surfaces plus optional constraint profiles.
///
/// A solve stores either a rotational-transform or a toroidal-current
/// constraint, so at most one of `iota`/`current` is usually present; the
/// pressure profile may be absent for force-free cases. `step` records the
/// snapshot's position in the continuation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub name: String,
    #[serde(default)]
    pub step: usize,
    pub surfaces: Vec<Surface>,
    #[serde(default)]
    pub pressure: Option<Profile>,
    #[serde(default)]
    pub iota: Option<Profile>,
    #[serde(default)]
    pub current: Option<Profile>,
}

impl Equilibrium {
    /// The flux surface at normalized radius `rho`.
    ///
    /// Exact matches (within tolerance) return the stored outline; otherwise
    /// the bracketing stored surfaces are interpolated linearly in rho, which
    /// requires their outlines to share a length. Requests outside the stored
    /// range are an error, not an extrapolation.
    pub fn get_surface_at(&self, rho: f64) -> Result<Surface> {
        if let Some(surface) = self
            .surfaces
            .iter()
            .find(|s| (s.rho - rho).abs() <= RHO_MATCH_TOL)
        {
            return Ok(surface.clone());
        }

        let (min, max) = match (self.surfaces.first(), self.surfaces.last()) {
            (Some(first), Some(last)) => (first.rho, last.rho),
            _ => {
                return Err(Error::InvalidSurface {
                    rho,
                    reason: "no stored surfaces".to_string(),
                });
            }
        };
        if rho < min || rho > max {
            return Err(Error::SurfaceOutOfRange {
                requested: rho,
                min,
                max,
            });
        }

        // Surfaces are validated to be in increasing rho order, so the first
        // stored surface past `rho` closes the bracket.
        let upper_idx = self
            .surfaces
            .iter()
            .position(|s| s.rho > rho)
            .ok_or(Error::SurfaceOutOfRange {
                requested: rho,
                min,
                max,
            })?;
        let lower = &self.surfaces[upper_idx - 1];
        let upper = &self.surfaces[upper_idx];
        if lower.len() != upper.len() {
            return Err(Error::InvalidSurface {
                rho,
                reason: format!(
                    "outline lengths {} and {} differ across the interpolation bracket",
                    lower.len(),
                    upper.len()
                ),
            });
        }

        let t = (rho - lower.rho) / (upper.rho - lower.rho);
        let r = &lower.r * (1.0 - t) + &upper.r * t;
        let z = &lower.z * (1.0 - t) + &upper.z * t;
        Surface::new(rho, r, z)
    }

    pub fn validate(&self) -> Result<()> {
        for surface in &self.surfaces {
            surface.validate()?;
        }
        for pair in self.surfaces.windows(2) {
            if pair[1].rho <= pair[0].rho {
                return Err(Error::InvalidSurface {
                    rho: pair[1].rho,
                    reason: format!("surfaces not ordered by increasing rho (after {})", pair[0].rho),
                });
            }
        }
        for profile in [&self.pressure, &self.iota, &self.current]
            .into_iter()
            .flatten()
        {
            profile.validate()?;
        }
        Ok(())
    }
}

/// Plain-sequence serde for `Array1<f64>` fields, so documents store bare
/// JSON arrays instead of ndarray's internal representation.
mod f64_array {
    use ndarray::Array1;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(array: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        array.to_vec().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Array1<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Ok(Array1::from(values))
    }
}
