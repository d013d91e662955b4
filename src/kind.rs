//! Closed selector for what `get` returns, plus the projection result type.
//!
//! The selector is a real enum rather than a runtime string check: callers
//! holding a `DataKind` cannot request anything outside the set, and the
//! loader's `match` over it is exhaustive. Callers arriving with untyped
//! strings go through `FromStr`, which fails before any archive I/O.

use crate::error::Error;
use crate::family::EquilibriaFamily;
use crate::model::{Equilibrium, Profile, Surface};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which projection of a loaded example to return.
///
/// `get(name, None)` returns the final solved equilibrium; the variants here
/// cover the remaining projections. Serialized as the lowercase string form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DataKind {
    /// The whole continuation family, in solve order.
    All,
    /// The last closed flux surface of the final snapshot.
    Boundary,
    /// The pressure profile of the final snapshot.
    Pressure,
    /// The rotational-transform profile of the final snapshot.
    Iota,
    /// The toroidal-current profile of the final snapshot.
    Current,
}

impl DataKind {
    /// Every selector, in documentation order.
    pub const ALL_KINDS: [DataKind; 5] = [
        DataKind::All,
        DataKind::Boundary,
        DataKind::Pressure,
        DataKind::Iota,
        DataKind::Current,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::All => "all",
            DataKind::Boundary => "boundary",
            DataKind::Pressure => "pressure",
            DataKind::Iota => "iota",
            DataKind::Current => "current",
        }
    }
}

impl FromStr for DataKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(DataKind::All),
            "boundary" => Ok(DataKind::Boundary),
            "pressure" => Ok(DataKind::Pressure),
            "iota" => Ok(DataKind::Iota),
            "current" => Ok(DataKind::Current),
            other => Err(Error::InvalidDataKind {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DataKind::from_str(&value).map_err(serde::de::Error::custom)
    }
}

/// Result of `get`, one variant per projection.
///
/// Profiles are delivered as `Option`: an equilibrium solved without, say, a
/// current constraint simply has no current profile, and that absence is data
/// rather than a fault.
#[derive(Clone, Debug, PartialEq)]
pub enum ExampleData {
    /// Final solved equilibrium (`data = None`).
    Equilibrium(Equilibrium),
    /// Whole continuation family (`data = Some(All)`).
    Family(EquilibriaFamily),
    /// Outermost flux surface of the final snapshot (`data = Some(Boundary)`).
    Boundary(Surface),
    /// A named profile of the final snapshot, `None` when the solve stored none.
    Profile(Option<Profile>),
}

impl ExampleData {
    pub fn into_equilibrium(self) -> Option<Equilibrium> {
        match self {
            ExampleData::Equilibrium(eq) => Some(eq),
            _ => None,
        }
    }

    pub fn into_family(self) -> Option<EquilibriaFamily> {
        match self {
            ExampleData::Family(family) => Some(family),
            _ => None,
        }
    }

    pub fn as_boundary(&self) -> Option<&Surface> {
        match self {
            ExampleData::Boundary(surface) => Some(surface),
            _ => None,
        }
    }

    /// The profile projection: `None` for non-profile variants, `Some(None)`
    /// when the projection ran but the solve stored no such profile.
    pub fn as_profile(&self) -> Option<Option<&Profile>> {
        match self {
            ExampleData::Profile(profile) => Some(profile.as_ref()),
            _ => None,
        }
    }
}
