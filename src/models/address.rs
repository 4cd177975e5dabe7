//! Canonical address returned for every provider response family.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name reported in `provided_by` for every address this crate builds.
pub const PROVIDER_NAME: &str = "locationiq";

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Bounding box in provider order: south, north, west, east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// Build from exactly four values in provider order.
    ///
    /// Any other count, or a value that is not a number, yields `None`.
    pub fn from_parts<I, S>(parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = parts
            .into_iter()
            .map(|p| p.as_ref().trim().parse::<f64>().ok())
            .collect::<Option<Vec<f64>>>()?;
        match values.as_slice() {
            [south, north, west, east] => Some(Self::new(*south, *north, *west, *east)),
            _ => None,
        }
    }

    /// Parse the comma separated `boundingbox` attribute used by the XML families.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            return None;
        }
        Self::from_parts(value.split(','))
    }
}

/// Single rung of the administrative hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLevel {
    /// 1 = state/region, 2 = county/city
    pub level: u8,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Admin levels keyed and ordered by level number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminLevels(BTreeMap<u8, AdminLevel>);

impl AdminLevels {
    pub(crate) fn set(&mut self, entry: AdminLevel) {
        self.0.insert(entry.level, entry);
    }

    pub fn get(&self, level: u8) -> Option<&AdminLevel> {
        self.0.get(&level)
    }

    pub fn contains(&self, level: u8) -> bool {
        self.0.contains_key(&level)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &AdminLevel> {
        self.0.values()
    }
}

/// Normalized address, independent of the response family it came from.
///
/// Instances are only produced by [`AddressBuilder::build`](super::AddressBuilder::build),
/// which enforces the field invariants; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub(crate) provided_by: String,
    pub(crate) coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sub_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) country_code: Option<String>,
    #[serde(skip_serializing_if = "AdminLevels::is_empty")]
    pub(crate) admin_levels: AdminLevels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) display_name: Option<String>,
}

impl CanonicalAddress {
    pub fn provided_by(&self) -> &str {
        &self.provided_by
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn street_number(&self) -> Option<&str> {
        self.street_number.as_deref()
    }

    pub fn street_name(&self) -> Option<&str> {
        self.street_name.as_deref()
    }

    pub fn sub_locality(&self) -> Option<&str> {
        self.sub_locality.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    /// First postal code only; never contains `;`.
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Upper-cased ISO country code.
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn admin_levels(&self) -> &AdminLevels {
        &self.admin_levels
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
