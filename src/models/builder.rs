//! Accumulates optional address fields for one record and validates them on build.

use tracing::warn;

use super::address::{
    AdminLevel, AdminLevels, Bounds, CanonicalAddress, Coordinates, PROVIDER_NAME,
};
use crate::error::BuildError;

/// Per-record builder; consumed by [`AddressBuilder::build`] so it cannot leak
/// state into the next record.
#[derive(Debug, Default)]
pub struct AddressBuilder {
    coordinates: Option<Coordinates>,
    bounds: Option<Bounds>,
    street_number: Option<String>,
    street_name: Option<String>,
    sub_locality: Option<String>,
    locality: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    admin_levels: Vec<AdminLevel>,
    display_name: Option<String>,
}

/// Empty or whitespace-only source values count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AddressBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinates(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn bounds(&mut self, bounds: Option<Bounds>) -> &mut Self {
        self.bounds = bounds;
        self
    }

    pub fn street_number(&mut self, value: Option<String>) -> &mut Self {
        self.street_number = non_empty(value);
        self
    }

    pub fn street_name(&mut self, value: Option<String>) -> &mut Self {
        self.street_name = non_empty(value);
        self
    }

    pub fn sub_locality(&mut self, value: Option<String>) -> &mut Self {
        self.sub_locality = non_empty(value);
        self
    }

    pub fn locality(&mut self, value: Option<String>) -> &mut Self {
        self.locality = non_empty(value);
        self
    }

    /// Keeps only the first of several `;` separated codes.
    pub fn postal_code(&mut self, value: Option<String>) -> &mut Self {
        self.postal_code = non_empty(value.map(|v| match v.split_once(';') {
            Some((first, _)) => first.to_string(),
            None => v,
        }));
        self
    }

    pub fn country(&mut self, value: Option<String>) -> &mut Self {
        self.country = non_empty(value);
        self
    }

    pub fn country_code(&mut self, value: Option<String>) -> &mut Self {
        self.country_code = non_empty(value).map(|v| v.to_uppercase());
        self
    }

    pub fn display_name(&mut self, value: Option<String>) -> &mut Self {
        self.display_name = non_empty(value);
        self
    }

    /// Set an admin level when a name is available.
    ///
    /// Returns whether the level was set, which the cascading JSON rules
    /// use to decide if the next level may be filled.
    pub fn admin_level(&mut self, level: u8, name: Option<String>, code: Option<String>) -> bool {
        match non_empty(name) {
            Some(name) => {
                self.admin_levels.retain(|l| l.level != level);
                self.admin_levels.push(AdminLevel {
                    level,
                    name,
                    code: non_empty(code),
                });
                true
            }
            None => false,
        }
    }

    pub fn build(mut self) -> Result<CanonicalAddress, BuildError> {
        let coordinates = self.coordinates.ok_or(BuildError::MissingCoordinates)?;
        if !coordinates.latitude.is_finite() || !coordinates.longitude.is_finite() {
            return Err(BuildError::MissingCoordinates);
        }

        // Subdivision codes like "GB-ENG" are not country codes.
        if let Some(code) = &self.country_code {
            if code.chars().count() < 2 || !code.chars().all(char::is_alphabetic) {
                warn!("Dropping invalid country code {:?}", code);
                self.country_code = None;
            }
        }

        let mut admin_levels = AdminLevels::default();
        for entry in self.admin_levels {
            if entry.level == 0 {
                return Err(BuildError::InvalidAdminLevel(entry.level));
            }
            admin_levels.set(entry);
        }

        Ok(CanonicalAddress {
            provided_by: PROVIDER_NAME.to_string(),
            coordinates,
            bounds: self.bounds,
            street_number: self.street_number,
            street_name: self.street_name,
            sub_locality: self.sub_locality,
            locality: self.locality,
            postal_code: self.postal_code,
            country: self.country,
            country_code: self.country_code,
            admin_levels,
            display_name: self.display_name,
        })
    }
}
