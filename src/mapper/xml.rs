//! Search/reverse place → canonical address.

use super::MapToAddress;
use crate::error::BuildError;
use crate::models::{AddressBuilder, Bounds, CanonicalAddress};
use crate::parser::XmlPlace;

fn coordinate(place: &XmlPlace, name: &str) -> Option<f64> {
    place.result.attribute(name)?.trim().parse().ok()
}

impl MapToAddress for XmlPlace {
    fn map_to_address(&self) -> Result<CanonicalAddress, BuildError> {
        let text = |name: &str| self.address.first_child_text(name);
        let mut builder = AddressBuilder::new();

        if let (Some(lat), Some(lon)) = (coordinate(self, "lat"), coordinate(self, "lon")) {
            builder.coordinates(lat, lon);
        }
        builder.bounds(self.result.attribute("boundingbox").and_then(Bounds::parse));

        // Independent levels: county is kept even without a state.
        builder.admin_level(1, text("state"), None);
        builder.admin_level(2, text("county"), None);

        let street = text("road")
            .filter(|road| !road.trim().is_empty())
            .or_else(|| text("pedestrian"));

        // Reverse results carry the display name as element text, search
        // places as an attribute.
        let display_name = match self.result.attribute("display_name") {
            Some(name) => Some(name.to_string()),
            None => Some(self.result.text().to_string()),
        };

        builder
            .postal_code(text("postcode"))
            .street_name(street)
            .street_number(text("house_number"))
            .locality(text("city"))
            .sub_locality(text("suburb"))
            .country(text("country"))
            .country_code(text("country_code"))
            .display_name(display_name);

        builder.build()
    }
}
