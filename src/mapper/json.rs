//! Autocomplete place → canonical address.

use super::MapToAddress;
use crate::error::BuildError;
use crate::models::{AddressBuilder, Bounds, CanonicalAddress};
use crate::parser::JsonPlace;

/// Fill the admin hierarchy from the place classification.
///
/// Rules are checked in order and the first match wins. Level 2 is only
/// considered once level 1 was set from the same record.
fn apply_classification(place: &JsonPlace, builder: &mut AddressBuilder) {
    let field = |key: &str| place.address_field(key);
    let kind = place.kind.as_str();
    let class = place.class.as_str();

    match (class, kind) {
        (_, "state") => {
            builder.admin_level(1, field("name"), None);
        }
        (_, "administrative") => {
            if builder.admin_level(1, field("state"), None) {
                builder.admin_level(2, field("city").or_else(|| field("name")), None);
            }
        }
        (_, "city" | "town" | "village") => {
            builder.locality(field("name"));
            if builder.admin_level(1, field("state"), None) {
                builder.admin_level(2, field("county").or_else(|| field("city")), None);
            }
        }
        ("landuse", "commercial") | ("place", "suburb") => {
            builder.locality(field("name"));
            if builder.admin_level(1, field("state"), None) {
                builder.admin_level(2, field("county"), None);
            }
        }
        _ => {}
    }
}

impl MapToAddress for JsonPlace {
    fn map_to_address(&self) -> Result<CanonicalAddress, BuildError> {
        let mut builder = AddressBuilder::new();

        if let (Some(lat), Some(lon)) = (self.latitude(), self.longitude()) {
            builder.coordinates(lat, lon);
        }

        builder
            .sub_locality(self.address_field("suburb"))
            .country(self.address_field("country"))
            .country_code(self.address_field("country_code"))
            .postal_code(self.address_field("postcode"))
            .bounds(Bounds::from_parts(self.bounding_box()))
            .display_name(self.display_name.clone());

        if self.osm_type.as_deref() == Some("way") {
            builder
                .street_name(self.address_field("name"))
                .street_number(self.address_field("house_number"));
        }

        apply_classification(self, &mut builder);

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::json::parse_places;
    use serde_json::{json, Value};

    fn map(place: Value) -> CanonicalAddress {
        let body = Value::Array(vec![place]).to_string();
        parse_places(&body).unwrap()[0].map_to_address().unwrap()
    }

    fn admin_name(address: &CanonicalAddress, level: u8) -> Option<&str> {
        address.admin_levels().get(level).map(|l| l.name.as_str())
    }

    #[test]
    fn maps_common_fields() {
        let address = map(json!({
            "lat": "52.5170365", "lon": "13.3888599",
            "osm_type": "relation", "class": "boundary", "type": "administrative",
            "boundingbox": ["52.3382448", "52.6755087", "13.0883450", "13.7611609"],
            "display_name": "Berlin, Germany",
            "address": {
                "name": "Berlin", "suburb": "Mitte", "state": "Berlin",
                "postcode": "10117", "country": "Germany", "country_code": "de"
            }
        }));
        assert_eq!(address.coordinates().latitude, 52.5170365);
        assert_eq!(address.coordinates().longitude, 13.3888599);
        assert_eq!(
            address.bounds(),
            Some(Bounds::new(52.3382448, 52.6755087, 13.088345, 13.7611609))
        );
        assert_eq!(address.sub_locality(), Some("Mitte"));
        assert_eq!(address.postal_code(), Some("10117"));
        assert_eq!(address.country(), Some("Germany"));
        assert_eq!(address.country_code(), Some("DE"));
        assert_eq!(address.display_name(), Some("Berlin, Germany"));
        assert_eq!(address.street_name(), None);
        assert_eq!(admin_name(&address, 1), Some("Berlin"));
        assert_eq!(admin_name(&address, 2), Some("Berlin"));
    }

    #[test]
    fn ways_carry_street_fields() {
        let address = map(json!({
            "lat": "40.7", "lon": "-74.0", "osm_type": "way",
            "class": "highway", "type": "residential",
            "address": {"name": "Broadway", "house_number": "1600"}
        }));
        assert_eq!(address.street_name(), Some("Broadway"));
        assert_eq!(address.street_number(), Some("1600"));
        assert!(address.admin_levels().is_empty());
    }

    #[test]
    fn non_ways_never_carry_street_fields() {
        for osm_type in ["node", "relation"] {
            let address = map(json!({
                "lat": "40.7", "lon": "-74.0", "osm_type": osm_type,
                "class": "highway", "type": "residential",
                "address": {"name": "Broadway", "house_number": "1600"}
            }));
            assert_eq!(address.street_name(), None);
            assert_eq!(address.street_number(), None);
        }
    }

    #[test]
    fn state_sets_only_level_one() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "boundary", "type": "state",
            "address": {"name": "Bavaria", "county": "Ignored"}
        }));
        assert_eq!(admin_name(&address, 1), Some("Bavaria"));
        assert_eq!(admin_name(&address, 2), None);
    }

    #[test]
    fn administrative_falls_back_to_name() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "boundary", "type": "administrative",
            "address": {"name": "Landkreis München", "state": "Bavaria"}
        }));
        assert_eq!(admin_name(&address, 1), Some("Bavaria"));
        assert_eq!(admin_name(&address, 2), Some("Landkreis München"));
    }

    #[test]
    fn administrative_prefers_city_over_name() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "boundary", "type": "administrative",
            "address": {"name": "Bezirk Mitte", "city": "Berlin", "state": "Berlin"}
        }));
        assert_eq!(admin_name(&address, 1), Some("Berlin"));
        assert_eq!(admin_name(&address, 2), Some("Berlin"));

        let address = map(json!({
            "lat": "1", "lon": "2", "class": "boundary", "type": "administrative",
            "address": {"name": "Altstadt", "city": "Munich", "state": "Bavaria"}
        }));
        assert_eq!(admin_name(&address, 2), Some("Munich"));
    }

    #[test]
    fn towns_set_locality_and_cascade() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "place", "type": "town",
            "address": {"name": "Erding", "state": "Bavaria", "city": "Erding City"}
        }));
        assert_eq!(address.locality(), Some("Erding"));
        assert_eq!(admin_name(&address, 1), Some("Bavaria"));
        assert_eq!(admin_name(&address, 2), Some("Erding City"));

        let address = map(json!({
            "lat": "1", "lon": "2", "class": "place", "type": "village",
            "address": {"name": "Kirchdorf", "state": "Bavaria", "county": "Landkreis Erding", "city": "X"}
        }));
        assert_eq!(admin_name(&address, 2), Some("Landkreis Erding"));
    }

    #[test]
    fn level_two_requires_level_one() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "place", "type": "city",
            "address": {"name": "Springfield", "county": "Greene County"}
        }));
        assert_eq!(address.locality(), Some("Springfield"));
        assert!(address.admin_levels().is_empty());

        let address = map(json!({
            "lat": "1", "lon": "2", "class": "boundary", "type": "administrative",
            "address": {"name": "Somewhere", "city": "Somewhere"}
        }));
        assert!(address.admin_levels().is_empty());
    }

    #[test]
    fn commercial_landuse_and_suburbs_use_county() {
        for (class, kind) in [("landuse", "commercial"), ("place", "suburb")] {
            let address = map(json!({
                "lat": "1", "lon": "2", "class": class, "type": kind,
                "address": {"name": "Park", "state": "Lazio", "county": "Roma", "city": "Rome"}
            }));
            assert_eq!(address.locality(), Some("Park"));
            assert_eq!(admin_name(&address, 1), Some("Lazio"));
            assert_eq!(admin_name(&address, 2), Some("Roma"));
        }
    }

    #[test]
    fn unmatched_classification_leaves_hierarchy_empty() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "landuse", "type": "residential",
            "address": {"name": "Estate", "state": "Lazio"}
        }));
        assert!(address.admin_levels().is_empty());
        assert_eq!(address.locality(), None);
    }

    #[test]
    fn bounding_box_needs_four_values() {
        let address = map(json!({
            "lat": "1", "lon": "2", "class": "x", "type": "y",
            "boundingbox": ["1", "2", "3"]
        }));
        assert_eq!(address.bounds(), None);

        let address = map(json!({
            "lat": "1", "lon": "2", "class": "x", "type": "y",
            "boundingbox": ["1", null, "2", "3", "4"]
        }));
        assert_eq!(address.bounds(), None);
    }

    #[test]
    fn missing_coordinates_fail_the_build() {
        let places = parse_places(r#"[{"lon": "2", "class": "place", "type": "city"}]"#).unwrap();
        assert_eq!(
            places[0].map_to_address(),
            Err(BuildError::MissingCoordinates)
        );
    }

    #[test]
    fn mapping_twice_gives_identical_addresses() {
        let places = parse_places(
            r#"[{"lat": "1", "lon": "2", "osm_type": "way", "class": "place", "type": "city",
                 "address": {"name": "A", "state": "S", "county": "C", "country_code": "it"}}]"#,
        )
        .unwrap();
        assert_eq!(places[0].map_to_address(), places[0].map_to_address());
    }
}
