//! Quality gate for autocomplete places classified as `place`/`suburb`.
//!
//! The provider returns many generic suburb hits for partial input and
//! classifies one real landmark as a suburb as well. Suburbs are dropped
//! except for the entries below. This is a narrow allow-list for that one
//! place, not a rule to extend to other classifications.

use crate::parser::JsonPlace;

/// A suburb hit that is kept despite its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuburbException {
    pub name: &'static str,
    pub postal_code: &'static str,
}

pub const SUBURB_EXCEPTIONS: &[SuburbException] = &[SuburbException {
    name: "Vatican City",
    postal_code: "00120",
}];

fn is_exception(place: &JsonPlace) -> bool {
    let name = place.address_field("name");
    let postal_code = place.address_field("postcode");
    SUBURB_EXCEPTIONS.iter().any(|exception| {
        name.as_deref() == Some(exception.name)
            || postal_code.as_deref() == Some(exception.postal_code)
    })
}

/// Whether an autocomplete place survives the suburb gate.
pub fn keep_place(place: &JsonPlace) -> bool {
    !place.is_classified_as("place", "suburb") || is_exception(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::json::parse_places;

    fn place(class: &str, kind: &str, name: &str, postcode: &str) -> JsonPlace {
        let body = serde_json::json!([{
            "lat": "1", "lon": "2", "class": class, "type": kind,
            "address": {"name": name, "postcode": postcode}
        }])
        .to_string();
        parse_places(&body).unwrap().remove(0)
    }

    #[test]
    fn drops_generic_suburbs() {
        assert!(!keep_place(&place("place", "suburb", "Mitte", "10115")));
    }

    #[test]
    fn keeps_the_allow_listed_suburb() {
        assert!(keep_place(&place("place", "suburb", "Vatican City", "99999")));
        assert!(keep_place(&place("place", "suburb", "Somewhere", "00120")));
    }

    #[test]
    fn other_classifications_pass() {
        assert!(keep_place(&place("place", "city", "Mitte", "10115")));
        assert!(keep_place(&place("boundary", "suburb", "Mitte", "10115")));
        assert!(keep_place(&place("landuse", "commercial", "Mitte", "10115")));
    }
}
