//! Autocomplete responses: a JSON array of place objects.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// One autocomplete place as returned by the provider.
///
/// Coordinates and bounding box values arrive as numeric strings; plain
/// numbers are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JsonPlace {
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub class: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(default)]
    pub boundingbox: Option<Vec<Value>>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<Map<String, Value>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through, numbers are rendered; anything else is absent.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl JsonPlace {
    /// `address.<key>`, or `None` when the key is missing or not a scalar.
    pub fn address_field(&self, key: &str) -> Option<String> {
        self.address.as_ref()?.get(key).and_then(scalar)
    }

    pub fn latitude(&self) -> Option<f64> {
        number(self.lat.as_ref())
    }

    pub fn longitude(&self) -> Option<f64> {
        number(self.lon.as_ref())
    }

    /// Bounding box values in provider order. Empty when the box is missing
    /// or any of its entries is not a scalar.
    pub fn bounding_box(&self) -> Vec<String> {
        self.boundingbox
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(scalar)
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }

    pub fn is_classified_as(&self, class: &str, kind: &str) -> bool {
        self.class == class && self.kind == kind
    }
}

/// Parse an autocomplete body into its places, in response order.
///
/// The provider answers "no match" with an object carrying an `error` key;
/// that yields an empty list. Any other non-array body is rejected.
pub fn parse_places(body: &str) -> Result<Vec<JsonPlace>> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(items) => {
            let places: Vec<JsonPlace> = items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(place) => Some(place),
                    Err(e) => {
                        warn!("Skipping autocomplete place {}: {}", index, e);
                        None
                    }
                })
                .collect();
            debug!("Parsed {} autocomplete places", places.len());
            Ok(places)
        }
        Value::Object(object) if object.contains_key("error") => {
            debug!("Autocomplete returned no match: {:?}", object.get("error"));
            Ok(Vec::new())
        }
        _ => Err(Error::invalid_server_response(
            "autocomplete response is not a JSON array",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_number_coordinates() {
        let places = parse_places(
            r#"[
                {"lat": "52.5", "lon": "13.4", "class": "place", "type": "city",
                 "boundingbox": ["52.3", "52.6", "13.0", "13.7"],
                 "address": {"name": "Berlin", "postcode": 10115}},
                {"lat": 1.25, "lon": -2, "class": "highway", "type": "residential"}
            ]"#,
        )
        .unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].latitude(), Some(52.5));
        assert_eq!(places[0].longitude(), Some(13.4));
        assert_eq!(places[0].address_field("name").as_deref(), Some("Berlin"));
        assert_eq!(places[0].address_field("postcode").as_deref(), Some("10115"));
        assert_eq!(places[0].bounding_box(), ["52.3", "52.6", "13.0", "13.7"]);
        assert!(places[0].is_classified_as("place", "city"));
        assert_eq!(places[1].latitude(), Some(1.25));
        assert_eq!(places[1].longitude(), Some(-2.0));
        assert!(places[1].bounding_box().is_empty());
        assert_eq!(places[1].address_field("name"), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let places =
            parse_places(r#"[{"lat": null, "lon": "1", "boundingbox": null, "address": null}]"#)
                .unwrap();
        assert_eq!(places[0].latitude(), None);
        assert!(places[0].bounding_box().is_empty());
        assert_eq!(places[0].address_field("city"), None);
        assert_eq!(places[0].kind, "");
    }

    #[test]
    fn non_scalar_box_entry_drops_the_whole_box() {
        let places = parse_places(
            r#"[{"lat": "1", "lon": "2", "boundingbox": ["1", null, "2", "3", "4"]}]"#,
        )
        .unwrap();
        assert!(places[0].bounding_box().is_empty());
    }

    #[test]
    fn null_classification_reads_as_empty() {
        let places = parse_places(
            r#"[
                {"lat": "1", "lon": "2", "class": "place", "type": "city"},
                {"lat": "3", "lon": "4", "class": null, "type": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].class, "");
        assert_eq!(places[1].kind, "");
    }

    #[test]
    fn undecodable_place_is_skipped() {
        let places = parse_places(
            r#"[
                {"lat": "1", "lon": "2", "class": "place", "type": "city"},
                {"lat": "3", "lon": "4", "osm_type": 7},
                {"lat": "5", "lon": "6", "class": "place", "type": "town"}
            ]"#,
        )
        .unwrap();
        assert_eq!(places.len(), 2);
        assert!(places[0].is_classified_as("place", "city"));
        assert!(places[1].is_classified_as("place", "town"));
    }

    #[test]
    fn error_object_means_no_match() {
        let places = parse_places(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_places("[{\"lat\": "),
            Err(Error::MalformedJson { .. })
        ));
        assert!(matches!(
            parse_places(r#"{"places": []}"#),
            Err(Error::InvalidServerResponse { .. })
        ));
    }
}
