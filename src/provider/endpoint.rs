//! Request URL construction for the three LocationIQ endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::models::{GeocodeQuery, ReverseQuery};

const AUTOCOMPLETE_BASE: &str = "https://api.locationiq.com/v1/";

/// Data center serving search and reverse requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us1,
    Eu1,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Us1, Region::Eu1];
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us1 => write!(f, "us1"),
            Region::Eu1 => write!(f, "eu1"),
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.to_string() == s)
            .ok_or_else(|| format!("unknown region '{}' (expected us1 or eu1)", s))
    }
}

/// Resolved endpoint URLs; query parameters are added per request.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    search: Url,
    reverse: Url,
    autocomplete: Url,
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn directory(base: &str) -> Result<Url> {
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{}/", base))?)
    }
}

impl Endpoints {
    pub fn for_region(region: Region) -> Result<Self> {
        let base = directory(&format!("https://{}.locationiq.com/v1", region))?;
        let autocomplete = directory(AUTOCOMPLETE_BASE)?;
        Ok(Self {
            search: base.join("search.php")?,
            reverse: base.join("reverse.php")?,
            autocomplete: autocomplete.join("autocomplete.php")?,
        })
    }

    /// Serve all three endpoints from one base, e.g. a proxy or a test server.
    pub fn with_base_url(base: &str) -> Result<Self> {
        let base = directory(base)?;
        Ok(Self {
            search: base.join("search.php")?,
            reverse: base.join("reverse.php")?,
            autocomplete: base.join("autocomplete.php")?,
        })
    }

    pub fn search_url(&self, api_key: &str, query: &GeocodeQuery) -> Url {
        let mut url = self.search.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", api_key)
                .append_pair("q", &query.text)
                .append_pair("format", "xml")
                .append_pair("addressdetails", "1")
                .append_pair("limit", &query.limit.to_string());
            append_common(&mut pairs, query);
        }
        url
    }

    pub fn autocomplete_url(&self, api_key: &str, query: &GeocodeQuery) -> Url {
        let mut url = self.autocomplete.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", api_key)
                .append_pair("q", &query.text)
                .append_pair("limit", &query.limit.to_string());
            append_common(&mut pairs, query);
            if let Some(tag) = &query.tag {
                pairs.append_pair("tag", tag);
            }
        }
        url
    }

    pub fn reverse_url(&self, api_key: &str, query: &ReverseQuery) -> Url {
        let mut url = self.reverse.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", api_key)
                .append_pair("lat", &query.coordinates.latitude.to_string())
                .append_pair("lon", &query.coordinates.longitude.to_string())
                .append_pair("format", "xml")
                .append_pair("addressdetails", "1")
                .append_pair("zoom", &query.zoom.to_string());
            if let Some(locale) = &query.locale {
                pairs.append_pair("accept-language", locale);
            }
        }
        url
    }
}

fn append_common(
    pairs: &mut url::form_urlencoded::Serializer<'_, url::UrlQuery<'_>>,
    query: &GeocodeQuery,
) {
    if let Some(locale) = &query.locale {
        pairs.append_pair("accept-language", locale);
    }
    if let Some(codes) = &query.country_codes {
        pairs.append_pair("countrycodes", codes);
    }
    if let Some(dedupe) = query.dedupe {
        pairs.append_pair("dedupe", if dedupe { "1" } else { "0" });
    }
    if let Some(viewbox) = &query.viewbox {
        pairs.append_pair("viewbox", viewbox);
    }
}

/// Request URL with the API key masked, for logging.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use std::collections::HashMap;

    fn params(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn region_names_match_their_serde_form() {
        for region in Region::ALL {
            let name = region.to_string();
            assert_eq!(name.parse::<Region>(), Ok(region));
            assert_eq!(serde_json::to_value(region).unwrap(), name.as_str());
        }
        assert!("EU1".parse::<Region>().is_err());
        assert!("ap1".parse::<Region>().is_err());
    }

    #[test]
    fn region_endpoints() {
        let endpoints = Endpoints::for_region(Region::Eu1).unwrap();
        let url = endpoints.search_url("k", &GeocodeQuery::new("x"));
        assert_eq!(url.host_str(), Some("eu1.locationiq.com"));
        assert_eq!(url.path(), "/v1/search.php");

        let url = endpoints.autocomplete_url("k", &GeocodeQuery::new("x"));
        assert_eq!(url.host_str(), Some("api.locationiq.com"));
        assert_eq!(url.path(), "/v1/autocomplete.php");
    }

    #[test]
    fn base_url_keeps_its_path() {
        let endpoints = Endpoints::with_base_url("http://localhost:8080/proxy/v1").unwrap();
        let url = endpoints.reverse_url("k", &ReverseQuery::new(Coordinates::new(1.0, 2.0)));
        assert_eq!(url.path(), "/proxy/v1/reverse.php");
    }

    #[test]
    fn search_parameters() {
        let endpoints = Endpoints::for_region(Region::Us1).unwrap();
        let query = GeocodeQuery::new("10 Downing St, London")
            .with_limit(3)
            .with_locale("en")
            .with_country_codes("gb")
            .with_dedupe(true)
            .with_viewbox("-0.2,51.4,0,51.6")
            .with_tag("place:city");
        let p = params(&endpoints.search_url("secret", &query));
        assert_eq!(p["key"], "secret");
        assert_eq!(p["q"], "10 Downing St, London");
        assert_eq!(p["format"], "xml");
        assert_eq!(p["addressdetails"], "1");
        assert_eq!(p["limit"], "3");
        assert_eq!(p["accept-language"], "en");
        assert_eq!(p["countrycodes"], "gb");
        assert_eq!(p["dedupe"], "1");
        assert_eq!(p["viewbox"], "-0.2,51.4,0,51.6");
        assert!(!p.contains_key("tag"));
    }

    #[test]
    fn autocomplete_parameters() {
        let endpoints = Endpoints::for_region(Region::Us1).unwrap();
        let query = GeocodeQuery::new("Ber").with_tag("place:city").with_dedupe(false);
        let p = params(&endpoints.autocomplete_url("secret", &query));
        assert_eq!(p["q"], "Ber");
        assert_eq!(p["limit"], "5");
        assert_eq!(p["tag"], "place:city");
        assert_eq!(p["dedupe"], "0");
        assert!(!p.contains_key("format"));
        assert!(!p.contains_key("accept-language"));
    }

    #[test]
    fn reverse_parameters() {
        let endpoints = Endpoints::for_region(Region::Us1).unwrap();
        let query = ReverseQuery::new(Coordinates::new(48.85, 2.35))
            .with_zoom(10)
            .with_locale("fr");
        let p = params(&endpoints.reverse_url("secret", &query));
        assert_eq!(p["lat"], "48.85");
        assert_eq!(p["lon"], "2.35");
        assert_eq!(p["zoom"], "10");
        assert_eq!(p["format"], "xml");
        assert_eq!(p["accept-language"], "fr");
    }

    #[test]
    fn redaction_masks_only_the_key() {
        let endpoints = Endpoints::for_region(Region::Us1).unwrap();
        let url = endpoints.search_url("secret", &GeocodeQuery::new("Paris"));
        let logged = redacted(&url);
        assert!(!logged.contains("secret"));
        assert!(logged.contains("q=Paris"));
    }
}
