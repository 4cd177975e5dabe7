//! Forward and reverse query descriptions.

use serde::{Deserialize, Serialize};

use super::address::Coordinates;

pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_REVERSE_ZOOM: u8 = 18;

/// Forward geocoding query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeQuery {
    pub text: String,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Comma separated ISO codes passed as `countrycodes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<String>,
    /// Class/type filter passed as `tag` (autocomplete only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedupe: Option<bool>,
    /// "minLon,minLat,maxLon,maxLat"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewbox: Option<String>,
    /// Use the JSON autocomplete endpoint instead of the XML search endpoint
    #[serde(default)]
    pub autocomplete: bool,
}

impl GeocodeQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_LIMIT,
            locale: None,
            country_codes: None,
            tag: None,
            dedupe: None,
            viewbox: None,
            autocomplete: false,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_country_codes(mut self, codes: impl Into<String>) -> Self {
        self.country_codes = Some(codes.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = Some(dedupe);
        self
    }

    pub fn with_viewbox(mut self, viewbox: impl Into<String>) -> Self {
        self.viewbox = Some(viewbox.into());
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }
}

/// Reverse geocoding query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseQuery {
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub zoom: u8,
}

impl ReverseQuery {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            locale: None,
            zoom: DEFAULT_REVERSE_ZOOM,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }
}
