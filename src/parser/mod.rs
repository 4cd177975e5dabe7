//! Response parsing: detects the family and splits a body into raw place records.

pub mod dom;
pub mod json;
pub mod xml;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use json::JsonPlace;
pub use xml::XmlPlace;

/// The three response shapes the provider returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseFamily {
    JsonAutocomplete,
    XmlSearch,
    XmlReverse,
}

impl fmt::Display for ResponseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFamily::JsonAutocomplete => write!(f, "json-autocomplete"),
            ResponseFamily::XmlSearch => write!(f, "xml-search"),
            ResponseFamily::XmlReverse => write!(f, "xml-reverse"),
        }
    }
}

impl FromStr for ResponseFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json-autocomplete" => Ok(ResponseFamily::JsonAutocomplete),
            "xml-search" => Ok(ResponseFamily::XmlSearch),
            "xml-reverse" => Ok(ResponseFamily::XmlReverse),
            other => Err(format!(
                "unknown response family '{}' (expected json-autocomplete, xml-search or xml-reverse)",
                other
            )),
        }
    }
}

/// One place from a response, still in its source encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPlaceRecord {
    Json(JsonPlace),
    Xml(XmlPlace),
}

/// Split a response body into raw records, in response order.
pub fn parse_response(body: &str, family: ResponseFamily) -> Result<Vec<RawPlaceRecord>> {
    let records = match family {
        ResponseFamily::JsonAutocomplete => json::parse_places(body)?
            .into_iter()
            .map(RawPlaceRecord::Json)
            .collect(),
        ResponseFamily::XmlSearch => xml::parse_search(body)?
            .into_iter()
            .map(RawPlaceRecord::Xml)
            .collect(),
        ResponseFamily::XmlReverse => xml::parse_reverse(body)?
            .into_iter()
            .map(RawPlaceRecord::Xml)
            .collect(),
    };
    Ok(records)
}

/// Guess the family of a stored body: JSON when it starts with `[` or `{`,
/// otherwise XML keyed on the root element name.
pub fn detect_family(body: &str) -> Result<ResponseFamily> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(ResponseFamily::JsonAutocomplete);
    }
    if trimmed.contains("<searchresults") {
        return Ok(ResponseFamily::XmlSearch);
    }
    if trimmed.contains("<reversegeocode") {
        return Ok(ResponseFamily::XmlReverse);
    }
    Err(Error::invalid_server_response(
        "cannot tell which response family this body belongs to",
    ))
}
