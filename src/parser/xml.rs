//! Search and reverse responses: XML documents.

use tracing::debug;

use super::dom::{parse_document, XmlElement};
use crate::error::{Error, Result};

/// A result node paired with the node holding its address parts.
///
/// Search places carry both roles in one `place` element; reverse lookups
/// split them into `result` and `addressparts`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlPlace {
    pub result: XmlElement,
    pub address: XmlElement,
}

/// Parse a search document. A missing `searchresults` root is malformed;
/// a root without `place` children is simply an empty answer.
pub fn parse_search(body: &str) -> Result<Vec<XmlPlace>> {
    let root = parse_document(body).map_err(|e| {
        Error::invalid_server_response(format!("search response is not valid XML: {e}"))
    })?;

    if root.name() != "searchresults" {
        return Err(Error::invalid_server_response(format!(
            "expected <searchresults> root element, found <{}>",
            root.name()
        )));
    }

    let places: Vec<XmlPlace> = root
        .children_named("place")
        .map(|place| XmlPlace {
            result: place.clone(),
            address: place.clone(),
        })
        .collect();
    debug!("Parsed {} search places", places.len());
    Ok(places)
}

/// Parse a reverse document into at most one place.
///
/// Unparsable documents and documents holding an `error` element mean
/// "no match" and yield nothing.
pub fn parse_reverse(body: &str) -> Result<Option<XmlPlace>> {
    let root = match parse_document(body) {
        Ok(root) => root,
        Err(e) => {
            debug!("Reverse response is not valid XML, treating as no match: {}", e);
            return Ok(None);
        }
    };

    if let Some(error) = root.find("error") {
        debug!("Reverse lookup returned an error element: {}", error.text());
        return Ok(None);
    }

    let reverse = root
        .find("reversegeocode")
        .ok_or_else(|| Error::invalid_server_response("missing <reversegeocode> element"))?;
    let address = reverse
        .first_child("addressparts")
        .ok_or_else(|| Error::invalid_server_response("missing <addressparts> element"))?;
    let result = reverse
        .first_child("result")
        .ok_or_else(|| Error::invalid_server_response("missing <result> element"))?;

    Ok(Some(XmlPlace {
        result: result.clone(),
        address: address.clone(),
    }))
}
