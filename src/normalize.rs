//! Response body → ordered canonical addresses.

use tracing::{debug, warn};

use crate::error::Result;
use crate::mapper::{keep_place, MapToAddress};
use crate::models::CanonicalAddress;
use crate::parser::{parse_response, RawPlaceRecord, ResponseFamily};

/// Normalize one response body.
///
/// Autocomplete records go through the suburb gate first. Records that
/// cannot be built (no coordinates, bad country code) are logged and left
/// out; the rest keep their response order.
pub fn normalize_response(body: &str, family: ResponseFamily) -> Result<Vec<CanonicalAddress>> {
    let records = parse_response(body, family)?;
    let total = records.len();

    let addresses: Vec<CanonicalAddress> = records
        .into_iter()
        .filter(|record| match record {
            RawPlaceRecord::Json(place) => keep_place(place),
            RawPlaceRecord::Xml(_) => true,
        })
        .enumerate()
        .filter_map(|(index, record)| match record.map_to_address() {
            Ok(address) => Some(address),
            Err(e) => {
                warn!("Skipping {} record {}: {}", family, index, e);
                None
            }
        })
        .collect();

    debug!(
        "Normalized {} of {} {} records",
        addresses.len(),
        total,
        family
    );
    Ok(addresses)
}
