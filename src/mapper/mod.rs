//! Mapping raw place records onto the canonical address.
//!
//! JSON places are read by key lookup and fill the admin hierarchy by
//! cascading classification rules; XML places are read by child element and
//! set each admin level independently. Both implement [`MapToAddress`].

pub mod json;
pub mod suburb;
pub mod xml;

use crate::error::BuildError;
use crate::models::CanonicalAddress;
use crate::parser::RawPlaceRecord;

pub use suburb::{keep_place, SuburbException, SUBURB_EXCEPTIONS};

/// Builds one canonical address from one raw record.
pub trait MapToAddress {
    fn map_to_address(&self) -> Result<CanonicalAddress, BuildError>;
}

impl MapToAddress for RawPlaceRecord {
    fn map_to_address(&self) -> Result<CanonicalAddress, BuildError> {
        match self {
            RawPlaceRecord::Json(place) => place.map_to_address(),
            RawPlaceRecord::Xml(place) => place.map_to_address(),
        }
    }
}
