//! LocationIQ geocoding provider.
//!
//! Turns the provider's three response shapes (JSON autocomplete, XML
//! search, XML reverse) into one canonical address model, and wraps the
//! HTTP endpoints that produce them.

pub mod error;
pub mod mapper;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod provider;

pub use error::{BuildError, Error, Result};
pub use models::{
    AddressBuilder, AdminLevel, Bounds, CanonicalAddress, Coordinates, GeocodeQuery, ReverseQuery,
};
pub use normalize::normalize_response;
pub use parser::ResponseFamily;
pub use provider::{LocationIq, ProviderConfig};
