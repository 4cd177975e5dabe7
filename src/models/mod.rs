//! Core data models: the canonical address, its builder and query descriptions.

pub mod address;
pub mod builder;
pub mod query;

pub use address::{AdminLevel, AdminLevels, Bounds, CanonicalAddress, Coordinates};
pub use builder::AddressBuilder;
pub use query::{GeocodeQuery, ReverseQuery};
