//! LocationIQ provider client and its HTTP plumbing.

mod client;
mod config;
mod endpoint;
mod transport;

pub use client::LocationIq;
pub use config::{ProviderConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use endpoint::{redacted, Endpoints, Region};
pub use transport::{HttpTransport, Transport, TransportResponse};
