//! LocationIQ provider: builds requests, classifies HTTP replies and
//! normalizes the payloads.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use super::config::ProviderConfig;
use super::endpoint::{redacted, Endpoints};
use super::transport::{HttpTransport, Transport, TransportResponse};
use crate::error::{Error, Result};
use crate::models::{CanonicalAddress, Coordinates, GeocodeQuery, ReverseQuery};
use crate::normalize::normalize_response;
use crate::parser::ResponseFamily;

/// Geocoding provider for the LocationIQ API.
pub struct LocationIq<T = HttpTransport> {
    transport: T,
    api_key: String,
    endpoints: Endpoints,
}

fn require_api_key(api_key: String) -> Result<String> {
    if api_key.trim().is_empty() {
        return Err(Error::invalid_credentials("no API key provided"));
    }
    Ok(api_key)
}

impl LocationIq<HttpTransport> {
    /// Provider with default settings for the `us1` region.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&ProviderConfig::new(api_key))
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = require_api_key(config.api_key.clone())?;
        let endpoints = match &config.base_url {
            Some(base) => Endpoints::with_base_url(base)?,
            None => Endpoints::for_region(config.region)?,
        };
        let transport = HttpTransport::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            transport,
            api_key,
            endpoints,
        })
    }
}

impl<T: Transport> LocationIq<T> {
    pub fn with_transport(
        transport: T,
        api_key: impl Into<String>,
        endpoints: Endpoints,
    ) -> Result<Self> {
        let api_key = require_api_key(api_key.into())?;
        Ok(Self {
            transport,
            api_key,
            endpoints,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Forward geocoding. Autocomplete queries use the JSON endpoint,
    /// everything else the XML search endpoint.
    pub async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<CanonicalAddress>> {
        if query.autocomplete {
            let url = self.endpoints.autocomplete_url(&self.api_key, query);
            self.fetch(url, ResponseFamily::JsonAutocomplete).await
        } else {
            let url = self.endpoints.search_url(&self.api_key, query);
            self.fetch(url, ResponseFamily::XmlSearch).await
        }
    }

    /// Reverse geocoding; yields zero or one address.
    pub async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
        locale: Option<&str>,
        zoom: Option<u8>,
    ) -> Result<Vec<CanonicalAddress>> {
        let mut query = ReverseQuery::new(coordinates);
        if let Some(locale) = locale {
            query = query.with_locale(locale);
        }
        if let Some(zoom) = zoom {
            query = query.with_zoom(zoom);
        }
        self.reverse(&query).await
    }

    pub async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<CanonicalAddress>> {
        let url = self.endpoints.reverse_url(&self.api_key, query);
        self.fetch(url, ResponseFamily::XmlReverse).await
    }

    async fn fetch(&self, url: Url, family: ResponseFamily) -> Result<Vec<CanonicalAddress>> {
        let logged = redacted(&url);
        debug!("Requesting {} ({})", logged, family);

        let response = self.transport.get(url).await?;
        match classify_response(&logged, response)? {
            Some(body) => normalize_response(&body, family),
            None => Ok(Vec::new()),
        }
    }
}

/// Map HTTP status onto the error taxonomy. `Ok(None)` is the provider's
/// 404 "Unable to geocode", which means no match.
fn classify_response(url: &str, response: TransportResponse) -> Result<Option<String>> {
    match response.status {
        200..=299 => {}
        401 | 403 => {
            return Err(Error::invalid_credentials(format!(
                "API key rejected with status {}",
                response.status
            )))
        }
        404 => {
            debug!("No match for {}", url);
            return Ok(None);
        }
        429 => return Err(Error::QuotaExceeded),
        status => {
            warn!("Unexpected status {} for {}", status, url);
            return Err(Error::invalid_server_response(format!(
                "status {} for {}",
                status, url
            )));
        }
    }

    if response.body.trim().is_empty() {
        return Err(Error::invalid_server_response(format!(
            "empty body for {}",
            url
        )));
    }
    Ok(Some(response.body))
}
