//! Query server for LocationIQ geocoding.
//!
//! Proxies forward, autocomplete and reverse lookups to LocationIQ and
//! answers with canonical addresses.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use locationiq::provider::Region;
use locationiq::{CanonicalAddress, Coordinates, Error, GeocodeQuery, LocationIq};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "LocationIQ geocoding query server")]
struct Args {
    /// TOML config file with [server] and [provider] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    listen: Option<String>,

    /// LocationIQ API key (overrides the config file)
    #[arg(long, env = "LOCATIONIQ_API_KEY")]
    api_key: Option<String>,

    /// LocationIQ region for search and reverse requests
    #[arg(long)]
    region: Option<Region>,
}

/// Application state shared across handlers
struct AppState {
    provider: LocationIq,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::from_defaults(String::new()),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(api_key) = args.api_key {
        config.provider.api_key = api_key;
    }
    if let Some(region) = args.region {
        config.provider.region = region;
    }

    info!("LocationIQ Query Server");
    let provider = LocationIq::from_config(&config.provider)?;
    match &config.provider.base_url {
        Some(base) => info!("Forwarding requests to {}", base),
        None => info!("Forwarding requests to region {}", config.provider.region),
    }

    let state = Arc::new(AppState { provider });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/search", get(search_handler))
        .route("/v1/autocomplete", get(autocomplete_handler))
        .route("/v1/reverse", get(reverse_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Map provider errors onto HTTP status codes
fn error_response(context: &str, e: Error) -> (StatusCode, String) {
    tracing::error!("{} failed: {}", context, e);
    let status = match e {
        Error::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        Error::InvalidCredentials { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        Error::InvalidServerResponse { .. } | Error::MalformedJson { .. } => {
            StatusCode::BAD_GATEWAY
        }
        Error::Transport { .. } => StatusCode::GATEWAY_TIMEOUT,
        Error::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

fn forward_query(params: SearchQueryParams, autocomplete: bool) -> GeocodeQuery {
    let mut query = GeocodeQuery::new(params.text)
        .with_limit(params.size.unwrap_or(5).min(40))
        .with_autocomplete(autocomplete);
    if let Some(lang) = params.lang {
        query = query.with_locale(lang);
    }
    if let Some(codes) = params.countrycodes {
        query = query.with_country_codes(codes);
    }
    if let Some(tag) = params.tag {
        query = query.with_tag(tag);
    }
    if let Some(dedupe) = params.dedupe {
        query = query.with_dedupe(dedupe);
    }
    if let Some(viewbox) = params.viewbox {
        query = query.with_viewbox(viewbox);
    }
    query
}

/// Forward geocoding search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = forward_query(params, false);
    let features = state
        .provider
        .geocode(&query)
        .await
        .map_err(|e| error_response("Search", e))?;
    Ok(Json(SearchResponse { features }))
}

/// Autocomplete endpoint (JSON upstream)
async fn autocomplete_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = forward_query(params, true);
    let features = state
        .provider
        .geocode(&query)
        .await
        .map_err(|e| error_response("Autocomplete", e))?;
    Ok(Json(SearchResponse { features }))
}

/// Reverse geocoding
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseQueryParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let features = state
        .provider
        .reverse_geocode(
            Coordinates::new(params.lat, params.lon),
            params.lang.as_deref(),
            params.zoom,
        )
        .await
        .map_err(|e| error_response("Reverse geocoding", e))?;
    Ok(Json(SearchResponse { features }))
}

#[derive(Deserialize)]
struct SearchQueryParams {
    /// Search text
    text: String,
    /// Preferred language for results
    lang: Option<String>,
    /// Comma separated ISO country codes
    countrycodes: Option<String>,
    /// Class/type filter, e.g. "place:city" (autocomplete only)
    tag: Option<String>,
    /// Drop duplicate results upstream
    dedupe: Option<bool>,
    /// Bounding box: "minLon,minLat,maxLon,maxLat"
    viewbox: Option<String>,
    /// Number of results
    size: Option<u32>,
}

#[derive(Deserialize)]
struct ReverseQueryParams {
    lat: f64,
    lon: f64,
    /// Preferred language for results
    lang: Option<String>,
    /// Detail level, 3 (country) to 18 (building)
    zoom: Option<u8>,
}

#[derive(Serialize)]
struct SearchResponse {
    features: Vec<CanonicalAddress>,
}
