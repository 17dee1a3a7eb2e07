//! Availability provider implementations.
//!
//! Each provider wraps one third-party API behind the same
//! [`AvailabilityProvider`] capability and normalizes its payload into a
//! [`DomainSearchResult`]. The resolver only ever sees the trait.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use crate::error::{FolioError, ProviderError};
use crate::types::{DomainSearchResult, ProviderKind, ResolverConfig};

/// API Ninjas domain lookup
pub mod api_ninjas;

/// RapidAPI domains lookup
pub mod rapidapi;

/// Vercel registrar availability and price
pub mod vercel;

pub use api_ninjas::ApiNinjasProvider;
pub use rapidapi::RapidApiProvider;
pub use vercel::VercelProvider;

/// A single availability source in the fallback chain.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Whether the provider has the credentials it needs.
    ///
    /// Unconfigured providers are skipped by the resolver instead of called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Look up `domain` and return the normalized result.
    async fn check(&self, domain: &str) -> Result<DomainSearchResult, ProviderError>;
}

/// Build the HTTP client shared by every provider in a chain.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FolioError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("domainfolio/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Build the ordered provider chain described by `config`.
///
/// Priority is fixed: registrar first (only when a token is supplied), then
/// API Ninjas, then RapidAPI, each only when enabled. Secondary providers are
/// added even without a key; they report themselves unconfigured and the
/// resolver skips them.
pub fn build_provider_chain(
    config: &ResolverConfig,
) -> Result<Vec<Box<dyn AvailabilityProvider>>, FolioError> {
    let client = build_http_client(config.timeout)?;
    let mut chain: Vec<Box<dyn AvailabilityProvider>> = Vec::new();

    if config.is_enabled(ProviderKind::Vercel) {
        if config.has_vercel_token() {
            chain.push(Box::new(VercelProvider::new(client.clone(), config)?));
        } else {
            debug!("No registrar token configured, leaving Vercel out of the chain");
        }
    }

    if config.is_enabled(ProviderKind::ApiNinjas) {
        chain.push(Box::new(ApiNinjasProvider::new(client.clone(), config)?));
    }

    if config.is_enabled(ProviderKind::RapidApi) {
        chain.push(Box::new(RapidApiProvider::new(client, config)?));
    }

    Ok(chain)
}

/// Parse a configured base URL, rejecting anything that cannot carry a path.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, FolioError> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(FolioError::config(format!(
            "Base URL '{}' must be an absolute http(s) URL",
            raw
        )));
    }
    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Send a prepared GET request and decode a JSON body.
///
/// Non-2xx statuses, transport failures and undecodable bodies all map to a
/// [`ProviderError`] so the caller can fall back.
pub(crate) async fn fetch_json(
    provider: ProviderKind,
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<serde_json::Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e, timeout))?;

    let status = response.status();
    debug!(provider = provider.id(), status = status.as_u16(), "Provider responded");

    if !status.is_success() {
        return Err(ProviderError::Http {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(provider, e, timeout))?;

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::parse(provider, format!("invalid JSON: {}", e)))
}

/// Read a boolean `available` flag; anything but a literal `true` is false.
pub(crate) fn available_flag(
    provider: ProviderKind,
    payload: &serde_json::Value,
) -> Result<bool, ProviderError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ProviderError::parse(provider, "expected a JSON object"))?;
    Ok(object.get("available").and_then(|v| v.as_bool()) == Some(true))
}
