//! RapidAPI domains provider.
//!
//! `GET https://{host}/domains/{domain}?mode=standard` with the
//! `X-RapidAPI-Key` and `X-RapidAPI-Host` headers. Unlike the other providers
//! the payload reports a string `availability` status.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use super::{endpoint, fetch_json, parse_base_url, AvailabilityProvider};
use crate::error::{FolioError, ProviderError};
use crate::types::{DomainSearchResult, ProviderKind, ResolverConfig};

const KIND: ProviderKind = ProviderKind::RapidApi;

#[derive(Clone)]
pub struct RapidApiProvider {
    http_client: reqwest::Client,
    base_url: Url,
    host: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl RapidApiProvider {
    pub fn new(http_client: reqwest::Client, config: &ResolverConfig) -> Result<Self, FolioError> {
        let host = config.rapidapi_host.trim().to_string();
        if host.is_empty() {
            return Err(FolioError::config("RapidAPI host cannot be empty"));
        }

        let base_url = match &config.rapidapi_base_url {
            Some(base_url) => parse_base_url(base_url)?,
            None => parse_base_url(&format!("https://{}", host))?,
        };

        Ok(Self {
            http_client,
            base_url,
            host,
            api_key: config.rapidapi_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: config.timeout,
        })
    }

    fn url(&self, domain: &str) -> Url {
        let mut url = endpoint(&self.base_url, &["domains", domain]);
        url.query_pairs_mut().append_pair("mode", "standard");
        url
    }
}

#[async_trait]
impl AvailabilityProvider for RapidApiProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn check(&self, domain: &str) -> Result<DomainSearchResult, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::missing_credential(KIND, "an API key"))?;

        let request = self
            .http_client
            .get(self.url(domain))
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", self.host.as_str());

        let payload = fetch_json(KIND, request, self.timeout).await?;
        Ok(DomainSearchResult::new(domain, normalize_availability(&payload)?))
    }
}

/// Map a RapidAPI payload to a boolean.
///
/// `"available"` is available; `"taken"`, `"registered"` and `"unavailable"`
/// are not. Any other status falls back to a boolean `available` field, and
/// to `false` when that is missing too.
pub fn normalize_availability(payload: &serde_json::Value) -> Result<bool, ProviderError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ProviderError::parse(KIND, "expected a JSON object"))?;

    let status = object.get("availability").and_then(|a| a.as_str());

    Ok(match status {
        Some("available") => true,
        Some("taken") | Some("registered") | Some("unavailable") => false,
        _ => object
            .get("available")
            .and_then(|a| a.as_bool())
            .unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_status_strings() {
        assert!(normalize_availability(&json!({"availability": "available"})).unwrap());
        assert!(!normalize_availability(&json!({"availability": "taken"})).unwrap());
        assert!(!normalize_availability(&json!({"availability": "registered"})).unwrap());
        assert!(!normalize_availability(&json!({"availability": "unavailable"})).unwrap());
    }

    #[test]
    fn test_normalize_unknown_status_falls_back_to_flag() {
        assert!(!normalize_availability(&json!({"availability": "pending"})).unwrap());
        assert!(normalize_availability(&json!({"availability": "pending", "available": true})).unwrap());
        assert!(normalize_availability(&json!({"available": true})).unwrap());
        assert!(!normalize_availability(&json!({})).unwrap());
    }

    #[test]
    fn test_known_status_wins_over_flag() {
        let payload = json!({"availability": "taken", "available": true});
        assert!(!normalize_availability(&payload).unwrap());
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        assert!(normalize_availability(&json!("available")).is_err());
    }

    #[test]
    fn test_url_uses_path_segment_and_host() {
        let config = ResolverConfig::default().with_rapidapi_key("k");
        let provider = RapidApiProvider::new(reqwest::Client::new(), &config).unwrap();
        assert_eq!(
            provider.url("example.com").as_str(),
            "https://domains-api.p.rapidapi.com/domains/example.com?mode=standard"
        );
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let mut config = ResolverConfig::default();
        config.rapidapi_host = " ".to_string();
        assert!(RapidApiProvider::new(reqwest::Client::new(), &config).is_err());
    }
}
