//! Vercel registrar API provider.
//!
//! The only provider that reports prices. Availability comes from
//! `/v1/registrar/domains/{domain}/availability`; when a domain is available
//! a second call to `/v1/registrar/domains/{domain}/price` fills in the price.
//! A failed price call never fails the lookup.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

use super::{available_flag, endpoint, fetch_json, parse_base_url, AvailabilityProvider};
use crate::error::{FolioError, ProviderError};
use crate::types::{DomainSearchResult, ProviderKind, ResolverConfig};

const KIND: ProviderKind = ProviderKind::Vercel;

/// Registrar provider authenticated with a bearer token.
#[derive(Clone)]
pub struct VercelProvider {
    http_client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    team_id: Option<String>,
    timeout: Duration,
}

impl VercelProvider {
    /// Create a provider from the registrar section of `config`.
    pub fn new(http_client: reqwest::Client, config: &ResolverConfig) -> Result<Self, FolioError> {
        Ok(Self {
            http_client,
            base_url: parse_base_url(&config.vercel_base_url)?,
            token: config
                .vercel
                .token
                .clone()
                .filter(|t| !t.trim().is_empty()),
            team_id: config
                .vercel
                .team_id
                .clone()
                .filter(|t| !t.trim().is_empty()),
            timeout: config.timeout,
        })
    }

    fn token(&self) -> Result<&str, ProviderError> {
        self.token
            .as_deref()
            .ok_or_else(|| ProviderError::missing_credential(KIND, "an API token"))
    }

    /// Build a registrar URL, appending `teamId` when one is configured.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = endpoint(&self.base_url, segments);
        if let Some(team_id) = &self.team_id {
            url.query_pairs_mut().append_pair("teamId", team_id);
        }
        url
    }

    /// The price endpoint is account-independent and never carries `teamId`.
    fn price_url(&self, domain: &str) -> Url {
        endpoint(&self.base_url, &["v1", "registrar", "domains", domain, "price"])
    }

    async fn get(&self, url: Url) -> Result<serde_json::Value, ProviderError> {
        let request = self.http_client.get(url).bearer_auth(self.token()?);
        fetch_json(KIND, request, self.timeout).await
    }

    /// Fetch the registration price for `domain`.
    pub async fn price(&self, domain: &str) -> Result<(Option<f64>, Option<String>), ProviderError> {
        let payload = self.get(self.price_url(domain)).await?;
        parse_price(&payload)
    }

    /// Fetch the TLDs the registrar can sell, without leading dots.
    pub async fn supported_tlds(&self) -> Result<Vec<String>, ProviderError> {
        let url = self.url(&["v1", "registrar", "tlds", "supported"]);
        let payload = self.get(url).await?;
        parse_supported_tlds(&payload)
    }
}

#[async_trait]
impl AvailabilityProvider for VercelProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn check(&self, domain: &str) -> Result<DomainSearchResult, ProviderError> {
        let url = self.url(&["v1", "registrar", "domains", domain, "availability"]);
        let payload = self.get(url).await?;
        let available = available_flag(KIND, &payload)?;

        let mut result = DomainSearchResult::new(domain, available);

        if available {
            match self.price(domain).await {
                Ok((price, currency)) => {
                    result = result.with_price(price, currency);
                }
                Err(e) => {
                    warn!(domain, error = %e, "Price lookup failed, returning availability only");
                }
            }
        }

        debug!(domain, available, price = ?result.price, "Vercel lookup complete");
        Ok(result)
    }
}

/// Read `{price, currency}` from a price payload.
///
/// `price` may arrive as a number or a numeric string; missing fields are
/// simply absent in the result.
pub fn parse_price(payload: &serde_json::Value) -> Result<(Option<f64>, Option<String>), ProviderError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ProviderError::parse(KIND, "expected a JSON object for price"))?;

    let price = match object.get("price") {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let currency = object
        .get("currency")
        .and_then(|c| c.as_str())
        .map(String::from);

    Ok((price, currency))
}

/// Read the supported TLD list: a JSON array of strings, leading dots removed.
pub fn parse_supported_tlds(payload: &serde_json::Value) -> Result<Vec<String>, ProviderError> {
    let items = payload
        .as_array()
        .ok_or_else(|| ProviderError::parse(KIND, "expected a JSON array of TLDs"))?;

    Ok(items
        .iter()
        .filter_map(|item| item.as_str())
        .map(|tld| tld.strip_prefix('.').unwrap_or(tld).to_string())
        .filter(|tld| !tld.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider(team_id: Option<&str>) -> VercelProvider {
        let config = ResolverConfig::default().with_vercel("secret", team_id.map(String::from));
        VercelProvider::new(reqwest::Client::new(), &config).unwrap()
    }

    #[test]
    fn test_url_without_team() {
        let url = provider(None).url(&["v1", "registrar", "domains", "example.com", "availability"]);
        assert_eq!(
            url.as_str(),
            "https://api.vercel.com/v1/registrar/domains/example.com/availability"
        );
    }

    #[test]
    fn test_url_with_team() {
        let url = provider(Some("team_42")).url(&["v1", "registrar", "domains", "example.com", "availability"]);
        assert_eq!(
            url.as_str(),
            "https://api.vercel.com/v1/registrar/domains/example.com/availability?teamId=team_42"
        );
    }

    #[test]
    fn test_price_url_omits_team() {
        let url = provider(Some("team_42")).price_url("example.com");
        assert_eq!(
            url.as_str(),
            "https://api.vercel.com/v1/registrar/domains/example.com/price"
        );
    }

    #[test]
    fn test_blank_team_id_is_dropped() {
        let url = provider(Some("  ")).url(&["v1", "registrar", "tlds", "supported"]);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(
            parse_price(&json!({"price": 20, "currency": "USD"})).unwrap(),
            (Some(20.0), Some("USD".to_string()))
        );
        assert_eq!(
            parse_price(&json!({"price": "9.99"})).unwrap(),
            (Some(9.99), None)
        );
        assert_eq!(parse_price(&json!({})).unwrap(), (None, None));
        assert!(parse_price(&json!("20")).is_err());
    }

    #[test]
    fn test_parse_supported_tlds_strips_dots() {
        let tlds = parse_supported_tlds(&json!(["com", ".net", "", 7, ".io"])).unwrap();
        assert_eq!(tlds, vec!["com", "net", "io"]);
        assert!(parse_supported_tlds(&json!({"tlds": []})).is_err());
    }

    #[test]
    fn test_unconfigured_without_token() {
        let config = ResolverConfig::default();
        let provider = VercelProvider::new(reqwest::Client::new(), &config).unwrap();
        assert!(!provider.is_configured());
        assert!(provider.token().unwrap_err().is_configuration());
    }
}
