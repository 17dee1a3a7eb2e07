//! API Ninjas domain availability provider.
//!
//! `GET /v1/domain?domain=...` with an `X-Api-Key` header. The payload carries
//! `{domain, available, creation_date?, registrar?}`; only `available` is used.

use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use super::{available_flag, endpoint, fetch_json, parse_base_url, AvailabilityProvider};
use crate::error::{FolioError, ProviderError};
use crate::types::{DomainSearchResult, ProviderKind, ResolverConfig};

const KIND: ProviderKind = ProviderKind::ApiNinjas;

#[derive(Clone)]
pub struct ApiNinjasProvider {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl ApiNinjasProvider {
    pub fn new(http_client: reqwest::Client, config: &ResolverConfig) -> Result<Self, FolioError> {
        Ok(Self {
            http_client,
            base_url: parse_base_url(&config.api_ninjas_base_url)?,
            api_key: config
                .api_ninjas_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            timeout: config.timeout,
        })
    }

    fn url(&self, domain: &str) -> Url {
        let mut url = endpoint(&self.base_url, &["v1", "domain"]);
        url.query_pairs_mut().append_pair("domain", domain);
        url
    }
}

#[async_trait]
impl AvailabilityProvider for ApiNinjasProvider {
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
            .header("X-Api-Key", api_key);

        let payload = fetch_json(KIND, request, self.timeout).await?;
        Ok(DomainSearchResult::new(domain, available_flag(KIND, &payload)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_uses_query_param() {
        let config = ResolverConfig::default().with_api_ninjas_key("k");
        let provider = ApiNinjasProvider::new(reqwest::Client::new(), &config).unwrap();
        assert_eq!(
            provider.url("my site.io").as_str(),
            "https://api.api-ninjas.com/v1/domain?domain=my+site.io"
        );
        assert!(provider.is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let config = ResolverConfig::default();
        let provider = ApiNinjasProvider::new(reqwest::Client::new(), &config).unwrap();
        assert!(!provider.is_configured());

        let err = provider.check("example.com").await.unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.provider(), ProviderKind::ApiNinjas);
    }
}
