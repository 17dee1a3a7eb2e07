//! Core data types for domain availability lookups.
//!
//! This module defines the result shape shared by every provider, the parsed
//! form of a raw search string, the provider identifiers and the resolver
//! configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FolioError;

/// Result of a single domain availability lookup.
///
/// Produced by exactly one provider call, or by the resolver's conservative
/// default when every provider failed. `available == false` therefore means
/// "taken or unknown", never a confirmed registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSearchResult {
    /// The domain that was looked up (e.g., "example.com")
    pub domain: String,

    /// Whether the domain can be registered
    pub available: bool,

    /// Registration price, only reported by the registrar provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Currency code for `price`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl DomainSearchResult {
    /// Availability without price information.
    pub fn new<D: Into<String>>(domain: D, available: bool) -> Self {
        Self {
            domain: domain.into(),
            available,
            price: None,
            currency: None,
        }
    }

    /// The conservative result returned when no provider could answer.
    pub fn unknown<D: Into<String>>(domain: D) -> Self {
        Self::new(domain, false)
    }

    /// Attach price information.
    pub fn with_price(mut self, price: Option<f64>, currency: Option<String>) -> Self {
        self.price = price;
        self.currency = currency;
        self
    }

    /// The suffix after the last dot, or an empty string if there is none.
    pub fn tld(&self) -> &str {
        self.domain.rsplit('.').next().unwrap_or("")
    }
}

/// A raw search string split into base name and TLD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    /// Everything before the TLD, or the whole input when there is no TLD
    pub base_name: String,

    /// Whether the input carried an explicit TLD
    pub has_tld: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,

    /// The trimmed, lowercased input when it carried a TLD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_domain: Option<String>,
}

/// Identifies one of the supported availability providers.
///
/// Declaration order is the fixed fallback priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Registrar API: availability plus price, needs a bearer token
    Vercel,

    /// Key-based availability lookup
    #[serde(rename = "apininjas")]
    ApiNinjas,

    /// Key-based availability lookup with a string availability enum
    #[serde(rename = "rapidapi")]
    RapidApi,
}

impl ProviderKind {
    /// All providers in priority order.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Vercel,
        ProviderKind::ApiNinjas,
        ProviderKind::RapidApi,
    ];

    /// Stable identifier used in config files and logs.
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Vercel => "vercel",
            ProviderKind::ApiNinjas => "apininjas",
            ProviderKind::RapidApi => "rapidapi",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Vercel => write!(f, "Vercel"),
            ProviderKind::ApiNinjas => write!(f, "API Ninjas"),
            ProviderKind::RapidApi => write!(f, "RapidAPI"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vercel" => Ok(ProviderKind::Vercel),
            "apininjas" | "api-ninjas" | "api_ninjas" => Ok(ProviderKind::ApiNinjas),
            "rapidapi" | "rapid-api" | "rapid_api" => Ok(ProviderKind::RapidApi),
            other => Err(FolioError::config(format!(
                "Unknown provider '{}'. Expected one of: vercel, apininjas, rapidapi",
                other
            ))),
        }
    }
}

/// Credentials for the registrar provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VercelCredentials {
    pub token: Option<String>,
    pub team_id: Option<String>,
}

/// Configuration for building a provider chain.
///
/// Base URLs default to the public APIs and can be pointed elsewhere
/// (a proxy, a staging host).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Providers allowed in the chain. Priority always follows `ProviderKind::ALL`.
    pub providers: Vec<ProviderKind>,

    pub vercel: VercelCredentials,

    /// Key for the API Ninjas domain endpoint
    pub api_ninjas_key: Option<String>,

    /// Key for the RapidAPI domains endpoint
    pub rapidapi_key: Option<String>,

    /// RapidAPI host header and request host
    pub rapidapi_host: String,

    /// Per-request transport timeout
    pub timeout: Duration,

    pub vercel_base_url: String,
    pub api_ninjas_base_url: String,

    /// Overrides `https://{rapidapi_host}` as the request base
    pub rapidapi_base_url: Option<String>,
}

pub const DEFAULT_VERCEL_BASE_URL: &str = "https://api.vercel.com";
pub const DEFAULT_API_NINJAS_BASE_URL: &str = "https://api.api-ninjas.com";
pub const DEFAULT_RAPIDAPI_HOST: &str = "domains-api.p.rapidapi.com";

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            providers: ProviderKind::ALL.to_vec(),
            vercel: VercelCredentials::default(),
            api_ninjas_key: None,
            rapidapi_key: None,
            rapidapi_host: DEFAULT_RAPIDAPI_HOST.to_string(),
            timeout: Duration::from_secs(10),
            vercel_base_url: DEFAULT_VERCEL_BASE_URL.to_string(),
            api_ninjas_base_url: DEFAULT_API_NINJAS_BASE_URL.to_string(),
            rapidapi_base_url: None,
        }
    }
}

impl ResolverConfig {
    /// Restrict the chain to the given providers.
    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.providers = providers;
        self
    }

    /// Set the registrar token and optional team id.
    pub fn with_vercel<T: Into<String>>(mut self, token: T, team_id: Option<String>) -> Self {
        self.vercel = VercelCredentials {
            token: Some(token.into()),
            team_id,
        };
        self
    }

    pub fn with_api_ninjas_key<K: Into<String>>(mut self, key: K) -> Self {
        self.api_ninjas_key = Some(key.into());
        self
    }

    pub fn with_rapidapi_key<K: Into<String>>(mut self, key: K) -> Self {
        self.rapidapi_key = Some(key.into());
        self
    }

    /// Set the transport timeout applied to every provider request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `kind` is allowed in the chain.
    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        self.providers.contains(&kind)
    }

    /// Whether the registrar provider has a usable (non-blank) token.
    pub fn has_vercel_token(&self) -> bool {
        self.vercel
            .token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serialization_omits_missing_price() {
        let result = DomainSearchResult::new("example.com", true);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"domain": "example.com", "available": true})
        );

        let priced = result.with_price(Some(11.25), Some("USD".to_string()));
        let json = serde_json::to_value(&priced).unwrap();
        assert_eq!(json["price"], serde_json::json!(11.25));
        assert_eq!(json["currency"], serde_json::json!("USD"));
    }

    #[test]
    fn test_result_tld() {
        assert_eq!(DomainSearchResult::new("a.b.io", false).tld(), "io");
        assert_eq!(DomainSearchResult::new("plain", false).tld(), "plain");
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("vercel".parse::<ProviderKind>().unwrap(), ProviderKind::Vercel);
        assert_eq!(" API-Ninjas ".parse::<ProviderKind>().unwrap(), ProviderKind::ApiNinjas);
        assert_eq!("rapidapi".parse::<ProviderKind>().unwrap(), ProviderKind::RapidApi);
        assert!("godaddy".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_priority_order() {
        let mut kinds = vec![ProviderKind::RapidApi, ProviderKind::Vercel, ProviderKind::ApiNinjas];
        kinds.sort();
        assert_eq!(kinds, ProviderKind::ALL.to_vec());
    }

    #[test]
    fn test_blank_token_is_not_usable() {
        let config = ResolverConfig::default().with_vercel("   ", None);
        assert!(!config.has_vercel_token());
        let config = ResolverConfig::default().with_vercel("tok", None);
        assert!(config.has_vercel_token());
    }
}
