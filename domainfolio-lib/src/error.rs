//! Error handling for provider calls and library configuration.
//!
//! Two error types live here. `ProviderError` describes why a single provider
//! call failed; the resolver absorbs it and moves on to the next provider.
//! `FolioError` covers everything a caller can actually observe: bad
//! configuration, unreadable files, HTTP client construction.

use std::time::Duration;
use thiserror::Error;

use crate::types::ProviderKind;

/// Failure of one provider call.
///
/// Every variant triggers fallback to the next provider in the chain.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider needs a credential that was not configured
    #[error("{provider} is missing {credential}")]
    MissingCredential {
        provider: ProviderKind,
        credential: &'static str,
    },

    /// The provider answered with a non-2xx status
    #[error("{provider} returned HTTP {status}")]
    Http { provider: ProviderKind, status: u16 },

    /// Connection or transport failure
    #[error("{provider} request failed: {message}")]
    Network {
        provider: ProviderKind,
        message: String,
    },

    /// The transport timed out
    #[error("{provider} timed out after {duration:?}")]
    Timeout {
        provider: ProviderKind,
        duration: Duration,
    },

    /// The payload was not the JSON shape we expected
    #[error("{provider} returned a malformed payload: {message}")]
    Parse {
        provider: ProviderKind,
        message: String,
    },
}

impl ProviderError {
    pub fn missing_credential(provider: ProviderKind, credential: &'static str) -> Self {
        Self::MissingCredential {
            provider,
            credential,
        }
    }

    pub fn parse<M: Into<String>>(provider: ProviderKind, message: M) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }

    /// Classify a reqwest failure for `provider`.
    pub fn from_reqwest(provider: ProviderKind, err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider,
                duration: timeout,
            }
        } else if err.is_decode() {
            Self::parse(provider, err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                provider,
                status: status.as_u16(),
            }
        } else {
            Self::Network {
                provider,
                message: err.to_string(),
            }
        }
    }

    /// The provider this error came from.
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::MissingCredential { provider, .. }
            | Self::Http { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Parse { provider, .. } => *provider,
        }
    }

    /// Configuration errors mean the provider was skipped rather than tried.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}

/// Main error type for the library's fallible, caller-visible operations.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Invalid configuration value or file content
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File I/O errors when reading configuration files
    #[error("File error at '{path}': {message}")]
    File { path: String, message: String },

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Invalid base URL in configuration
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FolioError {
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn file<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Http {
            provider: ProviderKind::RapidApi,
            status: 503,
        };
        assert_eq!(err.to_string(), "RapidAPI returned HTTP 503");
        assert_eq!(err.provider(), ProviderKind::RapidApi);
        assert!(!err.is_configuration());

        let err = ProviderError::missing_credential(ProviderKind::Vercel, "an API token");
        assert_eq!(err.to_string(), "Vercel is missing an API token");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_folio_error_display() {
        let err = FolioError::file("/tmp/x.toml", "not found");
        assert_eq!(err.to_string(), "File error at '/tmp/x.toml': not found");
        let err = FolioError::config("bad timeout");
        assert_eq!(err.to_string(), "Configuration error: bad timeout");
    }
}
