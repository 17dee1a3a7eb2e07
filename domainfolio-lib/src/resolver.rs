//! Availability resolver: the ordered provider chain with fallback.
//!
//! This module provides [`AvailabilityResolver`], which walks the configured
//! providers in priority order and returns the first successful answer. A
//! lookup never fails: when every provider is exhausted the resolver hands
//! back the conservative `{domain, available: false}` result.

use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::error::FolioError;
use crate::providers::{build_provider_chain, AvailabilityProvider};
use crate::types::{DomainSearchResult, ProviderKind, ResolverConfig};

/// What happened when one provider was considered for a lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum AttemptOutcome {
    /// The provider answered; its result was returned
    Succeeded,
    /// The provider was called and failed
    Failed(String),
    /// The provider was not called (missing credentials)
    Skipped(String),
}

/// Record of a single provider attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderAttempt {
    pub provider: ProviderKind,
    pub outcome: AttemptOutcome,
    /// Wall time spent on the call, zero for skipped providers
    pub duration_ms: u64,
}

/// A lookup result together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveReport {
    pub result: DomainSearchResult,

    /// True when no provider answered and `result` is the conservative default
    pub degraded: bool,

    pub attempts: Vec<ProviderAttempt>,
}

impl ResolveReport {
    /// Providers that were actually called, in order.
    pub fn tried_providers(&self) -> Vec<ProviderKind> {
        self.attempts
            .iter()
            .filter(|a| !matches!(a.outcome, AttemptOutcome::Skipped(_)))
            .map(|a| a.provider)
            .collect()
    }

    /// The provider whose answer was returned, if any.
    pub fn answered_by(&self) -> Option<ProviderKind> {
        self.attempts
            .iter()
            .find(|a| a.outcome == AttemptOutcome::Succeeded)
            .map(|a| a.provider)
    }
}

/// Resolves domain availability against an ordered provider chain.
///
/// Cloning is cheap; clones share the same providers and HTTP client.
///
/// # Example
///
/// ```rust,no_run
/// use domainfolio_lib::{AvailabilityResolver, ResolverConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ResolverConfig::default().with_api_ninjas_key("my-key");
///     let resolver = AvailabilityResolver::new(&config)?;
///
///     let result = resolver.resolve("example.com").await;
///     println!("{}: {}", result.domain, result.available);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AvailabilityResolver {
    providers: Arc<Vec<Box<dyn AvailabilityProvider>>>,
}

impl AvailabilityResolver {
    /// Build the provider chain described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `FolioError` if a base URL is invalid or the HTTP client
    /// cannot be constructed. Missing credentials are not an error.
    pub fn new(config: &ResolverConfig) -> Result<Self, FolioError> {
        Ok(Self::from_providers(build_provider_chain(config)?))
    }

    /// Use an explicit provider list, tried in the given order.
    pub fn from_providers(providers: Vec<Box<dyn AvailabilityProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Kinds of the providers in the chain, in priority order.
    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Look up a single domain.
    ///
    /// Always returns a result. `available == false` may mean "unknown" when
    /// every provider failed; use [`resolve_with_report`](Self::resolve_with_report)
    /// to tell the two apart.
    pub async fn resolve(&self, domain: &str) -> DomainSearchResult {
        self.resolve_with_report(domain).await.result
    }

    /// Look up a single domain and record every provider attempt.
    #[instrument(skip(self), fields(providers = self.providers.len()))]
    pub async fn resolve_with_report(&self, domain: &str) -> ResolveReport {
        let mut attempts = Vec::with_capacity(self.providers.len());

        if self.providers.is_empty() {
            warn!(domain, "No providers configured, returning unavailable");
            return ResolveReport {
                result: DomainSearchResult::unknown(domain),
                degraded: true,
                attempts,
            };
        }

        for provider in self.providers.iter() {
            let kind = provider.kind();

            if !provider.is_configured() {
                debug!(provider = kind.id(), "Provider not configured, skipping");
                attempts.push(ProviderAttempt {
                    provider: kind,
                    outcome: AttemptOutcome::Skipped("missing credentials".to_string()),
                    duration_ms: 0,
                });
                continue;
            }

            debug!(provider = kind.id(), domain, "Trying provider");
            let started = Instant::now();
            let outcome = provider.check(domain).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(result) => {
                    info!(provider = kind.id(), domain, available = result.available, "Provider succeeded");
                    attempts.push(ProviderAttempt {
                        provider: kind,
                        outcome: AttemptOutcome::Succeeded,
                        duration_ms,
                    });
                    return ResolveReport {
                        result,
                        degraded: false,
                        attempts,
                    };
                }
                Err(e) if e.is_configuration() => {
                    debug!(provider = kind.id(), error = %e, "Provider skipped");
                    attempts.push(ProviderAttempt {
                        provider: kind,
                        outcome: AttemptOutcome::Skipped(e.to_string()),
                        duration_ms,
                    });
                }
                Err(e) => {
                    warn!(provider = kind.id(), domain, error = %e, "Provider failed, falling back");
                    attempts.push(ProviderAttempt {
                        provider: kind,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                        duration_ms,
                    });
                }
            }
        }

        error!(domain, attempts = attempts.len(), "All providers failed");
        ResolveReport {
            result: DomainSearchResult::unknown(domain),
            degraded: true,
            attempts,
        }
    }

    /// Look up `{base_name}.{tld}` for every TLD concurrently.
    ///
    /// Results come back in the order of `tlds`. A failing TLD degrades to
    /// the conservative default without affecting the others.
    pub async fn bulk_resolve<S: AsRef<str>>(
        &self,
        base_name: &str,
        tlds: &[S],
    ) -> Vec<DomainSearchResult> {
        let domains: Vec<String> = tlds
            .iter()
            .map(|tld| format!("{}.{}", base_name, tld.as_ref()))
            .collect();
        self.resolve_many(&domains).await
    }

    /// Look up a list of fully qualified domains concurrently, preserving order.
    pub async fn resolve_many<S: AsRef<str>>(&self, domains: &[S]) -> Vec<DomainSearchResult> {
        debug!(count = domains.len(), "Resolving domains concurrently");
        join_all(domains.iter().map(|d| self.resolve(d.as_ref()))).await
    }
}

/// Look up one domain with a chain built from `config`.
///
/// An invalid configuration is logged and treated like an empty chain, so
/// this still returns the conservative default instead of an error.
pub async fn resolve(domain: &str, config: &ResolverConfig) -> DomainSearchResult {
    match AvailabilityResolver::new(config) {
        Ok(resolver) => resolver.resolve(domain).await,
        Err(e) => {
            error!(domain, error = %e, "Could not build provider chain");
            DomainSearchResult::unknown(domain)
        }
    }
}

/// Look up `{base_name}.{tld}` for every TLD with a chain built from `config`.
pub async fn bulk_resolve<S: AsRef<str>>(
    base_name: &str,
    tlds: &[S],
    config: &ResolverConfig,
) -> Vec<DomainSearchResult> {
    match AvailabilityResolver::new(config) {
        Ok(resolver) => resolver.bulk_resolve(base_name, tlds).await,
        Err(e) => {
            error!(base_name, error = %e, "Could not build provider chain");
            tlds.iter()
                .map(|tld| DomainSearchResult::unknown(format!("{}.{}", base_name, tld.as_ref())))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider that counts its calls.
    struct Scripted {
        kind: ProviderKind,
        configured: bool,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AvailabilityProvider for Scripted {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn check(&self, domain: &str) -> Result<DomainSearchResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ProviderError::Http {
                    provider: self.kind,
                    status: 500,
                })
            } else {
                Ok(DomainSearchResult::new(domain, true))
            }
        }
    }

    fn scripted(kind: ProviderKind, configured: bool, fail: bool) -> (Box<dyn AvailabilityProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider: Box<dyn AvailabilityProvider> = Box::new(Scripted {
            kind,
            configured,
            fail,
            calls: calls.clone(),
        });
        (provider, calls)
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_skipped_without_call() {
        let (first, first_calls) = scripted(ProviderKind::ApiNinjas, false, false);
        let (second, second_calls) = scripted(ProviderKind::RapidApi, true, false);
        let resolver = AvailabilityResolver::from_providers(vec![first, second]);

        let report = resolver.resolve_with_report("skip.dev").await;
        assert!(!report.degraded);
        assert_eq!(first_calls.load(Ordering::SeqCst), 0);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.tried_providers(), vec![ProviderKind::RapidApi]);
        assert_eq!(report.answered_by(), Some(ProviderKind::RapidApi));
        assert!(matches!(report.attempts[0].outcome, AttemptOutcome::Skipped(_)));
    }

    #[tokio::test]
    async fn test_empty_chain_is_degraded() {
        let resolver = AvailabilityResolver::from_providers(Vec::new());
        let report = resolver.resolve_with_report("nothing.io").await;
        assert!(report.degraded);
        assert!(report.attempts.is_empty());
        assert_eq!(report.result, DomainSearchResult::unknown("nothing.io"));
    }

    #[tokio::test]
    async fn test_report_records_failures_in_order() {
        let (a, _) = scripted(ProviderKind::Vercel, true, true);
        let (b, _) = scripted(ProviderKind::ApiNinjas, true, true);
        let resolver = AvailabilityResolver::from_providers(vec![a, b]);

        let report = resolver.resolve_with_report("down.com").await;
        assert!(report.degraded);
        assert_eq!(report.answered_by(), None);
        assert_eq!(
            report.tried_providers(),
            vec![ProviderKind::Vercel, ProviderKind::ApiNinjas]
        );
        assert_eq!(
            report.attempts[0].outcome,
            AttemptOutcome::Failed("Vercel returned HTTP 500".to_string())
        );
    }

    #[tokio::test]
    async fn test_free_resolve_with_invalid_config_returns_default() {
        let mut config = ResolverConfig::default();
        config.api_ninjas_base_url = "not a url".to_string();
        let result = resolve("broken.org", &config).await;
        assert_eq!(result, DomainSearchResult::unknown("broken.org"));

        let results = bulk_resolve("broken", &["com", "net"], &config).await;
        let domains: Vec<_> = results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["broken.com", "broken.net"]);
        assert!(results.iter().all(|r| !r.available));
    }

    #[test]
    fn test_report_serializes_attempt_status() {
        let attempt = ProviderAttempt {
            provider: ProviderKind::RapidApi,
            outcome: AttemptOutcome::Failed("boom".to_string()),
            duration_ms: 3,
        };
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(json["provider"], "rapidapi");
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["reason"], "boom");
    }
}
