//! TLD catalog used to expand base names into candidate domains.
//!
//! The registrar can report the TLDs it sells; without a token, or when that
//! call fails, the built-in popular list is used instead.

use tracing::{debug, warn};

use crate::providers::{build_http_client, VercelProvider};
use crate::types::ResolverConfig;

/// Extensions checked when nothing better is known.
pub const POPULAR_EXTENSIONS: &[&str] = &[
    "com", "net", "org", "io", "co", "dev", "app", "tech", "online", "site", "store", "blog",
    "info",
];

/// Mainstream extensions recommended when an explicit domain is taken.
pub const RECOMMENDED_TLDS: &[&str] = &["com", "net", "org", "io", "co", "dev", "app"];

/// Extensions offered as related alternatives to an explicit domain.
pub const RELATED_TLDS: &[&str] = &[
    "com", "net", "org", "io", "co", "dev", "app", "tech", "online", "site",
];

/// Maximum number of TLDs a base-name search expands to.
pub const MAX_SEARCH_TLDS: usize = 20;

/// The popular extensions as owned strings.
pub fn popular_extensions() -> Vec<String> {
    POPULAR_EXTENSIONS.iter().map(|t| t.to_string()).collect()
}

/// TLDs the registrar supports, or the popular list when unavailable.
///
/// Never fails: a missing token, a transport error or an unexpected payload
/// all fall back to [`POPULAR_EXTENSIONS`].
pub async fn fetch_supported_tlds(config: &ResolverConfig) -> Vec<String> {
    if !config.has_vercel_token() {
        debug!("No registrar token configured, using popular extensions");
        return popular_extensions();
    }

    let provider = match build_http_client(config.timeout)
        .and_then(|client| VercelProvider::new(client, config))
    {
        Ok(provider) => provider,
        Err(e) => {
            warn!(error = %e, "Could not build registrar client, using popular extensions");
            return popular_extensions();
        }
    };

    match provider.supported_tlds().await {
        Ok(tlds) if !tlds.is_empty() => {
            debug!(count = tlds.len(), "Loaded supported TLDs from registrar");
            tlds
        }
        Ok(_) => {
            warn!("Registrar returned no TLDs, using popular extensions");
            popular_extensions()
        }
        Err(e) => {
            warn!(error = %e, "Error fetching supported TLDs, using popular extensions");
            popular_extensions()
        }
    }
}

/// `{base_name}.{tld}` for each related TLD except `exclude_tld`.
pub fn related_domain_suggestions(base_name: &str, exclude_tld: Option<&str>) -> Vec<String> {
    RELATED_TLDS
        .iter()
        .filter(|tld| Some(**tld) != exclude_tld)
        .map(|tld| format!("{}.{}", base_name, tld))
        .collect()
}

/// Recommended TLDs minus `exclude_tld`, in priority order.
pub fn recommended_tlds_excluding(exclude_tld: Option<&str>) -> Vec<String> {
    RECOMMENDED_TLDS
        .iter()
        .filter(|tld| Some(**tld) != exclude_tld)
        .map(|tld| tld.to_string())
        .collect()
}
