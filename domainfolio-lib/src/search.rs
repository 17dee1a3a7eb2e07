//! Interactive search flow built on the resolver.
//!
//! A search string either names an exact domain ("brand.io") or just a base
//! name ("brand"). Exact domains are checked first and, when not available,
//! padded with mainstream alternatives. Base names are expanded over the TLD
//! catalog.

use serde::Serialize;
use tracing::debug;

use crate::ranking::{rank_top, DEFAULT_TOP_LIMIT};
use crate::resolver::AvailabilityResolver;
use crate::tlds::{recommended_tlds_excluding, MAX_SEARCH_TLDS};
use crate::types::{DomainSearchResult, ParsedInput};
use crate::utils::parse_domain_input;

/// Everything a search produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub parsed: ParsedInput,

    /// All results, explicit domain first when there is one
    pub results: Vec<DomainSearchResult>,

    /// Highlights picked by [`rank_top`]
    pub top: Vec<DomainSearchResult>,
}

/// Run a search for `input`.
///
/// `catalog` is the TLD list used for base-name searches; only its first
/// [`MAX_SEARCH_TLDS`] entries are queried.
pub async fn search<S: AsRef<str>>(
    resolver: &AvailabilityResolver,
    input: &str,
    catalog: &[S],
) -> SearchOutcome {
    let parsed = parse_domain_input(input);

    let results = match (&parsed.full_domain, parsed.has_tld) {
        (Some(full_domain), true) => {
            let main = resolver.resolve(full_domain).await;
            if main.available {
                vec![main]
            } else {
                let alternatives = recommended_tlds_excluding(parsed.tld.as_deref());
                debug!(domain = %full_domain, count = alternatives.len(), "Domain not available, checking alternatives");
                let mut results = vec![main];
                results.extend(resolver.bulk_resolve(&parsed.base_name, &alternatives).await);
                results
            }
        }
        _ if parsed.base_name.is_empty() => Vec::new(),
        _ => {
            let tlds: Vec<&str> = catalog
                .iter()
                .take(MAX_SEARCH_TLDS)
                .map(|t| t.as_ref())
                .collect();
            resolver.bulk_resolve(&parsed.base_name, &tlds).await
        }
    };

    let top = rank_top(&results, DEFAULT_TOP_LIMIT);

    SearchOutcome {
        parsed,
        results,
        top,
    }
}
