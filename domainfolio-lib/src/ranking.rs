//! Ranking of search results into a short list of highlights.

use crate::types::DomainSearchResult;

/// How many results `rank_top` keeps by default.
pub const DEFAULT_TOP_LIMIT: usize = 4;

/// Priority given to TLDs missing from the table; larger than every entry.
pub const UNLISTED_TLD_PRIORITY: u32 = 999;

const TLD_PRIORITY: &[(&str, u32)] = &[
    ("com", 1),
    ("net", 2),
    ("org", 3),
    ("io", 4),
    ("co", 5),
    ("dev", 6),
    ("app", 7),
];

/// Display priority of a TLD; lower sorts first.
pub fn tld_priority(tld: &str) -> u32 {
    TLD_PRIORITY
        .iter()
        .find(|(name, _)| *name == tld)
        .map(|(_, priority)| *priority)
        .unwrap_or(UNLISTED_TLD_PRIORITY)
}

/// Pick the `limit` most relevant results.
///
/// Available domains come first, then lower TLD priority. Ties keep their
/// original relative order.
pub fn rank_top(results: &[DomainSearchResult], limit: usize) -> Vec<DomainSearchResult> {
    let mut sorted = results.to_vec();
    // sort_by_key is stable
    sorted.sort_by_key(|r| (!r.available, tld_priority(r.tld())));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(domain: &str, available: bool) -> DomainSearchResult {
        DomainSearchResult::new(domain, available)
    }

    fn domains(results: &[DomainSearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.domain.as_str()).collect()
    }

    #[test]
    fn test_tld_priority_table() {
        assert_eq!(tld_priority("com"), 1);
        assert_eq!(tld_priority("app"), 7);
        assert_eq!(tld_priority("xyz"), UNLISTED_TLD_PRIORITY);
        assert_eq!(tld_priority(""), UNLISTED_TLD_PRIORITY);
    }

    #[test]
    fn test_rank_top_mixed_list() {
        let results = vec![
            result("foo.xyz", true),
            result("foo.com", false),
            result("foo.app", true),
            result("foo.net", false),
            result("foo.io", true),
            result("foo.org", false),
            result("foo.tech", true),
            result("foo.dev", true),
            result("foo.co", false),
            result("foo.net.au", true),
        ];

        let top = rank_top(&results, DEFAULT_TOP_LIMIT);
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|r| r.available));
        assert_eq!(domains(&top), vec!["foo.io", "foo.dev", "foo.app", "foo.xyz"]);
    }

    #[test]
    fn test_rank_top_is_stable_for_unlisted_tlds() {
        let results = vec![
            result("b.xyz", true),
            result("a.tech", true),
            result("c.site", true),
        ];
        let top = rank_top(&results, 10);
        assert_eq!(domains(&top), vec!["b.xyz", "a.tech", "c.site"]);
    }

    #[test]
    fn test_rank_top_unavailable_sorted_by_priority() {
        let results = vec![
            result("x.org", false),
            result("x.com", false),
            result("x.blog", true),
        ];
        let top = rank_top(&results, DEFAULT_TOP_LIMIT);
        assert_eq!(domains(&top), vec!["x.blog", "x.com", "x.org"]);
    }

    #[test]
    fn test_rank_top_edge_limits() {
        assert!(rank_top(&[], DEFAULT_TOP_LIMIT).is_empty());
        assert!(rank_top(&[result("a.com", true)], 0).is_empty());
    }
}
