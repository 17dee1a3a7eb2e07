//! Utility functions for search input handling.
//!
//! This module turns raw search strings into base names and TLDs and does
//! the light validation needed before a name is sent to a provider.

use crate::types::ParsedInput;

/// Split a raw search string into base name and TLD.
///
/// The input is trimmed and lowercased. When it has at least two
/// dot-separated segments and the last one is two or more characters long,
/// that segment is the TLD and everything before it is the base name.
/// Otherwise the whole string is the base name.
///
/// # Example
///
/// ```rust
/// use domainfolio_lib::parse_domain_input;
///
/// let parsed = parse_domain_input("  Example.COM ");
/// assert_eq!(parsed.base_name, "example");
/// assert_eq!(parsed.tld.as_deref(), Some("com"));
/// assert_eq!(parsed.full_domain.as_deref(), Some("example.com"));
/// ```
pub fn parse_domain_input(raw: &str) -> ParsedInput {
    let trimmed = raw.trim().to_lowercase();
    let parts: Vec<&str> = trimmed.split('.').collect();

    if let [head @ .., last] = parts.as_slice() {
        if !head.is_empty() && last.chars().count() >= 2 {
            return ParsedInput {
                base_name: head.join("."),
                has_tld: true,
                tld: Some(last.to_string()),
                full_domain: Some(trimmed.clone()),
            };
        }
    }

    ParsedInput {
        base_name: trimmed,
        has_tld: false,
        tld: None,
        full_domain: None,
    }
}

/// Normalize a TLD given by a user: trimmed, lowercased, leading dot removed.
pub fn normalize_tld(tld: &str) -> String {
    let tld = tld.trim().to_lowercase();
    tld.strip_prefix('.').unwrap_or(&tld).to_string()
}

/// Validate that a base name can be combined with a TLD.
///
/// Allows letters, digits, hyphens and dots (for sub-labels), with no empty
/// labels and no label starting or ending with a hyphen.
pub fn is_valid_base_name(base_name: &str) -> bool {
    if base_name.is_empty() || base_name.len() > 253 {
        return false;
    }

    base_name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_tld() {
        assert_eq!(
            parse_domain_input("example.com"),
            ParsedInput {
                base_name: "example".to_string(),
                has_tld: true,
                tld: Some("com".to_string()),
                full_domain: Some("example.com".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_without_tld() {
        assert_eq!(
            parse_domain_input("example"),
            ParsedInput {
                base_name: "example".to_string(),
                has_tld: false,
                tld: None,
                full_domain: None,
            }
        );
    }

    #[test]
    fn test_parse_multi_label() {
        let parsed = parse_domain_input("a.b.io");
        assert_eq!(parsed.base_name, "a.b");
        assert!(parsed.has_tld);
        assert_eq!(parsed.tld.as_deref(), Some("io"));
        assert_eq!(parsed.full_domain.as_deref(), Some("a.b.io"));
    }

    #[test]
    fn test_parse_short_trailing_segment_is_not_a_tld() {
        let parsed = parse_domain_input("example.c");
        assert!(!parsed.has_tld);
        assert_eq!(parsed.base_name, "example.c");

        let parsed = parse_domain_input("example.");
        assert!(!parsed.has_tld);
        assert_eq!(parsed.base_name, "example.");
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        let parsed = parse_domain_input("  MyBrand.IO\n");
        assert_eq!(parsed.base_name, "mybrand");
        assert_eq!(parsed.full_domain.as_deref(), Some("mybrand.io"));
    }

    #[test]
    fn test_parse_leading_dot_has_empty_base() {
        let parsed = parse_domain_input(".com");
        assert!(parsed.has_tld);
        assert_eq!(parsed.base_name, "");
    }

    #[test]
    fn test_parse_empty() {
        let parsed = parse_domain_input("   ");
        assert!(!parsed.has_tld);
        assert_eq!(parsed.base_name, "");
    }

    #[test]
    fn test_normalize_tld() {
        assert_eq!(normalize_tld(" .COM "), "com");
        assert_eq!(normalize_tld("io"), "io");
    }

    #[test]
    fn test_is_valid_base_name() {
        assert!(is_valid_base_name("example"));
        assert!(is_valid_base_name("my-brand"));
        assert!(is_valid_base_name("shop.example"));

        assert!(!is_valid_base_name(""));
        assert!(!is_valid_base_name("-example"));
        assert!(!is_valid_base_name("example-"));
        assert!(!is_valid_base_name("two words"));
        assert!(!is_valid_base_name("double..dot"));
    }
}
