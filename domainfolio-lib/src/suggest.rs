//! Name suggestions and registrar links for search results.

use serde::Serialize;
use url::form_urlencoded;

const SUGGESTION_PREFIXES: &[&str] = &["get", "try", "my", "use", "go"];
const SUGGESTION_SUFFIXES: &[&str] = &["app", "hq", "io", "hub", "pro", "online", "site"];

/// Alternative base names for `base_name`.
///
/// Prefixed variants first, then suffixed variants, then the plural and the
/// `the` form.
pub fn generate_domain_suggestions(base_name: &str) -> Vec<String> {
    let prefixed = SUGGESTION_PREFIXES
        .iter()
        .map(|prefix| format!("{}{}", prefix, base_name));
    let suffixed = SUGGESTION_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", base_name, suffix));

    prefixed
        .chain(suffixed)
        .chain([format!("{}s", base_name), format!("the{}", base_name)])
        .collect()
}

/// A registrar search page for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationLink {
    pub name: &'static str,
    pub url: String,
}

const REGISTRARS: &[(&str, &str)] = &[
    ("Cloudflare", "https://www.cloudflare.com/products/registrar/?domain="),
    ("Spaceship", "https://www.spaceship.com/domains/search?query="),
    ("Porkbun", "https://porkbun.com/checkout/search?q="),
    ("Namecheap", "https://www.namecheap.com/domains/registration/results/?domain="),
    ("Dynadot", "https://www.dynadot.com/domain/search.html?domain="),
];

/// Links to search `domain` at each supported registrar.
pub fn registration_links(domain: &str) -> Vec<RegistrationLink> {
    let encoded: String = form_urlencoded::byte_serialize(domain.as_bytes()).collect();
    REGISTRARS
        .iter()
        .map(|&(name, prefix)| RegistrationLink {
            name,
            url: format!("{}{}", prefix, encoded),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_domain_suggestions_order() {
        let suggestions = generate_domain_suggestions("acme");
        assert_eq!(suggestions.len(), 14);
        assert_eq!(&suggestions[..2], &["getacme", "tryacme"]);
        assert_eq!(suggestions[5], "acmeapp");
        assert_eq!(suggestions[11], "acmesite");
        assert_eq!(&suggestions[12..], &["acmes", "theacme"]);
    }

    #[test]
    fn test_registration_links() {
        let links = registration_links("acme.io");
        assert_eq!(links.len(), 5);
        assert_eq!(links[0].name, "Cloudflare");
        assert_eq!(
            links[0].url,
            "https://www.cloudflare.com/products/registrar/?domain=acme.io"
        );
        assert_eq!(links[2].url, "https://porkbun.com/checkout/search?q=acme.io");
    }

    #[test]
    fn test_registration_links_encode_domain() {
        let links = registration_links("a&b.com");
        assert!(links[4].url.ends_with("?domain=a%26b.com"));
    }
}
