//! # domainfolio Library
//!
//! Domain availability lookup across several third-party APIs with automatic
//! fallback, plus the helpers a search front end needs: input parsing, TLD
//! expansion, ranking and name suggestions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domainfolio_lib::{AvailabilityResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResolverConfig::default()
//!         .with_vercel("vercel-token", None)
//!         .with_api_ninjas_key("api-ninjas-key");
//!     let resolver = AvailabilityResolver::new(&config)?;
//!
//!     let result = resolver.resolve("example.com").await;
//!     println!("{} available: {}", result.domain, result.available);
//!
//!     let results = resolver.bulk_resolve("example", &["com", "io", "dev"]).await;
//!     for top in domainfolio_lib::rank_top(&results, 4) {
//!         println!("{} {}", top.domain, top.available);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Providers
//!
//! - **Vercel**: registrar API, reports price for available domains
//! - **API Ninjas**: key-based availability lookup
//! - **RapidAPI**: key-based availability lookup
//!
//! Providers are tried in that order; the first answer wins. When all of them
//! fail the lookup still returns `{domain, available: false}`.

// Re-export main public API types and functions
pub use config::{
    apply_env_config, apply_file_config, env_config_from, load_env_config, parse_provider_list,
    parse_timeout_duration, ApiKeyConfig, ConfigManager, EnvConfig, FileConfig, ProvidersConfig,
    RapidApiConfig, SearchConfig, VercelConfig,
};
pub use error::{FolioError, ProviderError};
pub use providers::{build_provider_chain, AvailabilityProvider};
pub use ranking::{rank_top, tld_priority, DEFAULT_TOP_LIMIT};
pub use resolver::{
    bulk_resolve, resolve, AttemptOutcome, AvailabilityResolver, ProviderAttempt, ResolveReport,
};
pub use search::{search, SearchOutcome};
pub use suggest::{generate_domain_suggestions, registration_links, RegistrationLink};
pub use tlds::{
    fetch_supported_tlds, popular_extensions, related_domain_suggestions, MAX_SEARCH_TLDS,
    POPULAR_EXTENSIONS,
};
pub use types::{DomainSearchResult, ParsedInput, ProviderKind, ResolverConfig, VercelCredentials};
pub use utils::{is_valid_base_name, normalize_tld, parse_domain_input};

// Public modules
pub mod providers;

mod config;
mod error;
mod ranking;
mod resolver;
mod search;
mod suggest;
mod tlds;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, FolioError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
