//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and environment
//! variables, merging them with proper precedence rules, and applying the
//! result to a [`ResolverConfig`].

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FolioError;
use crate::types::{ProviderKind, ResolverConfig};
use crate::utils::normalize_tld;

/// Configuration loaded from TOML files.
///
/// ```toml
/// [providers]
/// enabled = ["vercel", "apininjas", "rapidapi"]
/// timeout = "10s"
///
/// [vercel]
/// token = "..."
/// team_id = "team_123"
///
/// [api_ninjas]
/// key = "..."
///
/// [rapidapi]
/// key = "..."
/// host = "domains-api.p.rapidapi.com"
///
/// [search]
/// tlds = ["com", "io", "dev"]
/// top_limit = 4
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<ProvidersConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel: Option<VercelConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_ninjas: Option<ApiKeyConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rapidapi: Option<RapidApiConfig>,

    /// Search defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
}

/// Provider chain settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProvidersConfig {
    /// Providers allowed in the chain (priority order is fixed regardless)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,

    /// Per-request timeout (as string, e.g., "5s", "30s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VercelConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiKeyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RapidApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Replaces `https://{host}` as the request base; the host header is unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Search defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchConfig {
    /// TLDs to expand base names over, instead of the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    /// How many highlights to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_limit: Option<usize>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which config files were picked up
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, FolioError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FolioError::file(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            FolioError::file(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| FolioError::config(format!("Failed to parse TOML configuration: {}", e)))?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config < home config < local config; later files win field by field.
    pub fn discover_and_load(&self) -> Result<FileConfig, FolioError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        if self.verbose {
            for path in &loaded_files {
                debug!(path = %path.display(), "Loaded config file");
            }
        }

        Ok(merged_config)
    }

    /// Local configuration file in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domainfolio.toml", "./.domainfolio.toml"]
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
    }

    /// Global configuration file in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domainfolio.toml", "domainfolio.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|p| p.exists())
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domainfolio").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win.
    pub fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            providers: merge_section(lower.providers, higher.providers, |l, h| ProvidersConfig {
                enabled: h.enabled.or(l.enabled),
                timeout: h.timeout.or(l.timeout),
            }),
            vercel: merge_section(lower.vercel, higher.vercel, |l, h| VercelConfig {
                token: h.token.or(l.token),
                team_id: h.team_id.or(l.team_id),
                base_url: h.base_url.or(l.base_url),
            }),
            api_ninjas: merge_section(lower.api_ninjas, higher.api_ninjas, |l, h| ApiKeyConfig {
                key: h.key.or(l.key),
                base_url: h.base_url.or(l.base_url),
            }),
            rapidapi: merge_section(lower.rapidapi, higher.rapidapi, |l, h| RapidApiConfig {
                key: h.key.or(l.key),
                host: h.host.or(l.host),
                base_url: h.base_url.or(l.base_url),
            }),
            search: merge_section(lower.search, higher.search, |l, h| SearchConfig {
                tlds: h.tlds.or(l.tlds),
                top_limit: h.top_limit.or(l.top_limit),
            }),
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), FolioError> {
        if let Some(providers) = &config.providers {
            if let Some(enabled) = &providers.enabled {
                for name in enabled {
                    name.parse::<ProviderKind>()?;
                }
            }

            if let Some(timeout) = &providers.timeout {
                if parse_timeout_string(timeout).is_none() {
                    return Err(FolioError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout
                    )));
                }
            }
        }

        if let Some(rapidapi) = &config.rapidapi {
            if rapidapi.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
                return Err(FolioError::config("RapidAPI host cannot be empty"));
            }
        }

        if let Some(search) = &config.search {
            if let Some(tlds) = &search.tlds {
                if tlds.is_empty() {
                    return Err(FolioError::config("Search TLD list cannot be empty"));
                }
                for tld in tlds {
                    validate_tld(tld)?;
                }
            }

            if search.top_limit == Some(0) {
                return Err(FolioError::config("top_limit must be at least 1"));
            }
        }

        Ok(())
    }
}

fn merge_section<T>(lower: Option<T>, higher: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (lower, higher) {
        (Some(l), Some(h)) => Some(merge(l, h)),
        (l, h) => h.or(l),
    }
}

fn validate_tld(tld: &str) -> Result<(), FolioError> {
    let normalized = normalize_tld(tld);
    if normalized.is_empty() || normalized.contains('.') || normalized.contains(char::is_whitespace) {
        return Err(FolioError::config(format!("Invalid TLD '{}'", tld)));
    }
    Ok(())
}

/// Parse a comma-separated provider list such as `"vercel,rapidapi"`.
pub fn parse_provider_list(raw: &str) -> Result<Vec<ProviderKind>, FolioError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Apply a loaded file configuration on top of `config`.
pub fn apply_file_config(config: &mut ResolverConfig, file: &FileConfig) -> Result<(), FolioError> {
    if let Some(providers) = &file.providers {
        if let Some(enabled) = &providers.enabled {
            config.providers = enabled
                .iter()
                .map(|name| name.parse())
                .collect::<Result<_, _>>()?;
        }
        if let Some(timeout) = &providers.timeout {
            config.timeout = parse_timeout_duration(timeout)?;
        }
    }

    if let Some(vercel) = &file.vercel {
        if vercel.token.is_some() {
            config.vercel.token = vercel.token.clone();
        }
        if vercel.team_id.is_some() {
            config.vercel.team_id = vercel.team_id.clone();
        }
        if let Some(base_url) = &vercel.base_url {
            config.vercel_base_url = base_url.clone();
        }
    }

    if let Some(api_ninjas) = &file.api_ninjas {
        if api_ninjas.key.is_some() {
            config.api_ninjas_key = api_ninjas.key.clone();
        }
        if let Some(base_url) = &api_ninjas.base_url {
            config.api_ninjas_base_url = base_url.clone();
        }
    }

    if let Some(rapidapi) = &file.rapidapi {
        if rapidapi.key.is_some() {
            config.rapidapi_key = rapidapi.key.clone();
        }
        if let Some(host) = &rapidapi.host {
            config.rapidapi_host = host.clone();
        }
        if rapidapi.base_url.is_some() {
            config.rapidapi_base_url = rapidapi.base_url.clone();
        }
    }

    Ok(())
}

/// Environment variable configuration.
///
/// Registrar settings use `DF_*` names; the secondary providers read the
/// conventional server-side key names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub vercel_token: Option<String>,
    pub vercel_team_id: Option<String>,
    pub api_ninjas_key: Option<String>,
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: Option<String>,
    pub providers: Option<Vec<ProviderKind>>,
    pub timeout: Option<Duration>,
    pub tlds: Option<Vec<String>>,
    pub config: Option<String>,
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|name| env::var(name).ok())
}

/// Build an [`EnvConfig`] from any variable lookup.
pub fn env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut env_config = EnvConfig {
        vercel_token: non_empty("DF_VERCEL_TOKEN"),
        vercel_team_id: non_empty("DF_VERCEL_TEAM_ID"),
        api_ninjas_key: non_empty("API_NINJAS_KEY"),
        rapidapi_key: non_empty("RAPIDAPI_KEY"),
        rapidapi_host: non_empty("RAPIDAPI_HOST"),
        config: non_empty("DF_CONFIG"),
        ..Default::default()
    };

    if let Some(raw) = non_empty("DF_PROVIDERS") {
        match parse_provider_list(&raw) {
            Ok(providers) => env_config.providers = Some(providers),
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid DF_PROVIDERS"),
        }
    }

    if let Some(raw) = non_empty("DF_TIMEOUT") {
        match parse_timeout_duration(&raw) {
            Ok(timeout) => env_config.timeout = Some(timeout),
            Err(_) => warn!(value = %raw, "Ignoring invalid DF_TIMEOUT, use format like '5s', '30s', '2m'"),
        }
    }

    if let Some(raw) = non_empty("DF_TLDS") {
        let tlds: Vec<String> = raw
            .split(',')
            .map(normalize_tld)
            .filter(|s| !s.is_empty())
            .collect();
        if !tlds.is_empty() {
            env_config.tlds = Some(tlds);
        }
    }

    env_config
}

/// Apply environment configuration on top of `config`.
pub fn apply_env_config(config: &mut ResolverConfig, env_config: &EnvConfig) {
    if env_config.vercel_token.is_some() {
        config.vercel.token = env_config.vercel_token.clone();
    }
    if env_config.vercel_team_id.is_some() {
        config.vercel.team_id = env_config.vercel_team_id.clone();
    }
    if env_config.api_ninjas_key.is_some() {
        config.api_ninjas_key = env_config.api_ninjas_key.clone();
    }
    if env_config.rapidapi_key.is_some() {
        config.rapidapi_key = env_config.rapidapi_key.clone();
    }
    if let Some(host) = &env_config.rapidapi_host {
        config.rapidapi_host = host.clone();
    }
    if let Some(providers) = &env_config.providers {
        config.providers = providers.clone();
    }
    if let Some(timeout) = env_config.timeout {
        config.timeout = timeout;
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }
}

/// Parse a timeout string into a non-zero [`Duration`].
pub fn parse_timeout_duration(timeout_str: &str) -> Result<Duration, FolioError> {
    match parse_timeout_string(timeout_str) {
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(FolioError::config(format!(
            "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
            timeout_str
        ))),
    }
}
