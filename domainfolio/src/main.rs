//! domainfolio CLI Application
//!
//! A command-line interface for searching domain availability across
//! registrar and lookup APIs. This binary is a thin front end over the
//! domainfolio-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use console::Term;
use domainfolio_lib::{
    apply_env_config, apply_file_config, fetch_supported_tlds, generate_domain_suggestions,
    is_valid_base_name, load_env_config, normalize_tld, parse_domain_input, parse_provider_list,
    parse_timeout_duration, rank_top, registration_links, related_domain_suggestions, search,
    AvailabilityResolver, ConfigManager, DomainSearchResult, EnvConfig, FileConfig,
    ProviderAttempt, RegistrationLink, ResolverConfig, DEFAULT_TOP_LIMIT,
};
use serde::Serialize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domainfolio
#[derive(Parser, Debug)]
#[command(name = "domainfolio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search domain availability with automatic provider fallback")]
#[command(
    long_about = "Search domain availability across Vercel, API Ninjas and RapidAPI.\n\nProviders are tried in priority order and the first answer wins. When every provider fails the domain is reported as not available."
)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", global = true, help_heading = "Output Format")]
    pub json: bool,

    /// Providers to use, comma-separated (vercel, apininjas, rapidapi)
    #[arg(long = "providers", value_name = "LIST", global = true, help_heading = "Providers")]
    pub providers: Option<String>,

    /// Per-request timeout (e.g. 5s, 30s, 2m)
    #[arg(long = "timeout", value_name = "DURATION", global = true, help_heading = "Providers")]
    pub timeout: Option<String>,

    /// Vercel API token (overrides DF_VERCEL_TOKEN)
    #[arg(long = "vercel-token", value_name = "TOKEN", global = true, help_heading = "Providers")]
    pub vercel_token: Option<String>,

    /// Vercel team id (overrides DF_VERCEL_TEAM_ID)
    #[arg(long = "vercel-team-id", value_name = "ID", global = true, help_heading = "Providers")]
    pub vercel_team_id: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging to stderr
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Configuration")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a base name across TLDs, or an exact domain with alternatives
    Search {
        /// Base name ("brand") or full domain ("brand.io")
        #[arg(value_name = "QUERY")]
        query: String,

        /// TLDs to expand a base name over (comma-separated)
        #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',')]
        tlds: Option<Vec<String>>,

        /// Number of highlighted results
        #[arg(short = 'l', long = "limit", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
        limit: Option<u16>,
    },

    /// Check a single domain
    Check {
        /// Full domain, e.g. example.com
        #[arg(value_name = "DOMAIN")]
        domain: String,

        /// Show which providers were tried and why they failed
        #[arg(long = "report")]
        report: bool,

        /// Show registrar links when the domain is available
        #[arg(long = "links")]
        links: bool,
    },

    /// Check one base name against a list of TLDs
    Bulk {
        /// Base name, e.g. example
        #[arg(value_name = "BASE")]
        base: String,

        /// TLDs to check (comma-separated or multiple -t flags)
        #[arg(short = 't', long = "tld", value_name = "TLD", value_delimiter = ',', action = clap::ArgAction::Append, required = true)]
        tlds: Vec<String>,
    },

    /// List the TLDs a base-name search expands over
    Tlds,

    /// Suggest alternative names without checking them
    Suggest {
        /// Base name or full domain
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// Everything the commands need after config files, environment and flags
/// have been merged.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) resolver: ResolverConfig,
    pub(crate) search_tlds: Option<Vec<String>>,
    pub(crate) top_limit: usize,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    #[serde(flatten)]
    result: DomainSearchResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    degraded: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<Vec<ProviderAttempt>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<RegistrationLink>,
}

#[derive(Debug, Serialize)]
struct SuggestOutput {
    base_name: String,
    names: Vec<String>,
    related: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = validate_args(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "domainfolio=debug,domainfolio_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Validate command-line arguments before any config is loaded.
fn validate_args(cli: &Cli) -> Result<(), String> {
    match &cli.command {
        Command::Search { query, tlds, .. } => {
            if query.trim().is_empty() {
                return Err("Search query cannot be empty".to_string());
            }
            if let Some(tlds) = tlds {
                validate_tld_list(tlds)?;
            }
        }
        Command::Check { domain, .. } => {
            let parsed = parse_domain_input(domain);
            if !parsed.has_tld || !is_valid_base_name(&parsed.base_name) {
                return Err(format!(
                    "'{}' is not a full domain. Expected something like example.com",
                    domain.trim()
                ));
            }
        }
        Command::Bulk { base, tlds } => {
            if !is_valid_base_name(&base.trim().to_lowercase()) {
                return Err(format!("Invalid base name '{}'", base.trim()));
            }
            validate_tld_list(tlds)?;
        }
        Command::Suggest { name } => {
            if parse_domain_input(name).base_name.is_empty() {
                return Err("Name cannot be empty".to_string());
            }
        }
        Command::Tlds => {}
    }

    Ok(())
}

fn validate_tld_list(tlds: &[String]) -> Result<(), String> {
    let normalized = normalize_tld_list(tlds);
    if normalized.is_empty() {
        return Err("At least one TLD is required".to_string());
    }
    if let Some(bad) = normalized
        .iter()
        .find(|t| t.contains('.') || !t.chars().all(|c| c.is_alphanumeric() || c == '-'))
    {
        return Err(format!("Invalid TLD '{}'", bad));
    }
    Ok(())
}

fn normalize_tld_list(tlds: &[String]) -> Vec<String> {
    tlds.iter()
        .map(|t| normalize_tld(t))
        .filter(|t| !t.is_empty())
        .collect()
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::Suggest { name } = &cli.command {
        run_suggest(name, cli.json)?;
        return Ok(());
    }

    let settings = build_settings(&cli)?;
    debug!(providers = ?settings.resolver.providers, timeout = ?settings.resolver.timeout, "Resolved configuration");

    match cli.command {
        Command::Search {
            query,
            tlds,
            limit,
        } => {
            let limit = limit.map(usize::from).unwrap_or(settings.top_limit);
            run_search(&settings, &query, tlds, limit, cli.json).await
        }
        Command::Check {
            domain,
            report,
            links,
        } => run_check(&settings, &domain, report, links, cli.json).await,
        Command::Bulk { base, tlds } => run_bulk(&settings, &base, &tlds, cli.json).await,
        Command::Tlds => run_tlds(&settings, cli.json).await,
        Command::Suggest { .. } => Ok(()),
    }
}

async fn run_search(
    settings: &Settings,
    query: &str,
    cli_tlds: Option<Vec<String>>,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = AvailabilityResolver::new(&settings.resolver)?;
    let parsed = parse_domain_input(query);

    // Exact-domain searches never touch the catalog
    let catalog = if parsed.has_tld {
        Vec::new()
    } else if let Some(tlds) = cli_tlds.as_deref().map(normalize_tld_list) {
        tlds
    } else if let Some(tlds) = &settings.search_tlds {
        tlds.clone()
    } else {
        fetch_supported_tlds(&settings.resolver).await
    };

    let spinner = (!json && Term::stderr().is_term())
        .then(|| ui::Spinner::start(format!("Asking providers about {}", query.trim())));

    let mut outcome = search(&resolver, query, &catalog).await;

    if let Some(spinner) = spinner {
        spinner.finish().await;
    }

    outcome.top = rank_top(&outcome.results, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        ui::print_header(
            &format!("Searching {}", query.trim()),
            &resolver.provider_kinds(),
        );
        ui::print_search(&outcome);
    }

    Ok(())
}

async fn run_check(
    settings: &Settings,
    domain: &str,
    report: bool,
    links: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = AvailabilityResolver::new(&settings.resolver)?;
    let domain = domain.trim().to_lowercase();

    let (result, report) = if report {
        let report = resolver.resolve_with_report(&domain).await;
        (report.result.clone(), Some(report))
    } else {
        (resolver.resolve(&domain).await, None)
    };

    let links = if links && result.available {
        registration_links(&result.domain)
    } else {
        Vec::new()
    };

    if json {
        let output = CheckOutput {
            result,
            degraded: report.as_ref().map(|r| r.degraded),
            attempts: report.map(|r| r.attempts),
            links,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    ui::print_result(&result);
    if let Some(report) = &report {
        ui::print_report(report);
    }
    if !links.is_empty() {
        ui::print_links(&links);
    }

    Ok(())
}

async fn run_bulk(
    settings: &Settings,
    base: &str,
    tlds: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = AvailabilityResolver::new(&settings.resolver)?;
    let base = base.trim().to_lowercase();
    let tlds = normalize_tld_list(tlds);

    let results = resolver.bulk_resolve(&base, &tlds).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        ui::print_header(
            &format!("Checking {} across {} TLDs", base, tlds.len()),
            &resolver.provider_kinds(),
        );
        for result in &results {
            ui::print_result(result);
        }
        ui::print_summary(&results);
    }

    Ok(())
}

async fn run_tlds(settings: &Settings, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tlds = match &settings.search_tlds {
        Some(tlds) => tlds.clone(),
        None => fetch_supported_tlds(&settings.resolver).await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tlds)?);
    } else {
        ui::print_tlds(&tlds);
    }

    Ok(())
}

fn run_suggest(name: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_domain_input(name);
    let output = SuggestOutput {
        names: generate_domain_suggestions(&parsed.base_name),
        related: related_domain_suggestions(&parsed.base_name, parsed.tld.as_deref()),
        base_name: parsed.base_name,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        ui::print_suggestions(&output.base_name, &output.names, &output.related);
    }

    Ok(())
}

/// Build settings with precedence: defaults < config file < environment < CLI flags.
fn build_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let env_config = load_env_config();
    let file_config = load_file_config(cli, &env_config)?;

    let mut resolver = ResolverConfig::default();
    apply_file_config(&mut resolver, &file_config)?;
    apply_env_config(&mut resolver, &env_config);
    apply_cli_args(&mut resolver, cli)?;

    let search = file_config.search.unwrap_or_default();
    let search_tlds = env_config
        .tlds
        .or_else(|| search.tlds.map(|tlds| normalize_tld_list(&tlds)));

    Ok(Settings {
        resolver,
        search_tlds,
        top_limit: search.top_limit.unwrap_or(DEFAULT_TOP_LIMIT),
    })
}

/// An explicit `--config` (or `DF_CONFIG`) must load; discovered files are best effort.
fn load_file_config(
    cli: &Cli,
    env_config: &EnvConfig,
) -> Result<FileConfig, Box<dyn std::error::Error>> {
    let manager = ConfigManager::new(cli.verbose);

    match cli.config.as_ref().or(env_config.config.as_ref()) {
        Some(path) => {
            debug!(path = %path, "Loading explicit config file");
            Ok(manager.load_file(path)?)
        }
        None => Ok(manager.discover_and_load()?),
    }
}

fn apply_cli_args(config: &mut ResolverConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(providers) = &cli.providers {
        let providers = parse_provider_list(providers)?;
        if providers.is_empty() {
            return Err("--providers needs at least one provider".into());
        }
        config.providers = providers;
    }

    if let Some(timeout) = &cli.timeout {
        config.timeout = parse_timeout_duration(timeout)?;
    }

    if let Some(token) = &cli.vercel_token {
        config.vercel.token = Some(token.clone());
    }

    if let Some(team_id) = &cli.vercel_team_id {
        config.vercel.team_id = Some(team_id.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domainfolio_lib::ProviderKind;
    use std::time::Duration;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("domainfolio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = cli(&[
            "check",
            "example.com",
            "--providers",
            "rapidapi,apininjas",
            "--timeout",
            "3s",
            "--vercel-token",
            "tok",
        ]);

        let mut config = ResolverConfig::default();
        apply_cli_args(&mut config, &cli).unwrap();

        assert_eq!(
            config.providers,
            vec![ProviderKind::RapidApi, ProviderKind::ApiNinjas]
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.vercel.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_invalid_cli_values_rejected() {
        let mut config = ResolverConfig::default();
        assert!(apply_cli_args(&mut config, &cli(&["tlds", "--timeout", "soon"])).is_err());
        assert!(apply_cli_args(&mut config, &cli(&["tlds", "--providers", "whois"])).is_err());
        assert!(apply_cli_args(&mut config, &cli(&["tlds", "--providers", ","])).is_err());
    }

    #[test]
    fn test_validate_args() {
        assert!(validate_args(&cli(&["check", "example.com"])).is_ok());
        assert!(validate_args(&cli(&["check", "example"])).is_err());
        assert!(validate_args(&cli(&["bulk", "bad name", "-t", "com"])).is_err());
        assert!(validate_args(&cli(&["bulk", "good", "-t", "com,.io"])).is_ok());
        assert!(validate_args(&cli(&["bulk", "good", "-t", "co.uk"])).is_err());
        assert!(validate_args(&cli(&["search", "  "])).is_err());
    }

    #[test]
    fn test_normalize_tld_list() {
        let tlds = vec![" .COM".to_string(), "".to_string(), "io".to_string()];
        assert_eq!(normalize_tld_list(&tlds), vec!["com", "io"]);
    }
}
