//! Terminal display logic for the domainfolio CLI.
//!
//! Colored result lines, the highlighted picks of a search, provider
//! reports, a spinner and summaries. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use domainfolio_lib::{
    AttemptOutcome, DomainSearchResult, ProviderKind, RegistrationLink, ResolveReport,
    SearchOutcome,
};
use std::time::Duration;
use tokio::sync::oneshot;

const DOMAIN_WIDTH: usize = 30;

// ── Progress ─────────────────────────────────────────────────────────────────

const FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Progress indicator shown on stderr while a search fans out to providers.
///
/// Dropping it without calling [`finish`](Self::finish) also stops the
/// animation, because the closed channel ends the render loop.
pub struct Spinner {
    stop: Option<oneshot::Sender<()>>,
    render: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(label: String) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();

        let render = tokio::spawn(async move {
            let term = Term::stderr();
            for frame in FRAMES.iter().cycle() {
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).magenta(), style(&label).dim()));
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = tokio::time::sleep(Duration::from_millis(120)) => {}
                }
            }
            let _ = term.clear_line();
        });

        Self {
            stop: Some(stop),
            render: Some(render),
        }
    }

    /// Stop animating and wait for the line to be cleared.
    pub async fn finish(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(render) = self.render.take() {
            let _ = render.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

pub fn print_header(title: &str, providers: &[ProviderKind]) {
    println!(
        "{} {} {}",
        style("domainfolio").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!("| {}", title)).dim(),
    );

    let providers = if providers.is_empty() {
        "none configured".to_string()
    } else {
        providers
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    };
    println!("{}", style(format!("Providers: {}", providers)).dim());
    println!();
}

// ── Result lines ─────────────────────────────────────────────────────────────

/// Print a single result with status and, when known, the price.
pub fn print_result(result: &DomainSearchResult) {
    let padded_domain = pad_str(&result.domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    if result.available {
        println!(
            "  {}  {}{}",
            style(&padded_domain).white(),
            style("AVAILABLE").green().bold(),
            format_price(result)
                .map(|p| format!("  {}", style(p).dim()))
                .unwrap_or_default(),
        );
    } else {
        println!(
            "  {}  {}",
            style(&padded_domain).white(),
            style("TAKEN").red().bold(),
        );
    }
}

fn format_price(result: &DomainSearchResult) -> Option<String> {
    let price = result.price?;
    Some(match &result.currency {
        Some(currency) => format!("{:.2} {}", price, currency),
        None => format!("{:.2}", price),
    })
}

/// Print a search: highlighted picks first, then everything that was checked.
pub fn print_search(outcome: &SearchOutcome) {
    if outcome.results.is_empty() {
        println!("  {}", style("Nothing to search").dim());
        return;
    }

    println!("  {}", style("── Top picks ").cyan().bold());
    for result in &outcome.top {
        print_result(result);
    }
    println!();

    if outcome.results.len() > outcome.top.len() {
        println!("  {}", style("── All results ").bold());
        for result in &outcome.results {
            print_result(result);
        }
        println!();
    }

    print_summary(&outcome.results);
}

// ── Reports ──────────────────────────────────────────────────────────────────

/// Print which providers were consulted for a lookup.
pub fn print_report(report: &ResolveReport) {
    println!();
    for attempt in &report.attempts {
        let provider_name = attempt.provider.to_string();
        let name = pad_str(&provider_name, 12, Alignment::Left, None);
        match &attempt.outcome {
            AttemptOutcome::Succeeded => println!(
                "    {} {}  {}",
                style("└─").dim(),
                name,
                style(format!("answered in {}ms", attempt.duration_ms)).green(),
            ),
            AttemptOutcome::Failed(reason) => println!(
                "    {} {}  {} {}",
                style("└─").dim(),
                name,
                style("failed").red(),
                style(reason).dim(),
            ),
            AttemptOutcome::Skipped(reason) => println!(
                "    {} {}  {} {}",
                style("└─").dim(),
                name,
                style("skipped").yellow(),
                style(reason).dim(),
            ),
        }
    }

    if report.degraded {
        println!(
            "  {}",
            style("No provider answered; availability is unknown and reported as taken.").yellow()
        );
    }
}

pub fn print_links(links: &[RegistrationLink]) {
    println!();
    println!("  {}", style("Register at:").bold());
    for link in links {
        println!("    {:<12} {}", link.name, style(&link.url).underlined());
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

pub fn print_summary(results: &[DomainSearchResult]) {
    let available = results.iter().filter(|r| r.available).count();
    let taken = results.len() - available;
    println!(
        "Summary: {} checked, {} available, {} taken",
        results.len(),
        style(available).green().bold(),
        style(taken).red(),
    );
}

// ── Catalog and suggestions ──────────────────────────────────────────────────

pub fn print_tlds(tlds: &[String]) {
    println!("{} {}", style("Supported TLDs").bold(), style(format!("({})", tlds.len())).dim());
    for row in tlds.chunks(8) {
        let line: Vec<String> = row
            .iter()
            .map(|t| pad_str(&format!(".{}", t), 10, Alignment::Left, None).into_owned())
            .collect();
        println!("  {}", line.join(""));
    }
}

pub fn print_suggestions(base_name: &str, names: &[String], related: &[String]) {
    println!("{} {}", style("Suggestions for").bold(), style(base_name).cyan());
    for name in names {
        println!("  {}", name);
    }
    println!();
    println!("{}", style("Related domains").bold());
    for domain in related {
        println!("  {}", domain);
    }
}
