//! user-scout - username and email availability scanning
//!
//! Checks a username or email address across a catalog of public sites,
//! optionally expanding a pattern like `john[0-9]{1-2}` into a batch of
//! candidates first.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use user_scout::{
    categories, find_site, sites_for, sites_in_category, Category, OutputFormat,
    Pattern, Printer, ScanConfig, ScanResult, Scanner, Site, TargetKind,
};

/// Shuffling materializes the full candidate set first, so cap how much a
/// pattern may expand to before refusing.
const MAX_SHUFFLE_CANDIDATES: u128 = 1_000_000;

/// Scan usernames and email addresses across public sites
#[derive(Parser, Debug)]
#[command(name = "user-scout")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("target").args(["username", "email"]),
))]
struct Cli {
    /// Username to scan across platforms
    #[arg(short, long)]
    username: Option<String>,

    /// Email address to scan across platforms
    #[arg(short, long)]
    email: Option<String>,

    /// Scan only the platforms in one category
    #[arg(short, long)]
    category: Option<String>,

    /// Scan a single site by name
    #[arg(short, long)]
    site: Option<String>,

    /// List available sites by category
    #[arg(short, long)]
    list: bool,

    /// Treat the target as an expansion pattern (e.g. 'john[0-9]{1-2}')
    #[arg(short, long)]
    permute: bool,

    /// Scan expanded candidates in random order
    #[arg(short, long)]
    random_order: bool,

    /// Maximum number of candidates expanded from a pattern
    #[arg(long, default_value_t = 100)]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// Show each site's profile URL next to the result
    #[arg(long)]
    show_url: bool,

    /// File of proxies (host:port per line) rotated across requests
    #[arg(long)]
    proxy_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Maximum concurrent requests
    #[arg(long, default_value_t = 20)]
    concurrency: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("user_scout=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("user_scout=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    user_scout::init()?;

    if cli.list {
        list_sites(cli.category.as_deref())?;
        return Ok(());
    }

    let (kind, target) = match (&cli.username, &cli.email) {
        (Some(username), None) => (TargetKind::Username, username.clone()),
        (None, Some(email)) => (TargetKind::Email, email.clone()),
        _ => bail!("provide a target with --username or --email (or use --list)"),
    };

    let sites = select_sites(kind, cli.site.as_deref(), cli.category.as_deref())?;
    let candidates = build_candidates(kind, &target, &cli)?;
    warn_special_characters(kind, &candidates, &sites);

    let config = ScanConfig {
        concurrency: cli.concurrency.max(1),
        timeout: Duration::from_secs(cli.timeout.max(1)),
        proxy_file: cli.proxy_file.clone(),
    }
    .with_env_overrides();
    let scanner = Scanner::with_config(config)?;

    run_scan(&scanner, &sites, &candidates, &cli).await;
    Ok(())
}

/// Expand the target into the candidate list to scan. Email patterns apply
/// to the local part only; the domain is reattached after expansion.
fn build_candidates(kind: TargetKind, target: &str, cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.permute {
        return Ok(vec![target.to_string()]);
    }

    let (pattern_source, domain_suffix) = match kind {
        TargetKind::Username => (target.to_string(), String::new()),
        TargetKind::Email => {
            let (local, domain) = target
                .rsplit_once('@')
                .context("email pattern must contain '@' (pattern applies to the local part)")?;
            (local.to_string(), format!("@{domain}"))
        }
    };

    let pattern = Pattern::parse(&pattern_source)?;
    let total = pattern.cardinality();
    if total == 0 {
        bail!("pattern '{pattern_source}' expands to no candidates");
    }

    let mut candidates: Vec<String> = if cli.random_order {
        if total > MAX_SHUFFLE_CANDIDATES {
            bail!(
                "pattern expands to {total} candidates; too many to shuffle \
                 (max {MAX_SHUFFLE_CANDIDATES}). Drop --random-order or narrow the pattern"
            );
        }
        let mut all = user_scout::expand_random(&pattern_source)?;
        all.truncate(cli.limit);
        all
    } else {
        pattern.candidates().take(cli.limit).collect()
    };

    if !domain_suffix.is_empty() {
        for candidate in &mut candidates {
            candidate.push_str(&domain_suffix);
        }
    }

    if cli.output == OutputFormat::Console {
        println!(
            "{}",
            format!(
                "[+] Generated {} candidate(s) from pattern ({} total match)",
                candidates.len(),
                total
            )
            .cyan()
        );
    }

    Ok(candidates)
}

fn select_sites(
    kind: TargetKind,
    site: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<Vec<&'static Site>> {
    if let Some(name) = site {
        let site = find_site(name, kind)
            .with_context(|| format!("no {kind} site named '{name}' (try --list)"))?;
        return Ok(vec![site]);
    }
    if let Some(name) = category {
        let category: Category = name
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{e} (try --list)"))?;
        let sites = sites_in_category(category, kind);
        if sites.is_empty() {
            bail!("category '{category}' has no {kind} sites");
        }
        return Ok(sites);
    }
    Ok(sites_for(kind))
}

/// Several social endpoints silently mangle identifiers with characters
/// outside their allowed set, so flag those up front.
fn warn_special_characters(kind: TargetKind, candidates: &[String], sites: &[&Site]) {
    if kind != TargetKind::Username {
        return;
    }
    if !sites.iter().any(|s| s.category == Category::Social) {
        return;
    }
    for candidate in candidates {
        if candidate
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            eprintln!(
                "{}",
                format!(
                    "[!] Username '{candidate}' contains special characters \
                     some social platforms reject"
                )
                .red()
            );
        }
    }
}

fn list_sites(category: Option<&str>) -> anyhow::Result<()> {
    let wanted = match category {
        Some(name) => Some(
            name.parse::<Category>()
                .map_err(|e: String| anyhow::anyhow!("{e} (try --list with no category)"))?,
        ),
        None => None,
    };

    for kind in [TargetKind::Username, TargetKind::Email] {
        println!("{}", format!("\n### {kind} sites ###").bold());
        for cat in categories(kind) {
            if wanted.is_some_and(|w| w != cat) {
                continue;
            }
            println!("{}", format!("\n== {} SITES ==", cat.as_str().to_uppercase()).magenta());
            for site in sites_in_category(cat, kind) {
                println!("  - {}", site.name);
            }
        }
    }
    Ok(())
}

async fn run_scan(scanner: &Scanner, sites: &[&Site], candidates: &[String], cli: &Cli) {
    let mut printer = Printer::new(cli.output, cli.show_url);
    printer.print_start();

    let progress = if cli.output == OutputFormat::Console && candidates.len() > 1 {
        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} candidates {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let emit = |line: String| match &progress {
        Some(bar) => bar.println(line),
        None => println!("{line}"),
    };

    for candidate in candidates {
        if let Some(bar) = &progress {
            bar.set_message(candidate.clone());
        }

        let results = scanner.check_sites(sites, candidate).await;
        render_batch(&mut printer, &results, &emit);

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    printer.print_end();

    if cli.output == OutputFormat::Console {
        let metrics = scanner.metrics_snapshot();
        println!(
            "{}",
            format!(
                "\nChecked {} endpoint(s), {} error(s), avg {:.0} ms per check",
                metrics.probes_dispatched,
                metrics.errors_encountered,
                metrics.avg_check_time_ms()
            )
            .dimmed()
        );
    }
}

/// Print one batch of results, with category banners when the batch spans
/// more than one category.
fn render_batch(printer: &mut Printer, results: &[ScanResult], emit: &dyn Fn(String)) {
    let multi_category = results
        .windows(2)
        .any(|pair| pair[0].category != pair[1].category);

    let mut current_category: Option<&str> = None;
    for result in results {
        if multi_category && current_category != Some(result.category.as_str()) {
            current_category = Some(result.category.as_str());
            if let Some(header) = printer.render_category_header(&result.category) {
                emit(header);
            }
        }
        emit(printer.render_result(result));
    }
}
