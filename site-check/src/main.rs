//! Site Check CLI Application
//!
//! A command-line interface for checking website reachability. This CLI
//! provides a user-friendly interface to the site-check-lib library:
//! argument parsing, config precedence (file < env < flags), streaming and
//! batch output, and JSON formatting.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Term;
use futures::StreamExt;
use site_check_lib::{
    expand_url_inputs, load_env_config, parse_timeout_string, read_urls_from_file, CheckConfig,
    ConfigManager, EnvConfig, FileConfig, SiteCheckError, SiteChecker, UrlResult,
};
use std::process;
use std::time::{Duration, Instant};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for site-check
#[derive(Parser, Debug)]
#[command(name = "site-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check website reachability with bounded concurrency")]
#[command(
    long_about = "Probe a list of URLs concurrently and report which are up.\n\nSupports bounded concurrency, per-probe timeouts, an overall deadline with partial results, and multiple output formats."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// URLs to check (bare hosts are normalized to https://)
    #[arg(value_name = "URLS", help_heading = "URL Selection")]
    pub urls: Vec<String>,

    /// Input file with URLs (one per line, # for comments)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "URL Selection"
    )]
    pub file: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable colored, structured output with a summary
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Collect all results before displaying
    #[arg(long = "batch", help_heading = "Output Format")]
    pub batch: bool,

    /// Show results as they complete
    #[arg(long = "streaming", help_heading = "Output Format")]
    pub streaming: bool,

    /// Max concurrent probes (default: 10, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-probe timeout (e.g. "5s", "2m")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Overall deadline for the whole run; unfinished URLs report as
    /// undetermined instead of hanging
    #[arg(long = "deadline", value_name = "DURATION", help_heading = "Performance")]
    pub deadline: Option<String>,

    /// Probe with GET directly instead of trying HEAD first
    #[arg(long = "no-head", help_heading = "Protocol")]
    pub no_head: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Grouped failure lists for the end-of-run summary.
#[derive(Debug, Default)]
pub(crate) struct ErrorStats {
    pub(crate) timeouts: Vec<String>,
    pub(crate) dns_errors: Vec<String>,
    pub(crate) other_errors: Vec<String>,
}

impl ErrorStats {
    fn add_result(&mut self, result: &UrlResult) {
        if result.up.is_some() {
            return;
        }
        let message = result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if message.contains("timed out") || message.contains("timeout") {
            self.timeouts.push(result.url.clone());
        } else if message.contains("resolve") || message.contains("dns") {
            self.dns_errors.push(result.url.clone());
        } else {
            self.other_errors.push(result.url.clone());
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn init_tracing(args: &Args) {
    if !args.debug && !args.verbose {
        return;
    }

    let default_filter = if args.debug {
        "site_check=debug,site_check_lib=debug"
    } else {
        "site_check=info,site_check_lib=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<i32, SiteCheckError> {
    let env_config = load_env_config();
    let file_config = load_file_config(&args, &env_config)?;
    let check_config = build_check_config(&args, &env_config, &file_config)?;

    let urls = gather_urls(&args, &env_config)?;
    tracing::debug!(
        urls = urls.len(),
        concurrency = check_config.concurrency,
        deadline = ?check_config.deadline,
        "resolved run configuration"
    );
    if urls.is_empty() {
        return Err(SiteCheckError::config(
            "No URLs to check. Pass URLs as arguments or use --file.",
        ));
    }

    // Output mode precedence: flags > env > config file.
    let json = args.json
        || env_config.json.unwrap_or(false)
        || file_config
            .output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
            == Some("json");
    let json_pretty = file_config
        .output
        .as_ref()
        .and_then(|o| o.json_pretty)
        .unwrap_or(true);
    let pretty = !json
        && (args.pretty
            || env_config.pretty.unwrap_or(false)
            || file_config
                .defaults
                .as_ref()
                .and_then(|d| d.pretty)
                .unwrap_or(false));
    // JSON implies batch; otherwise streaming only when asked for.
    let streaming = args.streaming && !args.batch && !json;

    let checker = SiteChecker::with_config(check_config.clone());

    if pretty {
        ui::print_header(urls.len(), check_config.concurrency);
    }

    let start = Instant::now();
    let results = if streaming {
        run_streaming(&checker, &urls, pretty).await
    } else {
        run_batch(&checker, &urls, pretty).await?
    };
    let elapsed = start.elapsed();

    let mut error_stats = ErrorStats::default();
    for result in &results {
        error_stats.add_result(result);
    }

    if json {
        print_json(&results, json_pretty)?;
    } else if !streaming {
        for result in &results {
            if pretty {
                ui::print_result_line(result);
            } else {
                ui::print_plain_line(result);
            }
        }
    }

    if pretty {
        ui::print_summary(&results, elapsed, &error_stats);
    }

    let all_up = results.iter().all(|r| r.up == Some(true));
    Ok(if all_up { 0 } else { 1 })
}

/// Load file config: explicit --config beats SC_CONFIG beats discovery.
fn load_file_config(args: &Args, env_config: &EnvConfig) -> Result<FileConfig, SiteCheckError> {
    let manager = ConfigManager::new(args.verbose);

    if let Some(path) = args.config.as_ref().or(env_config.config.as_ref()) {
        manager.load_file(path)
    } else {
        manager.discover_and_load()
    }
}

/// Build the effective check configuration with file < env < flags precedence.
fn build_check_config(
    args: &Args,
    env_config: &EnvConfig,
    file_config: &FileConfig,
) -> Result<CheckConfig, SiteCheckError> {
    let mut config = CheckConfig::default();

    if let Some(defaults) = &file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout) = defaults.timeout.as_deref().and_then(parse_timeout_string) {
            config = config.with_probe_timeout(Duration::from_secs(timeout));
        }
        if let Some(deadline) = defaults.deadline.as_deref().and_then(parse_timeout_string) {
            config = config.with_deadline(Duration::from_secs(deadline));
        }
        if let Some(head_first) = defaults.head_first {
            config = config.with_head_first(head_first);
        }
        if let Some(limit) = defaults.redirect_limit {
            config = config.with_redirect_limit(limit);
        }
    }

    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout) = env_config.timeout.as_deref().and_then(parse_timeout_string) {
        config = config.with_probe_timeout(Duration::from_secs(timeout));
    }
    if let Some(deadline) = env_config.deadline.as_deref().and_then(parse_timeout_string) {
        config = config.with_deadline(Duration::from_secs(deadline));
    }

    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err(SiteCheckError::config(
                "Concurrency must be between 1 and 100",
            ));
        }
        config = config.with_concurrency(concurrency);
    }
    if let Some(raw) = &args.timeout {
        let secs = parse_timeout_string(raw).ok_or_else(|| {
            SiteCheckError::config(format!(
                "Invalid --timeout '{}'. Use format like '5s', '2m'",
                raw
            ))
        })?;
        config = config.with_probe_timeout(Duration::from_secs(secs));
    }
    if let Some(raw) = &args.deadline {
        let secs = parse_timeout_string(raw).ok_or_else(|| {
            SiteCheckError::config(format!(
                "Invalid --deadline '{}'. Use format like '30s', '2m'",
                raw
            ))
        })?;
        config = config.with_deadline(Duration::from_secs(secs));
    }
    if args.no_head {
        config = config.with_head_first(false);
    }

    Ok(config)
}

/// Collect URLs from positional arguments and the optional input file.
fn gather_urls(args: &Args, env_config: &EnvConfig) -> Result<Vec<String>, SiteCheckError> {
    let mut raw = args.urls.clone();

    if let Some(path) = args.file.as_ref().or(env_config.file.as_ref()) {
        raw.extend(read_urls_from_file(path)?);
    }

    Ok(expand_url_inputs(&raw))
}

/// Batch mode: spinner while probing, results printed afterwards.
async fn run_batch(
    checker: &SiteChecker,
    urls: &[String],
    pretty: bool,
) -> Result<Vec<UrlResult>, SiteCheckError> {
    let spinner = if pretty && Term::stderr().is_term() {
        Some(ui::Spinner::start(format!(
            "Checking {} URL{}...",
            urls.len(),
            if urls.len() == 1 { "" } else { "s" }
        )))
    } else {
        None
    };

    let results = checker.check_urls(urls).await;

    if let Some(spinner) = spinner {
        spinner.stop().await;
    }

    results
}

/// Streaming mode: print each result the moment its probe completes.
async fn run_streaming(checker: &SiteChecker, urls: &[String], pretty: bool) -> Vec<UrlResult> {
    let mut stream = checker.check_urls_stream(urls);
    let mut results = Vec::with_capacity(urls.len());

    while let Some(result) = stream.next().await {
        if pretty {
            ui::print_result_line(&result);
        } else {
            ui::print_plain_line(&result);
        }
        results.push(result);
    }

    results
}

fn print_json(results: &[UrlResult], pretty: bool) -> Result<(), SiteCheckError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_check_lib::UrlResult;

    fn undetermined(url: &str, reason: &str) -> UrlResult {
        UrlResult::undetermined(url.to_string(), reason)
    }

    #[test]
    fn test_error_stats_grouping() {
        let mut stats = ErrorStats::default();
        stats.add_result(&undetermined("http://a.test", "probe timed out after 5s"));
        stats.add_result(&undetermined("http://b.test", "could not resolve hostname"));
        stats.add_result(&undetermined("http://c.test", "connection failed"));

        assert_eq!(stats.timeouts, vec!["http://a.test"]);
        assert_eq!(stats.dns_errors, vec!["http://b.test"]);
        assert_eq!(stats.other_errors, vec!["http://c.test"]);
    }

    #[test]
    fn test_error_stats_ignores_determined_results() {
        let mut stats = ErrorStats::default();
        let mut up = undetermined("http://a.test", "x");
        up.up = Some(true);
        stats.add_result(&up);

        assert!(stats.timeouts.is_empty());
        assert!(stats.dns_errors.is_empty());
        assert!(stats.other_errors.is_empty());
    }

    #[test]
    fn test_build_check_config_precedence() {
        use site_check_lib::DefaultsConfig;

        let args = Args::parse_from(["site-check", "http://a.test", "-c", "7"]);
        let env_config = EnvConfig {
            concurrency: Some(30),
            timeout: Some("9s".to_string()),
            ..Default::default()
        };
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(50),
                deadline: Some("1m".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = build_check_config(&args, &env_config, &file_config).unwrap();
        assert_eq!(config.concurrency, 7, "CLI flag beats env and file");
        assert_eq!(config.probe_timeout, Duration::from_secs(9), "env beats file");
        assert_eq!(config.deadline, Some(Duration::from_secs(60)), "file default applies");
    }

    #[test]
    fn test_build_check_config_rejects_bad_flag_values() {
        let args = Args::parse_from(["site-check", "http://a.test", "--timeout", "forever"]);
        let result = build_check_config(&args, &EnvConfig::default(), &FileConfig::default());
        assert!(result.is_err());

        let args = Args::parse_from(["site-check", "http://a.test", "-c", "0"]);
        let result = build_check_config(&args, &EnvConfig::default(), &FileConfig::default());
        assert!(result.is_err());
    }
}
