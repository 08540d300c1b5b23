//! Pretty-mode display logic for the site-check CLI.
//!
//! This module handles all `--pretty` output: colored result lines, spinner
//! animation, headers, and summaries. Uses only the `console` crate.

use console::style;
use console::Term;
use site_check_lib::UrlResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::ErrorStats;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Checking 8 URLs...").
    pub fn start(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a pretty run.
pub fn print_header(url_count: usize, concurrency: usize) {
    println!(
        "{} {} {}",
        style("site-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} URL{}",
            url_count,
            if url_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!("{}", style(format!("Concurrency: {}", concurrency)).dim());
    println!();
}

// ── Result lines ─────────────────────────────────────────────────────────────

/// Print one result line in pretty mode.
pub fn print_result_line(result: &UrlResult) {
    let (marker, label) = match result.up {
        Some(true) => (style("●").green(), style("UP ").green().bold()),
        Some(false) => (style("●").red(), style("DOWN").red().bold()),
        None => (style("●").yellow(), style("????").yellow().bold()),
    };

    let mut detail = String::new();
    if let Some(code) = result.status_code {
        detail.push_str(&format!("HTTP {}", code));
    }
    if let Some(duration) = result.check_duration {
        if !detail.is_empty() {
            detail.push_str(", ");
        }
        detail.push_str(&format_duration(duration));
    }
    if let Some(err) = brief_error(result) {
        if !detail.is_empty() {
            detail.push_str(", ");
        }
        detail.push_str(&err);
    }

    if detail.is_empty() {
        println!("{} {} {}", marker, label, result.url);
    } else {
        println!(
            "{} {} {} {}",
            marker,
            label,
            result.url,
            style(format!("({})", detail)).dim()
        );
    }
}

/// Print one result line in plain text mode (no colors, pipe-friendly).
pub fn print_plain_line(result: &UrlResult) {
    let label = match result.up {
        Some(true) => "UP",
        Some(false) => "DOWN",
        None => "UNDETERMINED",
    };

    match brief_error(result) {
        Some(err) => println!("{}\t{}\t{}", label, result.url, err),
        None => match result.status_code {
            Some(code) => println!("{}\t{}\tHTTP {}", label, result.url, code),
            None => println!("{}\t{}", label, result.url),
        },
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the end-of-run summary with error grouping.
pub fn print_summary(results: &[UrlResult], elapsed: Duration, error_stats: &ErrorStats) {
    let up = results.iter().filter(|r| r.up == Some(true)).count();
    let down = results.iter().filter(|r| r.up == Some(false)).count();
    let undetermined = results.iter().filter(|r| r.up.is_none()).count();

    println!();
    println!(
        "{} {} up, {} down, {} undetermined {}",
        style("Summary:").bold(),
        style(up).green(),
        style(down).red(),
        style(undetermined).yellow(),
        style(format!("in {}", format_duration(elapsed))).dim(),
    );

    if !error_stats.timeouts.is_empty() {
        println!(
            "  {} {} timeout{}: {}",
            style("•").yellow(),
            error_stats.timeouts.len(),
            if error_stats.timeouts.len() == 1 { "" } else { "s" },
            format_list(&error_stats.timeouts, 5)
        );
    }
    if !error_stats.dns_errors.is_empty() {
        println!(
            "  {} {} DNS failure{}: {}",
            style("•").yellow(),
            error_stats.dns_errors.len(),
            if error_stats.dns_errors.len() == 1 { "" } else { "s" },
            format_list(&error_stats.dns_errors, 5)
        );
    }
    if !error_stats.other_errors.is_empty() {
        println!(
            "  {} {} other failure{}: {}",
            style("•").yellow(),
            error_stats.other_errors.len(),
            if error_stats.other_errors.len() == 1 { "" } else { "s" },
            format_list(&error_stats.other_errors, 5)
        );
    }
}

/// Format a URL list as "a, b, c and N more".
pub fn format_list(items: &[String], max: usize) -> String {
    if items.len() <= max {
        items.join(", ")
    } else {
        format!(
            "{} and {} more",
            items[..max].join(", "),
            items.len() - max
        )
    }
}

fn format_duration(duration: Duration) -> String {
    if duration.as_secs() >= 1 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Condense a result's error message for inline display.
fn brief_error(result: &UrlResult) -> Option<String> {
    let message = result.error_message.as_deref()?;
    let lower = message.to_lowercase();

    let brief = if lower.contains("timed out") || lower.contains("timeout") {
        "timeout"
    } else if lower.contains("resolve") || lower.contains("dns") {
        "dns error"
    } else if lower.contains("deadline") {
        "deadline exceeded"
    } else if lower.contains("connection") {
        "connection failed"
    } else {
        message
    };

    Some(brief.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_check_lib::UrlResult;

    #[test]
    fn test_format_list_truncates() {
        let items: Vec<String> = (0..7).map(|i| format!("http://s{}.test", i)).collect();
        let formatted = format_list(&items, 5);
        assert!(formatted.ends_with("and 2 more"));

        let short = format_list(&items[..2], 5);
        assert_eq!(short, "http://s0.test, http://s1.test");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn test_brief_error_timeout() {
        let result =
            UrlResult::undetermined("http://a.test".to_string(), "probe timed out after 5s");
        assert_eq!(brief_error(&result).as_deref(), Some("timeout"));
    }

    #[test]
    fn test_brief_error_none_for_clean_result() {
        let result = UrlResult {
            url: "http://a.test".to_string(),
            up: Some(true),
            status_code: Some(200),
            check_duration: None,
            method: site_check_lib::ProbeMethod::Head,
            error_message: None,
        };
        assert_eq!(brief_error(&result), None);
    }
}
