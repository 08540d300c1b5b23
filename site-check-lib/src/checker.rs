//! Main site checker implementation.
//!
//! This module provides the primary `SiteChecker` struct that orchestrates
//! website status checking: probe selection, bounded concurrency, deadlines,
//! and result collection.

use crate::concurrent;
use crate::error::SiteCheckError;
use crate::http::HttpProbe;
use crate::probe::Probe;
use crate::types::{CheckConfig, UrlResult};
use crate::utils::{expand_url_inputs, read_urls_from_file, validate_url};
use futures::stream::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

/// Main checker that coordinates website status probing.
///
/// The `SiteChecker` handles all aspects of checking including:
/// - Probe selection (built-in HTTP probe or an injected one)
/// - Bounded concurrent processing
/// - Per-probe timeouts and batch deadlines
/// - Result aggregation
///
/// # Example
///
/// ```rust,no_run
/// use site_check_lib::{SiteChecker, CheckConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = SiteChecker::new();
///     let result = checker.check_url("https://example.com").await?;
///     println!("Up: {:?}", result.up);
///     Ok(())
/// }
/// ```
pub struct SiteChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// The probe applied to each URL
    probe: Arc<dyn Probe>,
}

impl SiteChecker {
    /// Create a new checker with default configuration and the built-in
    /// HTTP probe.
    ///
    /// Default settings:
    /// - Concurrency: 10
    /// - Per-probe timeout: 5 seconds
    /// - Deadline: none
    /// - HEAD before GET: enabled
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use site_check_lib::{SiteChecker, CheckConfig};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(20)
    ///     .with_probe_timeout(Duration::from_secs(10))
    ///     .with_deadline(Duration::from_secs(60));
    ///
    /// let checker = SiteChecker::with_config(config);
    /// ```
    pub fn with_config(config: CheckConfig) -> Self {
        let probe = HttpProbe::with_config(
            config.probe_timeout,
            config.redirect_limit,
            config.head_first,
        )
        .expect("Failed to create HTTP probe");

        Self {
            config,
            probe: Arc::new(probe),
        }
    }

    /// Create a checker that applies a caller-supplied probe instead of the
    /// built-in HTTP one.
    ///
    /// This is the dependency-injection seam: tests inject deterministic
    /// fakes, and callers with bespoke health semantics (TCP dial, gRPC
    /// health endpoint, ...) supply their own probe.
    pub fn with_probe(probe: Arc<dyn Probe>, config: CheckConfig) -> Self {
        Self { config, probe }
    }

    /// Check the status of a single URL.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError::InvalidUrl` if the URL is not a valid
    /// http(s) URL. Probe failures do not error; they surface as an
    /// undetermined result.
    pub async fn check_url(&self, url: &str) -> Result<UrlResult, SiteCheckError> {
        validate_url(url)?;

        let urls = [url.to_string()];
        let mut results = concurrent::run_batch(self.probe.as_ref(), &urls, &self.config).await;
        results
            .pop()
            .ok_or_else(|| SiteCheckError::internal("probe produced no result"))
    }

    /// Check many URLs concurrently and collect all results.
    ///
    /// At most `config.concurrency` probes run at once. The call returns
    /// once every probe completes, or once the configured deadline expires;
    /// in the deadline case unfinished URLs come back undetermined rather
    /// than being silently dropped. Results arrive in completion order.
    pub async fn check_urls(&self, urls: &[String]) -> Result<Vec<UrlResult>, SiteCheckError> {
        Ok(concurrent::run_batch(self.probe.as_ref(), urls, &self.config).await)
    }

    /// Check many URLs and return the boolean status map: one entry per
    /// distinct input URL, `true` only for positively-up sites.
    ///
    /// Duplicate input URLs are probed independently and collapse to a single
    /// map entry, last completion winning.
    pub async fn check_statuses(&self, urls: &[String]) -> HashMap<String, bool> {
        concurrent::check_statuses(self.probe.as_ref(), urls, &self.config).await
    }

    /// Check URLs and yield results as a stream, in completion order.
    ///
    /// Useful for interactive display when processing large batches; the
    /// concurrency bound still applies. The batch deadline does not: callers
    /// driving a stream decide for themselves when to stop polling.
    pub fn check_urls_stream<'a>(
        &'a self,
        urls: &'a [String],
    ) -> Pin<Box<dyn Stream<Item = UrlResult> + Send + 'a>> {
        Box::pin(concurrent::result_stream(
            self.probe.as_ref(),
            urls,
            &self.config,
        ))
    }

    /// Read URLs from a file and check them all.
    ///
    /// The file should contain one URL per line. Empty lines and lines
    /// starting with '#' are ignored as comments; bare hosts are normalized
    /// to `https://`.
    ///
    /// # Errors
    ///
    /// Returns `SiteCheckError` if the file cannot be read, exceeds the
    /// entry limit, or contains no valid URLs.
    pub async fn check_urls_from_file(
        &self,
        file_path: &str,
    ) -> Result<Vec<UrlResult>, SiteCheckError> {
        let raw = read_urls_from_file(file_path)?;
        let urls = expand_url_inputs(&raw);

        if urls.is_empty() {
            return Err(SiteCheckError::file_error(
                file_path,
                "No valid URLs found in file",
            ));
        }

        self.check_urls(&urls).await
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Replace the configuration for this checker.
    ///
    /// Note that this recreates the built-in HTTP probe with the new
    /// settings; a probe injected via [`SiteChecker::with_probe`] is replaced
    /// by the HTTP probe as well.
    pub fn set_config(&mut self, config: CheckConfig) {
        let probe = HttpProbe::with_config(
            config.probe_timeout,
            config.redirect_limit,
            config.head_first,
        )
        .expect("Failed to recreate HTTP probe");

        self.probe = Arc::new(probe);
        self.config = config;
    }
}

impl Default for SiteChecker {
    fn default() -> Self {
        Self::new()
    }
}
