//! Core data types for website status checking.
//!
//! This module defines all the main data structures used throughout the library,
//! including probe outcomes, per-URL results, configuration options, and output
//! formatting.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of checking a single URL.
///
/// Contains the reachability status, HTTP details when available,
/// and metadata about the check itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlResult {
    /// The URL that was checked, exactly as supplied by the caller
    pub url: String,

    /// Whether the site is up.
    /// - `Some(true)`: the probe reached the site and it answered healthily
    /// - `Some(false)`: the site answered but is down (e.g. HTTP 404/500)
    /// - `None`: status could not be determined (probe failed or deadline hit)
    pub up: Option<bool>,

    /// HTTP status code, when the probe got far enough to receive one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// How long the probe took to complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,

    /// Which probe method produced this result
    pub method: ProbeMethod,

    /// Reason the status could not be determined, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl UrlResult {
    /// Build a result from a probe outcome plus the measured duration.
    pub fn from_outcome(url: String, outcome: ProbeOutcome, duration: Duration) -> Self {
        Self {
            url,
            up: outcome.as_bool(),
            status_code: outcome.code,
            check_duration: Some(duration),
            method: outcome.method,
            error_message: outcome.detail,
        }
    }

    /// Build a result for a URL whose probe never completed.
    pub fn undetermined(url: String, reason: impl Into<String>) -> Self {
        Self {
            url,
            up: None,
            status_code: None,
            check_duration: None,
            method: ProbeMethod::Unknown,
            error_message: Some(reason.into()),
        }
    }

    /// True only when the site was positively determined to be up.
    pub fn is_up(&self) -> bool {
        self.up == Some(true)
    }
}

/// Status component of a probe outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The site answered and is healthy
    #[serde(rename = "up")]
    Up,

    /// The site answered but is broken (client/server error)
    #[serde(rename = "down")]
    Down,

    /// The probe itself failed; site status is unknown
    #[serde(rename = "undetermined")]
    Undetermined,
}

/// What a probe learned about one URL.
///
/// This is the tri-state extension of the plain boolean predicate: probes can
/// report that a site is up, down, or that the probe itself failed and the
/// status is undetermined. The boolean `ResultSet` API folds `Undetermined`
/// into `false` ("treat as down"), while the richer APIs preserve all three.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// Up, down, or undetermined
    pub status: ProbeStatus,
    /// HTTP status code, when one was received
    pub code: Option<u16>,
    /// Which method produced the outcome
    pub method: ProbeMethod,
    /// Human-readable detail (error reason, "HTTP 200", etc.)
    pub detail: Option<String>,
}

impl ProbeOutcome {
    /// The site answered healthily.
    pub fn up() -> Self {
        Self {
            status: ProbeStatus::Up,
            code: None,
            method: ProbeMethod::Custom,
            detail: None,
        }
    }

    /// The site answered but is down.
    pub fn down() -> Self {
        Self {
            status: ProbeStatus::Down,
            code: None,
            method: ProbeMethod::Custom,
            detail: None,
        }
    }

    /// The probe failed; status is unknown.
    pub fn undetermined(reason: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Undetermined,
            code: None,
            method: ProbeMethod::Custom,
            detail: Some(reason.into()),
        }
    }

    /// Lift a plain boolean predicate result into an outcome.
    pub fn from_bool(up: bool) -> Self {
        if up {
            Self::up()
        } else {
            Self::down()
        }
    }

    /// Attach the HTTP status code that produced this outcome.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// Record which probe method produced this outcome.
    pub fn via(mut self, method: ProbeMethod) -> Self {
        self.method = method;
        self
    }

    /// Attach a human-readable detail message.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Tri-state view: `Some(true)` up, `Some(false)` down, `None` undetermined.
    pub fn as_bool(&self) -> Option<bool> {
        match self.status {
            ProbeStatus::Up => Some(true),
            ProbeStatus::Down => Some(false),
            ProbeStatus::Undetermined => None,
        }
    }

    /// Boolean view with undetermined folded to `false` ("treat as down").
    pub fn fold_to_bool(&self) -> bool {
        self.status == ProbeStatus::Up
    }
}

/// Method used to determine a URL's status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProbeMethod {
    /// HTTP HEAD request
    #[serde(rename = "head")]
    Head,

    /// HTTP GET request (fallback when HEAD is rejected)
    #[serde(rename = "get")]
    Get,

    /// A caller-supplied probe
    #[serde(rename = "custom")]
    Custom,

    /// Probe never completed or method unknown
    #[serde(rename = "unknown")]
    Unknown,
}

/// Configuration options for checking operations.
///
/// This struct allows fine-tuning of the checking behavior, including
/// concurrency bounds, per-probe timeouts, and the overall deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum number of concurrent probes
    /// Default: 10, Range: 1-100
    pub concurrency: usize,

    /// Timeout for each individual probe
    /// Default: 5 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub probe_timeout: Duration,

    /// Overall wall-clock budget for a whole batch. When set, the
    /// aggregator stops waiting once the deadline expires and reports
    /// unfinished URLs as undetermined instead of hanging forever.
    /// Default: none (wait for every probe)
    #[serde(skip)]
    pub deadline: Option<Duration>,

    /// Whether the HTTP probe tries HEAD before falling back to GET
    /// Default: true
    pub head_first: bool,

    /// Maximum number of redirects the HTTP probe follows
    /// Default: 5
    pub redirect_limit: usize,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults are chosen to work well for most use cases
    /// while being conservative about resource usage.
    fn default() -> Self {
        Self {
            concurrency: 10,
            probe_timeout: Duration::from_secs(5),
            deadline: None,
            head_first: true,
            redirect_limit: 5,
        }
    }
}

impl CheckConfig {
    /// Create a new configuration with custom concurrency.
    ///
    /// Automatically caps concurrency at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set an overall deadline for batch operations.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Enable or disable trying HEAD before GET.
    pub fn with_head_first(mut self, enabled: bool) -> Self {
        self.head_first = enabled;
        self
    }

    /// Set the redirect-follow limit for the HTTP probe.
    pub fn with_redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = limit;
        self
    }
}

/// Output mode for displaying results.
///
/// This controls how and when results are presented to the user,
/// affecting both performance perception and data formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// Stream results as they become available (good for interactive use)
    Streaming,

    /// Collect all results before displaying (good for formatting/sorting)
    Collected,

    /// Automatically choose based on context (terminal vs pipe, etc.)
    Auto,
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMethod::Head => write!(f, "HEAD"),
            ProbeMethod::Get => write!(f, "GET"),
            ProbeMethod::Custom => write!(f, "Custom"),
            ProbeMethod::Unknown => write!(f, "Unknown"),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Streaming => write!(f, "Streaming"),
            OutputMode::Collected => write!(f, "Collected"),
            OutputMode::Auto => write!(f, "Auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_clamped() {
        assert_eq!(CheckConfig::default().with_concurrency(0).concurrency, 1);
        assert_eq!(CheckConfig::default().with_concurrency(50).concurrency, 50);
        assert_eq!(CheckConfig::default().with_concurrency(500).concurrency, 100);
    }

    #[test]
    fn test_outcome_tri_state() {
        assert_eq!(ProbeOutcome::up().as_bool(), Some(true));
        assert_eq!(ProbeOutcome::down().as_bool(), Some(false));
        assert_eq!(ProbeOutcome::undetermined("dns failure").as_bool(), None);
    }

    #[test]
    fn test_outcome_fold_treats_undetermined_as_down() {
        assert!(ProbeOutcome::up().fold_to_bool());
        assert!(!ProbeOutcome::down().fold_to_bool());
        assert!(!ProbeOutcome::undetermined("timeout").fold_to_bool());
    }

    #[test]
    fn test_outcome_from_bool() {
        assert_eq!(ProbeOutcome::from_bool(true).status, ProbeStatus::Up);
        assert_eq!(ProbeOutcome::from_bool(false).status, ProbeStatus::Down);
    }

    #[test]
    fn test_url_result_from_outcome() {
        let outcome = ProbeOutcome::up().with_code(200).via(ProbeMethod::Head);
        let result =
            UrlResult::from_outcome("http://a.test".to_string(), outcome, Duration::from_millis(12));
        assert!(result.is_up());
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.method, ProbeMethod::Head);
    }

    #[test]
    fn test_url_result_undetermined() {
        let result = UrlResult::undetermined("http://a.test".to_string(), "deadline exceeded");
        assert!(!result.is_up());
        assert_eq!(result.up, None);
        assert_eq!(result.error_message.as_deref(), Some("deadline exceeded"));
    }
}
