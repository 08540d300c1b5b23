//! Concurrent fan-out/fan-in engine for URL probing.
//!
//! Each URL in a batch is dispatched to its own probe future, at most
//! `concurrency` of which run at once. A single aggregator drains completions
//! as they arrive, so a batch costs roughly one slowest probe of wall-clock
//! time rather than the sum of all probes. An optional deadline bounds the
//! whole batch: when it expires the aggregator stops waiting, in-flight probes
//! are cancelled by dropping the stream, and unfinished URLs are reported as
//! undetermined instead of hanging the caller forever.

use crate::probe::Probe;
use crate::types::{CheckConfig, UrlResult};
use futures::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::time::Instant;
use tokio::time::timeout_at;

/// Build the bounded stream of probe results for a batch of URLs.
///
/// Results are yielded in completion order, not input order. Each probe is
/// individually wrapped in the configured per-probe timeout so one stalled
/// probe cannot wedge the whole batch.
pub(crate) fn result_stream<'a>(
    probe: &'a dyn Probe,
    urls: &'a [String],
    config: &CheckConfig,
) -> impl Stream<Item = UrlResult> + Send + 'a {
    let concurrency = config.concurrency.max(1);
    let probe_timeout = config.probe_timeout;

    futures::stream::iter(urls.iter().cloned())
        .map(move |url| async move {
            let start = Instant::now();
            match tokio::time::timeout(probe_timeout, probe.probe(&url)).await {
                Ok(outcome) => {
                    let result = UrlResult::from_outcome(url, outcome, start.elapsed());
                    tracing::debug!(url = %result.url, up = ?result.up, "probe completed");
                    result
                }
                Err(_) => {
                    tracing::debug!(url = %url, timeout = ?probe_timeout, "probe timed out");
                    let mut result = UrlResult::undetermined(
                        url,
                        format!("probe timed out after {:?}", probe_timeout),
                    );
                    result.check_duration = Some(start.elapsed());
                    result
                }
            }
        })
        .buffer_unordered(concurrency)
}

/// Probe every URL in the batch and collect all results.
///
/// The call returns once every probe has completed, or once the configured
/// deadline expires, whichever comes first. On deadline expiry the returned
/// vector still has one entry per input URL: finished probes keep their real
/// results and unfinished ones are marked undetermined.
pub async fn run_batch(probe: &dyn Probe, urls: &[String], config: &CheckConfig) -> Vec<UrlResult> {
    if urls.is_empty() {
        return Vec::new();
    }

    let deadline_at = config
        .deadline
        .map(|d| tokio::time::Instant::now() + d);

    // Multiset of URLs still awaiting a result. Duplicates in the input are
    // probed independently, so each occurrence is tracked separately.
    let mut pending: HashMap<&str, usize> = HashMap::new();
    for url in urls {
        *pending.entry(url.as_str()).or_insert(0) += 1;
    }

    let mut results = Vec::with_capacity(urls.len());
    {
        let mut stream = std::pin::pin!(result_stream(probe, urls, config));

        loop {
            let next = match deadline_at {
                Some(at) => match timeout_at(at, stream.next()).await {
                    Ok(item) => item,
                    Err(_) => {
                        tracing::warn!(
                            completed = results.len(),
                            total = urls.len(),
                            "deadline expired, returning partial results"
                        );
                        break;
                    }
                },
                None => stream.next().await,
            };

            match next {
                Some(result) => {
                    if let Some(count) = pending.get_mut(result.url.as_str()) {
                        *count -= 1;
                    }
                    results.push(result);
                }
                None => break,
            }
        }
        // Dropping the stream here cancels any probes still in flight.
    }

    for (url, count) in pending {
        for _ in 0..count {
            results.push(UrlResult::undetermined(
                url.to_string(),
                "deadline exceeded before probe completed",
            ));
        }
    }

    results
}

/// Probe every URL and return the boolean status map: one entry per distinct
/// URL, `true` only when the site was positively determined to be up.
///
/// This is the faithful predicate-style surface: undetermined outcomes fold to
/// `false`, and when the input contains duplicate URLs, whichever probe
/// finishes last silently overwrites earlier entries. That last-write-wins
/// race on duplicates is a documented nondeterminism, preserved on purpose.
pub async fn check_statuses(
    probe: &dyn Probe,
    urls: &[String],
    config: &CheckConfig,
) -> HashMap<String, bool> {
    let results = run_batch(probe, urls, config).await;

    let mut statuses = HashMap::with_capacity(results.len());
    for result in results {
        statuses.insert(result.url, result.up.unwrap_or(false));
    }
    statuses
}
