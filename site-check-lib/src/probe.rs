//! The probe seam: the caller-supplied capability that decides one URL's status.
//!
//! A [`Probe`] is the injectable collaborator of the checker. Production code
//! uses the built-in HTTP probe; tests inject fakes built from plain async
//! closures via [`ProbeFn`] or [`BoolProbe`].

use crate::types::ProbeOutcome;
use futures::future::BoxFuture;
use std::future::Future;

/// Determines the status of a single URL.
///
/// The trait is dyn-safe so checkers can hold `Arc<dyn Probe>` and callers can
/// swap implementations at runtime. A probe may block or perform network I/O;
/// its internal behavior is entirely outside the checker's responsibility.
pub trait Probe: Send + Sync {
    /// Probe one URL and report what was learned.
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProbeOutcome>;
}

/// Adapter turning an async closure `Fn(String) -> ProbeOutcome` into a [`Probe`].
///
/// # Example
///
/// ```rust
/// use site_check_lib::{ProbeFn, ProbeOutcome};
///
/// let probe = ProbeFn::new(|url: String| async move {
///     if url.starts_with("https://") {
///         ProbeOutcome::up()
///     } else {
///         ProbeOutcome::undetermined("refusing plain http")
///     }
/// });
/// ```
pub struct ProbeFn<F> {
    f: F,
}

impl<F, Fut> ProbeFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    /// Wrap an async closure as a probe.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> Probe for ProbeFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin((self.f)(url.to_string()))
    }
}

/// Adapter for plain boolean predicates, `Fn(String) -> bool`.
///
/// `true` maps to up and `false` to down; a boolean predicate has no way to
/// signal that the probe itself failed, which is exactly the limitation the
/// tri-state [`ProbeOutcome`] exists to lift.
pub struct BoolProbe<F> {
    f: F,
}

impl<F, Fut> BoolProbe<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    /// Wrap an async boolean predicate as a probe.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> Probe for BoolProbe<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProbeOutcome> {
        let fut = (self.f)(url.to_string());
        Box::pin(async move { ProbeOutcome::from_bool(fut.await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeStatus;

    #[tokio::test]
    async fn test_probe_fn_passes_url_through() {
        let probe = ProbeFn::new(|url: String| async move {
            if url == "http://a.test" {
                ProbeOutcome::up()
            } else {
                ProbeOutcome::down()
            }
        });

        assert_eq!(probe.probe("http://a.test").await.status, ProbeStatus::Up);
        assert_eq!(probe.probe("http://b.test").await.status, ProbeStatus::Down);
    }

    #[tokio::test]
    async fn test_bool_probe_lifts_predicate() {
        let probe = BoolProbe::new(|_url| async { true });
        let outcome = probe.probe("http://a.test").await;
        assert_eq!(outcome.status, ProbeStatus::Up);
        assert_eq!(outcome.as_bool(), Some(true));
    }
}
