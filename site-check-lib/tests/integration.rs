// site-check-lib/tests/integration.rs

//! Integration tests for the concurrent checker's observable properties:
//! totality of the result map, duplicate handling, concurrency, deadlines,
//! and idempotence with pure probes.

use site_check_lib::{
    check_statuses, BoolProbe, CheckConfig, ProbeFn, ProbeOutcome, SiteChecker,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_every_distinct_input_url_appears_exactly_once() {
    let probe = BoolProbe::new(|_url| async { true });
    let input = urls(&[
        "http://a.test",
        "http://b.test",
        "http://c.test",
        "http://d.test",
    ]);

    let statuses = check_statuses(&probe, &input, &CheckConfig::default()).await;

    let input_set: HashSet<&str> = input.iter().map(String::as_str).collect();
    let output_set: HashSet<&str> = statuses.keys().map(String::as_str).collect();
    assert_eq!(input_set, output_set, "key set must equal distinct input set");
    assert_eq!(statuses.len(), input_set.len());
}

#[tokio::test]
async fn test_constant_true_probe_marks_everything_up() {
    let probe = BoolProbe::new(|_url| async { true });
    let input = urls(&["http://a.test", "http://b.test"]);

    let statuses = check_statuses(&probe, &input, &CheckConfig::default()).await;

    assert_eq!(statuses.get("http://a.test"), Some(&true));
    assert_eq!(statuses.get("http://b.test"), Some(&true));
}

#[tokio::test]
async fn test_constant_false_probe_marks_everything_down() {
    let probe = BoolProbe::new(|_url| async { false });
    let input = urls(&["http://a.test"]);

    let statuses = check_statuses(&probe, &input, &CheckConfig::default()).await;

    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses.get("http://a.test"), Some(&false));
}

#[tokio::test]
async fn test_empty_input_returns_empty_map_immediately() {
    let probe = BoolProbe::new(|_url| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        true
    });

    let start = Instant::now();
    let statuses = check_statuses(&probe, &[], &CheckConfig::default()).await;

    assert!(statuses.is_empty());
    assert!(
        start.elapsed() < Duration::from_millis(50),
        "empty input must not block"
    );
}

#[tokio::test]
async fn test_duplicate_urls_yield_one_entry() {
    // A probe that alternates between up and down per call, so the surviving
    // value for a duplicated URL is genuinely nondeterministic. The contract
    // is key count, not a specific value.
    let flip = Arc::new(AtomicBool::new(false));
    let probe = BoolProbe::new(move |_url| {
        let flip = flip.clone();
        async move { flip.fetch_xor(true, Ordering::SeqCst) }
    });

    let input = urls(&["http://a.test", "http://a.test"]);
    let statuses = check_statuses(&probe, &input, &CheckConfig::default()).await;

    assert_eq!(statuses.len(), 1, "duplicates collapse to one map entry");
    assert!(statuses.contains_key("http://a.test"));
}

#[tokio::test]
async fn test_batch_costs_one_probe_not_n() {
    let delay = Duration::from_millis(100);
    let probe = BoolProbe::new(move |_url| async move {
        tokio::time::sleep(delay).await;
        true
    });

    let input: Vec<String> = (0..10).map(|i| format!("http://site{}.test", i)).collect();
    let config = CheckConfig::default().with_concurrency(10);

    let start = Instant::now();
    let statuses = check_statuses(&probe, &input, &config).await;
    let elapsed = start.elapsed();

    assert_eq!(statuses.len(), 10);
    assert!(elapsed >= delay, "cannot finish faster than one probe");
    // 10 sequential probes would take ~1s; generous slack for slow CI.
    assert!(
        elapsed < delay * 5,
        "10 concurrent probes took {:?}, expected roughly one probe's latency",
        elapsed
    );
}

#[tokio::test]
async fn test_in_flight_probes_never_exceed_concurrency_limit() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let probe = {
        let in_flight = in_flight.clone();
        let peak = peak.clone();
        ProbeFn::new(move |_url: String| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                ProbeOutcome::up()
            }
        })
    };

    let input: Vec<String> = (0..12).map(|i| format!("http://site{}.test", i)).collect();
    let config = CheckConfig::default().with_concurrency(3);

    let statuses = check_statuses(&probe, &input, &config).await;

    assert_eq!(statuses.len(), 12);
    assert!(
        peak.load(Ordering::SeqCst) <= 3,
        "peak in-flight {} exceeded concurrency limit 3",
        peak.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn test_pure_probe_is_idempotent() {
    let probe = BoolProbe::new(|url: String| async move { url.contains('a') });
    let input = urls(&["http://a.test", "http://b.test", "http://ab.test"]);
    let config = CheckConfig::default();

    let first = check_statuses(&probe, &input, &config).await;
    let second = check_statuses(&probe, &input, &config).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_deadline_returns_partial_results_instead_of_hanging() {
    // One URL stalls far beyond the deadline; the rest answer instantly.
    let probe = ProbeFn::new(|url: String| async move {
        if url.contains("slow") {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        ProbeOutcome::up()
    });

    let input = urls(&["http://fast1.test", "http://slow.test", "http://fast2.test"]);
    let config = CheckConfig::default()
        .with_probe_timeout(Duration::from_secs(120))
        .with_deadline(Duration::from_millis(200));

    let checker = SiteChecker::with_probe(Arc::new(probe), config);

    let start = Instant::now();
    let results = checker.check_urls(&input).await.unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_secs(5),
        "deadline must bound the call, took {:?}",
        elapsed
    );
    assert_eq!(results.len(), 3, "every input URL gets an entry");

    let slow = results.iter().find(|r| r.url == "http://slow.test").unwrap();
    assert_eq!(slow.up, None, "stalled probe reports undetermined");

    for fast in results.iter().filter(|r| r.url.contains("fast")) {
        assert_eq!(fast.up, Some(true));
    }
}

#[tokio::test]
async fn test_stalled_probe_hits_per_probe_timeout() {
    let probe = ProbeFn::new(|_url: String| async move {
        tokio::time::sleep(Duration::from_secs(60)).await;
        ProbeOutcome::up()
    });

    let config = CheckConfig::default().with_probe_timeout(Duration::from_millis(100));
    let checker = SiteChecker::with_probe(Arc::new(probe), config);

    let results = checker
        .check_urls(&urls(&["http://stalled.test"]))
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].up, None);
    assert!(results[0]
        .error_message
        .as_deref()
        .unwrap_or_default()
        .contains("timed out"));
}

#[tokio::test]
async fn test_checker_statuses_matches_worked_examples() {
    // input ["http://a.test", "http://b.test"] with url -> true
    let checker = SiteChecker::with_probe(
        Arc::new(BoolProbe::new(|_url| async { true })),
        CheckConfig::default(),
    );
    let statuses = checker
        .check_statuses(&urls(&["http://a.test", "http://b.test"]))
        .await;
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses.get("http://a.test"), Some(&true));
    assert_eq!(statuses.get("http://b.test"), Some(&true));

    // input ["http://a.test"] with url -> false
    let checker = SiteChecker::with_probe(
        Arc::new(BoolProbe::new(|_url| async { false })),
        CheckConfig::default(),
    );
    let statuses = checker.check_statuses(&urls(&["http://a.test"])).await;
    assert_eq!(statuses.get("http://a.test"), Some(&false));
}

#[tokio::test]
async fn test_stream_yields_every_result() {
    use futures::StreamExt;

    let probe = BoolProbe::new(|url: String| async move { !url.contains("down") });
    let input = urls(&["http://up.test", "http://down.test", "http://alsoup.test"]);
    let checker = SiteChecker::with_probe(Arc::new(probe), CheckConfig::default());

    let mut stream = checker.check_urls_stream(&input);
    let mut seen = Vec::new();
    while let Some(result) = stream.next().await {
        seen.push(result);
    }

    assert_eq!(seen.len(), 3);
    let down = seen.iter().find(|r| r.url == "http://down.test").unwrap();
    assert_eq!(down.up, Some(false));
}

#[tokio::test]
async fn test_undetermined_folds_to_false_in_status_map() {
    let probe = ProbeFn::new(|_url: String| async { ProbeOutcome::undetermined("dns failure") });
    let statuses = check_statuses(&probe, &urls(&["http://a.test"]), &CheckConfig::default()).await;

    assert_eq!(statuses.get("http://a.test"), Some(&false));
}
