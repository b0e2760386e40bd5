use std::sync::atomic::AtomicUsize;

use super::*;

const TICK: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(5);

#[test_log::test(tokio::test)]
async fn test_poller_publishes_fetched_values() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let poller = Poller::spawn("counter", TICK, move || {
        let counter = Arc::clone(&counter);
        async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst) + 1) }
    });

    let mut rx = poller.subscribe();
    tokio::time::timeout(WAIT, rx.wait_for(|value| value.is_some_and(|n| n >= 3)))
        .await
        .expect("poller should refresh repeatedly")
        .expect("poller channel open");

    assert!(poller.latest().unwrap() >= 3);
    assert!(calls.load(Ordering::SeqCst) >= 3);
}

#[test_log::test(tokio::test)]
async fn test_poller_survives_failures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let poller = Poller::spawn("flaky", TICK, move || {
        let counter = Arc::clone(&counter);
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(format!("attempt {n} failed"))
            } else {
                Ok(n)
            }
        }
    });

    let mut rx = poller.subscribe();
    let value = *tokio::time::timeout(WAIT, rx.wait_for(Option::is_some))
        .await
        .expect("poller should recover")
        .expect("poller channel open");
    assert_eq!(value, Some(2));
}

#[test_log::test(tokio::test)]
async fn test_dropping_poller_stops_fetching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let poller = Poller::spawn("stopped", TICK, move || {
        let counter = Arc::clone(&counter);
        async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst)) }
    });

    let mut rx = poller.subscribe();
    tokio::time::timeout(WAIT, rx.wait_for(Option::is_some))
        .await
        .expect("first refresh")
        .expect("poller channel open");
    poller.stop();

    // Let the abort land before sampling
    tokio::time::sleep(TICK * 3).await;
    let after_stop = calls.load(Ordering::SeqCst);
    tokio::time::sleep(TICK * 10).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_stop);
}

#[test]
fn test_latest_only_rejects_superseded_ticket() {
    let guard = LatestOnly::new();
    let first = guard.begin();
    let second = guard.begin();

    assert!(!first.is_current());
    assert_eq!(first.accept("stale"), None);
    assert_eq!(second.accept("fresh"), Some("fresh"));
}

#[test]
fn test_latest_only_invalidate() {
    let guard = LatestOnly::new();
    let ticket = guard.begin();
    guard.invalidate();
    assert_eq!(ticket.accept(1), None);
}

#[test]
fn test_latest_only_shared_between_clones() {
    let guard = LatestOnly::new();
    let ticket = guard.begin();
    let _newer = guard.clone().begin();
    assert!(!ticket.is_current());
}
