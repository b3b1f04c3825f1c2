//! Integration tests for the TTL countdown
//!
//! Time is simulated by passing explicit millisecond timestamps to `tick`.

use keytui::model::{CountdownEvent, CountdownStart, CountdownState, TtlCountdown};

const T0: i64 = 1_700_000_000_000;

fn at(secs: i64) -> i64 {
    T0 + secs * 1000
}

/// Test: ten one-second ticks yield exactly one expiry, on the tenth
#[test]
fn test_ten_second_countdown_expires_once() {
    let mut countdown = TtlCountdown::new(Vec::new());
    assert_eq!(countdown.start("k", 10, T0), CountdownStart::Running);

    for s in 1..=9 {
        countdown.tick(at(s));
        assert_eq!(
            countdown.observer().last(),
            Some(&CountdownEvent::Tick {
                key: "k".to_string(),
                remaining: 10 - s
            })
        );
    }
    assert_eq!(countdown.remaining("k", at(9)), Some(1));

    countdown.tick(at(10));
    assert_eq!(
        countdown.observer().last(),
        Some(&CountdownEvent::Expired { key: "k".to_string() })
    );
    assert_eq!(countdown.state("k"), CountdownState::Idle);

    // Further ticks stay silent
    countdown.tick(at(11));
    countdown.tick(at(12));
    let expiries = countdown
        .observer()
        .iter()
        .filter(|e| matches!(e, CountdownEvent::Expired { .. }))
        .count();
    assert_eq!(expiries, 1);
    assert_eq!(countdown.observer().len(), 10);
}

/// Test: sentinel TTLs never start a countdown
#[test]
fn test_sentinels_stay_idle() {
    let mut countdown = TtlCountdown::new(Vec::new());

    assert_eq!(countdown.start("persistent", -1, T0), CountdownStart::Persistent);
    assert_eq!(countdown.start("missing", -2, T0), CountdownStart::Missing);
    assert_eq!(countdown.start("zero", 0, T0), CountdownStart::Expired);

    for name in ["persistent", "missing", "zero"] {
        assert_eq!(countdown.state(name), CountdownState::Idle);
    }
    assert!(!countdown.is_running());

    countdown.tick(at(5));
    assert!(countdown.observer().is_empty());
}

/// Test: stopping one key leaves the others ticking
#[test]
fn test_stop_affects_only_its_key() {
    let mut countdown = TtlCountdown::new(Vec::new());
    countdown.start("a", 3, T0);
    countdown.start("b", 3, T0);

    assert!(countdown.stop("a"));
    for s in 1..=3 {
        countdown.tick(at(s));
    }

    assert!(countdown.observer().iter().all(|e| e.key() == "b"));
    assert_eq!(
        countdown.observer().last(),
        Some(&CountdownEvent::Expired { key: "b".to_string() })
    );
}

/// Test: a late tick reports the current value instead of catching up
#[test]
fn test_late_tick_reports_once() {
    let mut countdown = TtlCountdown::new(Vec::new());
    countdown.start("k", 60, T0);

    countdown.tick(at(25));
    assert_eq!(
        countdown.observer().as_slice(),
        &[CountdownEvent::Tick {
            key: "k".to_string(),
            remaining: 35
        }]
    );
}

/// Test: events reach a channel receiver
#[tokio::test]
async fn test_channel_observer_delivers_events() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut countdown = TtlCountdown::new(tx);

    countdown.start("k", 1, T0);
    countdown.tick(at(1));

    assert_eq!(
        rx.recv().await,
        Some(CountdownEvent::Expired { key: "k".to_string() })
    );
}
