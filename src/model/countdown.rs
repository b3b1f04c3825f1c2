//! TTL Countdown
//!
//! Client-side estimate of the remaining TTL for monitored keys. Each key
//! has its own entry; the owner drives `tick` roughly once a second and
//! receives tick/expiry events through a [`CountdownObserver`].
//!
//! The estimate is derived from one server snapshot and the local clock, so
//! it drifts if the TTL is changed elsewhere. Re-fetch for the real value.

use std::collections::BTreeMap;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::{TTL_MISSING, TTL_PERSISTENT};

/// Notification emitted by a running countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// One second boundary passed; `remaining` is always > 0
    Tick { key: String, remaining: i64 },
    /// Remaining time reached zero. Emitted once, then the entry is gone.
    Expired { key: String },
}

impl CountdownEvent {
    pub fn key(&self) -> &str {
        match self {
            CountdownEvent::Tick { key, .. } | CountdownEvent::Expired { key } => key,
        }
    }
}

/// Receiver of countdown notifications
pub trait CountdownObserver {
    fn notify(&mut self, event: CountdownEvent);
}

impl CountdownObserver for Vec<CountdownEvent> {
    fn notify(&mut self, event: CountdownEvent) {
        self.push(event);
    }
}

impl CountdownObserver for UnboundedSender<CountdownEvent> {
    fn notify(&mut self, event: CountdownEvent) {
        if self.send(event).is_err() {
            tracing::debug!("countdown receiver dropped, event discarded");
        }
    }
}

/// Outcome of [`TtlCountdown::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStart {
    Running,
    /// TTL was -1, nothing to count down
    Persistent,
    /// TTL was -2, the key does not exist
    Missing,
    /// TTL was already zero (or otherwise non-positive)
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CountdownEntry {
    ttl_at_start: i64,
    started_at_ms: i64,
    /// Whole seconds already reported
    seconds_reported: i64,
}

impl CountdownEntry {
    fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms - self.started_at_ms).max(0) / 1000
    }

    fn remaining(&self, now_ms: i64) -> i64 {
        (self.ttl_at_start - self.elapsed_secs(now_ms)).max(0)
    }
}

/// TTL of a fetched record as of `now_ms`, assuming the server clock runs
/// with ours. Sentinels (-1, -2) and unstamped records pass through.
pub fn ttl_now(ttl_at_fetch: i64, fetched_at_ms: i64, now_ms: i64) -> i64 {
    if ttl_at_fetch <= 0 || fetched_at_ms <= 0 {
        return ttl_at_fetch;
    }
    let elapsed = (now_ms - fetched_at_ms).max(0) / 1000;
    (ttl_at_fetch - elapsed).max(0)
}

#[derive(Debug)]
pub struct TtlCountdown<O: CountdownObserver> {
    entries: BTreeMap<String, CountdownEntry>,
    observer: O,
}

impl<O: CountdownObserver> TtlCountdown<O> {
    pub fn new(observer: O) -> Self {
        Self {
            entries: BTreeMap::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Start (or restart) the countdown for `key` from a fetched TTL
    pub fn start(&mut self, key: &str, ttl_seconds: i64, now_ms: i64) -> CountdownStart {
        if ttl_seconds <= 0 {
            self.entries.remove(key);
            return match ttl_seconds {
                TTL_PERSISTENT => CountdownStart::Persistent,
                TTL_MISSING => CountdownStart::Missing,
                _ => CountdownStart::Expired,
            };
        }

        tracing::debug!(key, ttl_seconds, "countdown started");
        self.entries.insert(
            key.to_string(),
            CountdownEntry {
                ttl_at_start: ttl_seconds,
                started_at_ms: now_ms,
                seconds_reported: 0,
            },
        );
        CountdownStart::Running
    }

    /// Advance every running countdown to `now_ms`.
    ///
    /// An entry emits at most one event per call, even if several second
    /// boundaries passed since the previous call.
    pub fn tick(&mut self, now_ms: i64) {
        let mut expired = Vec::new();

        for (key, entry) in self.entries.iter_mut() {
            let elapsed = entry.elapsed_secs(now_ms);
            if elapsed <= entry.seconds_reported {
                continue;
            }
            entry.seconds_reported = elapsed;

            let remaining = entry.remaining(now_ms);
            if remaining == 0 {
                expired.push(key.clone());
            } else {
                self.observer.notify(CountdownEvent::Tick {
                    key: key.clone(),
                    remaining,
                });
            }
        }

        for key in expired {
            self.entries.remove(&key);
            tracing::debug!(key = %key, "countdown expired");
            self.observer.notify(CountdownEvent::Expired { key });
        }
    }

    /// Cancel the countdown for `key`. No event for it fires afterwards.
    pub fn stop(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn stop_all(&mut self) {
        self.entries.clear();
    }

    /// Move a running countdown to a renamed key
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> bool {
        match self.entries.remove(old_key) {
            Some(entry) => {
                self.entries.insert(new_key.to_string(), entry);
                true
            }
            None => false,
        }
    }

    pub fn state(&self, key: &str) -> CountdownState {
        if self.entries.contains_key(key) {
            CountdownState::Running
        } else {
            CountdownState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Current estimate for a running key
    pub fn remaining(&self, key: &str, now_ms: i64) -> Option<i64> {
        self.entries.get(key).map(|e| e.remaining(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown() -> TtlCountdown<Vec<CountdownEvent>> {
        TtlCountdown::new(Vec::new())
    }

    #[test]
    fn test_ttl_now() {
        assert_eq!(ttl_now(100, 10_000, 15_500), 95);
        assert_eq!(ttl_now(3, 10_000, 20_000), 0);
        assert_eq!(ttl_now(-1, 10_000, 20_000), -1);
        assert_eq!(ttl_now(-2, 10_000, 20_000), -2);
        assert_eq!(ttl_now(50, 0, 20_000), 50);
    }

    #[test]
    fn test_start_non_positive_is_idle() {
        let mut cd = countdown();
        assert_eq!(cd.start("p", -1, 0), CountdownStart::Persistent);
        assert_eq!(cd.start("m", -2, 0), CountdownStart::Missing);
        assert_eq!(cd.start("z", 0, 0), CountdownStart::Expired);
        assert!(!cd.is_running());

        cd.tick(5_000);
        assert!(cd.observer().is_empty());
    }

    #[test]
    fn test_start_non_positive_drops_existing_entry() {
        let mut cd = countdown();
        cd.start("k", 30, 0);
        cd.start("k", -1, 1_000);
        assert_eq!(cd.state("k"), CountdownState::Idle);
    }

    #[test]
    fn test_no_event_before_first_second() {
        let mut cd = countdown();
        cd.start("k", 5, 1_000);
        cd.tick(1_999);
        assert!(cd.observer().is_empty());
        assert_eq!(cd.remaining("k", 1_999), Some(5));
    }

    #[test]
    fn test_tick_reports_remaining() {
        let mut cd = countdown();
        cd.start("k", 5, 0);
        cd.tick(1_000);
        cd.tick(2_000);
        assert_eq!(
            cd.observer().as_slice(),
            &[
                CountdownEvent::Tick { key: "k".into(), remaining: 4 },
                CountdownEvent::Tick { key: "k".into(), remaining: 3 },
            ]
        );
    }

    #[test]
    fn test_late_tick_catches_up_once() {
        let mut cd = countdown();
        cd.start("k", 10, 0);
        cd.tick(3_500);
        assert_eq!(
            cd.observer().as_slice(),
            &[CountdownEvent::Tick { key: "k".into(), remaining: 7 }]
        );
        // same second again: nothing new
        cd.tick(3_900);
        assert_eq!(cd.observer().len(), 1);
    }

    #[test]
    fn test_expiry_fires_once_and_goes_idle() {
        let mut cd = countdown();
        cd.start("k", 2, 0);
        cd.tick(1_000);
        cd.tick(2_000);
        cd.tick(3_000);
        cd.tick(4_000);

        let expiries = cd
            .observer()
            .iter()
            .filter(|e| matches!(e, CountdownEvent::Expired { .. }))
            .count();
        assert_eq!(expiries, 1);
        assert_eq!(cd.state("k"), CountdownState::Idle);
    }

    #[test]
    fn test_stop_cancels() {
        let mut cd = countdown();
        cd.start("k", 1, 0);
        assert!(cd.stop("k"));
        assert!(!cd.stop("k"));
        cd.tick(5_000);
        assert!(cd.observer().is_empty());
    }

    #[test]
    fn test_keys_tick_independently() {
        let mut cd = countdown();
        cd.start("a", 1, 0);
        cd.start("b", 3, 0);
        cd.tick(1_000);
        assert_eq!(cd.state("a"), CountdownState::Idle);
        assert_eq!(cd.state("b"), CountdownState::Running);

        cd.stop("b");
        cd.tick(2_000);
        assert_eq!(
            cd.observer().as_slice(),
            &[
                CountdownEvent::Tick { key: "b".into(), remaining: 2 },
                CountdownEvent::Expired { key: "a".into() },
            ]
        );
    }

    #[test]
    fn test_rename_keeps_progress() {
        let mut cd = countdown();
        cd.start("old", 10, 0);
        assert!(cd.rename("old", "new"));
        assert_eq!(cd.state("old"), CountdownState::Idle);
        assert_eq!(cd.remaining("new", 4_000), Some(6));
        assert!(!cd.rename("missing", "x"));
    }

    #[tokio::test]
    async fn test_channel_observer() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut cd = TtlCountdown::new(tx);
        cd.start("k", 1, 0);
        cd.tick(1_000);

        assert_eq!(rx.recv().await, Some(CountdownEvent::Expired { key: "k".into() }));
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let mut cd = TtlCountdown::new(tx);
        cd.start("k", 1, 0);
        cd.tick(1_000);
        assert!(!cd.is_running());
    }
}
