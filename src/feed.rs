//! Periodic refresh of the marker sequence: one owned polling task that
//! replaces the published snapshot wholesale on every cycle.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::model::{Marker, RawTicket, SelectionRef};
use crate::normalize::normalize;
use crate::remote::{TicketClient, TicketFilters};
use crate::resolve::resolve_selection;
use crate::stats::{self, StatusCounts};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// User-visible data state of the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedPhase {
    /// No cycle has completed yet.
    Loading,
    /// Markers are loaded.
    Ready,
    /// The fetch succeeded but produced no usable markers.
    Empty,
    /// The fetch failed; retryable, previous data discarded.
    Failed(String),
}

/// Everything a cycle publishes, replaced atomically and never patched.
#[derive(Clone, Debug)]
pub struct FeedSnapshot {
    pub markers: Vec<Marker>,
    pub stats: StatusCounts,
    pub phase: FeedPhase,
}

impl FeedSnapshot {
    fn loading() -> Self {
        Self {
            markers: Vec::new(),
            stats: StatusCounts::default(),
            phase: FeedPhase::Loading,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == FeedPhase::Ready
    }

    /// Resolves a selection reference against this snapshot's markers.
    /// Only a loaded snapshot can resolve anything.
    pub fn resolve(&self, reference: &SelectionRef) -> Option<String> {
        if !self.is_loaded() {
            return None;
        }
        resolve_selection(reference, &self.markers)
    }
}

/// Builds the snapshot a completed fetch cycle publishes. Pure; the
/// scheduler only adds timing around this.
pub fn cycle_snapshot(fetched: Result<Vec<RawTicket>>) -> FeedSnapshot {
    match fetched {
        Err(err) => FeedSnapshot {
            markers: Vec::new(),
            stats: StatusCounts::default(),
            phase: FeedPhase::Failed(format!("{:#}", err)),
        },
        Ok(tickets) => {
            let markers = normalize(&tickets);
            if markers.is_empty() {
                FeedSnapshot {
                    markers,
                    stats: StatusCounts::default(),
                    phase: FeedPhase::Empty,
                }
            } else {
                let stats = stats::aggregate(&markers);
                FeedSnapshot {
                    markers,
                    stats,
                    phase: FeedPhase::Ready,
                }
            }
        }
    }
}

/// A periodically refreshed marker feed. The polling task is scoped to its
/// owner: dropping the feed cancels it on every exit path, so no cycle
/// outlives the consumer.
pub struct TicketFeed {
    rx: watch::Receiver<FeedSnapshot>,
    refresh_tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl TicketFeed {
    /// Starts polling: one cycle immediately, then one per interval.
    pub fn spawn(client: TicketClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(FeedSnapshot::loading());
        let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Some(()) = refresh_rx.recv() => {}
                }
                let snapshot =
                    cycle_snapshot(client.fetch_tickets(&TicketFilters::default()).await);
                if tx.send(snapshot).is_err() {
                    // Every receiver is gone; nothing left to publish to.
                    break;
                }
            }
        });

        Self {
            rx,
            refresh_tx,
            task,
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.rx.borrow().clone()
    }

    /// An independent receiver for the published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.rx.clone()
    }

    /// Waits for the next published snapshot and returns it.
    pub async fn next_snapshot(&mut self) -> Result<FeedSnapshot> {
        self.rx.changed().await.context("feed task stopped")?;
        let snapshot = self.rx.borrow_and_update().clone();
        Ok(snapshot)
    }

    /// Requests a cycle ahead of the next scheduled tick. Manual retries go
    /// through the same task as scheduled ones, so cycles stay serialized.
    pub fn refresh_now(&self) {
        let _ = self.refresh_tx.send(());
    }
}

impl Drop for TicketFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
