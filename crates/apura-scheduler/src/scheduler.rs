//! Debounced, sequence-gated execution scheduling
//!
//! The scheduler keeps the aggregation collaborator's output synchronized
//! with the configuration model without issuing one request per
//! keystroke. It runs as a spawned task driven by three events:
//! configuration changed (restart the debounce window), timer fired
//! (gate check, then dispatch), response arrived (sequence gate).
//!
//! Responses may resolve out of dispatch order; a monotonic sequence
//! number per dispatch and a last-applied watermark decide what is
//! displayed. In-flight requests are never cancelled: staleness is
//! handled by discarding outdated responses.

use crate::client::{AggregationClient, AggregationError};
use apura_model::{AnalysisConfiguration, ResultSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant};
use ulid::Ulid;

/// Scheduler tuning
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Quiet period after the last relevant change before dispatching
    pub debounce: Duration,
}

impl SchedulerConfig {
    /// Default tuning (500 ms debounce)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

/// Where the scheduler currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing pending
    Idle,
    /// Debounce window open, waiting for it to close uninterrupted
    PendingTimer,
    /// Dispatched, newest in-flight sequence
    AwaitingResponse(u64),
}

/// Handle to a running scheduler task
#[derive(Debug)]
pub struct SchedulerHandle {
    results_rx: watch::Receiver<Option<ResultSet>>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Subscribe to the displayed result
    ///
    /// Holds `None` until a first response is applied; retains the last
    /// applied rows across failed or suppressed executions.
    #[must_use]
    pub fn results(&self) -> watch::Receiver<Option<ResultSet>> {
        self.results_rx.clone()
    }

    /// Wait for the task to exit
    ///
    /// The task exits once the configuration sender is dropped (session
    /// dispose).
    pub async fn join(self) {
        let _ = self.join.await;
    }

    /// Force-stop the task, abandoning in-flight work
    pub fn abort(&self) {
        self.join.abort();
    }
}

/// The execution scheduler
pub struct ExecutionScheduler;

impl ExecutionScheduler {
    /// Spawn a scheduler over a configuration subscription
    ///
    /// The initial configuration opens a debounce window too, so a session
    /// pre-filled from a template executes without requiring an edit
    /// first.
    #[must_use]
    pub fn spawn(
        client: Arc<dyn AggregationClient>,
        config_rx: watch::Receiver<AnalysisConfiguration>,
        config: SchedulerConfig,
    ) -> SchedulerHandle {
        let (results_tx, results_rx) = watch::channel(None);
        let join = tokio::spawn(run(client, config_rx, results_tx, config));
        SchedulerHandle { results_rx, join }
    }
}

async fn run(
    client: Arc<dyn AggregationClient>,
    mut config_rx: watch::Receiver<AnalysisConfiguration>,
    results_tx: watch::Sender<Option<ResultSet>>,
    config: SchedulerConfig,
) {
    let scheduler_id = Ulid::new();
    tracing::debug!(%scheduler_id, debounce_ms = config.debounce.as_millis() as u64, "scheduler started");

    let mut last_key = config_rx.borrow().execution_key();
    // the initial configuration gets a window of its own
    let mut phase = Phase::PendingTimer;
    let mut deadline = Instant::now() + config.debounce;

    let mut next_sequence: u64 = 0;
    let mut last_applied: u64 = 0;
    let mut inflight: JoinSet<(u64, Result<ResultSet, AggregationError>)> = JoinSet::new();

    loop {
        tokio::select! {
            changed = config_rx.changed() => {
                match changed {
                    Ok(()) => {
                        let key = config_rx.borrow_and_update().execution_key();
                        // display-option edits publish too; only the
                        // execution-relevant projection restarts the window
                        if key != last_key {
                            last_key = key;
                            deadline = Instant::now() + config.debounce;
                            phase = Phase::PendingTimer;
                            tracing::debug!(%scheduler_id, "configuration changed, debounce window restarted");
                        }
                    }
                    Err(_) => {
                        tracing::debug!(%scheduler_id, "configuration channel closed, scheduler stopping");
                        break;
                    }
                }
            }
            () = time::sleep_until(deadline), if phase == Phase::PendingTimer => {
                let snapshot = config_rx.borrow().clone();
                if snapshot.ready_for_execution() {
                    next_sequence += 1;
                    let sequence = next_sequence;
                    let client = Arc::clone(&client);
                    tracing::debug!(%scheduler_id, sequence, "dispatching execution request");
                    inflight.spawn(async move {
                        let outcome = client.execute(&snapshot).await;
                        (sequence, outcome)
                    });
                    phase = Phase::AwaitingResponse(sequence);
                } else {
                    // gate not met: no dispatch, previous rows stay as-is
                    tracing::debug!(%scheduler_id, "readiness gate not met, dispatch suppressed");
                    phase = Phase::Idle;
                }
            }
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                match joined {
                    Ok((sequence, Ok(result))) => {
                        if sequence >= last_applied {
                            last_applied = sequence;
                            tracing::debug!(%scheduler_id, sequence, rows = result.len(), "result applied");
                            results_tx.send_replace(Some(result));
                        } else {
                            tracing::debug!(%scheduler_id, sequence, last_applied, "stale result discarded");
                        }
                    }
                    Ok((sequence, Err(error))) => {
                        // silent degrade: editing is never interrupted by
                        // a transient backend failure
                        tracing::warn!(%scheduler_id, sequence, %error, "execution request failed");
                    }
                    Err(join_error) => {
                        tracing::warn!(%scheduler_id, %join_error, "execution task panicked");
                    }
                }
                if inflight.is_empty() && phase != Phase::PendingTimer {
                    phase = Phase::Idle;
                }
            }
        }
    }
}
