//! Live log stream sessions
//!
//! A session opens with a burst of records, then emits one record per
//! randomly delayed tick until the consumer goes away or the session
//! lifetime runs out. Everything a session holds (its timer, its sender,
//! its slot in the active-streams gauge) is released when it is dropped.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use pulse_synth::generate_log_record;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::rest::AppState;
use crate::config::StreamSettings;
use crate::metrics::FeedMetrics;

/// A record that could not be turned into a frame ends the session
#[derive(Debug, thiserror::Error)]
pub enum StreamFault {
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    ConsumerGone,
    LifetimeElapsed,
    Fault,
    /// Task dropped without finishing, e.g. at runtime shutdown
    Aborted,
}

/// Open a session and return its frame receiver.
///
/// The opening burst is already buffered when this returns. Dropping the
/// receiver closes the session at its next wake-up.
pub fn open_session(state: &AppState) -> mpsc::Receiver<String> {
    let settings = state.config.stream.clone();
    let seed = state.with_rng(|rng| rng.gen::<u64>());
    let (tx, rx) = mpsc::channel(settings.buffer());
    let deadline = Instant::now() + settings.lifetime;

    let mut session = StreamSession::new(seed, settings, tx, state.metrics.clone());
    if session.emit_burst() {
        tokio::spawn(session.run(deadline));
    }

    rx
}

struct StreamSession {
    rng: StdRng,
    settings: StreamSettings,
    tx: mpsc::Sender<String>,
    next_id: u64,
    last_timestamp: Option<DateTime<Utc>>,
    guard: SessionGuard,
}

impl StreamSession {
    fn new(seed: u64, settings: StreamSettings, tx: mpsc::Sender<String>, metrics: FeedMetrics) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            settings,
            tx,
            next_id: 0,
            last_timestamp: None,
            guard: SessionGuard::open(metrics),
        }
    }

    /// Buffer the opening burst. Returns false if the session is already over.
    fn emit_burst(&mut self) -> bool {
        for _ in 0..self.settings.initial_burst {
            let frame = match self.next_frame() {
                Ok(frame) => frame,
                Err(fault) => {
                    warn!(session_id = %self.guard.id, error = %fault, "Log stream fault");
                    self.guard.reason = CloseReason::Fault;
                    return false;
                }
            };
            if self.tx.try_send(frame).is_err() {
                self.guard.reason = CloseReason::ConsumerGone;
                return false;
            }
            self.guard.record_frame();
        }
        true
    }

    async fn run(mut self, deadline: Instant) {
        let reason = loop {
            let delay = self.next_delay();
            tokio::select! {
                biased;
                _ = self.tx.closed() => break CloseReason::ConsumerGone,
                _ = sleep_until(deadline) => break CloseReason::LifetimeElapsed,
                _ = sleep(delay) => {}
            }

            let frame = match self.next_frame() {
                Ok(frame) => frame,
                Err(fault) => {
                    warn!(session_id = %self.guard.id, error = %fault, "Log stream fault");
                    break CloseReason::Fault;
                }
            };

            tokio::select! {
                biased;
                _ = sleep_until(deadline) => break CloseReason::LifetimeElapsed,
                sent = self.tx.send(frame) => {
                    if sent.is_err() {
                        break CloseReason::ConsumerGone;
                    }
                }
            }
            self.guard.record_frame();
        };

        self.guard.reason = reason;
    }

    fn next_frame(&mut self) -> Result<String, StreamFault> {
        let timestamp = self.next_timestamp();
        let record = generate_log_record(&mut self.rng, format!("log-{}", self.next_id), timestamp);
        self.next_id += 1;
        Ok(serde_json::to_string(&record)?)
    }

    /// Wall-clock now, nudged forward so timestamps never repeat within a session
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if now <= last => last + ChronoDuration::nanoseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }

    fn next_delay(&mut self) -> Duration {
        self.rng
            .gen_range(self.settings.min_interval..self.settings.max_interval)
    }
}

struct SessionGuard {
    id: Uuid,
    frames: u64,
    reason: CloseReason,
    opened_at: Instant,
    metrics: FeedMetrics,
}

impl SessionGuard {
    fn open(metrics: FeedMetrics) -> Self {
        let id = Uuid::new_v4();
        metrics.sessions_opened.inc();
        metrics.active_streams.inc();
        info!(session_id = %id, "Log stream opened");

        Self {
            id,
            frames: 0,
            reason: CloseReason::Aborted,
            opened_at: Instant::now(),
            metrics,
        }
    }

    fn record_frame(&mut self) {
        self.frames += 1;
        self.metrics.frames_emitted.inc();
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.metrics.active_streams.dec();
        info!(
            session_id = %self.id,
            frames = self.frames,
            reason = ?self.reason,
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            "Log stream closed"
        );
    }
}
