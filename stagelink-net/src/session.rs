//! Session lifecycle: owns the two channels and drives them from the host
//! main loop.
//!
//! The host calls [`Session::tick`] from its main loop; each channel fires
//! on its own interval and re-arms unconditionally, so a bad message or a
//! failed poll never stops future ticks. The channels and their sockets
//! are owned here exclusively.

use std::time::{Duration, Instant};

use log::{info, warn};

use stagelink_types::{NodeTable, SceneGraph, SnapshotSet};

use crate::config::DistributionConfig;
use crate::dispatch::apply_update;
use crate::error::{Error, Result};
use crate::responder::Responder;
use crate::subscriber::Subscriber;

/// Snapshot requests are answered within this interval.
pub const RESPONDER_INTERVAL: Duration = Duration::from_millis(100);

/// Update messages are picked up within this interval.
pub const SUBSCRIBER_INTERVAL: Duration = Duration::from_millis(10);

/// A repeating deadline on the host's cooperative loop.
///
/// `due` re-arms regardless of what the tick body then does; failures in
/// the body never unregister the timer.
#[derive(Debug)]
struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            _ => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    fn disarm(&mut self) {
        self.next = None;
    }
}

/// Everything a running session owns. Dropped as a unit on stop.
struct Active {
    responder: Responder,
    subscriber: Subscriber,
    snapshots: SnapshotSet,
    nodes: NodeTable,
    responder_tick: Ticker,
    subscriber_tick: Ticker,
}

/// One scene distribution session.
///
/// Created idle; `start` opens the channels, `tick` drives them, `stop`
/// tears everything down. `stop` is idempotent and safe before `start`.
pub struct Session {
    config: DistributionConfig,
    active: Option<Active>,
}

impl Session {
    pub fn new(config: DistributionConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Address the responder actually bound, for consumers and tests.
    pub fn responder_addr(&self) -> Option<std::net::SocketAddr> {
        self.active
            .as_ref()
            .and_then(|a| a.responder.local_addr().ok())
    }

    /// Open both channels and arm the tickers.
    ///
    /// Requires the snapshot buffers to be populated with at least one
    /// object; fails with [`Error::NotReady`] otherwise. A bind or connect
    /// failure aborts the start and leaves the session idle.
    pub fn start(&mut self, snapshots: SnapshotSet, nodes: NodeTable) -> Result<()> {
        if self.active.is_some() {
            info!("session already running, restarting");
            self.stop();
        }
        if !snapshots.is_populated() {
            return Err(Error::NotReady);
        }

        let responder = Responder::bind(&self.config.responder_addr())?;
        let subscriber = Subscriber::connect(&self.config.subscriber_addr())?;

        info!(
            "session started: {} objects, {} nodes",
            snapshots.object_count,
            nodes.len()
        );

        self.active = Some(Active {
            responder,
            subscriber,
            snapshots,
            nodes,
            responder_tick: Ticker::new(RESPONDER_INTERVAL),
            subscriber_tick: Ticker::new(SUBSCRIBER_INTERVAL),
        });
        Ok(())
    }

    /// Drive both channels. Called from the host main loop; returns
    /// immediately when neither ticker is due or the session is idle.
    pub fn tick(&mut self, scene: &mut dyn SceneGraph, now: Instant) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        if active.responder_tick.due(now) {
            if let Err(e) = active.responder.poll(&active.snapshots) {
                warn!("responder poll failed: {}", e);
            }
        }

        if active.subscriber_tick.due(now) {
            match active.subscriber.poll() {
                Ok(messages) => {
                    for raw in messages {
                        if let Err(e) = apply_update(&raw, &active.nodes, scene) {
                            warn!("dropping update: {}", e);
                        }
                    }
                }
                Err(e) => warn!("subscriber poll failed: {}", e),
            }
        }
    }

    /// Tear the session down: disarm both tickers, then close the
    /// channels and discard the node table and snapshot buffers. A no-op
    /// on an idle session.
    pub fn stop(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        // Tickers go first so no further tick can touch the sockets.
        active.responder_tick.disarm();
        active.subscriber_tick.disarm();
        drop(active);
        info!("session stopped");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
