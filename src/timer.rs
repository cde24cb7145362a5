#![cfg(feature = "std")]

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::game::{GameEvent, Match};

/// Countdown bound to one match. Ticks the match clock once per `period`
/// and stops as soon as the match is over.
///
/// The task is aborted by [`cancel`](CountdownTimer::cancel) and on drop, so a
/// finished or replaced match never receives a late tick.
pub struct CountdownTimer {
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    /// Spawn the countdown on the current tokio runtime.
    pub fn start(
        shared: Arc<Mutex<Match>>,
        events: broadcast::Sender<GameEvent>,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let (pending, over) = {
                    let Ok(mut m) = shared.lock() else { break };
                    if m.is_over() {
                        break;
                    }
                    let ended = m.tick(1);
                    if ended {
                        log::info!("match {}: time is up", m.id());
                    }
                    (m.drain_events(), m.is_over())
                };
                for event in pending {
                    let _ = events.send(event);
                }
                if over {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the countdown task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
