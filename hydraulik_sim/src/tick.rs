// Fixed-timestep tick scheduler.
//
// The host calls `advance(elapsed_ms)` once per rendered frame with the
// variable wall-clock delta. The scheduler accumulates that time and drains
// it in whole `step_duration_ms` chunks, emitting one simulation tick per
// chunk and invoking every subscriber with the new tick number, in
// subscription order.
//
// Catch-up is bounded: one `advance` call emits at most
// `max_catch_up_ticks` ticks. When that cap is reached (e.g. after the host
// was suspended) the leftover accumulator is dropped, not replayed. The
// simulation loses that time in exchange for a bounded frame cost. The drop
// is silent to the caller and only logged at debug level.
//
// Subscriptions are identified by a `SubscriptionId` token rather than by
// closure identity. Ids are never reused, so unsubscribing twice (or with a
// stale id) is a harmless no-op.
//
// See also: `config.rs` for `SimConfig`, `pathfinding.rs` which tick
// subscribers typically call.
//
// **Re-entrancy.** `advance` takes `&mut self` for the whole drain, so a
// subscriber cannot subscribe, unsubscribe, or call `advance` on the same
// scheduler from inside its callback. Registration during a tick is
// therefore impossible rather than merely unordered. The scheduler is not
// `Send`; a multithreaded host keeps it on one thread behind its own lock.

use crate::config::SimConfig;
use crate::error::ConfigError;
use smallvec::SmallVec;
use std::fmt;

/// Opaque handle returned by `TickScheduler::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type TickCallback = Box<dyn FnMut(u64)>;

/// Converts wall-clock frame time into deterministic simulation ticks.
pub struct TickScheduler {
    /// Elapsed time not yet converted into ticks. Always `>= 0`.
    accumulator_ms: f64,
    tick_count: u64,
    step_duration_ms: f64,
    max_catch_up_ticks: u32,
    subscribers: SmallVec<[(SubscriptionId, TickCallback); 4]>,
    /// Monotonic counter for subscription ids.
    next_subscription: u64,
}

impl Default for TickScheduler {
    fn default() -> Self {
        let config = SimConfig::default();
        Self::from_valid_config(&config)
    }
}

impl fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickScheduler")
            .field("accumulator_ms", &self.accumulator_ms)
            .field("tick_count", &self.tick_count)
            .field("step_duration_ms", &self.step_duration_ms)
            .field("max_catch_up_ticks", &self.max_catch_up_ticks)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TickScheduler {
    /// A scheduler with the default 50 ms step and catch-up cap of 8.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler using `config`. Fails on a non-positive step duration or
    /// a zero catch-up cap.
    pub fn with_config(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &SimConfig) -> Self {
        Self {
            accumulator_ms: 0.0,
            tick_count: 0,
            step_duration_ms: config.step_duration_ms,
            max_catch_up_ticks: config.max_catch_up_ticks,
            subscribers: SmallVec::new(),
            next_subscription: 0,
        }
    }

    /// Feed `elapsed_ms` of wall-clock time and emit any ticks now due.
    ///
    /// Returns the number of ticks emitted by this call (at most the
    /// catch-up cap). Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator_ms += elapsed_ms;
        }

        let mut emitted = 0;
        while self.accumulator_ms >= self.step_duration_ms && emitted < self.max_catch_up_ticks {
            self.accumulator_ms -= self.step_duration_ms;
            self.increment_tick();
            let tick = self.tick_count;
            for (_, callback) in self.subscribers.iter_mut() {
                callback(tick);
            }
            emitted += 1;
        }

        if emitted == self.max_catch_up_ticks {
            if self.accumulator_ms > 0.0 {
                tracing::debug!(
                    dropped_ms = self.accumulator_ms,
                    tick = self.tick_count,
                    "catch-up cap reached; dropping backlog"
                );
            }
            self.accumulator_ms = 0.0;
        }

        emitted
    }

    fn increment_tick(&mut self) {
        self.tick_count = match self.tick_count.checked_add(1) {
            Some(next) => next,
            None => {
                tracing::warn!("tick counter overflowed; wrapping to 0");
                0
            }
        };
    }

    /// Register `callback` to run on every future tick.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(u64) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove the callback registered under `id`.
    ///
    /// Returns `true` if a callback was removed. Calling it again with the
    /// same id returns `false` and changes nothing.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                // `remove`, not `swap_remove`: call order must be preserved.
                drop(self.subscribers.remove(index));
                true
            }
            None => false,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn step_duration_ms(&self) -> f64 {
        self.step_duration_ms
    }

    pub fn max_catch_up_ticks(&self) -> u32 {
        self.max_catch_up_ticks
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Fraction of the next tick already accumulated, in `[0, 1)`. Hosts use
    /// it to interpolate rendering between the last two simulation states.
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator_ms / self.step_duration_ms
    }
}
