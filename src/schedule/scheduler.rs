use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::foundation::core::{Fps, FrameIndex};

/// Source of animation ticks.
///
/// Returns the index of the next tick to run, or `None` once the source is exhausted.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<FrameIndex>;
}

/// Fixed-step scheduler that never waits; ticks are produced as fast as the caller consumes them.
#[derive(Clone, Debug)]
pub struct OfflineScheduler {
    next: u64,
    end: Option<u64>,
}

impl OfflineScheduler {
    /// Produce ticks `0..frames`.
    pub fn new(frames: u64) -> Self {
        Self {
            next: 0,
            end: Some(frames),
        }
    }

    /// Produce ticks until torn down.
    pub fn unbounded() -> Self {
        Self { next: 0, end: None }
    }
}

impl FrameScheduler for OfflineScheduler {
    fn next_frame(&mut self) -> Option<FrameIndex> {
        if self.end.is_some_and(|end| self.next >= end) {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;
        Some(idx)
    }
}

/// Monotonic time source for [`PacedScheduler`].
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;
    fn sleep(&self, d: Duration);
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Clock that only moves when told to; `sleep` advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    slept: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate time spent outside the scheduler (e.g. a slow tick).
    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    /// Total time spent in `sleep`.
    pub fn slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, d: Duration) {
        self.slept.set(self.slept.get() + d);
        self.advance(d);
    }
}

/// Scheduler that releases one tick per frame period of a [`Clock`], like a display refresh.
///
/// When a tick starts more than one period late the schedule is re-anchored at the current time
/// instead of bursting to catch up.
pub struct PacedScheduler<C: Clock> {
    clock: C,
    period: Duration,
    next: u64,
    end: Option<u64>,
    anchor: Option<(Duration, u64)>,
    late: u64,
}

impl<C: Clock> PacedScheduler<C> {
    pub fn new(clock: C, fps: Fps, frames: Option<u64>) -> Self {
        Self {
            clock,
            period: Duration::from_secs_f64(fps.frame_duration_secs()),
            next: 0,
            end: frames,
            anchor: None,
            late: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How many ticks started late enough to re-anchor the schedule.
    pub fn late_ticks(&self) -> u64 {
        self.late
    }
}

impl<C: Clock> FrameScheduler for PacedScheduler<C> {
    fn next_frame(&mut self) -> Option<FrameIndex> {
        if self.end.is_some_and(|end| self.next >= end) {
            return None;
        }

        let now = self.clock.now();
        let (anchor_time, anchor_idx) = *self.anchor.get_or_insert((now, self.next));
        let steps = u32::try_from(self.next - anchor_idx).unwrap_or(u32::MAX);
        let deadline = anchor_time + self.period.saturating_mul(steps);

        if now < deadline {
            self.clock.sleep(deadline - now);
        } else if now - deadline > self.period {
            tracing::trace!(tick = self.next, behind = ?(now - deadline), "tick late; re-anchoring");
            self.anchor = Some((now, self.next));
            self.late += 1;
        }

        let idx = FrameIndex(self.next);
        self.next += 1;
        Some(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
