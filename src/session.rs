use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{FitError, Result};

/// Result of feeding one tick to a [`SessionTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already finished; nothing changed
    Idle,
    /// One second consumed, this many remain
    Remaining(u32),
    /// The countdown reached zero on this tick
    Completed,
}

/// Countdown for a single workout attempt.
///
/// The timer never schedules anything itself: the host calls [`tick`](Self::tick)
/// once per elapsed second of running time. `remaining_seconds` only moves while
/// running, by exactly one per tick, and completion is reported exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimer {
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
    completed: bool,
}

impl SessionTimer {
    /// Create a paused timer for `duration_seconds`.
    pub fn start(duration_seconds: i64) -> Result<Self> {
        let total = validate_duration(duration_seconds)?;
        Ok(Self {
            total_seconds: total,
            remaining_seconds: total,
            running: false,
            completed: false,
        })
    }

    /// Flip between running and paused. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        debug!(running = self.running, remaining = self.remaining_seconds, "timer toggled");
        self.running
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.completed {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            self.completed = true;
            debug!(total = self.total_seconds, "timer completed");
            TickOutcome::Completed
        } else {
            TickOutcome::Remaining(self.remaining_seconds)
        }
    }

    /// Re-initialize as if freshly started. On error the timer is left as it was.
    pub fn reset(&mut self, duration_seconds: i64) -> Result<()> {
        *self = Self::start(duration_seconds)?;
        Ok(())
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds - self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Fraction of the session already done, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.elapsed_seconds() as f64 / self.total_seconds as f64
    }
}

fn validate_duration(duration_seconds: i64) -> Result<u32> {
    if duration_seconds <= 0 {
        return Err(FitError::InvalidDuration(duration_seconds));
    }
    u32::try_from(duration_seconds).map_err(|_| FitError::DurationTooLong(duration_seconds))
}

/// Host-side schedule that turns monotonic time into whole one-second ticks.
///
/// Frames arrive at a much higher and irregular rate than ticks. `due` reports
/// how many full seconds of running time have passed since the last call, so a
/// late frame yields catch-up ticks and no second is counted twice. Time spent
/// paused does not count; the partial second accumulated before a pause is
/// carried over to the resume.
#[derive(Debug, Clone, Default)]
pub struct TickSchedule {
    anchor: Option<Instant>,
    carried: Duration,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn resume(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(anchor) = self.anchor.take() {
            // seconds not yet collected by `due` stay owed until the next resume
            self.carried += now.saturating_duration_since(anchor);
        }
    }

    /// Number of ticks owed since the previous call.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };

        let pending = self.carried + now.saturating_duration_since(anchor);
        let whole = pending.as_secs();
        if whole == 0 {
            return 0;
        }

        let leftover = pending - Duration::from_secs(whole);
        self.anchor = Some(now.checked_sub(leftover).unwrap_or(now));
        self.carried = Duration::ZERO;
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}
