//! Frame scheduling: where paint timestamps come from.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("frame rate {0} has no usable frame interval")]
    InvalidRate(f64),
}

/// Yields one timestamp per display refresh.
///
/// Each call blocks until the next paint is due and returns its timestamp
/// in milliseconds. Timestamps never decrease. `None` means the host will
/// not paint again.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<f64>;
}

impl<F: FnMut() -> Option<f64>> FrameScheduler for F {
    fn next_frame(&mut self) -> Option<f64> {
        self()
    }
}

/// Simulated clock: timestamps advance by a fixed interval and nothing
/// sleeps. Optionally stops after a number of frames.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    interval_ms: f64,
    now_ms: f64,
    remaining: Option<u64>,
}

impl FixedStepScheduler {
    /// Unbounded schedule at `rate_hz` frames per second.
    pub fn new(rate_hz: f64) -> Self {
        Self {
            interval_ms: 1000.0 / rate_hz,
            now_ms: 0.0,
            remaining: None,
        }
    }

    /// Schedule that ends after `frames` paints.
    pub fn bounded(rate_hz: f64, frames: u64) -> Self {
        Self {
            remaining: Some(frames),
            ..Self::new(rate_hz)
        }
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.now_ms += self.interval_ms;
        Some(self.now_ms)
    }
}

/// Wall-clock schedule: sleeps until each refresh deadline and reports time
/// since the scheduler was created.
#[derive(Debug, Clone)]
pub struct RealtimeScheduler {
    start: Instant,
    interval: Duration,
    deadline: Instant,
    remaining: Option<u64>,
}

impl RealtimeScheduler {
    /// Fails if `rate_hz` is not positive or its interval does not fit the
    /// platform clock.
    pub fn new(rate_hz: f64) -> Result<Self, SchedulerError> {
        let start = Instant::now();
        let interval = Duration::try_from_secs_f64(1.0 / rate_hz)
            .ok()
            .filter(|i| !i.is_zero())
            .ok_or(SchedulerError::InvalidRate(rate_hz))?;
        let deadline = start
            .checked_add(interval)
            .ok_or(SchedulerError::InvalidRate(rate_hz))?;
        Ok(Self {
            start,
            interval,
            deadline,
            remaining: None,
        })
    }

    pub fn bounded(rate_hz: f64, frames: u64) -> Result<Self, SchedulerError> {
        Ok(Self {
            remaining: Some(frames),
            ..Self::new(rate_hz)?
        })
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        }
        // A late frame skips missed deadlines instead of bursting to catch up.
        let now = Instant::now();
        while self.deadline <= now {
            // A deadline past the clock's range means no further paints.
            self.deadline = self.deadline.checked_add(self.interval)?;
        }
        Some(now.duration_since(self.start).as_secs_f64() * 1000.0)
    }
}

/// Shared flag that ends a running frame loop after the current frame.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
