//! CPU and timer clocks.
use std::{
    thread,
    time::{Duration, Instant},
};

use crate::constants::*;

/// Timer to synchronize thread with the software clock of the virtual CPU.
///
/// It is designed to work with the yielding cooperative pattern
/// of the interpreter loop. When the VM yields control back to the
/// caller, time elapses until it is resumed. Once the interpreter
/// is resumed, the elapsed time is taken into account when determining
/// the next cycle.
pub(crate) struct Clock {
    start: Instant,
    interval: Duration,
}

impl Clock {
    /// Creates a new clock with the current time as internal state.
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            start: Instant::now(),
            interval,
        }
    }

    /// Clock running at the 60Hz rate of the delay and sound timers.
    pub(crate) fn timers() -> Self {
        Self::new(Duration::from_nanos(CLOCK_CYCLE_TIME))
    }

    /// Set the clock state back to zero.
    pub(crate) fn reset(&mut self) {
        self.start = Instant::now()
    }

    /// Count, without blocking, the whole clock cycles elapsed since the last tick.
    ///
    /// The start of the clock advances by exactly that many cycles, so the
    /// remainder carries over to the next tick and the clock doesn't drift.
    pub(crate) fn tick(&mut self) -> u32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.start);

        if self.interval.is_zero() {
            self.start = now;
            return 1;
        }

        let cycles = (elapsed.as_nanos() / self.interval.as_nanos()).min(u32::MAX as u128) as u32;
        self.start += self.interval * cycles;
        cycles
    }

    /// Block the current thread until the next clock cycle.
    #[cfg_attr(not(feature = "throttle"), allow(dead_code))]
    pub(crate) fn wait(&mut self) {
        loop {
            if self.start.elapsed() < self.interval {
                // Sleep does not have enough resolution, and causes
                // the clock to run at 30 FPS.
                //
                // Spinning a loop causes high CPU usage and fan madness.
                //
                // Yielding in a loop is the best alternative.
                thread::yield_now();
            } else {
                // Reset back to zero, rather than trying to catch up.
                //
                // If the VM was paused for debugging, and a large
                // amount of time has elapsed until it is resumed,
                // it should simply continue at the next cycle running
                // at its usual speed.
                self.reset();
                return;
            }
        }
    }
}

/// Length of time a timer value takes to count down to zero.
pub fn timer_duration(ticks: u8) -> Duration {
    Duration::from_nanos(CLOCK_CYCLE_TIME * ticks as u64)
}
