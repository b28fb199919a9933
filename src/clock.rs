//! Monotonic game clock.
//!
//! Wall time is accumulated into a millisecond counter that drives cooldowns
//! and buff expiry. Sub-millisecond remainders carry over to the next tick. The frame counter counts ticks and drives per-frame decay
//! such as invincibility.

use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    now_ms: u64,
    /// Microseconds not yet folded into `now_ms`, always below 1000.
    carry_us: u64,
    frame: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick covering `elapsed` of wall time.
    pub fn advance(&mut self, elapsed: Duration) {
        let us = u64::try_from(elapsed.as_micros())
            .unwrap_or(u64::MAX)
            .saturating_add(self.carry_us);
        self.now_ms = self.now_ms.saturating_add(us / 1000);
        self.carry_us = us % 1000;
        self.frame += 1;
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// True when strictly more than `cooldown_ms` has passed since `since_ms`.
    pub fn elapsed_since(&self, since_ms: u64, cooldown_ms: u64) -> bool {
        self.now_ms.saturating_sub(since_ms) > cooldown_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_wall_time_and_counts_frames() {
        let mut clock = Clock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));
        assert_eq!(clock.now_ms(), 33);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn sub_millisecond_remainders_carry_over() {
        let mut clock = Clock::new();
        for _ in 0..60 {
            clock.advance(Duration::from_micros(16_667));
        }
        assert_eq!(clock.now_ms(), 1_000);
        assert_eq!(clock.frame(), 60);
    }

    #[test]
    fn zero_elapsed_still_counts_a_frame() {
        let mut clock = Clock::new();
        clock.advance(Duration::ZERO);
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn cooldown_is_strict() {
        let mut clock = Clock::new();
        clock.advance(Duration::from_millis(220));
        assert!(!clock.elapsed_since(0, 220));
        clock.advance(Duration::from_millis(1));
        assert!(clock.elapsed_since(0, 220));
    }
}
