//! Time management utilities

use std::time::{Duration, Instant};

use crate::EngineError;

/// Wall-clock frame timer reporting deltas in milliseconds
pub struct FrameClock {
    last_tick: Option<Instant>,
    delta_ms: f64,
    total_ms: f64,
    tick_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock; the first tick reports a zero delta
    pub fn new() -> Self {
        Self {
            last_tick: None,
            delta_ms: 0.0,
            total_ms: 0.0,
            tick_count: 0,
        }
    }

    /// Advance the clock and return the milliseconds since the previous tick
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.delta_ms = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64() * 1000.0);
        self.total_ms += self.delta_ms;
        self.last_tick = Some(now);
        self.tick_count += 1;
        self.delta_ms
    }

    /// Milliseconds between the last two ticks
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Milliseconds accumulated since the first tick
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Number of ticks taken
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Average ticks per second since the first tick
    pub fn average_rate(&self) -> f64 {
        if self.total_ms > 0.0 {
            self.tick_count as f64 * 1000.0 / self.total_ms
        } else {
            0.0
        }
    }
}

/// Fixed-rate pacer for driving the tick loop
///
/// `wait` sleeps until the next deadline. When the loop falls behind, the
/// schedule is re-anchored to now instead of bursting to catch up.
pub struct Pacer {
    period: Duration,
    next_deadline: Instant,
}

impl Pacer {
    /// Create a pacer firing `rate_hz` times per second
    pub fn new(rate_hz: f64) -> Result<Self, EngineError> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(EngineError::InvalidTickRate(rate_hz));
        }
        let period = Duration::try_from_secs_f64(1.0 / rate_hz)
            .map_err(|_| EngineError::InvalidTickRate(rate_hz))?;
        let next_deadline = Instant::now()
            .checked_add(period)
            .ok_or(EngineError::InvalidTickRate(rate_hz))?;
        Ok(Self {
            period,
            next_deadline,
        })
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next_deadline.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next_deadline += self.period;
        } else {
            self.next_deadline = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.tick_count(), 1);
    }

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick();
        std::thread::sleep(Duration::from_millis(5));
        let delta = clock.tick();
        assert!(delta >= 5.0);
        assert!(clock.total_ms() >= delta);
    }

    #[test]
    fn test_pacer_rejects_invalid_rate() {
        assert!(Pacer::new(0.0).is_err());
        assert!(Pacer::new(-10.0).is_err());
        assert!(Pacer::new(f64::NAN).is_err());
    }

    #[test]
    fn test_pacer_rejects_unrepresentable_period() {
        assert!(matches!(Pacer::new(1e-300), Err(EngineError::InvalidTickRate(_))));
        assert!(matches!(Pacer::new(f64::MIN_POSITIVE), Err(EngineError::InvalidTickRate(_))));
        assert!(matches!(Pacer::new(1e-19), Err(EngineError::InvalidTickRate(_))));
    }

    #[test]
    fn test_pacer_period() {
        let pacer = Pacer::new(120.0).unwrap();
        assert_eq!(pacer.period(), Duration::from_secs_f64(1.0 / 120.0));
    }
}
