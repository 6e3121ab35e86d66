//! Randomized latency configuration
//!
//! Each notification delivery and each command execution draws an
//! independent delay from one of these ranges. The draws model agents
//! learning about, and acting on, the market at unpredictable times.

use rand::Rng;
use std::time::Duration;

/// Millisecond range a delay is drawn from, `min..max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draw one independent delay.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..self.max_ms))
    }
}

/// Session-wide latency model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayConfig {
    /// Engine → agent notification delay.
    pub information: DelayRange,
    /// Agent → engine command delay.
    pub execution: DelayRange,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            information: DelayRange::new(500, 2000),
            execution: DelayRange::new(250, 1000),
        }
    }
}

impl DelayConfig {
    /// Zero-latency model for deterministic tests.
    pub const fn immediate() -> Self {
        Self {
            information: DelayRange::new(0, 0),
            execution: DelayRange::new(0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sample_stays_in_range() {
        let range = DelayRange::new(250, 1000);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let delay = range.sample(&mut rng).as_millis() as u64;
            assert!((250..1000).contains(&delay));
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(DelayRange::new(0, 0).sample(&mut rng), Duration::ZERO);
        assert_eq!(
            DelayRange::new(7, 7).sample(&mut rng),
            Duration::from_millis(7)
        );
    }
}
