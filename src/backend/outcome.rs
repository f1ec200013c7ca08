//! Outcome providers deciding whether a mocked call fails.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Strategy consulted by the mock backend after its simulated latency.
///
pub trait OutcomeProvider: Send + Sync {
    /// Return true if the call should fail with a network error.
    fn should_fail(&self) -> bool;
}

/// Fails with a fixed probability.
///
pub struct RandomOutcome {
    failure_probability: f64,
    rng: Mutex<StdRng>,
}

impl RandomOutcome {
    /// Return a provider seeded from system entropy.
    ///
    pub fn new(failure_probability: f64) -> Self {
        Self::with_rng(failure_probability, StdRng::from_entropy())
    }

    /// Return a provider producing a reproducible sequence.
    ///
    pub fn seeded(failure_probability: f64, seed: u64) -> Self {
        Self::with_rng(failure_probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(failure_probability: f64, rng: StdRng) -> Self {
        let failure_probability = if failure_probability.is_nan() {
            0.0
        } else {
            failure_probability.clamp(0.0, 1.0)
        };
        RandomOutcome {
            failure_probability,
            rng: Mutex::new(rng),
        }
    }

    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }
}

impl OutcomeProvider for RandomOutcome {
    fn should_fail(&self) -> bool {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(self.failure_probability),
            Err(_) => false,
        }
    }
}

/// Always produces the same outcome.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedOutcome {
    Succeed,
    Fail,
}

impl OutcomeProvider for FixedOutcome {
    fn should_fail(&self) -> bool {
        *self == FixedOutcome::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_outcomes() {
        assert!(!FixedOutcome::Succeed.should_fail());
        assert!(FixedOutcome::Fail.should_fail());
    }

    #[test]
    fn test_random_outcome_extremes() {
        let never = RandomOutcome::new(0.0);
        let always = RandomOutcome::new(1.0);
        for _ in 0..100 {
            assert!(!never.should_fail());
            assert!(always.should_fail());
        }
    }

    #[test]
    fn test_random_outcome_clamps_probability() {
        assert_eq!(RandomOutcome::new(3.0).failure_probability(), 1.0);
        assert_eq!(RandomOutcome::new(-1.0).failure_probability(), 0.0);
        assert_eq!(RandomOutcome::new(f64::NAN).failure_probability(), 0.0);
    }

    #[test]
    fn test_seeded_outcome_is_reproducible() {
        let a = RandomOutcome::seeded(0.5, 42);
        let b = RandomOutcome::seeded(0.5, 42);
        let first: Vec<bool> = (0..32).map(|_| a.should_fail()).collect();
        let second: Vec<bool> = (0..32).map(|_| b.should_fail()).collect();
        assert_eq!(first, second);
    }
}
