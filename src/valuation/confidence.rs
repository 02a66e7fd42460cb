use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Presentation-only confidence source.
///
/// Samples a uniform integer percentage within inclusive bounds. This is a
/// demo affordance, not a statistical confidence interval, and it never
/// feeds back into the price computation. The generator is seedable so
/// tests can pin the sequence.
#[derive(Debug)]
pub struct ConfidenceEstimator {
    rng: Mutex<StdRng>,
    floor: u8,
    ceiling: u8,
}

impl ConfidenceEstimator {
    pub fn new(floor: u8, ceiling: u8) -> Self {
        Self::with_rng(StdRng::from_entropy(), floor, ceiling)
    }

    pub fn seeded(seed: u64, floor: u8, ceiling: u8) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), floor, ceiling)
    }

    fn with_rng(rng: StdRng, floor: u8, ceiling: u8) -> Self {
        let (floor, ceiling) = if floor <= ceiling {
            (floor, ceiling)
        } else {
            (ceiling, floor)
        };

        Self {
            rng: Mutex::new(rng),
            floor,
            ceiling,
        }
    }

    pub fn sample(&self) -> u8 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(self.floor..=self.ceiling)
    }

    pub const fn bounds(&self) -> (u8, u8) {
        (self.floor, self.ceiling)
    }
}
