//! Action and observation spaces.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Observation, OBSERVATION_SHAPE};

/// A finite set of integers `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    /// Create a space of `n` values.
    #[must_use]
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    /// Check whether `x` lies in the space.
    #[must_use]
    pub fn contains(&self, x: usize) -> bool {
        x < self.n
    }

    /// Draw a uniform sample.
    pub fn sample(&self, rng: &mut GameRng) -> usize {
        rng.gen_range_usize(0..self.n)
    }
}

/// A box of integer markers with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: u8,
    pub high: u8,
    pub shape: [usize; 3],
}

impl BoxSpace {
    /// The space of 3-layer board observations.
    #[must_use]
    pub const fn board() -> Self {
        Self {
            low: 0,
            high: 1,
            shape: OBSERVATION_SHAPE,
        }
    }

    /// Check whether every marker of `obs` is within bounds.
    #[must_use]
    pub fn contains(&self, obs: &Observation) -> bool {
        obs.shape() == self.shape && obs.to_vec().iter().all(|&v| (self.low..=self.high).contains(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    #[test]
    fn test_discrete_contains_and_sample() {
        let space = Discrete::new(9);
        assert!(space.contains(0));
        assert!(space.contains(8));
        assert!(!space.contains(9));

        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            assert!(space.contains(space.sample(&mut rng)));
        }
    }

    #[test]
    fn test_box_contains_board() {
        let space = BoxSpace::board();
        assert!(space.contains(&Board::new().to_observation()));

        let mut obs = Observation::zeros();
        obs.set(0, 0, 0, 2);
        assert!(!space.contains(&obs));
    }
}
