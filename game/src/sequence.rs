use std::ops::Deref;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

pub const INITIAL_SEQUENCE_LENGTH: usize = 3;
/// Last round of the first climb; the length drops back afterwards.
pub const FIRST_CLIMB_ROUNDS: u32 = 5;

/// Number of cues shown in `round` (1-based).
///
/// Rounds 1..=5 climb from 3 to 7. From round 6 the length is `(round - 5) + 2`, so it drops
/// back to 3 and climbs again without wrapping a second time.
pub fn sequence_length(round: u32) -> usize {
    let round = round.max(1);
    let step = if round <= FIRST_CLIMB_ROUNDS {
        round
    } else {
        round - FIRST_CLIMB_ROUNDS
    };
    step as usize + (INITIAL_SEQUENCE_LENGTH - 1)
}

/// The cues for one round. Immutable once generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Direction>);

impl Sequence {
    pub fn generate<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self((0..len).map(|_| Direction::random(rng)).collect())
    }

    pub fn for_round<R: Rng + ?Sized>(round: u32, rng: &mut R) -> Self {
        Self::generate(sequence_length(round), rng)
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    /// Element-wise equality with a player's attempt; any length difference is a mismatch.
    pub fn matches(&self, attempt: &[Direction]) -> bool {
        self.0.as_slice() == attempt
    }
}

impl From<Vec<Direction>> for Sequence {
    fn from(value: Vec<Direction>) -> Self {
        Self(value)
    }
}

impl Deref for Sequence {
    type Target = [Direction];

    fn deref(&self) -> &[Direction] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use Direction::*;

    #[test]
    fn first_five_rounds_are_round_plus_two() {
        for round in 1..=5 {
            assert_eq!(sequence_length(round), round as usize + 2);
        }
    }

    #[test]
    fn round_six_resets_to_three_and_climbs() {
        assert_eq!(sequence_length(6), 3);
        assert_eq!(sequence_length(7), 4);
        assert_eq!(sequence_length(10), 7);
    }

    #[test]
    fn later_rounds_keep_the_literal_formula() {
        assert_eq!(sequence_length(11), 8);
        assert_eq!(sequence_length(15), 12);
    }

    #[test]
    fn round_zero_is_treated_as_round_one() {
        assert_eq!(sequence_length(0), 3);
    }

    #[test]
    fn generated_sequence_has_round_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 1..=12 {
            let seq = Sequence::for_round(round, &mut rng);
            assert_eq!(seq.len(), sequence_length(round));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = Sequence::generate(8, &mut StdRng::seed_from_u64(3));
        let b = Sequence::generate(8, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn matches_requires_equal_length_and_order() {
        let seq = Sequence::from(vec![Up, Down, Left]);
        assert!(seq.matches(&[Up, Down, Left]));
        assert!(!seq.matches(&[Up, Down]));
        assert!(!seq.matches(&[Up, Down, Left, Left]));
        assert!(!seq.matches(&[Up, Left, Down]));
    }
}
