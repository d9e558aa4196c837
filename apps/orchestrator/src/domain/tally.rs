//! Majority computation with random tie-break.
//!
//! Weights are counted in half-votes so the sheriff's 1.5x ballot stays exact:
//! an ordinary ballot is worth [`NORMAL_WEIGHT`] (2), the sheriff's [`SHERIFF_WEIGHT`] (3).

use std::collections::BTreeMap;

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::domain::roster::PlayerId;

pub const NORMAL_WEIGHT: u32 = 2;
pub const SHERIFF_WEIGHT: u32 = 3;

/// Totals per target plus the set of targets sharing the top total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TallyOutcome {
    pub totals: BTreeMap<PlayerId, u32>,
    /// Ascending by id; empty when no ballots were cast.
    pub leaders: Vec<PlayerId>,
}

impl TallyOutcome {
    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }

    pub fn is_tie(&self) -> bool {
        self.leaders.len() > 1
    }

    pub fn unique_leader(&self) -> Option<PlayerId> {
        match self.leaders.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Winner with uniform tie-break among leaders.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PlayerId> {
        if let Some(id) = self.unique_leader() {
            return Some(id);
        }
        self.leaders.choose(rng).copied()
    }

    pub fn total_for(&self, id: PlayerId) -> u32 {
        self.totals.get(&id).copied().unwrap_or(0)
    }
}

/// Weighted count over `voter -> target` ballots.
pub fn count_weighted<F>(ballots: &BTreeMap<PlayerId, PlayerId>, weight: F) -> TallyOutcome
where
    F: Fn(PlayerId) -> u32,
{
    let mut totals: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for (&voter, &target) in ballots {
        *totals.entry(target).or_insert(0) += weight(voter);
    }
    let top = totals.values().copied().max().unwrap_or(0);
    let leaders = if top == 0 {
        Vec::new()
    } else {
        totals
            .iter()
            .filter(|(_, t)| **t == top)
            .map(|(&id, _)| id)
            .collect()
    };
    TallyOutcome { totals, leaders }
}

/// Every ballot weighs the same.
pub fn count(ballots: &BTreeMap<PlayerId, PlayerId>) -> TallyOutcome {
    count_weighted(ballots, |_| NORMAL_WEIGHT)
}

/// Weighted count followed by a uniform tie-break.
pub fn tally<F, R>(ballots: &BTreeMap<PlayerId, PlayerId>, weight: F, rng: &mut R) -> Option<PlayerId>
where
    F: Fn(PlayerId) -> u32,
    R: Rng + ?Sized,
{
    count_weighted(ballots, weight).pick(rng)
}

/// Render half-votes as a vote count: `5 -> "2.5"`, `4 -> "2"`.
pub fn format_votes(half_votes: u32) -> String {
    if half_votes % 2 == 0 {
        format!("{}", half_votes / 2)
    } else {
        format!("{}.5", half_votes / 2)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn ballots(pairs: &[(PlayerId, PlayerId)]) -> BTreeMap<PlayerId, PlayerId> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_ballots_have_no_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = count(&BTreeMap::new());
        assert!(outcome.is_empty());
        assert_eq!(outcome.pick(&mut rng), None);
    }

    #[test]
    fn sheriff_weight_breaks_two_two() {
        // sheriff (P1) and P4 vote P2; P3 and P5 vote P6
        let b = ballots(&[(0, 1), (3, 1), (2, 5), (4, 5)]);
        let outcome = count_weighted(&b, |v| if v == 0 { SHERIFF_WEIGHT } else { NORMAL_WEIGHT });
        assert_eq!(outcome.unique_leader(), Some(1));
        assert_eq!(format_votes(outcome.total_for(1)), "2.5");
        assert_eq!(format_votes(outcome.total_for(5)), "2");
    }

    #[test]
    fn ties_are_reported_and_broken_uniformly() {
        let b = ballots(&[(0, 1), (2, 1), (1, 3), (3, 1), (4, 3), (5, 3)]);
        let outcome = count(&b);
        assert!(outcome.is_tie());
        assert_eq!(outcome.leaders, vec![1, 3]);

        let mut seen = [0u32; 2];
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            match outcome.pick(&mut rng) {
                Some(1) => seen[0] += 1,
                Some(3) => seen[1] += 1,
                other => panic!("unexpected winner {other:?}"),
            }
        }
        assert!(seen[0] > 60 && seen[1] > 60, "skewed tie-break: {seen:?}");
    }

    #[test]
    fn formats_half_votes() {
        assert_eq!(format_votes(0), "0");
        assert_eq!(format_votes(3), "1.5");
        assert_eq!(format_votes(7), "3.5");
    }

    #[test]
    fn tally_counts_and_breaks_in_one_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(tally(&BTreeMap::new(), |_| NORMAL_WEIGHT, &mut rng), None);

        let b = ballots(&[(0, 1), (2, 5)]);
        let sheriff_first = |v: PlayerId| if v == 0 { SHERIFF_WEIGHT } else { NORMAL_WEIGHT };
        assert_eq!(tally(&b, sheriff_first, &mut rng), Some(1));

        let winner = tally(&b, |_| NORMAL_WEIGHT, &mut rng);
        assert!(matches!(winner, Some(1) | Some(5)));
    }
}
