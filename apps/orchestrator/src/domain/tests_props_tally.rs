//! Property tests for vote tallying and the win check.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::roles::{Faction, Role};
use crate::domain::roster::{DeathCause, PlayerId};
use crate::domain::tally::{count_weighted, NORMAL_WEIGHT, SHERIFF_WEIGHT};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::roster_of;
use crate::domain::victory;

fn ballots_strategy() -> impl Strategy<Value = BTreeMap<PlayerId, PlayerId>> {
    prop::collection::btree_map(0u8..12, 0u8..12, 0..12)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Totals add up to the weighted ballot count and every leader holds the top total.
    #[test]
    fn prop_totals_and_leaders_are_consistent(
        ballots in ballots_strategy(),
        sheriff in prop::option::of(0u8..12),
    ) {
        let weight = |v: PlayerId| if Some(v) == sheriff { SHERIFF_WEIGHT } else { NORMAL_WEIGHT };
        let outcome = count_weighted(&ballots, weight);

        let expected: u32 = ballots.keys().map(|&v| weight(v)).sum();
        prop_assert_eq!(outcome.totals.values().sum::<u32>(), expected);
        prop_assert_eq!(outcome.is_empty(), ballots.is_empty());

        let top = outcome.totals.values().copied().max().unwrap_or(0);
        for id in &outcome.leaders {
            prop_assert_eq!(outcome.total_for(*id), top);
        }
        for (id, total) in &outcome.totals {
            prop_assert_eq!(*total == top, outcome.leaders.contains(id));
        }
    }

    /// The picked target is always one of the leaders, for any tie-break seed.
    #[test]
    fn prop_pick_is_a_leader(ballots in ballots_strategy(), seed in any::<u64>()) {
        let outcome = count_weighted(&ballots, |_| NORMAL_WEIGHT);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        match outcome.pick(&mut rng) {
            Some(id) => prop_assert!(outcome.leaders.contains(&id)),
            None => prop_assert!(ballots.is_empty()),
        }
    }

    /// Once decided, a result survives any number of further non-wolf deaths.
    #[test]
    fn prop_win_is_stable_under_more_losses(kills in prop::collection::vec(0u8..9, 0..9)) {
        let mut roster = roster_of(&[
            Role::Werewolf,
            Role::Werewolf,
            Role::Werewolf,
            Role::Villager,
            Role::Villager,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
            Role::Idiot,
        ]);
        let mut decided: Option<Faction> = None;
        for id in kills {
            if !roster.is_alive(id) {
                continue;
            }
            if decided.is_some() && roster.get(id).unwrap().role.is_wolf() {
                continue;
            }
            roster.eliminate(id, 1, DeathCause::Exile).unwrap();
            let now = victory::evaluate(&roster);
            if let Some(winner) = decided {
                prop_assert_eq!(now, Some(winner));
            }
            decided = decided.or(now);
        }
    }
}
