//! Property tests for the turn engine (pure domain).
//!
//! Properties tested:
//! - Turns rotate round-robin from the starting seat
//! - A game always ends after exactly five rounds
//! - Hands stay at full size through the whole game
//! - A successful SWAP exchanges influence without creating or losing any
//! - Rejected plays never mutate the lobby

use proptest::prelude::*;

use crate::domain::effects::Resolution;
use crate::domain::engine::play_card;
use crate::domain::lobby::Phase;
use crate::domain::random::GameRng;
use crate::domain::rules::{next_seat, HAND_SIZE, MAX_ROUNDS};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{active_first_card, seat_id, started_lobby};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every game lasts exactly `count * MAX_ROUNDS` plays, in seat order
    #[test]
    fn prop_game_runs_five_full_rounds(
        count in test_gens::player_count(),
        catalog in test_gens::catalog(),
        seed in any::<u64>(),
    ) {
        let mut rng = GameRng::seeded(seed);
        let mut lobby = started_lobby(count, &catalog, &mut rng);
        let start = lobby.start_idx;
        let mut expected = start;
        let mut plays = 0usize;

        while lobby.phase == Phase::InProgress {
            prop_assert_eq!(lobby.active_idx, expected);
            prop_assert!(lobby.turn <= MAX_ROUNDS);

            let (actor, card) = active_first_card(&lobby);
            let outcome = play_card(&mut lobby, &actor, &card, &catalog, &mut rng)
                .expect("active player holds the card");
            plays += 1;
            expected = next_seat(expected, count);

            prop_assert_eq!(outcome.round_completed, expected == start);
            for p in &lobby.players {
                prop_assert_eq!(p.hand.len(), HAND_SIZE);
                prop_assert!(p.hand.iter().all(|c| 1 <= c.min && c.min <= c.max));
            }
        }

        prop_assert_eq!(plays, count * usize::from(MAX_ROUNDS));
        prop_assert_eq!(lobby.turn, MAX_ROUNDS + 1);
        prop_assert_eq!(lobby.phase, Phase::Finished);
    }

    /// Property: a successful SWAP only permutes influence between two seats
    #[test]
    fn prop_swap_preserves_total(
        count in test_gens::player_count(),
        seed in any::<u64>(),
    ) {
        let catalog = crate::domain::catalog::CardCatalog::new(vec![
            crate::domain::cards::CardTemplate {
                name: "Hijack".into(),
                effect: crate::domain::cards::EffectType::Swap,
                target: crate::domain::cards::TargetRule::Enemy,
                base_range: (1, 1),
            },
        ]).expect("non-empty catalog");
        let mut rng = GameRng::seeded(seed);
        let mut lobby = started_lobby(count, &catalog, &mut rng);

        while lobby.phase == Phase::InProgress {
            let before: Vec<u64> = lobby.players.iter().map(|p| p.influence).collect();
            let (actor, card) = active_first_card(&lobby);
            let outcome = play_card(&mut lobby, &actor, &card, &catalog, &mut rng)
                .expect("legal play");
            let after: Vec<u64> = lobby.players.iter().map(|p| p.influence).collect();

            match outcome.resolution {
                Resolution::Swapped { target, .. } => {
                    prop_assert_eq!(after[outcome.seat], before[target]);
                    prop_assert_eq!(after[target], before[outcome.seat]);
                    let mut a = after.clone();
                    let mut b = before.clone();
                    a.sort_unstable();
                    b.sort_unstable();
                    prop_assert_eq!(a, b);
                }
                Resolution::SwapFailed { .. } => prop_assert_eq!(after, before),
                other => prop_assert!(false, "unexpected resolution {:?}", other),
            }
        }
    }

    /// Property: plays by anyone but the active player are rejected without effect
    #[test]
    fn prop_out_of_turn_is_inert(
        count in test_gens::player_count(),
        catalog in test_gens::catalog(),
        seed in any::<u64>(),
        offset in 1usize..4,
    ) {
        let mut rng = GameRng::seeded(seed);
        let mut lobby = started_lobby(count, &catalog, &mut rng);
        let idle = (lobby.active_idx + offset) % count;
        prop_assume!(idle != lobby.active_idx);

        let card = lobby.players[idle].hand[0].id.clone();
        let before = (lobby.players.clone(), lobby.active_idx, lobby.turn, lobby.last_action.clone());
        let res = play_card(&mut lobby, &seat_id(idle), &card, &catalog, &mut rng);

        prop_assert!(res.is_err());
        prop_assert_eq!(
            (lobby.players.clone(), lobby.active_idx, lobby.turn, lobby.last_action.clone()),
            before
        );
    }
}
