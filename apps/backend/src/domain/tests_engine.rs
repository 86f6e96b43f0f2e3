use crate::domain::cards::{Card, EffectType, TargetRule};
use crate::domain::catalog::CardCatalog;
use crate::domain::effects::Resolution;
use crate::domain::engine::{play_card, start_game};
use crate::domain::lobby::Phase;
use crate::domain::random::GameRng;
use crate::domain::rules::{HAND_SIZE, MAX_ROUNDS, STARTING_INFLUENCE};
use crate::domain::test_random::ScriptedRandom;
use crate::domain::test_state_helpers::{
    active_first_card, seat_id, started_lobby, waiting_lobby, HOST,
};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

fn fixed_add(id: &str, value: u64) -> Card {
    Card {
        id: id.to_string(),
        name: "Viral Post".to_string(),
        effect: EffectType::Add,
        target: TargetRule::Actor,
        min: value,
        max: value,
    }
}

#[test]
fn non_host_cannot_start() {
    let catalog = CardCatalog::placeholder();
    let mut lobby = waiting_lobby(2);
    let mut rng = ScriptedRandom::strict();

    let err = start_game(&mut lobby, &seat_id(1), &catalog, &mut rng).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::NotHost, _)));
    assert_eq!(lobby.phase, Phase::Waiting);
    assert!(lobby.players.iter().all(|p| p.hand.is_empty() && p.influence == 0));
}

#[test]
fn host_alone_cannot_start() {
    let catalog = CardCatalog::placeholder();
    let mut lobby = waiting_lobby(1);
    let mut rng = ScriptedRandom::strict();

    let err = start_game(&mut lobby, HOST, &catalog, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotEnoughPlayers, _)
    ));
    assert!(!lobby.is_started());
}

#[test]
fn start_deals_influence_and_hands() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(17);
    let lobby = started_lobby(4, &catalog, &mut rng);

    assert_eq!(lobby.phase, Phase::InProgress);
    assert_eq!(lobby.turn, 1);
    assert_eq!(lobby.active_idx, lobby.start_idx);
    for p in &lobby.players {
        assert!(STARTING_INFLUENCE.contains(&p.influence));
        assert_eq!(p.hand.len(), HAND_SIZE);
    }
    let first = &lobby.players[lobby.active_idx].name;
    assert!(lobby.last_action.contains(first.as_str()));
}

#[test]
fn first_player_comes_from_the_random_source() {
    let catalog = CardCatalog::placeholder();
    let mut lobby = waiting_lobby(3);
    // Placeholder cards draw only an index and an id per card.
    let mut rng = ScriptedRandom::with_fallback(4)
        .with_ints([500, 600, 700])
        .with_indices([0, 0, 0, 0, 0, 0, 0, 0, 0, 2]);

    start_game(&mut lobby, HOST, &catalog, &mut rng).expect("host starts");
    assert_eq!(lobby.active_idx, 2);
    assert_eq!(lobby.start_idx, 2);
    let influences: Vec<u64> = lobby.players.iter().map(|p| p.influence).collect();
    assert_eq!(influences, vec![500, 600, 700]);
}

#[test]
fn second_start_is_rejected() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(1);
    let mut lobby = started_lobby(2, &catalog, &mut rng);
    let before = lobby.players.clone();

    let err = start_game(&mut lobby, HOST, &catalog, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyStarted, _)
    ));
    assert_eq!(lobby.players, before);
}

#[test]
fn add_five_gains_exactly_five_and_passes_turn() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(8);
    let mut lobby = started_lobby(2, &catalog, &mut rng);
    lobby.active_idx = 0;
    lobby.start_idx = 0;
    lobby.players[0].influence = 100;
    lobby.players[0].hand[1] = fixed_add("viral", 5);
    let other = lobby.players[1].clone();

    let outcome = play_card(&mut lobby, HOST, "viral", &catalog, &mut rng).expect("legal play");

    assert_eq!(outcome.value, 5);
    assert_eq!(outcome.resolution, Resolution::Gained { amount: 5, after: 105 });
    assert!(!outcome.round_completed && !outcome.finished);
    assert_eq!(lobby.players[0].influence, 105);
    assert_eq!(lobby.players[1], other);
    assert!(lobby.last_action.contains("gained 5"));
    assert_eq!(lobby.active_idx, 1);
    assert_eq!(lobby.turn, 1);

    // Replacement lands in the same slot; the played card is gone.
    let hand = &lobby.players[0].hand;
    assert_eq!(hand.len(), HAND_SIZE);
    assert!(hand.iter().all(|c| c.id != "viral"));
    assert_eq!(outcome.played.id, "viral");
}

#[test]
fn out_of_turn_play_changes_nothing() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(21);
    let mut lobby = started_lobby(3, &catalog, &mut rng);
    let idle = (lobby.active_idx + 1) % 3;
    let idle_id = seat_id(idle);
    let card = lobby.players[idle].hand[0].id.clone();
    let before = (lobby.players.clone(), lobby.active_idx, lobby.last_action.clone());

    let err = play_card(&mut lobby, &idle_id, &card, &catalog, &mut rng).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::OutOfTurn, _)));
    assert_eq!((lobby.players.clone(), lobby.active_idx, lobby.last_action.clone()), before);
}

#[test]
fn unknown_card_is_rejected() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(2);
    let mut lobby = started_lobby(2, &catalog, &mut rng);
    let (active, _) = active_first_card(&lobby);
    let before = lobby.players.clone();

    let err = play_card(&mut lobby, &active, "nope", &catalog, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));
    assert_eq!(lobby.players, before);
}

#[test]
fn playing_before_start_is_a_phase_mismatch() {
    let catalog = CardCatalog::placeholder();
    let mut lobby = waiting_lobby(2);
    let mut rng = ScriptedRandom::strict();

    let err = play_card(&mut lobby, HOST, "any", &catalog, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn two_player_game_ends_after_five_rounds() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(5);
    let mut lobby = started_lobby(2, &catalog, &mut rng);

    let total = 2 * usize::from(MAX_ROUNDS);
    for n in 1..=total {
        let (actor, card) = active_first_card(&lobby);
        let outcome = play_card(&mut lobby, &actor, &card, &catalog, &mut rng).expect("legal play");
        assert_eq!(outcome.round_completed, n % 2 == 0);
        assert_eq!(outcome.finished, n == total);
    }

    assert_eq!(lobby.phase, Phase::Finished);
    assert_eq!(lobby.turn, MAX_ROUNDS + 1);

    let (actor, card) = active_first_card(&lobby);
    let err = play_card(&mut lobby, &actor, &card, &catalog, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn round_counts_from_the_starting_seat() {
    let catalog = CardCatalog::placeholder();
    let mut rng = GameRng::seeded(9);
    let mut lobby = started_lobby(3, &catalog, &mut rng);
    lobby.active_idx = 1;
    lobby.start_idx = 1;

    let mut seats = Vec::new();
    for _ in 0..3 {
        seats.push(lobby.active_idx);
        assert_eq!(lobby.turn, 1);
        let (actor, card) = active_first_card(&lobby);
        play_card(&mut lobby, &actor, &card, &catalog, &mut rng).expect("legal play");
    }
    assert_eq!(seats, vec![1, 2, 0]);
    assert_eq!(lobby.active_idx, 1);
    assert_eq!(lobby.turn, 2);
}

#[test]
fn same_seed_replays_identically() {
    let catalog = CardCatalog::new(vec![
        crate::domain::cards::CardTemplate {
            name: "Hijack".into(),
            effect: EffectType::Swap,
            target: TargetRule::Enemy,
            base_range: (1, 3),
        },
        crate::domain::cards::CardTemplate {
            name: "Flame".into(),
            effect: EffectType::Gamble,
            target: TargetRule::Enemy,
            base_range: (2, 2),
        },
    ])
    .expect("non-empty catalog");

    let run = |seed: u64| {
        let mut rng = GameRng::seeded(seed);
        let mut lobby = started_lobby(3, &catalog, &mut rng);
        let mut log = vec![lobby.last_action.clone()];
        while lobby.phase == Phase::InProgress {
            let (actor, card) = active_first_card(&lobby);
            play_card(&mut lobby, &actor, &card, &catalog, &mut rng).expect("legal play");
            log.push(lobby.last_action.clone());
        }
        (log, lobby.players)
    };

    assert_eq!(run(77), run(77));
}
