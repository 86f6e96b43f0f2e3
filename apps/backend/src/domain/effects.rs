//! Effect resolution for a single played card.
//!
//! Pure over `(players, rng)`: the caller owns turn bookkeeping and
//! broadcasting. Influence is unsigned and every update clamps at 0 or
//! saturates at `u64::MAX`.

use crate::domain::cards::EffectType;
use crate::domain::lobby::Player;
use crate::domain::random::RandomSource;

/// Result of one coin flip in a GAMBLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GambleOutcome {
    Multiplied { factor: u64, after: u64 },
    Zeroed,
}

/// What an effect did, with enough numbers to narrate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Gained {
        amount: u64,
        after: u64,
    },
    Drained {
        target: usize,
        amount: u64,
        after: u64,
    },
    Swapped {
        target: usize,
        actor_after: u64,
        target_after: u64,
    },
    SwapFailed {
        target: usize,
    },
    Banned {
        target: usize,
        lost: u64,
    },
    Gambled {
        target: usize,
        actor: GambleOutcome,
        opponent: GambleOutcome,
    },
}

impl Resolution {
    /// Seat other than the actor touched by the effect, if any.
    pub fn target(&self) -> Option<usize> {
        match self {
            Resolution::Gained { .. } => None,
            Resolution::Drained { target, .. }
            | Resolution::Swapped { target, .. }
            | Resolution::SwapFailed { target }
            | Resolution::Banned { target, .. }
            | Resolution::Gambled { target, .. } => Some(*target),
        }
    }
}

/// Uniformly pick a seat other than `actor`, in join order.
fn pick_opponent<R: RandomSource + ?Sized>(count: usize, actor: usize, rng: &mut R) -> usize {
    let others: Vec<usize> = (0..count).filter(|&i| i != actor).collect();
    others[rng.index(others.len())]
}

fn gamble_side<R: RandomSource + ?Sized>(player: &mut Player, factor: u64, rng: &mut R) -> GambleOutcome {
    if rng.coin() {
        player.influence = player.influence.saturating_mul(factor);
        GambleOutcome::Multiplied {
            factor,
            after: player.influence,
        }
    } else {
        player.influence = 0;
        GambleOutcome::Zeroed
    }
}

/// Apply `effect` with rolled `value` on behalf of seat `actor`.
///
/// Requires at least two players; the engine only resolves effects in
/// started lobbies, which always satisfy that.
pub fn resolve<R: RandomSource + ?Sized>(
    players: &mut [Player],
    actor: usize,
    effect: EffectType,
    value: u64,
    rng: &mut R,
) -> Resolution {
    let count = players.len();
    debug_assert!(count >= 2, "effects need an opponent");

    match effect {
        EffectType::Add => {
            let p = &mut players[actor];
            p.influence = p.influence.saturating_add(value);
            Resolution::Gained {
                amount: value,
                after: p.influence,
            }
        }
        EffectType::Sub => {
            let target = pick_opponent(count, actor, rng);
            let t = &mut players[target];
            t.influence = t.influence.saturating_sub(value);
            Resolution::Drained {
                target,
                amount: value,
                after: t.influence,
            }
        }
        EffectType::Swap => {
            let target = pick_opponent(count, actor, rng);
            if rng.coin() {
                let actor_before = players[actor].influence;
                players[actor].influence = players[target].influence;
                players[target].influence = actor_before;
                Resolution::Swapped {
                    target,
                    actor_after: players[actor].influence,
                    target_after: players[target].influence,
                }
            } else {
                Resolution::SwapFailed { target }
            }
        }
        EffectType::Ban => {
            // Any seat, the actor included.
            let target = rng.index(count);
            let lost = players[target].influence;
            players[target].influence = 0;
            Resolution::Banned { target, lost }
        }
        EffectType::Gamble => {
            let target = pick_opponent(count, actor, rng);
            let actor_side = gamble_side(&mut players[actor], value, rng);
            let opponent_side = gamble_side(&mut players[target], value, rng);
            Resolution::Gambled {
                target,
                actor: actor_side,
                opponent: opponent_side,
            }
        }
    }
}

fn gamble_text(outcome: GambleOutcome) -> String {
    match outcome {
        GambleOutcome::Multiplied { factor, after } => format!("x{factor} ({after})"),
        GambleOutcome::Zeroed => "0".to_string(),
    }
}

fn seat_name(players: &[Player], seat: usize) -> &str {
    players
        .get(seat)
        .map(|p| p.name.as_str())
        .unwrap_or("someone")
}

/// Human-readable `last_action` line for a resolution.
pub fn narrate(players: &[Player], actor: usize, card_name: &str, resolution: &Resolution) -> String {
    let name = |seat: usize| seat_name(players, seat);
    let me = name(actor);

    match resolution {
        Resolution::Gained { amount, after } => {
            format!("{me} played \"{card_name}\" and gained {amount} influence (now {after})!")
        }
        Resolution::Drained {
            target,
            amount,
            after,
        } => format!(
            "{} lost {amount} influence to {me}'s \"{card_name}\" (now {after})!",
            name(*target)
        ),
        Resolution::Swapped {
            target,
            actor_after,
            target_after,
        } => format!(
            "Account takeover with \"{card_name}\" succeeded! {me} and {} swapped influence ({me}: {actor_after}, {}: {target_after})!",
            name(*target),
            name(*target)
        ),
        Resolution::SwapFailed { target } => format!(
            "Account takeover with \"{card_name}\" failed... {me} could not break {}'s security!",
            name(*target)
        ),
        Resolution::Banned { target, lost } => format!(
            "BANNED by \"{card_name}\"! {}'s {lost} influence vanished...",
            name(*target)
        ),
        Resolution::Gambled {
            target,
            actor: mine,
            opponent,
        } => format!(
            "Flame war via \"{card_name}\"! {me} went {}, {} went {}!",
            gamble_text(*mine),
            name(*target),
            gamble_text(*opponent)
        ),
    }
}
