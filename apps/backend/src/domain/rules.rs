use std::ops::RangeInclusive;

pub const MAX_PLAYERS: usize = 4;
pub const MIN_PLAYERS_TO_START: usize = 2;
pub const HAND_SIZE: usize = 3;

/// Rounds played before the game ends; the game is over once `turn > MAX_ROUNDS`.
pub const MAX_ROUNDS: u8 = 5;

/// Starting influence is dealt uniformly from this range.
pub const STARTING_INFLUENCE: RangeInclusive<u64> = 100..=2000;

pub const DEFAULT_PLAYER_NAME: &str = "USER";
pub const MAX_NAME_CHARS: usize = 24;

/// Seat after `idx` in a table of `count` players (round-robin).
#[inline]
pub fn next_seat(idx: usize, count: usize) -> usize {
    debug_assert!(count > 0, "next_seat on an empty table");
    (idx + 1) % count
}

/// Whether the round counter has passed the last round.
#[inline]
pub fn is_game_over(turn: u8) -> bool {
    turn > MAX_ROUNDS
}
